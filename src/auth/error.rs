//! Failure taxonomy for signup and login, plus its HTTP rendering.
//!
//! `Display` carries diagnostic detail for logs. The user-facing `msg` is a
//! fixed string per cause and per endpoint, which the web client shows as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use super::repo::StoreError;
use super::validation::MIN_PASSWORD_LEN;

/// Which endpoint a failure is reported through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Signup,
    Login,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` must be a string, got {got}")]
    InvalidType {
        field: &'static str,
        got: &'static str,
    },
    #[error("password shorter than {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("email is not of the form local@domain.tld")]
    InvalidEmailFormat,
    #[error("email already registered")]
    DuplicateAccount,
    #[error("email not registered")]
    UnknownAccount,
    #[error("password does not match")]
    InvalidCredentials,
    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::DuplicateAccount,
            StoreError::Backend(e) => AuthError::Internal(e),
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self, flow: Flow) -> &'static str {
        match (self, flow) {
            (AuthError::MissingField { .. }, Flow::Signup) => "Please fill all the fields",
            (AuthError::MissingField { .. }, Flow::Login) => "Please enter all details!",
            (AuthError::InvalidType { .. }, _) => "Please send string values only",
            (AuthError::PasswordTooShort, _) => "Password must be at least 4 characters",
            (AuthError::InvalidEmailFormat, _) => "Invalid email format",
            (AuthError::DuplicateAccount, _) => "This email is already registered",
            (AuthError::UnknownAccount, _) => "This email is not registered!",
            (AuthError::InvalidCredentials, _) => "Incorrect password!",
            (AuthError::Internal(_), _) => "Internal Server Error",
        }
    }

    pub fn for_flow(self, flow: Flow) -> AuthRejection {
        AuthRejection { error: self, flow }
    }
}

/// An [`AuthError`] bound to the endpoint that produced it.
#[derive(Debug)]
pub struct AuthRejection {
    pub error: AuthError,
    pub flow: Flow,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            error!(flow = ?self.flow, error = %self.error, "request failed");
        } else {
            warn!(flow = ?self.flow, error = %self.error, "request rejected");
        }

        let msg = self.error.message(self.flow);
        let body = match self.flow {
            Flow::Signup => json!({ "msg": msg }),
            Flow::Login => json!({ "status": false, "msg": msg }),
        };
        (status, Json(body)).into_response()
    }
}
