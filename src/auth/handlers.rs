use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginResponse, MessageResponse},
        error::{AuthRejection, Flow},
        jwt::JwtKeys,
        services,
        validation::{json_type, validate_login, validate_signup},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthRejection> {
    let payload = body_or_null(payload);
    info!(shape = %payload_shape(&payload), "signup request");

    let input = validate_signup(&payload).map_err(|e| e.for_flow(Flow::Signup))?;
    services::signup(state.store.as_ref(), input)
        .await
        .map_err(|e| e.for_flow(Flow::Signup))?;

    Ok(Json(MessageResponse {
        msg: "Account created successfully!",
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthRejection> {
    let payload = body_or_null(payload);
    info!(shape = %payload_shape(&payload), "login request");

    let input = validate_login(&payload).map_err(|e| e.for_flow(Flow::Login))?;
    let keys = JwtKeys::from_ref(&state);
    let outcome = services::login(state.store.as_ref(), &keys, input)
        .await
        .map_err(|e| e.for_flow(Flow::Login))?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user,
        status: true,
        msg: "Login successful!",
    }))
}

/// An unreadable body is treated as one with no fields.
fn body_or_null(payload: Result<Json<Value>, JsonRejection>) -> Value {
    match payload {
        Ok(Json(v)) => v,
        Err(e) => {
            warn!(error = %e, "unreadable request body");
            Value::Null
        }
    }
}

/// Field names and JSON types, e.g. `{email: string, password: string}`.
/// Values are never included.
fn payload_shape(payload: &Value) -> String {
    match payload {
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}: {}", json_type(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        other => json_type(other).to_string(),
    }
}
