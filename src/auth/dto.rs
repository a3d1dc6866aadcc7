use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::repo_types::User;

/// Signup fields that passed validation.
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login fields that passed validation.
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Body of every signup response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
    pub status: bool,
    pub msg: &'static str,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

impl fmt::Debug for SignupInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// What the account service hands back on a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn public_user_drops_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PublicUser::from(user.clone())).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["id"], user.id.to_string());
        assert_eq!(json.as_object().unwrap().len(), 3);
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn input_debug_redacts_password() {
        let signup = SignupInput {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
        };
        let login = LoginInput {
            email: "alice@example.com".into(),
            password: "hunter22".into(),
        };
        for dbg in [format!("{signup:?}"), format!("{login:?}")] {
            assert!(!dbg.contains("hunter22"), "{dbg}");
            assert!(dbg.contains("[redacted]"));
            assert!(dbg.contains("alice@example.com"));
        }
    }

    #[test]
    fn user_serialization_skips_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password_hash: "$argon2id$hidden".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hidden"));
    }
}
