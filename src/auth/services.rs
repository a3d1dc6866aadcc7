//! Account service: signup and login against a [`UserStore`].

use anyhow::Context;
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    dto::{LoginInput, LoginOutcome, PublicUser, SignupInput},
    error::AuthError,
    jwt::JwtKeys,
    password::{hash_password_blocking, verify_password_blocking},
    repo::UserStore,
    repo_types::{NewUser, User},
};

/// Creates the account. The lookup only short-circuits the common case;
/// the store's own uniqueness check decides concurrent signups.
pub async fn signup(store: &dyn UserStore, input: SignupInput) -> Result<User, AuthError> {
    let SignupInput {
        name,
        email,
        password,
    } = input;

    if store.find_by_email(&email).await?.is_some() {
        return Err(AuthError::DuplicateAccount);
    }

    let password_hash = hash_password_blocking(password)
        .await
        .context("hash password")?;

    let user = store
        .insert(NewUser {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    input: LoginInput,
) -> Result<LoginOutcome, AuthError> {
    let LoginInput { email, password } = input;

    let user = store
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::UnknownAccount)?;

    let matches = verify_password_blocking(password, user.password_hash.clone())
        .await
        .with_context(|| format!("verify stored hash for user {}", user.id))?;
    if !matches {
        debug!(user_id = %user.id, "password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    let token = keys.sign_access(user.id).context("sign access token")?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(LoginOutcome {
        token,
        user: PublicUser::from(user),
    })
}
