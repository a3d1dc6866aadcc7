use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{encode, EncodingKey, Header};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::{
    config::{JwtConfig, MAX_TOKEN_TTL_MINUTES},
    state::AppState,
};

/// Signing material for access tokens.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    #[cfg(test)]
    pub decoding: jsonwebtoken::DecodingKey,
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            access_ttl: Duration::from_secs(
                cfg.ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES) as u64 * 60,
            ),
            #[cfg(test)]
            decoding: jsonwebtoken::DecodingKey::from_secret(cfg.secret.as_bytes()),
        }
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn sign_access(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.access_ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }
}

// Verification belongs to whatever guards protected routes; tests only need
// it to check what login hands out.
#[cfg(test)]
impl JwtKeys {
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
