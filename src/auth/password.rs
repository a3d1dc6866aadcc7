use anyhow::{anyhow, Context};
use argon2::{
    password_hash::{Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// PHC string (`$argon2id$...`) with a fresh random salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| anyhow!("argon2 hash failed: {e}"))
}

/// `Ok(false)` only for a well-formed hash of some other password. A hash
/// that cannot be parsed, names another algorithm, or carries invalid
/// parameters is an `Err`.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow!("stored hash is not a PHC string: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(anyhow!("stored hash cannot be checked: {e}")),
    }
}

// Argon2 is CPU-bound; keep it off the async workers.

pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_never_equals_plaintext_and_verifies_only_same_password() {
        let hash = hash_password("secret").expect("hashing should succeed");
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).expect("verify should succeed"));
        assert!(!verify_password("Secret", &hash).expect("verify should not error"));
        assert!(!verify_password("secret ", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("secret").expect("hash a");
        let b = hash_password("secret").expect("hash b");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn verify_errors_on_invalid_argon2_params() {
        // m=1 is below Argon2's minimum memory cost
        let stored = "$argon2id$v=19$m=1,t=1,p=1$c2FsdHNhbHRzYWx0$aGFzaGhhc2hoYXNoaGFzaA";
        assert!(verify_password("secret", stored).is_err());
    }

    #[test]
    fn verify_errors_on_foreign_algorithm() {
        let stored = "$pbkdf2-sha256$i=1000$c2FsdHNhbHRzYWx0$aGFzaGhhc2hoYXNoaGFzaA";
        assert!(verify_password("secret", stored).is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_roundtrip() {
        let hash = hash_password_blocking("hunter22".into())
            .await
            .expect("hash on blocking pool");
        assert!(verify_password_blocking("hunter22".into(), hash.clone())
            .await
            .expect("verify on blocking pool"));
        assert!(!verify_password_blocking("hunter23".into(), hash)
            .await
            .expect("verify on blocking pool"));
    }
}
