//! Password and API key hashing.
//!
//! Both passwords and API key secrets are stored as argon2 PHC strings.
//! API key tokens are `kipo_` followed by 32 random bytes encoded as
//! unpadded URL-safe base64 (43 characters).

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::constants::{API_KEY_PREFIX, API_KEY_SECRET_BYTES};
use crate::errors::{Error, Result};

/// Length of the base64 part of an API key token.
const API_KEY_BODY_LEN: usize = (API_KEY_SECRET_BYTES * 4).div_ceil(3);

/// Hashes and verifies secrets with argon2id.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher {
    /// Builds a hasher with explicit argon2 cost parameters.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| Error::Credential(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, secret: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| Error::Credential(e.to_string()))
    }

    /// Returns `Ok(false)` on a mismatch; errors only for unreadable hashes.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| Error::Credential(format!("Invalid stored hash: {e}")))?;
        // Verification reads the cost parameters from the PHC string itself.
        match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(Error::Credential(other.to_string())),
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, secret: &str) -> Result<String> {
        let hasher = self.clone();
        let secret = secret.to_string();
        run_blocking(move || hasher.hash(&secret)).await?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(&self, secret: &str, stored_hash: &str) -> Result<bool> {
        let hasher = self.clone();
        let secret = secret.to_string();
        let stored_hash = stored_hash.to_string();
        run_blocking(move || hasher.verify(&secret, &stored_hash)).await?
    }
}

/// Runs CPU-heavy work such as argon2 off the async worker threads.
pub async fn run_blocking<F, T>(work: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Unexpected(format!("Blocking task failed: {e}")))
}

/// Generates a fresh API key token.
pub fn generate_api_token() -> String {
    let mut bytes = [0u8; API_KEY_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    format!("{}{}", API_KEY_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

/// Cheap shape check run before any hash comparison.
pub fn is_well_formed_api_token(token: &str) -> bool {
    let Some(body) = token.strip_prefix(API_KEY_PREFIX) else {
        return false;
    };
    body.len() == API_KEY_BODY_LEN
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
