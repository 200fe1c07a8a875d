//! API credential holder.
//!
//! The secret key is kept in a `SecretSlice` so it is never printed by
//! `Debug` and is zeroed on drop.

use secrecy::{ExposeSecret, SecretSlice};

use crate::core::{Error, Result};

/// API key plus MAC secret. Immutable once built.
pub struct Credentials {
    api_key: String,
    secret_key: SecretSlice<u8>,
}

impl Credentials {
    /// # Errors
    /// Returns `Error::InvalidCredential` if either value is empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<Vec<u8>>) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(Error::InvalidCredential("API key is empty".to_string()));
        }
        if secret_key.is_empty() {
            return Err(Error::InvalidCredential("secret key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret_key: SecretSlice::from(secret_key),
        })
    }

    /// Public identifier, safe to log.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Only for MAC computation. Never log the return value.
    pub(crate) fn expose_secret(&self) -> &[u8] {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
