//! Configuration - Signer settings from a TOML file or the environment
//!
//! Credentials missing from the file are read from `XAUTH_API_KEY` and
//! `XAUTH_SECRET_KEY` (a `.env` file is honoured).

use serde::Deserialize;
use std::path::Path;

use super::error::{Error, Result};
use super::types::{NameOverrides, SignerOptions};
use crate::signer::RequestSigner;

pub const API_KEY_ENV: &str = "XAUTH_API_KEY";
pub const SECRET_KEY_ENV: &str = "XAUTH_SECRET_KEY";

/// Signer settings
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignerSettings {
    /// API key (loaded from env if not provided)
    pub api_key: Option<String>,

    /// Secret key (loaded from env if not provided)
    pub secret_key: Option<String>,

    /// URL-safe signature characters
    pub url_safe_encoding: bool,

    /// Sign the SHA-256 of non-empty bodies
    pub body_binding: bool,

    /// Send and sign a per-request nonce
    pub nonce: bool,

    /// Header / parameter name overrides
    pub names: NameOverrides,
}

impl SignerSettings {
    /// Load from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse TOML content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Settings with credentials taken from the environment only.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();
        settings.fill_from_env()?;
        Ok(settings)
    }

    /// Fill credentials the file left out from the environment.
    pub fn fill_from_env(&mut self) -> Result<()> {
        // Missing .env is fine
        dotenv::dotenv().ok();

        if self.api_key.is_none() {
            self.api_key = Some(read_env(API_KEY_ENV)?);
        }
        if self.secret_key.is_none() {
            self.secret_key = Some(read_env(SECRET_KEY_ENV)?);
        }
        Ok(())
    }

    pub fn options(&self) -> SignerOptions {
        SignerOptions {
            url_safe_encoding: self.url_safe_encoding,
            body_binding: self.body_binding,
            nonce: self.nonce,
        }
    }

    /// Build a signer. Credentials must be present by now.
    pub fn into_signer(self) -> Result<RequestSigner> {
        let options = self.options();
        let api_key = self
            .api_key
            .ok_or_else(|| Error::Config("api_key not set".to_string()))?;
        let secret_key = self
            .secret_key
            .ok_or_else(|| Error::Config("secret_key not set".to_string()))?;

        let mut signer = RequestSigner::new(api_key, secret_key.into_bytes(), options.url_safe_encoding)?
            .with_options(options);
        signer.configure(self.names)?;
        Ok(signer)
    }
}

impl std::fmt::Debug for SignerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerSettings")
            .field("api_key", &self.api_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("url_safe_encoding", &self.url_safe_encoding)
            .field("body_binding", &self.body_binding)
            .field("nonce", &self.nonce)
            .field("names", &self.names)
            .finish()
    }
}

fn read_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}
