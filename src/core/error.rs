//! Error handling - Flat, typed signer errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Signer error hierarchy
#[derive(Debug, Error)]
pub enum Error {
    /// Empty or unusable API key / secret key
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Request URL has no decodable path or query
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// System clock cannot produce a UTC timestamp
    #[error("Clock unavailable: {0}")]
    ClockUnavailable(String),

    /// Header / parameter name or header value rejected
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Settings file or environment errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the failure means no signature header was attached.
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Error::MalformedUrl(_) | Error::ClockUnavailable(_))
    }
}
