//! xauth-signer - Request authentication encoder
//! HMAC-SHA256 signing of outbound HTTP requests (X-Auth protocol v1)

// Public modules
pub mod core;
pub mod request;
pub mod signer;
#[cfg(feature = "reqwest")]
pub mod adapter;

// Re-exports
pub use crate::core::{Error, NameOverrides, Result, SignableRequest, SignerOptions, SignerSettings};
pub use request::HttpRequest;
pub use signer::{AuthArtifacts, RequestSigner};
