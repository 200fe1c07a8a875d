//! HMAC-SHA256 over the canonical message, Base64 for transport

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::core::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Raw 32-byte HMAC-SHA256 digest.
pub fn digest(secret: &[u8], message: &[u8]) -> Result<[u8; 32]> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| Error::InvalidCredential(format!("unusable MAC key: {}", e)))?;

    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

/// Standard-alphabet Base64 of the digest, optionally URL-safe transformed.
pub fn sign(secret: &[u8], message: &[u8], url_safe: bool) -> Result<String> {
    let encoded = BASE64.encode(digest(secret, message)?);
    Ok(if url_safe { url_safe_transform(&encoded) } else { encoded })
}

/// `/` -> `_` and `+` -> `-`. Padding stays, servers expect it.
pub fn url_safe_transform(encoded: &str) -> String {
    encoded
        .chars()
        .map(|c| match c {
            '/' => '_',
            '+' => '-',
            other => other,
        })
        .collect()
}

/// Lowercase hex SHA-256, used for body binding.
pub fn body_hash(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}
