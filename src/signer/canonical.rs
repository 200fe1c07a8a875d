//! Canonical message construction.
//!
//! ```text
//! apiKey + METHOD + "\n" + path + "?" + query + "\n" + timestamp + nonce [+ "\n" + hex(sha256(body))]
//! ```
//!
//! Path and query are percent-decoded first so both sides hash logical
//! characters rather than one particular URL encoding of them.

use std::borrow::Cow;
use url::Url;

use crate::core::{Error, Result};

/// Decoded path and query of a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target<'a> {
    pub path: Cow<'a, str>,
    pub query: Cow<'a, str>,
}

impl<'a> Target<'a> {
    pub fn from_url(url: &'a Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(Error::MalformedUrl(format!("{} has no hierarchical path", url)));
        }

        let path = urlencoding::decode(url.path())
            .map_err(|e| Error::MalformedUrl(format!("undecodable path {}: {}", url.path(), e)))?;

        let raw_query = url
            .query()
            .ok_or_else(|| Error::MalformedUrl(format!("{} has no query", url)))?;
        let query = urlencoding::decode(raw_query)
            .map_err(|e| Error::MalformedUrl(format!("undecodable query {}: {}", raw_query, e)))?;

        Ok(Self { path, query })
    }
}

/// Build the exact byte string the MAC is computed over.
pub fn message(
    api_key: &str,
    method: &str,
    target: &Target<'_>,
    timestamp: &str,
    nonce: &str,
    body_hash: Option<&str>,
) -> String {
    let mut message = format!(
        "{}{}\n{}?{}\n{}{}",
        api_key, method, target.path, target.query, timestamp, nonce
    );

    if let Some(hash) = body_hash {
        message.push('\n');
        message.push_str(hash);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_layout() {
        let url = Url::parse("https://api.example.com/v1/items?apiKey=abc").unwrap();
        let target = Target::from_url(&url).unwrap();

        let message = message("abc", "GET", &target, "2024-01-01T00:00:00Z", "", None);
        assert_eq!(message, "abcGET\n/v1/items?apiKey=abc\n2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_path_and_query_are_decoded() {
        let url = Url::parse("https://api.example.com/v1/my%20items?name=a%2Fb&apiKey=abc").unwrap();
        let target = Target::from_url(&url).unwrap();

        assert_eq!(target.path, "/v1/my items");
        assert_eq!(target.query, "name=a/b&apiKey=abc");
    }

    #[test]
    fn test_nonce_and_body_hash_appended() {
        let url = Url::parse("https://api.example.com/v1/items?apiKey=abc").unwrap();
        let target = Target::from_url(&url).unwrap();

        let message = message("abc", "POST", &target, "T", "n1", Some("ff"));
        assert_eq!(message, "abcPOST\n/v1/items?apiKey=abc\nTn1\nff");
    }

    #[test]
    fn test_missing_query_is_malformed() {
        let url = Url::parse("https://api.example.com/v1/items").unwrap();
        assert!(matches!(Target::from_url(&url), Err(Error::MalformedUrl(_))));
    }

    #[test]
    fn test_invalid_utf8_path_is_malformed() {
        let url = Url::parse("https://api.example.com/v1/%FF%FE?apiKey=abc").unwrap();
        assert!(matches!(Target::from_url(&url), Err(Error::MalformedUrl(_))));
    }

    #[test]
    fn test_cannot_be_a_base_is_malformed() {
        let url = Url::parse("mailto:someone@example.com?apiKey=abc").unwrap();
        assert!(matches!(Target::from_url(&url), Err(Error::MalformedUrl(_))));
    }
}
