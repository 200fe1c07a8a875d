//! Core types - Wire names and signer options

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Protocol version sent in the version header.
pub const PROTOCOL_VERSION: &str = "1";

pub const DEFAULT_API_KEY_PARAM: &str = "apiKey";
pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Auth-Signature";
pub const DEFAULT_TIMESTAMP_HEADER: &str = "X-Auth-Timestamp";
pub const DEFAULT_VERSION_HEADER: &str = "X-Auth-Version";
pub const DEFAULT_NONCE_HEADER: &str = "X-Auth-Nonce";

/// Names of the query parameter and headers the signer writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub api_key_param: String,
    pub signature_header: String,
    pub timestamp_header: String,
    pub version_header: String,
    /// Only written when nonces are enabled
    pub nonce_header: String,
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self {
            api_key_param: DEFAULT_API_KEY_PARAM.to_string(),
            signature_header: DEFAULT_SIGNATURE_HEADER.to_string(),
            timestamp_header: DEFAULT_TIMESTAMP_HEADER.to_string(),
            version_header: DEFAULT_VERSION_HEADER.to_string(),
            nonce_header: DEFAULT_NONCE_HEADER.to_string(),
        }
    }
}

impl HeaderNames {
    /// Every name must be usable on the wire: a non-empty parameter name and
    /// RFC 7230 tokens for the headers.
    pub fn validate_for_wire(&self) -> Result<()> {
        check_name("api_key_param", &self.api_key_param, false)?;
        check_name("signature_header", &self.signature_header, true)?;
        check_name("timestamp_header", &self.timestamp_header, true)?;
        check_name("version_header", &self.version_header, true)?;
        check_name("nonce_header", &self.nonce_header, true)
    }

    /// Apply a partial override. Nothing changes unless every given name is valid.
    pub fn apply(&mut self, overrides: &NameOverrides) -> Result<()> {
        overrides.validate()?;

        let slots = [
            (&mut self.api_key_param, &overrides.api_key_param),
            (&mut self.signature_header, &overrides.signature_header),
            (&mut self.timestamp_header, &overrides.timestamp_header),
            (&mut self.version_header, &overrides.version_header),
            (&mut self.nonce_header, &overrides.nonce_header),
        ];
        for (slot, value) in slots {
            if let Some(name) = value {
                *slot = name.clone();
            }
        }
        Ok(())
    }
}

/// Partial override of [`HeaderNames`]; `None` keeps the current name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameOverrides {
    pub api_key_param: Option<String>,
    pub signature_header: Option<String>,
    pub timestamp_header: Option<String>,
    pub version_header: Option<String>,
    pub nonce_header: Option<String>,
}

impl NameOverrides {
    pub fn api_key_param(mut self, name: impl Into<String>) -> Self {
        self.api_key_param = Some(name.into());
        self
    }

    pub fn signature_header(mut self, name: impl Into<String>) -> Self {
        self.signature_header = Some(name.into());
        self
    }

    pub fn timestamp_header(mut self, name: impl Into<String>) -> Self {
        self.timestamp_header = Some(name.into());
        self
    }

    pub fn version_header(mut self, name: impl Into<String>) -> Self {
        self.version_header = Some(name.into());
        self
    }

    pub fn nonce_header(mut self, name: impl Into<String>) -> Self {
        self.nonce_header = Some(name.into());
        self
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("api_key_param", &self.api_key_param, false),
            ("signature_header", &self.signature_header, true),
            ("timestamp_header", &self.timestamp_header, true),
            ("version_header", &self.version_header, true),
            ("nonce_header", &self.nonce_header, true),
        ];
        for (field, value, is_header) in fields {
            if let Some(name) = value {
                check_name(field, name, is_header)?;
            }
        }
        Ok(())
    }
}

/// RFC 7230 `token`: the characters allowed in a header field name.
pub fn is_header_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

fn check_name(field: &str, name: &str, is_header: bool) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName(format!("{} must not be empty", field)));
    }
    if is_header && !is_header_token(name) {
        return Err(Error::InvalidName(format!(
            "{} {:?} is not a valid header name",
            field, name
        )));
    }
    Ok(())
}

/// Optional signature extensions. Both are off unless asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerOptions {
    /// Select the URL-safe character substitution for the signature
    pub url_safe_encoding: bool,
    /// Fold SHA-256 of a non-empty body into the signed message
    pub body_binding: bool,
    /// Generate a per-request nonce and sign it
    pub nonce: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let names = HeaderNames::default();
        assert_eq!(names.api_key_param, "apiKey");
        assert_eq!(names.signature_header, "X-Auth-Signature");
        assert_eq!(names.timestamp_header, "X-Auth-Timestamp");
        assert_eq!(names.version_header, "X-Auth-Version");
    }

    #[test]
    fn test_partial_override_keeps_other_names() {
        let mut names = HeaderNames::default();
        names
            .apply(&NameOverrides::default().signature_header("X-Sig"))
            .unwrap();

        assert_eq!(names.signature_header, "X-Sig");
        assert_eq!(names.timestamp_header, "X-Auth-Timestamp");
        assert_eq!(names.api_key_param, "apiKey");
    }

    #[test]
    fn test_empty_override_rejected_atomically() {
        let mut names = HeaderNames::default();
        let overrides = NameOverrides::default()
            .api_key_param("key")
            .version_header("  ");

        assert!(matches!(names.apply(&overrides), Err(Error::InvalidName(_))));
        assert_eq!(names, HeaderNames::default());
    }

    #[test]
    fn test_non_token_header_names_rejected() {
        let bad = [
            NameOverrides::default().signature_header("X Sig"),
            NameOverrides::default().timestamp_header("X-Ts\r\n"),
            NameOverrides::default().version_header("X:Ver"),
            NameOverrides::default().nonce_header("X(Nonce)"),
        ];
        for overrides in bad {
            let mut names = HeaderNames::default();
            assert!(
                matches!(names.apply(&overrides), Err(Error::InvalidName(_))),
                "{:?} accepted",
                overrides
            );
            assert_eq!(names, HeaderNames::default());
        }
    }

    #[test]
    fn test_api_key_param_need_not_be_token() {
        let mut names = HeaderNames::default();
        names
            .apply(&NameOverrides::default().api_key_param("api key"))
            .unwrap();
        assert_eq!(names.api_key_param, "api key");
        assert!(names.validate_for_wire().is_ok());
    }

    #[test]
    fn test_validate_for_wire() {
        assert!(HeaderNames::default().validate_for_wire().is_ok());

        let names = HeaderNames {
            version_header: "X:Ver".to_string(),
            ..HeaderNames::default()
        };
        assert!(matches!(names.validate_for_wire(), Err(Error::InvalidName(_))));
    }
}
