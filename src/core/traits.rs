//! Core traits - Seams between the signer, the HTTP client and the clock

use chrono::{DateTime, Utc};
use url::Url;

use super::error::Result;

/// A request the signer can read and augment in place.
///
/// Implemented for the crate's own [`crate::request::HttpRequest`] and, with
/// the `reqwest` feature, for `reqwest::Request`.
pub trait SignableRequest {
    /// HTTP method as sent on the wire (`GET`, `POST`, ...)
    fn method(&self) -> &str;

    fn url(&self) -> &Url;

    fn url_mut(&mut self) -> &mut Url;

    /// Add a header value. Existing values with the same name are kept.
    fn append_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// Body bytes, if the body is buffered in memory.
    fn body(&self) -> Option<&[u8]>;
}

/// Source of the signing timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<DateTime<Utc>>;
}
