//! `SignableRequest` for `reqwest::Request`
//!
//! Sign right before `Client::execute`:
//!
//! ```rust,ignore
//! let mut request = client.get("https://api.example.com/v1/items").build()?;
//! signer.encode_request(&mut request)?;
//! let response = client.execute(request).await?;
//! ```

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::core::{Error, Result, SignableRequest};

impl SignableRequest for reqwest::Request {
    fn method(&self) -> &str {
        reqwest::Request::method(self).as_str()
    }

    fn url(&self) -> &Url {
        reqwest::Request::url(self)
    }

    fn url_mut(&mut self) -> &mut Url {
        reqwest::Request::url_mut(self)
    }

    fn append_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidName(format!("bad header name {:?}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidName(format!("bad value for header {}: {}", name, e)))?;

        self.headers_mut().append(name, value);
        Ok(())
    }

    /// Streaming bodies are not visible here and read as `None`.
    fn body(&self) -> Option<&[u8]> {
        reqwest::Request::body(self).and_then(|b| b.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::{FixedClock, RequestSigner};
    use reqwest::Method;

    fn signer() -> RequestSigner {
        RequestSigner::new("abc", "secret", false)
            .unwrap()
            .with_clock(FixedClock::parse("2024-01-01T00:00:00Z").unwrap())
    }

    #[test]
    fn test_sign_reqwest_request() {
        let url = Url::parse("https://api.example.com/v1/items").unwrap();
        let mut request = reqwest::Request::new(Method::GET, url);

        signer().encode_request(&mut request).unwrap();

        let headers = request.headers();
        assert_eq!(request.url().query(), Some("apiKey=abc"));
        assert_eq!(headers["X-Auth-Timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(headers["X-Auth-Version"], "1");
        assert_eq!(
            headers["X-Auth-Signature"],
            "OsirdL0N+jfO0NGIr7tTwuILMh8U5EXlbOT/qOlau5A="
        );
    }

    #[test]
    fn test_existing_header_values_kept() {
        let url = Url::parse("https://api.example.com/v1/items").unwrap();
        let mut request = reqwest::Request::new(Method::GET, url);
        request
            .headers_mut()
            .insert("x-auth-version", HeaderValue::from_static("0"));

        signer().encode_request(&mut request).unwrap();

        let versions: Vec<_> = request.headers().get_all("x-auth-version").iter().collect();
        assert_eq!(versions, vec!["0", "1"]);
    }

    #[test]
    fn test_buffered_body_visible() {
        let url = Url::parse("https://api.example.com/v1/items").unwrap();
        let mut request = reqwest::Request::new(Method::POST, url);
        *request.body_mut() = Some(reqwest::Body::from("{\"qty\":1}"));

        assert_eq!(SignableRequest::body(&request), Some(&b"{\"qty\":1}"[..]));
        assert_eq!(SignableRequest::method(&request), "POST");
    }
}
