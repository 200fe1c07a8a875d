//! Client-independent request representation

use url::Url;

use crate::core::{Error, Result, SignableRequest, is_header_token};

/// Owned HTTP request: method, URL, ordered header list, optional body.
///
/// Headers are an ordered multimap; appending never replaces an earlier
/// value with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: String,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::MalformedUrl(format!("{}: {}", url, e)))?;
        Ok(Self::from_url(method, url))
    }

    pub fn from_url(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: &str) -> Result<Self> {
        Self::new("GET", url)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        self.append_header(name, value)?;
        Ok(self)
    }

    /// First value for `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_all(name).next()
    }

    pub fn header_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Decoded query pairs in URL order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn into_parts(self) -> (String, Url, Vec<(String, String)>, Option<Vec<u8>>) {
        (self.method, self.url, self.headers, self.body)
    }
}

impl SignableRequest for HttpRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    fn append_header(&mut self, name: &str, value: &str) -> Result<()> {
        validate_header(name, value)?;
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Token names; no CR/LF in values.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if !is_header_token(name) {
        return Err(Error::InvalidName(format!("bad header name {:?}", name)));
    }
    if value.bytes().any(|b| b == b'\r' || b == b'\n' || b == 0) {
        return Err(Error::InvalidName(format!("bad value for header {}", name)));
    }
    Ok(())
}
