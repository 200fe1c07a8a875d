//! Request signer - Injects API key, timestamp, signature and version
//!
//! Encoding order is fixed: the API key goes into the URL before the
//! signature is computed, and the timestamp is read once and reused for
//! both the header and the signed message.

pub mod canonical;
pub mod clock;
pub mod credentials;
pub mod mac;

pub use clock::{FixedClock, SystemClock};
pub use credentials::Credentials;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::core::{
    Clock, HeaderNames, NameOverrides, PROTOCOL_VERSION, Result, SignableRequest, SignerOptions,
};
use canonical::Target;

/// Per-call state: the captured timestamp and the optional nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    pub timestamp: String,
    pub nonce: Option<String>,
}

impl SigningContext {
    pub fn new(at: &DateTime<Utc>, with_nonce: bool) -> Self {
        Self {
            timestamp: clock::format_timestamp(at),
            nonce: with_nonce.then(|| uuid::Uuid::new_v4().simple().to_string()),
        }
    }

    fn nonce_str(&self) -> &str {
        self.nonce.as_deref().unwrap_or("")
    }
}

/// What `encode_request` attached to the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthArtifacts {
    pub timestamp: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// HMAC-SHA256 request signer.
///
/// Credentials are fixed at construction. Names can be changed through
/// [`RequestSigner::configure`], which takes `&mut self`, so a signer shared
/// across threads must be configured before it is shared.
pub struct RequestSigner {
    credentials: Credentials,
    names: HeaderNames,
    options: SignerOptions,
    clock: Box<dyn Clock>,
}

impl RequestSigner {
    /// # Errors
    /// `Error::InvalidCredential` if the API key or secret key is empty.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<Vec<u8>>,
        url_safe_encoding: bool,
    ) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::new(api_key, secret_key)?,
            names: HeaderNames::default(),
            options: SignerOptions {
                url_safe_encoding,
                ..SignerOptions::default()
            },
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_options(mut self, options: SignerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_names(mut self, overrides: NameOverrides) -> Result<Self> {
        self.configure(overrides)?;
        Ok(self)
    }

    /// Override some of the parameter / header names. Empty names and header
    /// names that are not HTTP tokens are rejected.
    pub fn configure(&mut self, overrides: NameOverrides) -> Result<()> {
        self.names.apply(&overrides)?;
        tracing::debug!(names = ?self.names, "signer names configured");
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn names(&self) -> &HeaderNames {
        &self.names
    }

    pub fn options(&self) -> SignerOptions {
        self.options
    }

    /// Authenticate `request` in place.
    ///
    /// Configured names are checked before anything is written, so a bad
    /// name leaves the request untouched.
    ///
    /// On a signature failure the API key parameter and timestamp header stay
    /// on the request but neither the signature nor the version header is
    /// added, and the error is returned.
    pub fn encode_request<R>(&self, request: &mut R) -> Result<AuthArtifacts>
    where
        R: SignableRequest + ?Sized,
    {
        self.names.validate_for_wire()?;
        let now = self.clock.now()?;
        let context = SigningContext::new(&now, self.options.nonce);

        append_query_param(request.url_mut(), &self.names.api_key_param, self.credentials.api_key());

        request.append_header(&self.names.timestamp_header, &context.timestamp)?;

        let signature = match self.compute_signature(
            request.method(),
            request.url(),
            &context.timestamp,
            context.nonce_str(),
            request.body(),
        ) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!(method = request.method(), error = %e, "request left unsigned");
                return Err(e);
            }
        };
        request.append_header(&self.names.signature_header, &signature)?;

        if let Some(nonce) = &context.nonce {
            request.append_header(&self.names.nonce_header, nonce)?;
        }

        request.append_header(&self.names.version_header, PROTOCOL_VERSION)?;

        tracing::debug!(
            method = request.method(),
            path = request.url().path(),
            timestamp = %context.timestamp,
            "request signed"
        );

        Ok(AuthArtifacts {
            timestamp: context.timestamp,
            signature,
            nonce: context.nonce,
        })
    }

    /// Signature over an already-keyed URL.
    ///
    /// `body` only contributes when body binding is on and it is non-empty.
    pub fn compute_signature(
        &self,
        method: &str,
        url: &Url,
        timestamp: &str,
        nonce: &str,
        body: Option<&[u8]>,
    ) -> Result<String> {
        let target = Target::from_url(url)?;

        let body_hash = match body {
            Some(bytes) if self.options.body_binding && !bytes.is_empty() => Some(mac::body_hash(bytes)),
            _ => None,
        };

        let message = canonical::message(
            self.credentials.api_key(),
            method,
            &target,
            timestamp,
            nonce,
            body_hash.as_deref(),
        );
        tracing::trace!(len = message.len(), "canonical message built");

        mac::sign(
            self.credentials.expose_secret(),
            message.as_bytes(),
            self.options.url_safe_encoding,
        )
    }
}

/// Append `name=value` after any existing query, percent-encoding both
/// (space becomes `%20`, never `+`). Existing query text is left as is.
fn append_query_param(url: &mut Url, name: &str, value: &str) {
    let pair = format!("{}={}", urlencoding::encode(name), urlencoding::encode(value));
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, pair),
        _ => pair,
    };
    url.set_query(Some(&query));
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("credentials", &self.credentials)
            .field("names", &self.names)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
