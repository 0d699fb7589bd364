//! Gateway configuration: where Slack lives and which credential to present.

use crate::error::{GatewayError, Result};
use crate::safety::mask_secret;
use std::fmt;
use std::sync::Arc;
use url::Url;
use zeroize::Zeroizing;

/// Slack Web API root; every method is addressed as `<base>/<method>`.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Redirect hops followed when fetching file bytes.
pub const MAX_FILE_REDIRECTS: usize = 5;

/// The process-wide bearer token.
///
/// Immutable once built; clones share the same zeroized buffer.
#[derive(Clone)]
pub struct Credential(Arc<Zeroizing<String>>);

impl Credential {
    /// Build a credential from raw input (surrounding whitespace is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the token is empty after trimming.
    pub fn new(raw: &str) -> Result<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(GatewayError::Config("Slack token is empty".to_string()));
        }
        Ok(Self(Arc::new(Zeroizing::new(token.to_string()))))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Log-safe rendering of the token.
    #[must_use]
    pub fn masked(&self) -> String {
        mask_secret(self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_base: String,
    pub credential: Credential,
    pub max_file_redirects: usize,
}

impl GatewayConfig {
    /// Configuration pointing at the public Slack API.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            credential,
            max_file_redirects: MAX_FILE_REDIRECTS,
        }
    }

    /// Override the API root (mock servers, enterprise proxies).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if `base` is not an absolute `http(s)` URL.
    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        let url = Url::parse(base)
            .map_err(|e| GatewayError::Config(format!("Invalid Slack API base '{base}': {e}")))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GatewayError::Config(format!(
                "Invalid Slack API base '{base}': unsupported scheme '{}'",
                url.scheme()
            )));
        }
        self.api_base = base.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Full URL of a Web API method.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the joined URL cannot be parsed.
    pub fn method_url(&self, method: &str) -> Result<Url> {
        let raw = format!("{}/{method}", self.api_base);
        Url::parse(&raw).map_err(|e| GatewayError::Config(format!("Invalid method URL '{raw}': {e}")))
    }
}
