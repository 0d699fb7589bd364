//! Binary fetcher for Slack-hosted file bytes.

use crate::client::SlackClient;
use crate::error::{GatewayError, Result};
use base64::Engine as _;
use mime::Mime;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::debug;
use url::Url;

/// MIME type used when the response does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// File content plus the MIME type it was served with. Lives for one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResource {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl BinaryResource {
    /// Standard (padded) base64 of the content, as carried in MCP blob resources.
    #[must_use]
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    #[must_use]
    pub fn is_textual(&self) -> bool {
        is_textual_mime(&self.mime_type)
    }

    /// Content decoded as UTF-8; invalid sequences become U+FFFD.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl SlackClient {
    /// Download bytes from a direct file URL with the gateway credential.
    ///
    /// Redirects are followed up to the configured limit. The whole body is buffered.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Validation`] if `url` is not an absolute URL
    /// - [`GatewayError::Transport`] on network failure or too many redirects
    /// - [`GatewayError::Http`] if the final response has status >= 400
    pub async fn fetch_binary(&self, url: &str) -> Result<BinaryResource> {
        let url = Url::parse(url)
            .map_err(|e| GatewayError::Validation(format!("Invalid file URL: {e}")))?;
        debug!(url = %crate::safety::redact_url(&url), "fetching file bytes");

        let response = self
            .inner
            .files
            .get(url)
            .bearer_auth(self.inner.config.credential.expose())
            .send()
            .await?;
        let status = response.status();
        let mime_type = content_type_of(response.headers());
        let bytes = response.bytes().await?.to_vec();

        if status.as_u16() >= 400 {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(BinaryResource { bytes, mime_type })
    }
}

/// First `content-type` value, or [`DEFAULT_MIME_TYPE`] when absent or unreadable.
#[must_use]
pub fn content_type_of(headers: &HeaderMap) -> String {
    headers
        .get_all(CONTENT_TYPE)
        .iter()
        .next()
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| DEFAULT_MIME_TYPE.to_string(), str::to_string)
}

/// `text/*` or `application/json`.
///
/// Matches on the essence, so `application/json; charset=utf-8` is textual too. This is wider
/// than an exact string comparison against `application/json`.
#[must_use]
pub fn is_textual_mime(mime_type: &str) -> bool {
    match mime_type.parse::<Mime>() {
        Ok(m) => m.type_() == mime::TEXT || m.essence_str() == "application/json",
        Err(_) => mime_type.starts_with("text/") || mime_type == "application/json",
    }
}
