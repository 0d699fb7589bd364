//! Error types for `slack-mcp-tools`.

use crate::safety::sanitize_reqwest_error;
use serde_json::Value;
use thiserror::Error;

/// Every failure a tool call can surface.
///
/// The three transport-side variants (`Http`, `Malformed`, `Transport`) and `Api` make up the
/// single classification produced by [`crate::normalize`]; tools never inspect statuses
/// themselves.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Invalid gateway configuration (bad API base URL, HTTP client construction).
    #[error("config error: {0}")]
    Config(String),

    /// Tool arguments did not match the declared input schema.
    #[error("{message}")]
    InvalidArguments { message: String, data: Value },

    /// Contradictory or unresolvable input (detected before or in place of a network call).
    #[error("{0}")]
    Validation(String),

    /// Slack answered with an HTTP status >= 400.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Slack answered `"ok": false`.
    #[error("Slack {method} error: {code}")]
    Api { method: String, code: String },

    /// The response body was not JSON; the raw text is kept verbatim.
    #[error("{0}")]
    Malformed(String),

    /// Network-level failure (connect, TLS, body read, redirect limit).
    #[error("http transport error: {0}")]
    Transport(String),

    /// A bug on our side (e.g. a result block that failed to build).
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(sanitize_reqwest_error(&value))
    }
}

impl GatewayError {
    /// Whether this error belongs to the caller's input rather than the remote side.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArguments { .. } | Self::Validation(_))
    }

    /// The Slack error code, when the remote side rejected the call logically.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
