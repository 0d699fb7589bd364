//! Response normalization.
//!
//! Slack methods answer with wildly different payload shapes, but all of them share the same
//! outer contract: an HTTP status, and a JSON object carrying an `ok` flag plus an `error` code on
//! failure. This module folds status, parse failures and the `ok` flag into one classification.

use crate::error::{GatewayError, Result};
use serde_json::Value;

/// Error code reported when Slack says `"ok": false` without naming a reason.
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// A decoded Slack response body.
///
/// The success payload stays an opaque JSON value; each tool narrows it to what it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SlackResponse {
    Ok(Value),
    Err { code: String },
}

impl SlackResponse {
    /// Classify an already-decoded body.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        if body.get("ok") == Some(&Value::Bool(false)) {
            let code = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ERROR)
                .to_string();
            return Self::Err { code };
        }
        Self::Ok(body)
    }

    /// Turn the envelope into a `Result`, attributing failures to `method`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Api`] for the failure case.
    pub fn into_result(self, method: &str) -> Result<Value> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err { code } => Err(GatewayError::Api {
                method: method.to_string(),
                code,
            }),
        }
    }
}

/// Classify a raw HTTP exchange with a Slack Web API method.
///
/// Order matters: an HTTP failure wins over whatever the body says, then the body must parse,
/// then the `ok` flag decides.
///
/// # Errors
///
/// - [`GatewayError::Http`] when `status >= 400` (status + raw body)
/// - [`GatewayError::Malformed`] when the body is not JSON (raw body verbatim)
/// - [`GatewayError::Api`] when the body carries `"ok": false`
pub fn normalize(method: &str, status: u16, body: &str) -> Result<Value> {
    if status >= 400 {
        return Err(GatewayError::Http {
            status,
            body: body.to_string(),
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|_| GatewayError::Malformed(body.to_string()))?;

    SlackResponse::from_body(value).into_result(method)
}
