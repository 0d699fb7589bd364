//! Tool argument validation and the typed inputs each tool narrows its arguments to.
//!
//! Arguments are checked against the advertised JSON Schema first (unknown keys, missing
//! required keys, types, bounds), then deserialized. Nothing here touches the network.

use super::catalog::ToolSpec;
use crate::client::Params;
use crate::error::{GatewayError, Result};
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Check `args` against the tool's declared input shape.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidArguments`] carrying a `validation-errors` payload that lists
/// every violation.
pub fn validate_arguments(spec: &ToolSpec, args: &Value) -> Result<()> {
    let props = spec
        .input_schema
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let required: Vec<&str> = spec
        .input_schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();

    let Some(args_obj) = args.as_object() else {
        return Err(GatewayError::InvalidArguments {
            message: "Invalid params: arguments must be a JSON object".to_string(),
            data: json!({ "type": "validation-errors", "violations": [] }),
        });
    };

    let valid_params: Vec<&str> = props.keys().map(String::as_str).collect();
    let mut violations: Vec<Value> = Vec::new();

    for k in args_obj.keys() {
        if props.contains_key(k) {
            continue;
        }
        violations.push(json!({
            "type": "invalid-parameter",
            "parameter": k,
            "suggestions": find_similar_strings(k, &valid_params),
            "validParameters": valid_params,
        }));
    }

    for r in &required {
        if !args_obj.contains_key(*r) {
            violations.push(json!({
                "type": "missing-required-parameter",
                "parameter": r,
            }));
        }
    }

    for e in spec.validator.iter_errors(args) {
        // Reported above with a nicer shape.
        if matches!(
            e.kind(),
            jsonschema::error::ValidationErrorKind::Required { .. }
        ) {
            continue;
        }
        violations.push(json!({
            "type": "constraint-violation",
            "message": e.to_string(),
            "instancePath": e.instance_path().to_string(),
        }));
    }

    if violations.is_empty() {
        return Ok(());
    }

    let message = summarize_violations(&violations);
    Err(GatewayError::InvalidArguments {
        message,
        data: json!({
            "type": "validation-errors",
            "violations": violations,
        }),
    })
}

fn summarize_violations(violations: &[Value]) -> String {
    let first_of = |kind: &str| {
        violations
            .iter()
            .find(|v| v.get("type").and_then(Value::as_str) == Some(kind))
    };

    if let Some(v) = first_of("invalid-parameter") {
        let p = v.get("parameter").and_then(Value::as_str).unwrap_or("?");
        let suggestion = v
            .get("suggestions")
            .and_then(Value::as_array)
            .and_then(|arr| arr.first())
            .and_then(Value::as_str);
        return match suggestion {
            Some(s) => format!("Invalid params: unknown parameter '{p}' (did you mean '{s}'?)"),
            None => format!("Invalid params: unknown parameter '{p}'"),
        };
    }
    if let Some(v) = first_of("missing-required-parameter") {
        let p = v.get("parameter").and_then(Value::as_str).unwrap_or("?");
        return format!("Invalid params: missing required parameter '{p}'");
    }
    format!(
        "Invalid params: validation failed with {} error(s)",
        violations.len()
    )
}

fn find_similar_strings(unknown: &str, known: &[&str]) -> Vec<String> {
    let mut candidates: Vec<(f64, String)> = Vec::new();
    for k in known {
        let score = strsim::jaro(unknown, k);
        if score > 0.7 {
            candidates.push((score, (*k).to_string()));
        }
    }
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(_, s)| s).collect()
}

/// Deserialize already-validated arguments into a tool's input type.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidArguments`] if the shape still does not fit.
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| GatewayError::InvalidArguments {
        message: format!("Invalid params: {e}"),
        data: json!({ "type": "validation-errors", "violations": [] }),
    })
}

/// Serialize a typed input into a Slack parameter mapping.
///
/// # Errors
///
/// Returns [`GatewayError::Internal`] if the value does not serialize to a JSON object.
pub fn to_params<T: Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GatewayError::Internal(format!(
            "expected parameter object, got {other}"
        ))),
        Err(e) => Err(GatewayError::Internal(format!("encode parameters: {e}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    PublicChannel,
    PrivateChannel,
    Im,
    Mpim,
}

impl ConversationType {
    pub const ALL: [Self; 4] = [
        Self::PublicChannel,
        Self::PrivateChannel,
        Self::Im,
        Self::Mpim,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublicChannel => "public_channel",
            Self::PrivateChannel => "private_channel",
            Self::Im => "im",
            Self::Mpim => "mpim",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    Score,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListConversationsArgs {
    pub types: Option<Vec<ConversationType>>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchHistoryArgs {
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMessagesArgs {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDir>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchInChannelArgs {
    pub channel: String,
    pub query: String,
    pub count: Option<u32>,
    pub sort: Option<SearchSort>,
    pub sort_dir: Option<SortDir>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileArgs {
    pub file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadFileArgs {
    pub file: String,
    #[serde(rename = "preferText", default)]
    pub prefer_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersListArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenDmArgs {
    #[serde(rename(serialize = "users", deserialize = "user"))]
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageArgs {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,
}

/// Raw `slack_upload_file` arguments, before the payload choice is resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileArgs {
    pub channels: Option<String>,
    pub filename: String,
    pub title: Option<String>,
    pub initial_comment: Option<String>,
    pub content: Option<String>,
    pub data_base64: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// What gets uploaded: text Slack stores as a snippet, or raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    Text(String),
    Binary { bytes: Vec<u8>, mime_type: String },
}

/// Metadata shared by both upload paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub filename: String,
    pub channels: Option<String>,
    pub title: Option<String>,
    pub initial_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub meta: UploadMeta,
    pub payload: UploadPayload,
}

impl UploadFileArgs {
    /// Resolve the text/binary choice. Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] when neither or both payloads are supplied, or when
    /// `data_base64` is not valid base64.
    pub fn resolve(self) -> Result<UploadRequest> {
        let content = self.content.filter(|s| !s.is_empty());
        let data_base64 = self.data_base64.filter(|s| !s.is_empty());

        let payload = match (content, data_base64) {
            (None, None) => {
                return Err(GatewayError::Validation(
                    "Provide either 'content' or 'data_base64'.".to_string(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(GatewayError::Validation(
                    "Provide either 'content' or 'data_base64', not both.".to_string(),
                ));
            }
            (Some(text), None) => UploadPayload::Text(text),
            (None, Some(b64)) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(b64.trim())
                    .map_err(|e| {
                        GatewayError::Validation(format!("'data_base64' is not valid base64: {e}"))
                    })?;
                let mime_type = self
                    .mime_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| crate::fetch::DEFAULT_MIME_TYPE.to_string());
                UploadPayload::Binary { bytes, mime_type }
            }
        };

        Ok(UploadRequest {
            meta: UploadMeta {
                filename: self.filename,
                channels: self.channels,
                title: self.title,
                initial_comment: self.initial_comment,
            },
            payload,
        })
    }
}
