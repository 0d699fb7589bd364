//! Transport client for the Slack Web API.
//!
//! Three request shapes are supported, matching what Slack methods accept:
//! - query-string `GET` (read methods)
//! - JSON `POST` (write methods that accept `application/json`)
//! - multipart `POST` (`files.upload`)
//!
//! Every response body is read in full and handed to [`crate::normalize::normalize`]; callers
//! never see a status code.

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::normalize::normalize;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// A Slack method parameter mapping.
pub type Params = Map<String, Value>;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Cheaply cloneable handle to the gateway transport.
///
/// Holds two HTTP clients: API calls never follow redirects, file fetches follow a bounded
/// number of them.
#[derive(Clone)]
pub struct SlackClient {
    pub(crate) inner: Arc<SlackClientInner>,
}

pub(crate) struct SlackClientInner {
    pub(crate) config: GatewayConfig,
    pub(crate) api: Client,
    pub(crate) files: Client,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Body of a multipart request: plain text fields plus at most one file part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name the part is sent under.
    pub field: String,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    /// Append a text field, skipping absent or empty values.
    pub fn text(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.fields.push((name.to_string(), v.to_string()));
        }
        self
    }

    fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(a) = self.attachment {
            let part = reqwest::multipart::Part::bytes(a.bytes)
                .file_name(a.filename)
                .mime_str(&a.mime_type)
                .map_err(|e| {
                    GatewayError::Validation(format!("Invalid mimeType '{}': {e}", a.mime_type))
                })?;
            form = form.part(a.field, part);
        }
        Ok(form)
    }
}

impl SlackClient {
    /// Build the transport for a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if an HTTP client cannot be constructed.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let api = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::Config(format!("build Slack API client: {e}")))?;
        let files = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_file_redirects))
            .build()
            .map_err(|e| GatewayError::Config(format!("build Slack file client: {e}")))?;

        Ok(Self {
            inner: Arc::new(SlackClientInner { config, api, files }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Call a read method with its parameters encoded in the query string.
    ///
    /// # Errors
    ///
    /// Returns the normalized classification of the exchange (see [`GatewayError`]).
    pub async fn get(&self, method: &str, params: &Params) -> Result<Value> {
        let mut url = self.inner.config.method_url(method)?;
        append_query(&mut url, params);
        debug!(method, "slack GET");
        let request = self.inner.api.get(url);
        self.execute(method, request).await
    }

    /// Call a write method with the full parameter mapping as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the normalized classification of the exchange (see [`GatewayError`]).
    pub async fn post_json(&self, method: &str, body: &Params) -> Result<Value> {
        let url = self.inner.config.method_url(method)?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| GatewayError::Validation(format!("encode {method} body: {e}")))?;
        debug!(method, "slack POST (json)");
        let request = self
            .inner
            .api
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .body(payload);
        self.execute(method, request).await
    }

    /// Call a method with a multipart form body.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an unusable attachment MIME type, otherwise the
    /// normalized classification of the exchange.
    pub async fn post_multipart(&self, method: &str, body: MultipartBody) -> Result<Value> {
        let url = self.inner.config.method_url(method)?;
        let has_attachment = body.attachment.is_some();
        let form = body.into_form()?;
        debug!(method, has_attachment, "slack POST (multipart)");
        let request = self.inner.api.post(url).multipart(form);
        self.execute(method, request).await
    }

    async fn execute(&self, method: &str, request: RequestBuilder) -> Result<Value> {
        let response = request
            .bearer_auth(self.inner.config.credential.expose())
            .send()
            .await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes);
        debug!(method, status, bytes = bytes.len(), "slack response");
        normalize(method, status, &body)
    }
}

/// Encode `params` as query entries on `url`.
///
/// Absent, `null` and empty-string values are dropped; every other key is written once.
pub fn append_query(url: &mut Url, params: &Params) {
    let pairs = query_pairs(params);
    if pairs.is_empty() {
        return;
    }
    let mut q = url.query_pairs_mut();
    for (k, v) in &pairs {
        q.append_pair(k, v);
    }
}

/// The `(key, value)` pairs a parameter mapping contributes to a query string.
#[must_use]
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(k, v)| query_value(v).map(|s| (k.clone(), s)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    let s = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    };
    (!s.is_empty()).then_some(s)
}
