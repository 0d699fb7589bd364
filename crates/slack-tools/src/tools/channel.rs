//! Channel reference resolution for in-channel search.

use crate::client::{Params, SlackClient};
use crate::error::{GatewayError, Result};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Public (`C…`) and private/group (`G…`) conversation IDs.
static CHANNEL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[CG][A-Z0-9]+$").expect("valid channel id pattern"));

/// How a caller referred to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Already a bare channel name (`#` stripped if it was there).
    Name(String),
    /// A conversation ID that needs a `conversations.info` lookup.
    Id(String),
}

impl ChannelRef {
    /// Classify a raw reference: `#general`, `C0123ABCD`, or `general`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix('#') {
            return Self::Name(name.to_string());
        }
        if CHANNEL_ID.is_match(raw) {
            return Self::Id(raw.to_string());
        }
        Self::Name(raw.to_string())
    }

    /// Resolve to a channel name, looking IDs up remotely.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the lookup yields no name, or any error of the
    /// `conversations.info` call itself.
    pub async fn resolve_name(self, client: &SlackClient) -> Result<String> {
        match self {
            Self::Name(name) => Ok(name),
            Self::Id(id) => {
                let mut params = Params::new();
                params.insert("channel".to_string(), json!(id));
                let info = client.get("conversations.info", &params).await?;
                info.get("channel")
                    .and_then(|c| c.get("name"))
                    .and_then(Value::as_str)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        GatewayError::Validation("Channel not found or not accessible.".to_string())
                    })
            }
        }
    }
}

/// Scope a search query to one channel with Slack's `in:` modifier.
#[must_use]
pub fn scoped_query(query: &str, channel_name: &str) -> String {
    format!("{query} in:#{channel_name}")
}
