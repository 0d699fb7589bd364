//! Registration metadata for every exposed tool: name, title, description, input schema and
//! annotations.

use crate::error::{GatewayError, Result};
use crate::semantics::{ToolEffect, annotations_for};
use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListConversations,
    FetchHistory,
    SearchMessages,
    SearchInChannel,
    ListFiles,
    GetFileInfo,
    DownloadFile,
    UploadFile,
    DeleteFile,
    UsersList,
    OpenDm,
    PostMessage,
}

impl ToolName {
    pub const ALL: [Self; 12] = [
        Self::ListConversations,
        Self::FetchHistory,
        Self::SearchMessages,
        Self::SearchInChannel,
        Self::ListFiles,
        Self::GetFileInfo,
        Self::DownloadFile,
        Self::UploadFile,
        Self::DeleteFile,
        Self::UsersList,
        Self::OpenDm,
        Self::PostMessage,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListConversations => "slack_list_conversations",
            Self::FetchHistory => "slack_fetch_history",
            Self::SearchMessages => "slack_search_messages",
            Self::SearchInChannel => "slack_search_in_channel",
            Self::ListFiles => "slack_list_files",
            Self::GetFileInfo => "slack_get_file_info",
            Self::DownloadFile => "slack_download_file",
            Self::UploadFile => "slack_upload_file",
            Self::DeleteFile => "slack_delete_file",
            Self::UsersList => "slack_users_list",
            Self::OpenDm => "slack_open_dm",
            Self::PostMessage => "slack_post_message",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GatewayError::InvalidArguments {
                message: format!("unknown tool: {s}"),
                data: json!({ "type": "unknown-tool", "tool": s }),
            })
    }
}

/// A registered tool with its compiled input validator.
pub struct ToolSpec {
    pub name: ToolName,
    pub title: &'static str,
    pub description: &'static str,
    pub effect: ToolEffect,
    pub input_schema: Value,
    pub(crate) validator: jsonschema::Validator,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("effect", &self.effect)
            .finish_non_exhaustive()
    }
}

impl ToolSpec {
    fn new(
        name: ToolName,
        title: &'static str,
        description: &'static str,
        effect: ToolEffect,
        input_schema: Value,
    ) -> Result<Self> {
        let validator = jsonschema::validator_for(&input_schema).map_err(|e| {
            GatewayError::Config(format!("invalid input schema for tool '{name}': {e}"))
        })?;
        Ok(Self {
            name,
            title,
            description,
            effect,
            input_schema,
            validator,
        })
    }

    /// The MCP `Tool` advertised in `tools/list`.
    #[must_use]
    pub fn to_tool(&self) -> Tool {
        let schema_obj = self
            .input_schema
            .as_object()
            .cloned()
            .unwrap_or_else(JsonObject::new);
        let mut tool = Tool::new(self.name.as_str(), self.description, Arc::new(schema_obj));
        tool.annotations = Some(annotations_for(self.title, self.effect));
        tool
    }
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn bounded_int(min: u32, max: Option<u32>) -> Value {
    let mut s = json!({ "type": "integer", "minimum": min });
    if let Some(max) = max {
        s["maximum"] = json!(max);
    }
    s
}

fn non_empty_string() -> Value {
    json!({ "type": "string", "minLength": 1 })
}

fn string() -> Value {
    json!({ "type": "string" })
}

fn sort_props() -> (Value, Value) {
    (
        json!({ "type": "string", "enum": ["score", "timestamp"] }),
        json!({ "type": "string", "enum": ["asc", "desc"] }),
    )
}

/// Build the full tool catalog, in registration order.
///
/// # Errors
///
/// Returns [`GatewayError::Config`] if a built-in schema fails to compile.
#[allow(clippy::too_many_lines)]
pub fn build_catalog() -> Result<Vec<ToolSpec>> {
    let (sort, sort_dir) = sort_props();

    Ok(vec![
        ToolSpec::new(
            ToolName::ListConversations,
            "List Slack conversations",
            "List channels/DMs visible to the user token.",
            ToolEffect::Read,
            object_schema(
                json!({
                    "types": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["public_channel", "private_channel", "im", "mpim"]
                        }
                    },
                    "limit": bounded_int(1, Some(1000)),
                    "cursor": string(),
                }),
                &[],
            ),
        )?,
        ToolSpec::new(
            ToolName::FetchHistory,
            "Fetch conversation history",
            "conversations.history for public/private/DM/MPIM.",
            ToolEffect::Read,
            object_schema(
                json!({
                    "channel": non_empty_string(),
                    "oldest": string(),
                    "latest": string(),
                    "inclusive": { "type": "boolean" },
                    "limit": bounded_int(1, Some(1000)),
                    "cursor": string(),
                }),
                &["channel"],
            ),
        )?,
        ToolSpec::new(
            ToolName::SearchMessages,
            "Search Slack messages",
            "search.messages respecting your user visibility.",
            ToolEffect::Read,
            object_schema(
                json!({
                    "query": non_empty_string(),
                    "count": bounded_int(1, Some(100)),
                    "sort": sort,
                    "sort_dir": sort_dir,
                }),
                &["query"],
            ),
        )?,
        ToolSpec::new(
            ToolName::SearchInChannel,
            "Search messages in a specific channel",
            "Search Slack messages limited to one channel (public or private) by channel name \
             (e.g. #general) or ID (C…/G…).",
            ToolEffect::Read,
            object_schema(
                json!({
                    "channel": non_empty_string(),
                    "query": non_empty_string(),
                    "count": bounded_int(1, Some(100)),
                    "sort": sort,
                    "sort_dir": sort_dir,
                }),
                &["channel", "query"],
            ),
        )?,
        ToolSpec::new(
            ToolName::ListFiles,
            "List files",
            "List Slack-hosted files you can access; filter by channel/user/time/type.",
            ToolEffect::Read,
            object_schema(
                json!({
                    "channel": string(),
                    "user": string(),
                    "ts_from": string(),
                    "ts_to": string(),
                    "types": string(),
                    "count": bounded_int(1, Some(1000)),
                    "page": bounded_int(1, None),
                    "cursor": string(),
                    "limit": bounded_int(1, Some(200)),
                }),
                &[],
            ),
        )?,
        ToolSpec::new(
            ToolName::GetFileInfo,
            "Get file info",
            "files.info for a given file ID.",
            ToolEffect::Read,
            object_schema(json!({ "file": non_empty_string() }), &["file"]),
        )?,
        ToolSpec::new(
            ToolName::DownloadFile,
            "Download file",
            "Download a Slack-hosted file as a resource (not external GDrive/Dropbox links).",
            ToolEffect::Read,
            object_schema(
                json!({
                    "file": non_empty_string(),
                    "preferText": { "type": "boolean" },
                }),
                &["file"],
            ),
        )?,
        ToolSpec::new(
            ToolName::UploadFile,
            "Upload file",
            "Upload a file. Provide either 'content' (text) or 'data_base64' (binary).",
            ToolEffect::Write,
            object_schema(
                json!({
                    "channels": {
                        "type": "string",
                        "description": "Comma-separated channel IDs."
                    },
                    "filename": non_empty_string(),
                    "title": string(),
                    "initial_comment": string(),
                    "content": {
                        "type": "string",
                        "description": "Plain text content."
                    },
                    "data_base64": {
                        "type": "string",
                        "description": "Base64-encoded bytes."
                    },
                    "mimeType": string(),
                }),
                &["filename"],
            ),
        )?,
        ToolSpec::new(
            ToolName::DeleteFile,
            "Delete file",
            "files.delete by ID.",
            ToolEffect::Delete,
            object_schema(json!({ "file": non_empty_string() }), &["file"]),
        )?,
        ToolSpec::new(
            ToolName::UsersList,
            "List users",
            "users.list (requires users:read).",
            ToolEffect::Read,
            object_schema(
                json!({
                    "limit": bounded_int(1, Some(200)),
                    "cursor": string(),
                }),
                &[],
            ),
        )?,
        ToolSpec::new(
            ToolName::OpenDm,
            "Open DM",
            "Open a direct message with a user and return the channel ID (D…). Requires im:write.",
            ToolEffect::Write,
            object_schema(json!({ "user": non_empty_string() }), &["user"]),
        )?,
        ToolSpec::new(
            ToolName::PostMessage,
            "Post message",
            "chat.postMessage (posts as the user token). Provide channel ID (C…/G…/D…).",
            ToolEffect::Write,
            object_schema(
                json!({
                    "channel": non_empty_string(),
                    "text": non_empty_string(),
                    "thread_ts": string(),
                    "unfurl_links": { "type": "boolean" },
                }),
                &["channel", "text"],
            ),
        )?,
    ])
}
