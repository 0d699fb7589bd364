//! Conversation, user and chat tools.

use super::args::{
    ConversationType, FetchHistoryArgs, ListConversationsArgs, OpenDmArgs, PostMessageArgs,
    UsersListArgs, to_params,
};
use super::{DEFAULT_PAGE_SIZE, json_result, truthy};
use crate::client::{Params, SlackClient};
use crate::error::Result;
use rmcp::model::CallToolResult;
use serde::Serialize;
use serde_json::{Value, json};

/// Compact view of a conversation returned by `slack_list_conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_private: bool,
    pub is_im: bool,
    pub is_mpim: bool,
}

impl ConversationItem {
    fn from_channel(c: &Value) -> Self {
        let text = |k: &str| c.get(k).and_then(Value::as_str).map(str::to_string);
        Self {
            id: text("id"),
            name: text("name"),
            is_private: truthy(c.get("is_private")),
            is_im: truthy(c.get("is_im")),
            is_mpim: truthy(c.get("is_mpim")),
        }
    }
}

/// Project a `conversations.list` payload down to ids, names and kind flags.
#[must_use]
pub fn project_conversations(data: &Value) -> Value {
    let items: Vec<ConversationItem> = data
        .get("channels")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(ConversationItem::from_channel)
        .collect();

    let mut out = json!({ "ok": true, "items": items });
    if let Some(meta) = data.get("response_metadata") {
        out["response_metadata"] = meta.clone();
    }
    out
}

pub(super) async fn list_conversations(
    client: &SlackClient,
    args: ListConversationsArgs,
) -> Result<CallToolResult> {
    let types: Vec<&str> = args
        .types
        .as_deref()
        .unwrap_or(&ConversationType::ALL)
        .iter()
        .map(|t| t.as_str())
        .collect();

    let mut params = Params::new();
    params.insert("types".to_string(), json!(types.join(",")));
    params.insert(
        "limit".to_string(),
        json!(args.limit.unwrap_or(DEFAULT_PAGE_SIZE)),
    );
    if let Some(cursor) = args.cursor {
        params.insert("cursor".to_string(), json!(cursor));
    }

    let data = client.get("conversations.list", &params).await?;
    Ok(json_result(&project_conversations(&data)))
}

pub(super) async fn fetch_history(
    client: &SlackClient,
    mut args: FetchHistoryArgs,
) -> Result<CallToolResult> {
    args.limit.get_or_insert(DEFAULT_PAGE_SIZE);
    let data = client
        .get("conversations.history", &to_params(&args)?)
        .await?;
    Ok(json_result(&data))
}

pub(super) async fn users_list(
    client: &SlackClient,
    mut args: UsersListArgs,
) -> Result<CallToolResult> {
    args.limit.get_or_insert(DEFAULT_PAGE_SIZE);
    let data = client.get("users.list", &to_params(&args)?).await?;
    Ok(json_result(&data))
}

pub(super) async fn open_dm(client: &SlackClient, args: OpenDmArgs) -> Result<CallToolResult> {
    let data = client
        .post_json("conversations.open", &to_params(&args)?)
        .await?;
    Ok(json_result(&data))
}

pub(super) async fn post_message(
    client: &SlackClient,
    args: PostMessageArgs,
) -> Result<CallToolResult> {
    let data = client
        .post_json("chat.postMessage", &to_params(&args)?)
        .await?;
    Ok(json_result(&data))
}
