//! The MCP tool surface: registration metadata and the dispatcher that routes a validated
//! tool call to the Slack operations behind it.

pub mod args;
pub mod catalog;
pub mod channel;
mod conversations;
pub mod files;
mod search;

pub use catalog::{ToolName, ToolSpec, build_catalog};
pub use conversations::{ConversationItem, project_conversations};

use crate::client::{Params, SlackClient};
use crate::error::{GatewayError, Result};
use args::{parse_args, validate_arguments};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Page size sent when the caller gives no `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 200;
/// Result count sent when the caller gives no `count`.
pub const DEFAULT_SEARCH_COUNT: u32 = 20;

/// Wrap a JSON value as a single text block holding its serialization.
#[must_use]
pub fn json_result(value: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(value.to_string())])
}

/// Loose truthiness of a Slack field: `false`, `null`, `0`, `""` and absence are all false.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Registered Slack tools bound to one client.
#[derive(Debug, Clone)]
pub struct SlackTools {
    client: SlackClient,
    catalog: Arc<Vec<ToolSpec>>,
}

impl SlackTools {
    /// Build the tool set, compiling every input schema up front.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if a schema fails to compile.
    pub fn new(client: SlackClient) -> Result<Self> {
        Ok(Self {
            client,
            catalog: Arc::new(build_catalog()?),
        })
    }

    #[must_use]
    pub fn client(&self) -> &SlackClient {
        &self.client
    }

    /// Tool descriptors for `tools/list`, in registration order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        self.catalog.iter().map(ToolSpec::to_tool).collect()
    }

    fn spec(&self, name: ToolName) -> Result<&ToolSpec> {
        self.catalog
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| GatewayError::Internal(format!("tool '{name}' is not registered")))
    }

    /// Verify the credential with `auth.test`. Returns the raw payload.
    ///
    /// # Errors
    ///
    /// Any transport or Slack error from the call.
    pub async fn auth_test(&self) -> Result<Value> {
        self.client.get("auth.test", &Params::new()).await
    }

    /// Validate and run one tool call.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidArguments`] for an unknown tool or arguments that do not match
    ///   its input schema
    /// - any error the underlying Slack calls produce
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult> {
        let tool: ToolName = name.parse()?;
        let spec = self.spec(tool)?;
        let args = Value::Object(arguments.unwrap_or_default());
        validate_arguments(spec, &args)?;

        let started = Instant::now();
        let result = self.dispatch(tool, args).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => info!(tool = %tool, elapsed_ms, "tool call completed"),
            Err(e) => warn!(tool = %tool, elapsed_ms, error = %e, "tool call failed"),
        }
        result
    }

    async fn dispatch(&self, tool: ToolName, args: Value) -> Result<CallToolResult> {
        let client = &self.client;
        match tool {
            ToolName::ListConversations => {
                conversations::list_conversations(client, parse_args(args)?).await
            }
            ToolName::FetchHistory => conversations::fetch_history(client, parse_args(args)?).await,
            ToolName::SearchMessages => search::search_messages(client, parse_args(args)?).await,
            ToolName::SearchInChannel => search::search_in_channel(client, parse_args(args)?).await,
            ToolName::ListFiles => files::list_files(client, parse_args::<Params>(args)?).await,
            ToolName::GetFileInfo => files::get_file_info(client, parse_args(args)?).await,
            ToolName::DownloadFile => files::download_file(client, parse_args(args)?).await,
            ToolName::UploadFile => files::upload_file(client, parse_args(args)?).await,
            ToolName::DeleteFile => files::delete_file(client, parse_args(args)?).await,
            ToolName::UsersList => conversations::users_list(client, parse_args(args)?).await,
            ToolName::OpenDm => conversations::open_dm(client, parse_args(args)?).await,
            ToolName::PostMessage => conversations::post_message(client, parse_args(args)?).await,
        }
    }
}
