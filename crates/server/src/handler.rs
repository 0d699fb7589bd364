//! rmcp `ServerHandler` over the Slack tool set.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorCode, ErrorData, Implementation,
    ListToolsResult, PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use slack_mcp_tools::{GatewayError, SlackTools};

const INSTRUCTIONS: &str = "Slack tools acting with the configured user token: list \
conversations, read history, search messages (optionally within one channel), list, inspect, \
download, upload and delete files, list users, open DMs and post messages.";

/// Name and version announced during `initialize`.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct SlackServer {
    tools: SlackTools,
    identity: ServerIdentity,
}

impl SlackServer {
    #[must_use]
    pub fn new(tools: SlackTools, identity: ServerIdentity) -> Self {
        Self { tools, identity }
    }
}

/// Map a gateway failure onto a JSON-RPC error.
///
/// Argument problems become `invalid_params` (with the violation list when there is one);
/// everything else is an internal error carrying the descriptive message.
pub fn to_error_data(err: GatewayError) -> ErrorData {
    match err {
        GatewayError::InvalidArguments { message, data } => {
            ErrorData::new(ErrorCode::INVALID_PARAMS, message, Some(data))
        }
        GatewayError::Validation(message) => {
            ErrorData::new(ErrorCode::INVALID_PARAMS, message, None)
        }
        other => ErrorData::new(ErrorCode::INTERNAL_ERROR, other.to_string(), None),
    }
}

impl ServerHandler for SlackServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: self.identity.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.tools
            .call_tool(&request.name, request.arguments)
            .await
            .map_err(to_error_data)
    }
}
