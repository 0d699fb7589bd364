//! Errors that stop the server before it starts serving.

use slack_mcp_tools::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("SLACK_TOKEN is not set. Provide it via environment, a .env file, or --token.")]
    MissingToken,

    #[error("Slack auth.test failed: {0}")]
    AuthCheck(#[source] GatewayError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("MCP stdio service failed: {0}")]
    Serve(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
