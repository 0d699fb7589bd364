//! Slack MCP server binary: configuration, logging, startup credential check, stdio serving.

mod config;
mod error;
mod handler;
mod logging;

use anyhow::Context as _;
use clap::Parser;
use config::Args;
use error::StartupError;
use handler::{ServerIdentity, SlackServer};
use rmcp::ServiceExt as _;
use serde_json::Value;
use slack_mcp_tools::{Credential, GatewayConfig, SlackClient, SlackTools};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables win over it.
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logging::init(args.log_level, args.log_format)?;

    if let Err(e) = run(args).await {
        error!(error = %e, "slack mcp server failed");
        return Err(e.into());
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), StartupError> {
    let credential = Credential::new(args.token.as_deref().unwrap_or_default())
        .map_err(|_| StartupError::MissingToken)?;
    info!(token = %credential.masked(), "Slack token loaded");

    let config = GatewayConfig::new(credential).with_api_base(&args.api_base)?;
    let tools = SlackTools::new(SlackClient::new(config)?)?;

    let whoami = tools.auth_test().await.map_err(StartupError::AuthCheck)?;
    let (user, team) = auth_identity(&whoami);
    info!(user, team, "Slack credential verified");

    let server = SlackServer::new(
        tools,
        ServerIdentity {
            name: args.server_name,
            version: args.server_version,
        },
    );
    serve_stdio(server)
        .await
        .map_err(|e| StartupError::Serve(format!("{e:#}")))
}

/// `user` and `team` from an `auth.test` payload; empty when absent.
fn auth_identity(whoami: &Value) -> (&str, &str) {
    let field = |k: &str| whoami.get(k).and_then(Value::as_str).unwrap_or_default();
    (field("user"), field("team"))
}

async fn serve_stdio(server: SlackServer) -> anyhow::Result<()> {
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("initialize MCP session over stdio")?;
    info!("serving MCP over stdio");
    service.waiting().await.context("MCP session task")?;
    Ok(())
}
