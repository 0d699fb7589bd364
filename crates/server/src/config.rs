//! Command-line and environment configuration.

use clap::{Parser, ValueEnum};
use slack_mcp_tools::config::DEFAULT_API_BASE;

/// Slack MCP server (stdio)
#[derive(Parser, Debug, Clone)]
#[command(name = "slack-mcp-server")]
#[command(about = "Expose Slack conversations, search, files and messaging as MCP tools over stdio")]
#[command(version)]
pub struct Args {
    /// Slack user or bot token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level (`RUST_LOG` overrides when set)
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Warn, ignore_case = true)]
    pub log_level: LogLevel,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, ignore_case = true)]
    pub log_format: LogFormat,

    /// Name reported in the MCP handshake
    #[arg(long, env = "MCP_SERVER_NAME", default_value = "mcp-slack-oauth")]
    pub server_name: String,

    /// Version reported in the MCP handshake
    #[arg(long, env = "MCP_SERVER_VERSION", default_value = "0.5.0")]
    pub server_version: String,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    #[must_use]
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let args = Args::try_parse_from(["slack-mcp-server", "--token", "xoxb-1"]).expect("parse");
        assert_eq!(args.token.as_deref(), Some("xoxb-1"));
        assert_eq!(args.server_name, "mcp-slack-oauth");
        assert_eq!(args.server_version, "0.5.0");
        assert_eq!(args.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let args = Args::try_parse_from(["slack-mcp-server", "--log-level", "DEBUG"]).expect("parse");
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.log_level.as_filter(), "debug");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Args::try_parse_from(["slack-mcp-server", "--log-level", "trace"]).is_err());
    }
}
