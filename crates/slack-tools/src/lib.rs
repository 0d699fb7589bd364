//! Slack Web API access exposed as MCP tools.
//!
//! - [`client`]: authenticated GET / JSON POST / multipart POST against Slack methods
//! - [`normalize`]: one success/failure classification for every response
//! - [`fetch`]: authenticated download of file bytes
//! - [`tools`]: tool registration, argument validation and dispatch

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod safety;
pub mod semantics;
pub mod tools;

pub use client::SlackClient;
pub use config::{Credential, GatewayConfig};
pub use error::{GatewayError, Result};
pub use tools::SlackTools;
