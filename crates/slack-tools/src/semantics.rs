//! Tool annotations derived from what a tool does to the workspace.
//!
//! Read tools map to `GET` semantics, write tools to `POST`, and deletions are flagged as
//! destructive so clients can ask for confirmation.

use rmcp::model::ToolAnnotations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    /// Only reads from Slack.
    Read,
    /// Creates something (message, DM channel, file).
    Write,
    /// Removes something permanently.
    Delete,
}

/// MCP annotations for a Slack tool.
///
/// `openWorldHint` is always `true`: every tool talks to an external workspace.
#[must_use]
pub fn annotations_for(title: &str, effect: ToolEffect) -> ToolAnnotations {
    let title = Some(title.to_string());
    let open_world_hint = Some(true);

    match effect {
        ToolEffect::Read => ToolAnnotations {
            title,
            read_only_hint: Some(true),
            destructive_hint: Some(false),
            idempotent_hint: Some(true),
            open_world_hint,
        },
        ToolEffect::Write => ToolAnnotations {
            title,
            read_only_hint: Some(false),
            destructive_hint: Some(false),
            idempotent_hint: Some(false),
            open_world_hint,
        },
        ToolEffect::Delete => ToolAnnotations {
            title,
            read_only_hint: Some(false),
            destructive_hint: Some(true),
            idempotent_hint: Some(true),
            open_world_hint,
        },
    }
}
