//! Message search tools.

use super::args::{SearchInChannelArgs, SearchMessagesArgs, to_params};
use super::channel::{ChannelRef, scoped_query};
use super::{DEFAULT_SEARCH_COUNT, json_result};
use crate::client::SlackClient;
use crate::error::Result;
use rmcp::model::CallToolResult;
use tracing::debug;

pub(super) async fn search_messages(
    client: &SlackClient,
    mut args: SearchMessagesArgs,
) -> Result<CallToolResult> {
    args.count.get_or_insert(DEFAULT_SEARCH_COUNT);
    let data = client.get("search.messages", &to_params(&args)?).await?;
    Ok(json_result(&data))
}

/// Resolve the channel reference, then run one `search.messages` call scoped with `in:#name`.
pub(super) async fn search_in_channel(
    client: &SlackClient,
    args: SearchInChannelArgs,
) -> Result<CallToolResult> {
    let channel_name = ChannelRef::parse(&args.channel)
        .resolve_name(client)
        .await?;
    let query = scoped_query(&args.query, &channel_name);
    debug!(channel = %channel_name, "scoped search query");

    let search = SearchMessagesArgs {
        query,
        count: args.count,
        sort: args.sort,
        sort_dir: args.sort_dir,
    };
    search_messages(client, search).await
}
