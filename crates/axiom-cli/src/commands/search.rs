use axiom_core::{AssetMatch, MarketService};
use serde::Serialize;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<AssetMatch>,
}

/// Matches come from the bundled table or the live search; neither is tagged,
/// so the envelope lists no sources.
pub async fn run(args: &SearchArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    let results = service.search_assets(query).await;
    CommandResult::new(
        &SearchResponseData {
            query: query.to_owned(),
            results,
        },
        [],
    )
}
