use axiom_core::{HistoryPoint, HistoryRange, MarketService, Symbol};
use serde::Serialize;

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct HistoryResponseData {
    symbol: Symbol,
    range: HistoryRange,
    points: Vec<HistoryPoint>,
}

pub async fn run(args: &HistoryArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let range = args.range.parse::<HistoryRange>()?;

    let history = service.get_history_with_source(&symbol, range).await;

    CommandResult::new(
        &HistoryResponseData {
            symbol,
            range,
            points: history.data,
        },
        [history.source],
    )
}
