use axiom_core::{HistoryPoint, HistoryRange, MarketService, Scored, Symbol};
use serde::Serialize;

use crate::cli::AnomaliesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct AnomalyResponseData {
    symbol: Symbol,
    range: HistoryRange,
    threshold: f64,
    points_scanned: usize,
    anomalies: Vec<Scored<HistoryPoint>>,
}

pub async fn run(args: &AnomaliesArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let range = args.range.parse::<HistoryRange>()?;

    let history = service.get_history_with_source(&symbol, range).await;
    let anomalies = service.detect_anomalies(&history.data, args.threshold)?;

    CommandResult::new(
        &AnomalyResponseData {
            symbol,
            range,
            threshold: args.threshold,
            points_scanned: history.data.len(),
            anomalies,
        },
        [history.source],
    )
}
