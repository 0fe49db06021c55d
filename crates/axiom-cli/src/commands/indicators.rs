use axiom_core::MarketService;

use crate::error::CliError;

use super::CommandResult;

pub async fn run(service: &MarketService) -> Result<CommandResult, CliError> {
    let indicators = service.get_macro_indicators().await;
    CommandResult::new(&indicators, indicators.iter().map(|indicator| indicator.source))
}
