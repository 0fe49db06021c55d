use axiom_core::MarketService;

use crate::error::CliError;

use super::CommandResult;

pub async fn indices(service: &MarketService) -> Result<CommandResult, CliError> {
    let indices = service.get_indices().await;
    CommandResult::new(&indices, indices.iter().map(|index| index.quote.source))
}

pub async fn forex(service: &MarketService) -> Result<CommandResult, CliError> {
    let pairs = service.get_forex().await;
    CommandResult::new(&pairs, pairs.iter().map(|pair| pair.source))
}

pub async fn crypto(service: &MarketService) -> Result<CommandResult, CliError> {
    let assets = service.get_crypto().await;
    CommandResult::new(&assets, assets.iter().map(|asset| asset.source))
}
