use axiom_core::{MarketService, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &QuoteArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut quotes = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        quotes.push(service.get_quote(symbol).await);
    }

    CommandResult::new(&quotes, quotes.iter().map(|quote| quote.source))
}
