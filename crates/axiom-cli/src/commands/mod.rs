mod anomalies;
mod history;
mod indicators;
mod market;
mod news;
mod quote;
mod search;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axiom_core::{MarketService, ProviderId, ReqwestHttpClient, ServiceConfig};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::envelope::{Envelope, Meta};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub sources: Vec<ProviderId>,
}

impl CommandResult {
    pub fn new<T: Serialize>(
        data: &T,
        sources: impl IntoIterator<Item = ProviderId>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            data: serde_json::to_value(data)?,
            sources: distinct(sources),
        })
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let service = build_service(cli)?;
    let started = Instant::now();

    let result = match &cli.command {
        Command::Quote(args) => quote::run(args, &service).await?,
        Command::History(args) => history::run(args, &service).await?,
        Command::Indices => market::indices(&service).await?,
        Command::Forex => market::forex(&service).await?,
        Command::Crypto => market::crypto(&service).await?,
        Command::Macro => indicators::run(&service).await?,
        Command::News(args) => news::finance(args, &service).await?,
        Command::AssetNews(args) => news::asset(args, &service).await?,
        Command::Search(args) => search::run(args, &service).await?,
        Command::Anomalies(args) => anomalies::run(args, &service).await?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(Envelope::new(
        Meta::new(latency_ms, result.sources),
        result.data,
    ))
}

fn build_service(cli: &Cli) -> Result<MarketService, CliError> {
    let mut config = ServiceConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        if timeout_ms == 0 {
            return Err(CliError::Command(String::from(
                "--timeout-ms must be greater than zero",
            )));
        }
        config = config.with_timeout(Duration::from_millis(timeout_ms));
    }

    Ok(if cli.offline {
        MarketService::offline(config)
    } else {
        MarketService::new(config, Arc::new(ReqwestHttpClient::new()))
    })
}

/// First-seen order, duplicates removed.
fn distinct(sources: impl IntoIterator<Item = ProviderId>) -> Vec<ProviderId> {
    let mut seen = Vec::new();
    for source in sources {
        if !seen.contains(&source) {
            seen.push(source);
        }
    }
    seen
}
