use axiom_core::{Interpretation, MarketService, NewsArticle, Symbol, Tagged};
use serde::Serialize;

use crate::cli::{AssetNewsArgs, NewsArgs};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct InterpretedArticle {
    #[serde(flatten)]
    article: NewsArticle,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpretation: Option<Interpretation>,
}

pub async fn finance(args: &NewsArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let news = service
        .get_finance_news_with_source(args.query.as_deref())
        .await;
    respond(news, args.interpret, service)
}

pub async fn asset(args: &AssetNewsArgs, service: &MarketService) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let news = service
        .get_asset_news_with_source(&symbol, args.name.as_deref())
        .await;
    respond(news, args.interpret, service)
}

fn respond(
    news: Tagged<Vec<NewsArticle>>,
    interpret: bool,
    service: &MarketService,
) -> Result<CommandResult, CliError> {
    let articles = news
        .data
        .into_iter()
        .map(|article| InterpretedArticle {
            interpretation: interpret.then(|| service.interpret_article(&article)),
            article,
        })
        .collect::<Vec<_>>();

    CommandResult::new(&articles, [news.source])
}
