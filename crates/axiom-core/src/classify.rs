//! Rule-based headline classification.
//!
//! Sentiment, category, and interpretation are pure functions over static
//! keyword tables. Identical text always yields identical tags.

use crate::{Category, Interpretation, NewsArticle, Sentiment};

pub const BULLISH_KEYWORDS: &[&str] = &[
    "surge", "rally", "soar", "gain", "rise", "beat", "record", "high", "positive", "growth",
    "profit", "boom", "jump",
];

pub const BEARISH_KEYWORDS: &[&str] = &[
    "plunge",
    "crash",
    "fall",
    "drop",
    "decline",
    "miss",
    "loss",
    "risk",
    "crisis",
    "cut",
    "fears",
    "warning",
    "slump",
    "recession",
    "tumble",
];

/// Category keyword table. Declaration order is match precedence.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Fed,
        &[
            "fed",
            "fomc",
            "powell",
            "rate hike",
            "rate cut",
            "interest rate",
            "monetary",
        ],
    ),
    (
        Category::Inflation,
        &["cpi", "inflation", "pce", "consumer price"],
    ),
    (
        Category::Earnings,
        &["earnings", "revenue", "profit", "eps", "guidance", "quarterly"],
    ),
    (
        Category::Crypto,
        &["bitcoin", "btc", "ethereum", "crypto", "blockchain"],
    ),
    (
        Category::Geo,
        &[
            "war",
            "sanction",
            "geopolit",
            "china",
            "taiwan",
            "russia",
            "middle east",
        ],
    ),
    (
        Category::Labor,
        &[
            "jobs",
            "unemployment",
            "payroll",
            "nonfarm",
            "labor",
            "hiring",
            "layoff",
        ],
    ),
];

/// Fixed reading attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpretationRule {
    pub label: &'static str,
    pub institution: &'static str,
    pub past_pattern: &'static str,
    pub watch_point: &'static str,
}

pub const BULLISH_IMPACT: &str =
    "Short term, this reads as a supportive backdrop for risk assets.";
pub const BEARISH_IMPACT: &str = "This may signal a market that is prioritising risk management.";
pub const NEUTRAL_IMPACT: &str = "Direction is unclear until further data confirms it.";

pub fn infer_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let bullish = count_matches(&lower, BULLISH_KEYWORDS);
    let bearish = count_matches(&lower, BEARISH_KEYWORDS);

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => Sentiment::Bullish,
        std::cmp::Ordering::Less => Sentiment::Bearish,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

pub fn infer_category(text: &str) -> Category {
    let lower = text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

pub const fn interpretation_rule(category: Category) -> InterpretationRule {
    match category {
        Category::Fed => InterpretationRule {
            label: "Federal Reserve",
            institution: "A shift in the Fed's stance reprices every asset class.",
            past_pattern: "Hawkish rate surprises: equities -2 to -5%, dollar +1 to +2%.",
            watch_point: "Dot plot changes and the tone of speeches (hawkish vs dovish).",
        },
        Category::Inflation => InterpretationRule {
            label: "Inflation",
            institution: "Sticky inflation erodes rate-cut hopes and hits growth stocks first.",
            past_pattern: "CPI above consensus: Treasury yields jump, Nasdaq sells off.",
            watch_point: "Services versus energy contribution to the headline number.",
        },
        Category::Earnings => InterpretationRule {
            label: "Earnings",
            institution: "Guidance and margin trends matter more than the headline beat.",
            past_pattern: "Beats paired with lowered guidance often still trade lower.",
            watch_point: "Margin trajectory, next-quarter guidance, inventory levels.",
        },
        Category::Crypto => InterpretationRule {
            label: "Crypto",
            institution: "Used as a risk-on/risk-off gauge that tracks liquidity.",
            past_pattern: "Strong dollar weighs on coins; risk appetite lifts altcoins.",
            watch_point: "BTC dominance and exchange inflows.",
        },
        Category::Geo => InterpretationRule {
            label: "Geopolitics",
            institution: "Drives demand for safe havens: gold, dollar, Treasuries.",
            past_pattern: "Volatility spikes early in a conflict, then energy takes focus.",
            watch_point: "Energy and food supply-chain exposure, scope of sanctions.",
        },
        Category::Labor => InterpretationRule {
            label: "Labor market",
            institution: "Half of the Fed's dual mandate, so it steers the rate path.",
            past_pattern: "Hot payrolls push out rate-cut bets and bonds fall.",
            watch_point: "Average hourly earnings and participation rate.",
        },
        Category::General => InterpretationRule {
            label: "Market news",
            institution: "Needs macro context before it can be read.",
            past_pattern: "Reactions to similar news have varied with the backdrop.",
            watch_point: "Timing relative to data releases and prevailing sentiment.",
        },
    }
}

pub const fn impact_for(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Bullish => BULLISH_IMPACT,
        Sentiment::Bearish => BEARISH_IMPACT,
        Sentiment::Neutral => NEUTRAL_IMPACT,
    }
}

pub fn interpret(article: &NewsArticle) -> Interpretation {
    let rule = interpretation_rule(article.category);
    Interpretation {
        category: article.category,
        label: rule.label.to_owned(),
        institution: rule.institution.to_owned(),
        past_pattern: rule.past_pattern.to_owned(),
        watch_point: rule.watch_point.to_owned(),
        sentiment: article.sentiment,
        impact: impact_for(article.sentiment).to_owned(),
    }
}

fn count_matches(haystack: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .count()
}
