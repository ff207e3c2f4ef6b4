use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::news::required;
use crate::domain::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub company: String,
    pub ticker: String,
    pub sector: String,
    pub risk: Risk,
    pub bias: Bias,
    pub sentiment: Sentiment,
    pub rationale: String,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Everything a recommendation needs apart from its enumerated fields.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationText<'a> {
    pub company: &'a str,
    pub ticker: &'a str,
    pub sector: &'a str,
    pub rationale: &'a str,
    pub signals: &'a [&'a str],
    pub keywords: &'a [&'a str],
}

impl StockRecommendation {
    pub fn try_new(
        text: RecommendationText<'_>,
        risk: Risk,
        bias: Bias,
        sentiment: Sentiment,
    ) -> anyhow::Result<Self> {
        let ticker = required("ticker", text.ticker)?;
        Ok(Self {
            company: required("company", text.company)?,
            sector: required("sector", text.sector)?,
            rationale: required("rationale", text.rationale)?,
            signals: bullets(&ticker, "signal", text.signals)?,
            keywords: bullets(&ticker, "keyword", text.keywords)?,
            ticker,
            risk,
            bias,
            sentiment,
        })
    }
}

impl Document for StockRecommendation {
    const COLLECTION: &'static str = "stockrecommendation";
}

fn bullets(ticker: &str, kind: &str, values: &[&str]) -> anyhow::Result<Vec<String>> {
    values
        .iter()
        .map(|v| required(&format!("{kind} for {ticker}"), v))
        .collect()
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bias::Long => "Long",
            Bias::Short => "Short",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}
