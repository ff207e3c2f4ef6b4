//! Curated pre-market datasets served until live ingestion exists.

use crate::domain::news::NewsItem;
use crate::domain::recommendation::{
    Bias, RecommendationText, Risk, Sentiment, StockRecommendation,
};

pub fn news() -> anyhow::Result<Vec<NewsItem>> {
    Ok(vec![
        NewsItem::try_new(
            "Oil prices steady; OMCs watch margins into open",
            "Business Standard",
            "Commodities",
            "7:42 AM",
            &["RELIANCE", "IOC", "BPCL", "HPCL"],
        )?,
        NewsItem::try_new(
            "IT services signal improving deal pipeline in Q3 commentary",
            "ET Markets",
            "Technology",
            "7:35 AM",
            &["TCS", "INFY", "WIPRO"],
        )?,
        NewsItem::try_new(
            "Banking liquidity eases; deposit growth stabilises",
            "Mint",
            "Banking",
            "7:20 AM",
            &["HDFCBANK", "ICICIBANK", "SBIN"],
        )?,
        NewsItem::try_new(
            "US launches support pharma exporters; specialty pipeline updates",
            "Financial Express",
            "Healthcare",
            "7:05 AM",
            &["SUNPHARMA", "DRREDDY", "CIPLA"],
        )?,
    ])
}

pub fn recommendations() -> anyhow::Result<Vec<StockRecommendation>> {
    Ok(vec![
        StockRecommendation::try_new(
            RecommendationText {
                company: "Reliance Industries",
                ticker: "RELIANCE",
                sector: "Energy",
                rationale: "Retail and telecom momentum alongside steady energy margins. \
                            Recent partnership updates support growth narrative.",
                signals: &[
                    "Retail expansion and subscriber additions",
                    "Stable GRMs; energy complex supportive",
                    "Diversified revenue streams",
                ],
                keywords: &["Retail", "Telecom", "Margins"],
            },
            Risk::Medium,
            Bias::Long,
            Sentiment::Bullish,
        )?,
        StockRecommendation::try_new(
            RecommendationText {
                company: "Tata Consultancy Services",
                ticker: "TCS",
                sector: "IT",
                rationale: "Muted near-term outlook priced in; improving deal pipeline and \
                            currency tailwinds could aid open.",
                signals: &[
                    "Large deal wins commentary",
                    "INR tailwind vs USD",
                    "Valuation support",
                ],
                keywords: &["Orderbook", "Currency", "Valuation"],
            },
            Risk::Low,
            Bias::Long,
            Sentiment::Neutral,
        )?,
        StockRecommendation::try_new(
            RecommendationText {
                company: "HDFC Bank",
                ticker: "HDFCBANK",
                sector: "Banking",
                rationale: "Deposit growth and NIM stabilisation improves sentiment ahead of session.",
                signals: &[
                    "Deposit growth commentary",
                    "Stable asset quality",
                    "Supportive liquidity",
                ],
                keywords: &["NIM", "Deposits", "Asset Quality"],
            },
            Risk::Medium,
            Bias::Long,
            Sentiment::Bullish,
        )?,
        StockRecommendation::try_new(
            RecommendationText {
                company: "Zee Entertainment",
                ticker: "ZEEL",
                sector: "Media",
                rationale: "Merger overhang and regulatory uncertainty could weigh on open; \
                            headline risk elevated.",
                signals: &[
                    "Merger timeline questions",
                    "Pending regulatory clarity",
                    "Elevated volatility",
                ],
                keywords: &["Merger", "Regulatory", "Volatility"],
            },
            Risk::High,
            Bias::Short,
            Sentiment::Bearish,
        )?,
        StockRecommendation::try_new(
            RecommendationText {
                company: "Sun Pharma",
                ticker: "SUNPHARMA",
                sector: "Pharma",
                rationale: "Favorable update on specialty pipeline and US market traction; \
                            defensives in favour pre-open.",
                signals: &[
                    "US pipeline progress",
                    "Specialty portfolio momentum",
                    "Healthcare rotation",
                ],
                keywords: &["Specialty", "US Markets", "Defensive"],
            },
            Risk::Low,
            Bias::Long,
            Sentiment::Bullish,
        )?,
    ])
}
