use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::domain::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub category: String,
    /// Display time such as "7:35 AM". Not parsed.
    pub time: String,
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl NewsItem {
    pub fn try_new(
        title: &str,
        source: &str,
        category: &str,
        time: &str,
        tickers: &[&str],
    ) -> anyhow::Result<Self> {
        let title = required("title", title)?;
        let source = required("source", source)?;
        let category = required("category", category)?;
        let time = required("time", time)?;

        let mut out = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let ticker = ticker.trim();
            ensure!(!ticker.is_empty(), "news ticker must be non-empty ({title})");
            out.push(ticker.to_string());
        }

        Ok(Self {
            title,
            source,
            category,
            time,
            tickers: out,
        })
    }
}

impl Document for NewsItem {
    const COLLECTION: &'static str = "newsitem";
}

pub(crate) fn required(field: &str, value: &str) -> anyhow::Result<String> {
    let value = value.trim();
    ensure!(!value.is_empty(), "{field} must be non-empty");
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_ticker_order() {
        let item = NewsItem::try_new(" Headline ", "Mint", "Banking", "7:20 AM", &["SBIN", " HDFCBANK"])
            .unwrap();
        assert_eq!(item.title, "Headline");
        assert_eq!(item.tickers, vec!["SBIN", "HDFCBANK"]);
    }

    #[test]
    fn rejects_blank_required_fields() {
        assert!(NewsItem::try_new("", "Mint", "Banking", "7:20 AM", &[]).is_err());
        assert!(NewsItem::try_new("Headline", "  ", "Banking", "7:20 AM", &[]).is_err());
        assert!(NewsItem::try_new("Headline", "Mint", "Banking", "", &[]).is_err());
    }

    #[test]
    fn empty_tickers_serialize_as_empty_array() {
        let item = NewsItem::try_new("Headline", "Mint", "Banking", "7:20 AM", &[]).unwrap();
        let value = item.to_document().unwrap();
        assert_eq!(value["tickers"], serde_json::json!([]));
    }
}
