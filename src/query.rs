//! Lookups against the exported analysis snapshot.

use crate::export::{AnalysisRecord, AnalysisSnapshot};

/// Words people use for the default watch list, matched as whole words.
const ALIASES: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("nvidia", "NVDA"),
    ("bitcoin", "BTC-USD"),
    ("btc", "BTC-USD"),
    ("ethereum", "ETH-USD"),
    ("eth", "ETH-USD"),
    ("aapl", "AAPL"),
    ("msft", "MSFT"),
    ("nvda", "NVDA"),
];

/// Find the symbol a free-text question is about.
///
/// Aliases win; otherwise any word that is a snapshot key (case-insensitive).
pub fn resolve_symbol(text: &str, snapshot: Option<&AnalysisSnapshot>) -> Option<String> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    if let Some((_, symbol)) = ALIASES.iter().find(|(alias, _)| words.contains(alias)) {
        return Some(symbol.to_string());
    }
    let snapshot = snapshot?;
    text.split(|c: char| c.is_whitespace() || c == '?' || c == ',')
        .map(|word| word.trim().to_uppercase())
        .find(|word| snapshot.symbols.contains_key(word))
}

/// Plain-language summary of one symbol's record.
pub fn describe(symbol: &str, record: &AnalysisRecord) -> String {
    let mut out = format!(
        "{symbol}: {} with {:.1}% confidence",
        record.decision, record.confidence
    );
    if let Some(price) = record.price {
        out.push_str(&format!(", price ${price:.2}"));
    }
    if let Some(change) = record.change_from_baseline {
        out.push_str(&format!(" ({change:+.2}% from baseline)"));
    }
    out.push_str(&format!(
        ". Based on {} news articles and {} Reddit posts ({} positive, {} negative, average sentiment {:.3}).",
        record.news_count, record.reddit_count, record.positive, record.negative, record.avg_sentiment
    ));
    if !record.news_topics.is_empty() {
        let topics: Vec<&str> = record
            .news_topics
            .iter()
            .take(3)
            .map(|t| t.topic.as_str())
            .collect();
        out.push_str(&format!(" Top news topics: {}.", topics.join(", ")));
    }
    if let Some(title) = record.sample_titles.first() {
        out.push_str(&format!(" Latest headline: \"{title}\"."));
    }
    out
}

/// One line per symbol.
pub fn overview(snapshot: &AnalysisSnapshot) -> Vec<String> {
    snapshot
        .symbols
        .iter()
        .map(|(symbol, r)| format!("{symbol}: {} ({:.1}%)", r.decision, r.confidence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Decision;
    use crate::signal::TopicWeight;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record() -> AnalysisRecord {
        AnalysisRecord {
            decision: Decision::Buy,
            confidence: 71.2,
            price: Some(201.456),
            change_from_baseline: Some(-0.4),
            news_count: 12,
            reddit_count: 8,
            positive: 14,
            negative: 3,
            avg_sentiment: 0.412,
            news_topics: vec![
                TopicWeight { topic: "earnings".into(), weight: 0.5 },
                TopicWeight { topic: "revenue".into(), weight: 0.5 },
            ],
            reddit_topics: vec![],
            sample_titles: vec!["Apple beats on services".into()],
            last_updated: Utc::now(),
        }
    }

    fn snapshot() -> AnalysisSnapshot {
        let mut symbols = BTreeMap::new();
        symbols.insert("AAPL".to_string(), record());
        symbols.insert("SPY".to_string(), AnalysisRecord { decision: Decision::Hold, ..record() });
        AnalysisSnapshot {
            timestamp: Utc::now(),
            symbols,
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(resolve_symbol("What's up with Apple today?", None).as_deref(), Some("AAPL"));
        assert_eq!(resolve_symbol("should I buy BTC", None).as_deref(), Some("BTC-USD"));
        assert_eq!(resolve_symbol("Ethereum outlook", None).as_deref(), Some("ETH-USD"));
        assert_eq!(resolve_symbol("is eth-usd up?", None).as_deref(), Some("ETH-USD"));
    }

    #[test]
    fn aliases_need_whole_words() {
        assert_eq!(resolve_symbol("whether something changed", None), None);
        assert_eq!(resolve_symbol("pineapple prices", None), None);
    }

    #[test]
    fn snapshot_keys_resolve_when_no_alias() {
        let snap = snapshot();
        assert_eq!(resolve_symbol("how is spy doing?", Some(&snap)).as_deref(), Some("SPY"));
        assert_eq!(resolve_symbol("how is the market", Some(&snap)), None);
        assert_eq!(resolve_symbol("how is spy doing", None), None);
    }

    #[test]
    fn describe_includes_key_facts() {
        let text = describe("AAPL", &record());
        assert!(text.starts_with("AAPL: BUY with 71.2% confidence, price $201.46 (-0.40% from baseline)."));
        assert!(text.contains("12 news articles and 8 Reddit posts"));
        assert!(text.contains("Top news topics: earnings, revenue."));
        assert!(text.ends_with("Latest headline: \"Apple beats on services\"."));
    }

    #[test]
    fn overview_lists_every_symbol() {
        assert_eq!(overview(&snapshot()), vec!["AAPL: BUY (71.2%)", "SPY: HOLD (71.2%)"]);
    }
}
