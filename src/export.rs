//! Latest-analysis snapshot consumed by the query CLI and other readers.

use crate::errors::Result;
use crate::models::Decision;
use crate::signal::{SentimentSummary, TopicWeight};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// What the monitor last concluded about one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub decision: Decision,
    pub confidence: f64,
    pub price: Option<f64>,
    /// Percent move from the current baseline.
    pub change_from_baseline: Option<f64>,
    pub news_count: usize,
    pub reddit_count: usize,
    pub positive: usize,
    pub negative: usize,
    pub avg_sentiment: f64,
    pub news_topics: Vec<TopicWeight>,
    pub reddit_topics: Vec<TopicWeight>,
    pub sample_titles: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_summary(
        summary: SentimentSummary,
        price: Option<f64>,
        change_from_baseline: Option<f64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            decision: summary.decision,
            confidence: summary.confidence,
            price,
            change_from_baseline,
            news_count: summary.news_count,
            reddit_count: summary.reddit_count,
            positive: summary.positive,
            negative: summary.negative,
            avg_sentiment: summary.avg_sentiment,
            news_topics: summary.news_topics,
            reddit_topics: summary.reddit_topics,
            sample_titles: summary.sample_titles,
            last_updated: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub timestamp: DateTime<Utc>,
    pub symbols: BTreeMap<String, AnalysisRecord>,
}

impl AnalysisSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Write the snapshot atomically: a sibling temp file renamed over `path`.
pub fn export_snapshot(
    path: &Path,
    symbols: &BTreeMap<String, AnalysisRecord>,
    now: DateTime<Utc>,
) -> Result<()> {
    let snapshot = AnalysisSnapshot {
        timestamp: now,
        symbols: symbols.clone(),
    };
    let body = serde_json::to_string_pretty(&snapshot)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), count = symbols.len(), "[EXPORT] snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{SignalThresholds, summarize};
    use crate::models::ScoredText;

    fn record(now: DateTime<Utc>) -> AnalysisRecord {
        let news = vec![ScoredText {
            text: "Nvidia earnings surge".into(),
            score: 0.8,
        }];
        let summary = summarize(&news, &[], &SignalThresholds::default()).unwrap();
        AnalysisRecord::from_summary(summary, Some(130.25), Some(0.0), now)
    }

    #[test]
    fn export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latest_analysis.json");
        let now = Utc::now();
        let mut symbols = BTreeMap::new();
        symbols.insert("NVDA".to_string(), record(now));

        export_snapshot(&path, &symbols, now).unwrap();
        let loaded = AnalysisSnapshot::load(&path).unwrap();
        assert_eq!(loaded.timestamp, now);
        assert_eq!(loaded.symbols, symbols);
        assert!(!dir.path().join("latest_analysis.json.tmp").exists());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = AnalysisSnapshot::load(&dir.path().join("absent.json"));
        assert!(matches!(res, Err(crate::errors::AppError::Io(_))));
    }
}
