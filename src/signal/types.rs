use crate::models::Decision;
use serde::{Deserialize, Serialize};

/// Confidence cut-offs for mapping sentiment to a decision.
#[derive(Debug, Clone, Copy)]
pub struct SignalThresholds {
    pub buy: f64,
    pub sell: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            buy: 0.65,
            sell: 0.35,
        }
    }
}

/// Share of topic mentions held by one vocabulary word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWeight {
    pub topic: String,
    pub weight: f64,
}

/// Aggregated sentiment for one symbol over one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub decision: Decision,
    /// Percent, one decimal.
    pub confidence: f64,
    pub news_count: usize,
    pub reddit_count: usize,
    pub total_analyzed: usize,
    pub positive: usize,
    pub negative: usize,
    pub avg_sentiment: f64,
    pub news_topics: Vec<TopicWeight>,
    pub reddit_topics: Vec<TopicWeight>,
    pub sample_titles: Vec<String>,
}
