use super::types::{SentimentSummary, SignalThresholds, TopicWeight};
use crate::models::{Decision, ScoredText};
use crate::utils::round_to;

pub const NEWS_VOCAB: &[&str] = &[
    "etf",
    "approval",
    "ban",
    "partnership",
    "surge",
    "drop",
    "adoption",
    "guidance",
    "earnings",
    "revenue",
    "profit",
];

pub const REDDIT_VOCAB: &[&str] = &[
    "halving",
    "bullish",
    "bearish",
    "regulation",
    "pump",
    "dump",
    "inflation",
    "macro",
    "moon",
    "crash",
    "rally",
];

/// Text count at which volume reliability saturates.
const FULL_RELIABILITY_COUNT: f64 = 50.0;
const MAX_TOPICS: usize = 5;
const SAMPLE_TITLES: usize = 3;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Volume weighting in [0, 1]: ln(1 + n) / ln(51), capped at 1.
fn reliability(count: usize) -> f64 {
    ((1.0 + count as f64).ln() / (1.0 + FULL_RELIABILITY_COUNT).ln()).min(1.0)
}

/// Aggregate scored news and Reddit texts into a decision.
///
/// Returns `None` when there is nothing to score.
pub fn summarize(
    news: &[ScoredText],
    reddit: &[ScoredText],
    thresholds: &SignalThresholds,
) -> Option<SentimentSummary> {
    let scores: Vec<f64> = news.iter().chain(reddit).map(|t| t.score).collect();
    if scores.is_empty() {
        return None;
    }

    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    let base_confidence = sigmoid(2.0 * avg);
    let confidence = 0.5 + (base_confidence - 0.5) * reliability(scores.len());

    let decision = if confidence >= thresholds.buy {
        Decision::Buy
    } else if confidence <= thresholds.sell {
        Decision::Sell
    } else {
        Decision::Hold
    };

    let news_texts: Vec<&str> = news.iter().map(|t| t.text.as_str()).collect();
    let reddit_texts: Vec<&str> = reddit.iter().map(|t| t.text.as_str()).collect();

    Some(SentimentSummary {
        decision,
        confidence: round_to(confidence * 100.0, 1),
        news_count: news.len(),
        reddit_count: reddit.len(),
        total_analyzed: scores.len(),
        positive: scores.iter().filter(|s| **s > 0.0).count(),
        negative: scores.iter().filter(|s| **s < 0.0).count(),
        avg_sentiment: round_to(avg, 3),
        news_topics: explain_topics(&news_texts, NEWS_VOCAB),
        reddit_topics: explain_topics(&reddit_texts, REDDIT_VOCAB),
        sample_titles: news_texts
            .iter()
            .take(SAMPLE_TITLES)
            .map(|s| s.to_string())
            .collect(),
    })
}

/// Rank vocabulary words by how many texts mention them.
///
/// Keeps the top five (ties in first-seen order); weights are shares of all
/// mentions, rounded to three decimals.
pub fn explain_topics(texts: &[&str], vocab: &[&str]) -> Vec<TopicWeight> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for text in texts {
        let lower = text.to_lowercase();
        for word in vocab.iter().filter(|w| lower.contains(**w)) {
            match counts.iter_mut().find(|(w, _)| w == word) {
                Some((_, n)) => *n += 1,
                None => counts.push((*word, 1)),
            }
        }
    }

    let total = counts.iter().map(|(_, n)| n).sum::<usize>().max(1) as f64;
    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(word, n)| TopicWeight {
            topic: word.to_string(),
            weight: round_to(n as f64 / total, 3),
        })
        .collect()
}
