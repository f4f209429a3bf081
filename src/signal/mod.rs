pub mod evaluator;
pub mod types;

pub use evaluator::{NEWS_VOCAB, REDDIT_VOCAB, explain_topics, summarize};
pub use types::{SentimentSummary, SignalThresholds, TopicWeight};
