use crate::errors::Result;
use crate::models::{ScoredText, SymbolFeed};
use crate::utils::dedupe_preserving_order;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const MAX_NEWS: usize = 30;
pub const MAX_REDDIT: usize = 60;

/// One read of the feed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    pub symbols: HashMap<String, SymbolFeed>,
}

impl FeedSnapshot {
    /// Parse a feed document and normalize its texts.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut snapshot: FeedSnapshot = serde_json::from_str(raw)?;
        for feed in snapshot.symbols.values_mut() {
            feed.news = clean_texts(std::mem::take(&mut feed.news), MAX_NEWS);
            feed.reddit = clean_texts(std::mem::take(&mut feed.reddit), MAX_REDDIT);
        }
        Ok(snapshot)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse(&raw)
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolFeed> {
        self.symbols.get(symbol)
    }
}

/// Trim, drop blanks, de-duplicate by text and cap.
fn clean_texts(items: Vec<ScoredText>, cap: usize) -> Vec<ScoredText> {
    let trimmed: Vec<ScoredText> = items
        .into_iter()
        .filter_map(|item| {
            let text = item.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(ScoredText {
                    text: text.to_string(),
                    score: item.score,
                })
            }
        })
        .collect();
    let mut unique = dedupe_preserving_order(trimmed, |item| item.text.clone());
    unique.truncate(cap);
    unique
}
