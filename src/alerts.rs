//! Alert payloads and the sinks they are published to.

use crate::errors::Result;
use crate::models::{Decision, Direction};
use crate::signal::TopicWeight;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative price move from the baseline crossed the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub symbol: String,
    pub direction: Direction,
    /// Percent, two decimals.
    pub change_pct: f64,
    pub price: f64,
    /// Baseline the move was measured from.
    pub prev_close: f64,
    /// Unix seconds.
    pub ts: f64,
    pub trading_date: Option<String>,
}

/// Sentiment decision moved into BUY or SELL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAlert {
    pub symbol: String,
    pub decision: Decision,
    pub confidence: f64,
    pub price: Option<f64>,
    pub change_pct: Option<f64>,
    pub news_count: usize,
    pub reddit_count: usize,
    pub positive: usize,
    pub negative: usize,
    pub avg_sentiment: f64,
    pub news_topics: Vec<TopicWeight>,
    pub reddit_topics: Vec<TopicWeight>,
    pub sample_titles: Vec<String>,
    pub ts: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    Price(PriceAlert),
    Sentiment(SentimentAlert),
}

impl Alert {
    pub fn symbol(&self) -> &str {
        match self {
            Alert::Price(a) => &a.symbol,
            Alert::Sentiment(a) => &a.symbol,
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    alert: &'a Alert,
    iso_time: String,
}

/// Render the wire payload of an alert, stamped with `now`.
pub fn to_payload(alert: &Alert, now: DateTime<Utc>) -> Result<String> {
    let envelope = Envelope {
        alert,
        iso_time: now.to_rfc3339_opts(SecondsFormat::Micros, true),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Destination for alerts raised by the monitor.
pub trait AlertSink: Send {
    fn emit(&mut self, alert: &Alert) -> Result<()>;
}

/// Publishes alerts through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn emit(&mut self, alert: &Alert) -> Result<()> {
        let payload = to_payload(alert, Utc::now())?;
        tracing::info!(symbol = alert.symbol(), "[ALERT]\n{}", payload);
        Ok(())
    }
}

/// Unix timestamp in fractional seconds.
pub fn unix_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}
