//! Shared data structures used throughout the application.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the session change of a quote is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceCalcMode {
    /// Previous close to latest close.
    #[default]
    DayToDay,
    /// Same-day open to latest close.
    Intraday,
}

impl FromStr for PriceCalcMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day_to_day" => Ok(Self::DayToDay),
            "intraday" => Ok(Self::Intraday),
            other => Err(AppError::Config(format!(
                "PRICE_CALC_MODE must be day_to_day or intraday, got {other:?}"
            ))),
        }
    }
}

/// Latest price observation for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub prev_close: f64,
    #[serde(default)]
    pub open: Option<f64>,
    /// Trading day label, e.g. "2025-01-03 Fri".
    #[serde(default)]
    pub trading_date: Option<String>,
    /// True when the quote belongs to today's session.
    #[serde(default)]
    pub is_live: bool,
}

impl Quote {
    /// Price the session change is measured against.
    pub fn reference_price(&self, mode: PriceCalcMode) -> f64 {
        match mode {
            PriceCalcMode::DayToDay => self.prev_close,
            PriceCalcMode::Intraday => self.open.unwrap_or(self.prev_close),
        }
    }

    /// Fractional session change; 0 when the reference price is unusable.
    pub fn session_change(&self, mode: PriceCalcMode) -> f64 {
        let reference = self.reference_price(mode);
        if reference > 0.0 {
            (self.price - reference) / reference
        } else {
            0.0
        }
    }
}

/// A news headline or Reddit post with its precomputed sentiment score in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredText {
    pub text: String,
    pub score: f64,
}

/// Everything the feed knows about one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolFeed {
    #[serde(default)]
    pub quote: Option<Quote>,
    #[serde(default)]
    pub news: Vec<ScoredText>,
    #[serde(default)]
    pub reddit: Vec<ScoredText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Buy => "BUY",
            Decision::Sell => "SELL",
            Decision::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// Direction of a price move relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}
