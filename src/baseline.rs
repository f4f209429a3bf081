//! Per-symbol baseline prices for cumulative move alerts.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Baseline {
    price: f64,
    last_alert: Option<DateTime<Utc>>,
}

/// Tracks the price each symbol is measured against and when it last alerted.
#[derive(Debug, Clone)]
pub struct BaselineTracker {
    threshold: f64,
    cooldown: std::time::Duration,
    baselines: HashMap<String, Baseline>,
}

impl BaselineTracker {
    pub fn new(threshold: f64, cooldown: std::time::Duration) -> Self {
        Self {
            threshold,
            cooldown,
            baselines: HashMap::new(),
        }
    }

    pub fn baseline(&self, symbol: &str) -> Option<f64> {
        self.baselines.get(symbol).map(|b| b.price)
    }

    /// Fractional change of `price` from the symbol's baseline.
    ///
    /// The first observation becomes the baseline and reports 0.
    pub fn cumulative_change(&mut self, symbol: &str, price: f64) -> f64 {
        let entry = self.baselines.entry(symbol.to_string()).or_insert(Baseline {
            price,
            last_alert: None,
        });
        if entry.price > 0.0 {
            (price - entry.price) / entry.price
        } else {
            0.0
        }
    }

    /// Whether a move of `change` should alert now.
    pub fn should_alert(&self, symbol: &str, change: f64, now: DateTime<Utc>) -> bool {
        if change.abs() < self.threshold {
            return false;
        }
        match self.baselines.get(symbol).and_then(|b| b.last_alert) {
            // a clock that went backwards keeps the symbol cooling down
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed >= self.cooldown)
                .unwrap_or(false),
            None => true,
        }
    }

    /// Start measuring from `price` after an alert fired at `now`.
    pub fn reset(&mut self, symbol: &str, price: f64, now: DateTime<Utc>) {
        self.baselines.insert(
            symbol.to_string(),
            Baseline {
                price,
                last_alert: Some(now),
            },
        );
    }
}
