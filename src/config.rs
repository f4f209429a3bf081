//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use crate::models::PriceCalcMode;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_WATCH: &str = "AAPL,NVDA,MSFT,BTC-USD,ETH-USD";

/// Consolidated monitoring configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Symbols to track, in the order they were listed.
    pub watch: Vec<String>,
    /// Fractional move from baseline that triggers a price alert (0.005 = 0.5%).
    pub price_thresh: f64,
    /// Confidence at or above which the decision is BUY.
    pub buy_thresh: f64,
    /// Confidence at or below which the decision is SELL.
    pub sell_thresh: f64,
    /// Minimum gap between two price alerts for the same symbol.
    pub cooldown: Duration,
    pub poll_interval: Duration,
    pub price_calc_mode: PriceCalcMode,
    /// Feed file re-read on every cycle.
    pub feed_path: PathBuf,
    /// Where the latest analysis snapshot is written.
    pub export_path: PathBuf,
}

impl MonitorConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let watch: Vec<String> = lookup("WATCH")
            .unwrap_or_else(|| DEFAULT_WATCH.into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if watch.is_empty() {
            return Err(AppError::Config("WATCH must list at least one symbol".into()));
        }

        let price_thresh: f64 = parse_or(&lookup, "PRICE_THRESH", 0.005)?;
        let buy_thresh: f64 = parse_or(&lookup, "BUY_THRESH", 0.65)?;
        let sell_thresh: f64 = parse_or(&lookup, "SELL_THRESH", 0.35)?;
        let cooldown_min: f64 = parse_or(&lookup, "COOLDOWN_MIN", 1.0)?;
        let poll_seconds: u64 = parse_or(&lookup, "POLL_SECONDS", 15)?;

        for (key, value) in [
            ("PRICE_THRESH", price_thresh),
            ("BUY_THRESH", buy_thresh),
            ("SELL_THRESH", sell_thresh),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Config(format!("{key} must be within [0, 1], got {value}")));
            }
        }
        if sell_thresh >= buy_thresh {
            return Err(AppError::Config(format!(
                "SELL_THRESH ({sell_thresh}) must be below BUY_THRESH ({buy_thresh})"
            )));
        }
        if !cooldown_min.is_finite() || cooldown_min < 0.0 {
            return Err(AppError::Config(format!(
                "COOLDOWN_MIN must be a non-negative number, got {cooldown_min}"
            )));
        }
        let cooldown = Duration::try_from_secs_f64(cooldown_min * 60.0).map_err(|e| {
            AppError::Config(format!("COOLDOWN_MIN={cooldown_min} is invalid: {e}"))
        })?;
        if poll_seconds == 0 {
            return Err(AppError::Config("POLL_SECONDS must be greater than zero".into()));
        }

        let price_calc_mode = match lookup("PRICE_CALC_MODE") {
            Some(raw) => raw.parse()?,
            None => PriceCalcMode::DayToDay,
        };

        Ok(Self {
            watch,
            price_thresh,
            buy_thresh,
            sell_thresh,
            cooldown,
            poll_interval: Duration::from_secs(poll_seconds),
            price_calc_mode,
            feed_path: lookup("FEED_PATH")
                .unwrap_or_else(|| "feed.json".into())
                .into(),
            export_path: lookup("EXPORT_PATH")
                .unwrap_or_else(|| "latest_analysis.json".into())
                .into(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key}={raw:?} is invalid: {e}"))),
        None => Ok(default),
    }
}

/// Fixed settings of the startup shim. Not read from the environment.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub app_name: String,
    /// Interpreter names probed in order.
    pub candidates: Vec<String>,
    /// Program file handed to the interpreter, relative to the working directory.
    pub main_file: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            app_name: "FinGalaxy".into(),
            candidates: vec!["python3".into(), "python".into()],
            main_file: "app.py".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = MonitorConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.watch, vec!["AAPL", "NVDA", "MSFT", "BTC-USD", "ETH-USD"]);
        assert_eq!(cfg.price_thresh, 0.005);
        assert_eq!(cfg.buy_thresh, 0.65);
        assert_eq!(cfg.sell_thresh, 0.35);
        assert_eq!(cfg.cooldown, Duration::from_secs(60));
        assert_eq!(cfg.poll_interval, Duration::from_secs(15));
        assert_eq!(cfg.price_calc_mode, PriceCalcMode::DayToDay);
        assert_eq!(cfg.feed_path, PathBuf::from("feed.json"));
        assert_eq!(cfg.export_path, PathBuf::from("latest_analysis.json"));
    }

    #[test]
    fn watch_list_is_trimmed() {
        let cfg = MonitorConfig::from_lookup(lookup_from(&[("WATCH", " AAPL, ,ETH-USD ,")])).unwrap();
        assert_eq!(cfg.watch, vec!["AAPL", "ETH-USD"]);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = MonitorConfig::from_lookup(lookup_from(&[
            ("PRICE_THRESH", "0.01"),
            ("COOLDOWN_MIN", "0.5"),
            ("POLL_SECONDS", "30"),
            ("PRICE_CALC_MODE", "intraday"),
        ]))
        .unwrap();
        assert_eq!(cfg.price_thresh, 0.01);
        assert_eq!(cfg.cooldown, Duration::from_secs(30));
        assert_eq!(cfg.poll_interval, Duration::from_secs(30));
        assert_eq!(cfg.price_calc_mode, PriceCalcMode::Intraday);
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            vec![("WATCH", " , ")],
            vec![("PRICE_THRESH", "abc")],
            vec![("BUY_THRESH", "1.5")],
            vec![("BUY_THRESH", "0.4"), ("SELL_THRESH", "0.4")],
            vec![("POLL_SECONDS", "0")],
            vec![("COOLDOWN_MIN", "-1")],
            vec![("COOLDOWN_MIN", "1e300")],
            vec![("PRICE_CALC_MODE", "weekly")],
        ] {
            let res = MonitorConfig::from_lookup(lookup_from(&pairs));
            assert!(
                matches!(res, Err(AppError::Config(_))),
                "expected config error for {pairs:?}"
            );
        }
    }

    #[test]
    fn launcher_defaults() {
        let cfg = LauncherConfig::default();
        assert_eq!(cfg.candidates, vec!["python3", "python"]);
        assert_eq!(cfg.main_file, PathBuf::from("app.py"));
    }
}
