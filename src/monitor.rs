//! Monitoring cycle: prices → baseline alerts → sentiment → snapshot export.

use crate::{
    alerts::{Alert, AlertSink, PriceAlert, SentimentAlert, unix_seconds},
    baseline::BaselineTracker,
    config::MonitorConfig,
    export::{AnalysisRecord, export_snapshot},
    feed::FeedSnapshot,
    models::{Decision, Direction},
    signal::{SignalThresholds, summarize},
    utils::round_to,
};
use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketStatus {
    Live,
    Closed,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketStatus::Live => f.write_str("LIVE"),
            MarketStatus::Closed => f.write_str("CLOSED"),
        }
    }
}

/// Regular session: weekdays, 09:00 until 16:00 local time.
pub fn market_status<T: Datelike + Timelike>(now: &T) -> MarketStatus {
    let weekday = now.weekday().num_days_from_monday() < 5;
    if weekday && (9..16).contains(&now.hour()) {
        MarketStatus::Live
    } else {
        MarketStatus::Closed
    }
}

/// Counts of what one cycle produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub price_alerts: usize,
    pub sentiment_alerts: usize,
    pub analyzed: usize,
}

/// Owns all per-symbol state of the monitoring loop.
pub struct Monitor<S> {
    config: MonitorConfig,
    thresholds: SignalThresholds,
    baselines: BaselineTracker,
    latest: BTreeMap<String, AnalysisRecord>,
    sink: S,
}

impl<S: AlertSink> Monitor<S> {
    pub fn new(config: MonitorConfig, sink: S) -> Self {
        let thresholds = SignalThresholds {
            buy: config.buy_thresh,
            sell: config.sell_thresh,
        };
        let baselines = BaselineTracker::new(config.price_thresh, config.cooldown);
        Self {
            config,
            thresholds,
            baselines,
            latest: BTreeMap::new(),
            sink,
        }
    }

    /// Latest analysis per symbol, as exported.
    pub fn latest(&self) -> &BTreeMap<String, AnalysisRecord> {
        &self.latest
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one monitoring cycle against `feed`.
    pub fn run_cycle(&mut self, feed: &FeedSnapshot, now: DateTime<Utc>) -> CycleReport {
        let mut report = CycleReport::default();
        if feed.symbols.is_empty() {
            info!("[HEARTBEAT] waiting for feed");
            return report;
        }

        let status = market_status(&now.with_timezone(&Local));
        info!(%status, symbols = self.config.watch.len(), "[CYCLE] monitoring");

        // ----- price alerts -----
        for symbol in &self.config.watch {
            let Some(quote) = feed.get(symbol).and_then(|f| f.quote.as_ref()) else {
                continue;
            };
            let change = self.baselines.cumulative_change(symbol, quote.price);
            let baseline = self.baselines.baseline(symbol).unwrap_or(quote.price);
            info!(
                symbol = symbol.as_str(),
                price = round_to(quote.price, 2),
                baseline = round_to(baseline, 2),
                change_pct = round_to(change * 100.0, 2),
                session_pct = round_to(quote.session_change(self.config.price_calc_mode) * 100.0, 2),
                live = quote.is_live,
                trading_date = quote.trading_date.as_deref().unwrap_or("unknown"),
                "[PRICE]"
            );

            if self.baselines.should_alert(symbol, change, now) {
                let alert = Alert::Price(PriceAlert {
                    symbol: symbol.clone(),
                    direction: if change > 0.0 {
                        Direction::Up
                    } else {
                        Direction::Down
                    },
                    change_pct: round_to(change * 100.0, 2),
                    price: round_to(quote.price, 2),
                    prev_close: round_to(baseline, 2),
                    ts: unix_seconds(now),
                    trading_date: quote.trading_date.clone(),
                });
                publish(&mut self.sink, &alert);
                self.baselines.reset(symbol, quote.price, now);
                report.price_alerts += 1;
                info!(symbol = symbol.as_str(), new_baseline = round_to(quote.price, 2), "[PRICE] alert raised, baseline reset");
            }
        }

        // ----- sentiment -----
        for symbol in &self.config.watch {
            let Some(entry) = feed.get(symbol) else {
                continue;
            };
            let Some(summary) = summarize(&entry.news, &entry.reddit, &self.thresholds) else {
                continue;
            };
            let price = entry.quote.as_ref().map(|q| q.price);
            let change = price.map(|p| round_to(self.baselines.cumulative_change(symbol, p) * 100.0, 2));
            info!(
                symbol = symbol.as_str(),
                decision = %summary.decision,
                confidence = summary.confidence,
                news = summary.news_count,
                reddit = summary.reddit_count,
                "[SENTIMENT]"
            );

            let previous = self.latest.get(symbol).map(|r| r.decision);
            if summary.decision != Decision::Hold && previous != Some(summary.decision) {
                let alert = Alert::Sentiment(SentimentAlert {
                    symbol: symbol.clone(),
                    decision: summary.decision,
                    confidence: summary.confidence,
                    price: price.map(|p| round_to(p, 2)),
                    change_pct: change,
                    news_count: summary.news_count,
                    reddit_count: summary.reddit_count,
                    positive: summary.positive,
                    negative: summary.negative,
                    avg_sentiment: summary.avg_sentiment,
                    news_topics: summary.news_topics.clone(),
                    reddit_topics: summary.reddit_topics.clone(),
                    sample_titles: summary.sample_titles.clone(),
                    ts: unix_seconds(now),
                });
                publish(&mut self.sink, &alert);
                report.sentiment_alerts += 1;
            }

            self.latest.insert(
                symbol.clone(),
                AnalysisRecord::from_summary(summary, price, change, now),
            );
            report.analyzed += 1;
        }

        if let Err(e) = export_snapshot(&self.config.export_path, &self.latest, now) {
            warn!(error = %e, path = %self.config.export_path.display(), "[EXPORT] snapshot write failed");
        } else {
            info!(path = %self.config.export_path.display(), "[EXPORT] analysis exported");
        }
        report
    }
}

fn publish<S: AlertSink>(sink: &mut S, alert: &Alert) {
    if let Err(e) = sink.emit(alert) {
        warn!(error = %e, symbol = alert.symbol(), "[ALERT] emit failed");
    }
}

/// Spawn the monitoring loop: one cycle immediately, then every poll interval.
pub fn spawn_monitor<S>(
    mut monitor: Monitor<S>,
    mut feed_rx: watch::Receiver<FeedSnapshot>,
) -> tokio::task::JoinHandle<()>
where
    S: AlertSink + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(monitor.config.poll_interval);
        loop {
            ticker.tick().await;
            let feed = feed_rx.borrow_and_update().clone();
            let report = monitor.run_cycle(&feed, Utc::now());
            info!(
                price_alerts = report.price_alerts,
                sentiment_alerts = report.sentiment_alerts,
                analyzed = report.analyzed,
                "[CYCLE] done"
            );
        }
    })
}
