use anyhow::Result;
use fingalaxy::{
    alerts::LogSink,
    config::MonitorConfig,
    feed::{self, FeedSnapshot},
    monitor::{self, Monitor},
    utils,
};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let config = MonitorConfig::load()?;
    tracing::info!(
        watch = %config.watch.join(", "),
        price_thresh_pct = config.price_thresh * 100.0,
        buy_thresh = config.buy_thresh,
        sell_thresh = config.sell_thresh,
        poll_secs = config.poll_interval.as_secs(),
        mode = ?config.price_calc_mode,
        "[INIT] FinGalaxy monitor starting"
    );

    // Initial feed read so the first cycle has data
    let initial = match FeedSnapshot::load(&config.feed_path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, path = %config.feed_path.display(), "[INIT] feed not readable yet");
            FeedSnapshot::default()
        }
    };
    let (feed_tx, feed_rx) = watch::channel(initial);
    let feed_task = feed::spawn_feed_watcher(config.feed_path.clone(), config.poll_interval, feed_tx);
    tracing::info!(path = %config.feed_path.display(), "[INIT] feed watcher started");

    let monitor_task = monitor::spawn_monitor(Monitor::new(config, LogSink), feed_rx);

    tokio::select! {
        res = futures::future::try_join(feed_task, monitor_task) => {
            res?;
            tracing::warn!("background tasks exited");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down FinGalaxy");
        }
    }
    Ok(())
}
