use super::FeedSnapshot;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Spawns a background task that re-reads the feed file every `interval` and
/// publishes it on `tx`. A failed read keeps the previous snapshot published.
pub fn spawn_feed_watcher(
    path: PathBuf,
    interval: Duration,
    tx: watch::Sender<FeedSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match FeedSnapshot::load(&path).await {
                Ok(snapshot) => {
                    debug!(symbols = snapshot.symbols.len(), "[FEED] snapshot loaded");
                    if tx.send(snapshot).is_err() {
                        // monitor is gone
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "[FEED] read failed, keeping previous snapshot");
                }
            }
        }
    })
}
