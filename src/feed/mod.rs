//! Feed of quotes and pre-scored texts.
//!
//! Responsibilities:
//! • Parse the feed file written by the upstream collectors.
//! • De-duplicate and cap the texts per symbol.
//! • Keep the latest good snapshot published to the monitor.

pub mod snapshot;
pub mod watcher;

pub use snapshot::{FeedSnapshot, MAX_NEWS, MAX_REDDIT};
pub use watcher::spawn_feed_watcher;
