//! Core library for the FinGalaxy monitoring bot.
//!
//! The `fingalaxy` binary runs the monitoring loop over a feed of quotes and
//! pre-scored texts; `fingalaxy-launch` is the startup shim that hands the
//! process to the Python application; `fingalaxy-query` reads the exported
//! snapshot.

pub mod alerts;
pub mod baseline;
pub mod config;
pub mod errors;
pub mod export;
pub mod feed;
pub mod launcher;
pub mod models;
pub mod monitor;
pub mod query;
pub mod signal;
pub mod utils;
