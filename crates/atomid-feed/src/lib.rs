//! atomid-feed
//!
//! Read-only access to the rewards collector's stats and log tables. The
//! collector itself runs elsewhere; this crate only queries what it writes:
//! - one stats row (cumulative SOL paid, last payout)
//! - the most recent log rows
//!
//! `Poller` refreshes both on a fixed interval for dashboards.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod poll;

pub use client::FeedClient;
pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use model::{FeedSnapshot, FeedStats, LogEntry, LogLevel};
pub use poll::Poller;
