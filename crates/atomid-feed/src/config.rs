//! Feed endpoint configuration.

use std::time::Duration;

use uuid::Uuid;

use crate::error::{FeedError, FeedResult};

/// Id of the single stats row the collector maintains.
pub const STATS_ROW_ID: Uuid = Uuid::from_u128(1);

pub const STATS_TABLE: &str = "fee_collector_stats";
pub const LOGS_TABLE: &str = "collector_logs";

/// Rows fetched per refresh.
pub const DEFAULT_LOG_LIMIT: usize = 200;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`.
    pub base_url: String,
    /// Anonymous (read-only) API key.
    pub api_key: String,
    pub rest_path: String,
    pub stats_table: String,
    pub logs_table: String,
    pub stats_row_id: Uuid,
    pub log_limit: usize,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            rest_path: "rest/v1".to_string(),
            stats_table: STATS_TABLE.to_string(),
            logs_table: LOGS_TABLE.to_string(),
            stats_row_id: STATS_ROW_ID,
            log_limit: DEFAULT_LOG_LIMIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn validate(&self) -> FeedResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(FeedError::Config("base_url must not be empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(FeedError::Config("api_key must not be empty".to_string()));
        }
        if self.log_limit == 0 {
            return Err(FeedError::Config("log_limit must be greater than zero".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(FeedError::Config("poll_interval must be greater than zero".to_string()));
        }
        Ok(())
    }
}
