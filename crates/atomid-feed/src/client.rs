//! HTTP client for the collector's REST tables.
//!
//! Queries use PostgREST conventions: `select`, `eq.` filters, `order` and
//! `limit` query parameters, plus the anon key in `apikey` and as a bearer
//! token.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::model::{FeedSnapshot, FeedStats, LogEntry};

#[derive(Debug, Clone)]
pub struct FeedClient {
    config: FeedConfig,
    base: Url,
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;

        let mut root = config.base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let base = Url::parse(&root)?.join(&format!("{}/", config.rest_path.trim_matches('/')))?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| FeedError::Config("api_key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| FeedError::Config("api_key is not a valid header value".to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, base, http })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// URL of the stats row query.
    pub fn stats_url(&self) -> FeedResult<Url> {
        let mut url = self.base.join(&self.config.stats_table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("id", &format!("eq.{}", self.config.stats_row_id));
        Ok(url)
    }

    /// URL of the newest-first log query.
    pub fn logs_url(&self, limit: usize) -> FeedResult<Url> {
        let mut url = self.base.join(&self.config.logs_table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "timestamp.desc")
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    async fn get_rows<T: DeserializeOwned>(&self, url: Url) -> FeedResult<Vec<T>> {
        debug!(%url, "feed query");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FeedError::Status { status: status.as_u16(), body });
        }
        Ok(resp.json::<Vec<T>>().await?)
    }

    /// The stats row, or `None` if the collector has not written it yet.
    pub async fn fetch_stats(&self) -> FeedResult<Option<FeedStats>> {
        let rows: Vec<FeedStats> = self.get_rows(self.stats_url()?).await?;
        Ok(rows.into_iter().next())
    }

    /// Up to `limit` log rows, newest first.
    pub async fn fetch_logs(&self, limit: usize) -> FeedResult<Vec<LogEntry>> {
        let mut logs: Vec<LogEntry> = self.get_rows(self.logs_url(limit)?).await?;
        // The server orders already; keep the contract if it does not.
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs.truncate(limit);
        Ok(logs)
    }

    /// Stats and logs, fetched concurrently.
    pub async fn snapshot(&self, limit: usize) -> FeedResult<FeedSnapshot> {
        let (stats, logs) = tokio::try_join!(self.fetch_stats(), self.fetch_logs(limit))?;
        Ok(FeedSnapshot { stats, logs })
    }
}
