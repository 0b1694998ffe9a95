//! Fixed-interval refresh of the feed.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::client::FeedClient;
use crate::model::FeedSnapshot;

pub struct Poller {
    client: FeedClient,
    interval: Duration,
    log_limit: usize,
}

impl Poller {
    /// Uses the interval and row limit from the client's config.
    pub fn new(client: FeedClient) -> Self {
        let interval = client.config().poll_interval;
        let log_limit = client.config().log_limit;
        Self { client, interval, log_limit }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_log_limit(mut self, log_limit: usize) -> Self {
        self.log_limit = log_limit;
        self
    }

    /// Fetch immediately, then every interval, until `shutdown` resolves.
    ///
    /// `on_snapshot` sees every successful refresh. A failed refresh is
    /// logged and the previous snapshot stays current. Returns the last
    /// successful snapshot.
    pub async fn run<F, S>(&self, mut on_snapshot: F, shutdown: S) -> Option<FeedSnapshot>
    where
        F: FnMut(&FeedSnapshot),
        S: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut last = None;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    match self.client.snapshot(self.log_limit).await {
                        Ok(snapshot) => {
                            on_snapshot(&snapshot);
                            last = Some(snapshot);
                        }
                        Err(e) => warn!(error = %e, "feed refresh failed; keeping previous snapshot"),
                    }
                }
            }
        }
        last
    }
}
