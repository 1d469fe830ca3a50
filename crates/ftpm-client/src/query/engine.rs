//! Polling query engine.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use super::state::{QueryFailure, QueryKey, QueryState, Snapshot};
use crate::api::ApiError;
use crate::lifecycle::CancellationToken;

type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Retry policy for a failed fetch: fixed count, fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failure.
    pub retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const NONE: RetryPolicy = RetryPolicy {
        retries: 0,
        delay: Duration::ZERO,
    };

    pub const fn fixed(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Total attempts per fetch cycle.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Scheduling options of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub refetch_interval: Duration,
    pub retry: RetryPolicy,
}

/// A polled resource.
///
/// Every fetch draws a sequence number; a completion is published only if
/// its number is newer than the last published one, so a slow response can
/// never overwrite a fresher one. Concurrent [`Query::refresh`] calls for the
/// same query join the fetch already in flight.
pub struct Query<T> {
    key: QueryKey,
    options: QueryOptions,
    fetcher: Fetcher<T>,
    state: watch::Sender<QueryState<T>>,
    next_seq: AtomicU64,
    delivered_seq: Mutex<u64>,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter even if the fetch future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<T: Send + Sync + 'static> Query<T> {
    /// Create a query around a fetch function.
    pub fn new<F, Fut>(key: QueryKey, options: QueryOptions, fetch: F) -> Arc<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (state, _rx) = watch::channel(QueryState::Loading);
        Arc::new(Self {
            key,
            options,
            fetcher: Arc::new(move || fetch().boxed()),
            state,
            next_seq: AtomicU64::new(0),
            delivered_seq: Mutex::new(0),
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn state(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Fetch unless a fetch is already in flight.
    ///
    /// Returns `true` if this call published a new state.
    pub async fn refresh(&self) -> bool {
        if self
            .in_flight
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(query = %self.key, "joining fetch already in flight");
            return false;
        }
        let _guard = InFlight(&self.in_flight);
        self.run_cycle().await
    }

    /// Fetch even if another fetch is in flight; the older one's result
    /// is discarded if it lands later.
    pub async fn refetch(&self) -> bool {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let _guard = InFlight(&self.in_flight);
        self.run_cycle().await
    }

    async fn run_cycle(&self) -> bool {
        let seq = self.next_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let outcome = self.fetch_with_retry().await;
        self.settle(seq, outcome)
    }

    async fn fetch_with_retry(&self) -> Result<T, QueryFailure> {
        let max_attempts = self.options.retry.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            match (self.fetcher)().await {
                Ok(data) => return Ok(data),
                Err(err) if attempt < max_attempts => {
                    warn!(
                        query = %self.key,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(self.options.retry.delay).await;
                }
                Err(err) => {
                    error!(
                        query = %self.key,
                        attempts = attempt,
                        error = %err,
                        "Fetch failed, retries exhausted"
                    );
                    return Err(QueryFailure {
                        message: err.to_string(),
                        status: err.status(),
                        failure_count: attempt,
                        failed_at: Utc::now(),
                    });
                }
            }
        }
    }

    /// Publish the outcome of fetch `seq` unless a newer one was published.
    fn settle(&self, seq: u64, outcome: Result<T, QueryFailure>) -> bool {
        let mut delivered = self.delivered_seq.lock();
        if seq <= *delivered {
            debug!(
                query = %self.key,
                seq,
                delivered = *delivered,
                "Discarding out-of-order completion"
            );
            return false;
        }
        *delivered = seq;

        let next = match outcome {
            Ok(data) => QueryState::Success(Snapshot {
                data: Arc::new(data),
                fetched_at: Utc::now(),
            }),
            Err(failure) => QueryState::Error(failure),
        };
        self.state.send_replace(next);
        true
    }

    /// Poll on the configured interval until `token` is cancelled.
    ///
    /// The first fetch starts immediately.
    pub async fn poll(&self, mut token: CancellationToken) {
        let mut interval = tokio::time::interval(self.options.refetch_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = self.refresh() => {}
            }
        }

        debug!(query = %self.key, "Polling stopped");
    }

    /// Spawn [`Query::poll`] on the runtime.
    pub fn spawn_polling(self: &Arc<Self>, token: CancellationToken) -> JoinHandle<()> {
        let query = Arc::clone(self);
        tokio::spawn(async move { query.poll(token).await })
    }
}
