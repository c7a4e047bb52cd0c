//! # Query Cache
//!
//! Request-deduplicating cache with a staleness window, one instance per data
//! kind (coin list, global snapshot, price series by coin id).
//!
//! ## Guarantees
//!
//! - **One request per key**: while a fetch for a key is in flight, every other
//!   caller awaits the same shared future instead of starting a new request.
//! - **Staleness**: data younger than the stale time is served without a request.
//!   Older data is still served (no flash to empty) while a refetch runs.
//! - **Errors**: a failed fetch raises the error flag for every subscriber and
//!   keeps the last good data. Failed keys are not refetched before the stale
//!   time elapses again, so a broken upstream is not hammered every frame.
//! - **Ordering**: outcomes are recorded in completion order, and an outcome
//!   older than the one already applied is discarded.
//!
//! Fetches run on their own Tokio task, so the outcome is recorded even when
//! the caller that started it goes away.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use dashboard::services::query_cache::QueryCache;
//!
//! # async fn demo() {
//! let cache: QueryCache<(), Vec<u32>> = QueryCache::new("numbers", Duration::from_secs(60));
//! let data = cache.fetch((), || async { Ok(vec![1, 2, 3]) }).await.unwrap();
//! assert_eq!(*data, vec![1, 2, 3]);
//! assert!(cache.snapshot(&()).data.is_some());
//! # }
//! ```

use crate::core::error::{AppError, Result};
use futures::future::{ready, BoxFuture, Either, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

type SharedFetch<V> = Shared<BoxFuture<'static, Result<Arc<V>>>>;

struct InFlight<V> {
    generation: u64,
    future: SharedFetch<V>,
}

struct Entry<V> {
    data: Option<Arc<V>>,
    error: Option<AppError>,
    /// When the applied outcome's request started
    updated_at: Option<Instant>,
    /// When the last request (successful or not) started
    last_attempt: Option<Instant>,
    invalidated: bool,
    applied_generation: u64,
    in_flight: Option<InFlight<V>>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
            last_attempt: None,
            invalidated: false,
            applied_generation: 0,
            in_flight: None,
        }
    }
}

impl<V> Entry<V> {
    fn is_stale(&self, stale_time: Duration) -> bool {
        match (&self.data, self.updated_at) {
            (Some(_), Some(at)) => self.invalidated || at.elapsed() >= stale_time,
            _ => true,
        }
    }
}

/// Point-in-time view of one cache key, as consumed by the UI.
#[derive(Debug)]
pub struct QuerySnapshot<V> {
    /// Last good data; kept through refetches and failed refetches
    pub data: Option<Arc<V>>,
    /// First fetch in flight: no data yet
    pub is_loading: bool,
    /// Any fetch in flight, including background refetches
    pub is_fetching: bool,
    pub is_error: bool,
    pub error: Option<AppError>,
}

impl<V> Clone for QuerySnapshot<V> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            is_error: self.is_error,
            error: self.error.clone(),
        }
    }
}

impl<V> Default for QuerySnapshot<V> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_fetching: false,
            is_error: false,
            error: None,
        }
    }
}

/// Render state of a panel backed by one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing requested yet, or the first request is in flight
    Loading,
    /// No data and the last request failed
    Error,
    Ready,
}

impl<V> QuerySnapshot<V> {
    /// Collapse the flags into what a panel should render.
    ///
    /// Stale data wins over an error so a failed background refetch does not
    /// blank a panel that already has something to show.
    pub fn status(&self) -> QueryStatus {
        match (&self.data, self.is_error) {
            (Some(_), _) => QueryStatus::Ready,
            (None, true) => QueryStatus::Error,
            (None, false) => QueryStatus::Loading,
        }
    }
}

struct Inner<K, V> {
    name: &'static str,
    stale_time: Duration,
    entries: Mutex<HashMap<K, Entry<V>>>,
    generation: AtomicU64,
}

/// Deduplicating cache keyed by `K`, holding immutable `Arc<V>` snapshots.
///
/// Cloning is cheap and shares the underlying entries.
pub struct QueryCache<K, V> {
    inner: Arc<Inner<K, V>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + std::fmt::Debug + 'static,
    V: Send + Sync + 'static,
{
    /// Create an empty cache; `name` is only used in log records.
    pub fn new(name: &'static str, stale_time: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                stale_time,
                entries: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.inner.stale_time
    }

    /// Get data for `key`, fetching it with `fetcher` if needed.
    ///
    /// - fresh data is returned without calling `fetcher`
    /// - an in-flight request for `key` is joined instead of duplicated
    /// - otherwise `fetcher` runs on a new Tokio task and its outcome is recorded
    ///
    /// The request is registered when `fetch` is called, not when the returned
    /// future is first polled, so a caller that spawns the future cannot race
    /// another caller into a duplicate request. Must be called from within a
    /// Tokio runtime.
    pub fn fetch<F, Fut>(&self, key: K, fetcher: F) -> impl Future<Output = Result<Arc<V>>> + Send + 'static
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let mut entries = self.inner.entries.lock();
        let entry = entries.entry(key.clone()).or_default();

        if !entry.is_stale(self.inner.stale_time) {
            if let Some(data) = &entry.data {
                return Either::Left(ready(Ok(Arc::clone(data))));
            }
        }

        if let Some(joined) = entry.in_flight.as_ref().map(|f| f.future.clone()) {
            tracing::trace!(cache = self.inner.name, key = ?key, "Joining in-flight request");
            return Either::Right(joined);
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let started_at = Instant::now();
        entry.last_attempt = Some(started_at);

        let future = self.spawn_fetch(key.clone(), generation, started_at, fetcher());
        entry.in_flight = Some(InFlight {
            generation,
            future: future.clone(),
        });
        Either::Right(future)
    }

    fn spawn_fetch<Fut>(&self, key: K, generation: u64, started_at: Instant, fut: Fut) -> SharedFetch<V>
    where
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        tracing::debug!(cache = self.inner.name, key = ?key, generation, "Starting fetch");

        let cache = self.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let outcome = fut.await.map(Arc::new);
            cache.record(&task_key, generation, started_at, &outcome);
            outcome
        });

        let cache = self.clone();
        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let name = cache.inner.name;
                    tracing::error!(cache = name, error = %e, "Fetch task failed");
                    // the task never reached `record`; release the slot here
                    let outcome = Err(AppError::State(format!("{} fetch task failed: {}", name, e)));
                    cache.record(&key, generation, started_at, &outcome);
                    outcome
                }
            }
        }
        .boxed()
        .shared()
    }

    fn record(&self, key: &K, generation: u64, started_at: Instant, outcome: &Result<Arc<V>>) {
        let mut entries = self.inner.entries.lock();
        let entry = entries.entry(key.clone()).or_default();

        if entry
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation)
        {
            entry.in_flight = None;
        }

        if generation < entry.applied_generation {
            tracing::debug!(
                cache = self.inner.name,
                key = ?key,
                generation,
                applied = entry.applied_generation,
                "Discarding superseded outcome"
            );
            return;
        }
        entry.applied_generation = generation;

        match outcome {
            Ok(data) => {
                entry.data = Some(Arc::clone(data));
                entry.error = None;
                entry.updated_at = Some(started_at);
                entry.invalidated = false;
            }
            Err(e) => {
                tracing::warn!(cache = self.inner.name, key = ?key, error = %e, "Fetch failed");
                entry.error = Some(e.clone());
            }
        }
    }

    /// Non-blocking view of `key` for rendering.
    pub fn snapshot(&self, key: &K) -> QuerySnapshot<V> {
        let entries = self.inner.entries.lock();
        let Some(entry) = entries.get(key) else {
            return QuerySnapshot::default();
        };

        let is_fetching = entry.in_flight.is_some();
        QuerySnapshot {
            data: entry.data.clone(),
            is_loading: is_fetching && entry.data.is_none(),
            is_fetching,
            is_error: entry.error.is_some(),
            error: entry.error.clone(),
        }
    }

    /// Whether data for `key` is missing, invalidated or older than the stale time.
    pub fn is_stale(&self, key: &K) -> bool {
        self.inner
            .entries
            .lock()
            .get(key)
            .map_or(true, |entry| entry.is_stale(self.inner.stale_time))
    }

    /// Whether a subscriber should trigger a (background) fetch now.
    ///
    /// False while a request is in flight, and after a failure until the stale
    /// time has passed since that attempt.
    pub fn needs_fetch(&self, key: &K) -> bool {
        let entries = self.inner.entries.lock();
        let Some(entry) = entries.get(key) else {
            return true;
        };
        if entry.in_flight.is_some() {
            return false;
        }
        let attempt_due = entry
            .last_attempt
            .map_or(true, |at| at.elapsed() >= self.inner.stale_time);
        attempt_due && entry.is_stale(self.inner.stale_time)
    }

    /// Mark `key` stale so the next subscriber refetches it.
    ///
    /// Also lifts the retry back-off of a failed key.
    pub fn invalidate(&self, key: &K) {
        if let Some(entry) = self.inner.entries.lock().get_mut(key) {
            entry.invalidated = true;
            entry.last_attempt = None;
        }
    }
}
