//! Request lifecycle for the dashboard's sales data.
//!
//! [`SalesFeed`] turns filter states into published [`FeedSnapshot`]s:
//! fresh cached pages are served without a request, misses go to the
//! [`SalesClient`], and every request carries a generation number so a result
//! that arrives after a newer load has started is never shown. Only the newest
//! request for a key writes that key's cache entry.
//!
//! Requests run on their own tasks: a caller that stops waiting (a timeout, a
//! dropped future) never leaves its key stuck in flight.
//!
//! Lock order is always state, then cache; neither is held across `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cache::QueryCache;
use crate::client::SalesClient;
use crate::debounce::Debouncer;
use crate::error::DashboardError;
use crate::models::{FilterState, QueryResult};

// ---------------------------------------------------------------------------
// FeedSnapshot
// ---------------------------------------------------------------------------

/// What the presentation layer renders: the current key's data, error and
/// loading flag. `data` and `error` are never both set.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub key: Option<String>,
    pub data: Option<Arc<QueryResult>>,
    pub error: Option<Arc<DashboardError>>,
    pub is_loading: bool,
}

impl FeedSnapshot {
    fn loading(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            data: None,
            error: None,
            is_loading: true,
        }
    }

    fn ready(key: &str, data: Arc<QueryResult>) -> Self {
        Self {
            key: Some(key.to_string()),
            data: Some(data),
            error: None,
            is_loading: false,
        }
    }

    fn failed(key: &str, error: DashboardError) -> Self {
        Self {
            key: Some(key.to_string()),
            data: None,
            error: Some(Arc::new(error)),
            is_loading: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesFeed
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FeedState {
    filters: Option<FilterState>,
    key: Option<String>,
    /// Generation allowed to publish.
    current: u64,
    /// Last generation handed out.
    issued: u64,
    /// Key -> generation of the request in flight for it.
    in_flight: HashMap<String, u64>,
}

impl FeedState {
    fn next_generation(&mut self) -> u64 {
        self.issued += 1;
        self.current = self.issued;
        self.issued
    }
}

struct FeedInner {
    client: SalesClient,
    cache: Mutex<QueryCache>,
    state: Mutex<FeedState>,
    tx: watch::Sender<FeedSnapshot>,
    debouncer: Debouncer,
}

/// Cached, supersession-aware loader for sales pages.
///
/// Cheap to clone; clones share cache, state and subscribers.
#[derive(Clone)]
pub struct SalesFeed {
    inner: Arc<FeedInner>,
}

impl SalesFeed {
    pub fn new(client: SalesClient, cache: QueryCache, debounce: Duration) -> Self {
        let (tx, _rx) = watch::channel(FeedSnapshot::default());
        Self {
            inner: Arc::new(FeedInner {
                client,
                cache: Mutex::new(cache),
                state: Mutex::new(FeedState::default()),
                tx,
                debouncer: Debouncer::new(debounce),
            }),
        }
    }

    /// The snapshot currently on display.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Watch published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn current_key(&self) -> Option<String> {
        self.state().key.clone()
    }

    pub fn current_filters(&self) -> Option<FilterState> {
        self.state().filters.clone()
    }

    pub fn cache_len(&self) -> usize {
        self.cache().len()
    }

    /// Forget every cached page.
    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    /// Make `filters` current and load it right away.
    ///
    /// A fresh cached page is published without a request. If a request for
    /// the same key is already in flight, this waits for it instead of
    /// issuing another. Any pending debounced load is cancelled.
    ///
    /// Returns the snapshot on display once this load settles, which belongs
    /// to a newer key if another load superseded this one meanwhile.
    pub async fn load(&self, filters: FilterState) -> FeedSnapshot {
        self.inner.debouncer.cancel();
        self.load_now(filters).await
    }

    /// Load `filters` after the debounce quiet period, coalescing bursts.
    ///
    /// Only the last state scheduled within a quiet window is fetched.
    pub fn load_debounced(&self, filters: FilterState) {
        let feed = self.clone();
        self.inner.debouncer.schedule(async move {
            feed.load_now(filters).await;
        });
    }

    /// Whether a debounced load is still waiting out its quiet period.
    pub fn has_pending_load(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Re-issue the request for the current key, ignoring the freshness window.
    ///
    /// With nothing loaded yet this just returns the current snapshot.
    pub async fn refetch(&self) -> FeedSnapshot {
        let (filters, key, generation) = {
            let mut state = self.state();
            let (filters, key) = match (state.filters.clone(), state.key.clone()) {
                (Some(filters), Some(key)) => (filters, key),
                _ => return self.snapshot(),
            };
            let generation = state.next_generation();
            state.in_flight.insert(key.clone(), generation);
            self.inner.tx.send_replace(FeedSnapshot::loading(&key));
            (filters, key, generation)
        };
        debug!(key = %key, generation, "refetching");
        self.spawn_run(filters, key, generation).await
    }

    async fn load_now(&self, filters: FilterState) -> FeedSnapshot {
        let key = filters.cache_key();

        let generation = {
            let mut state = self.state();
            state.filters = Some(filters.clone());
            state.key = Some(key.clone());

            if let Some(result) = self.cache().get_fresh(&key) {
                debug!(key = %key, "serving cached page");
                state.next_generation();
                let snapshot = FeedSnapshot::ready(&key, result);
                self.inner.tx.send_replace(snapshot.clone());
                return snapshot;
            }

            match state.in_flight.get(&key).copied() {
                Some(in_flight) => {
                    debug!(key = %key, generation = in_flight, "joining in-flight request");
                    state.current = in_flight;
                    self.inner.tx.send_replace(FeedSnapshot::loading(&key));
                    None
                }
                None => {
                    let generation = state.next_generation();
                    state.in_flight.insert(key.clone(), generation);
                    self.inner.tx.send_replace(FeedSnapshot::loading(&key));
                    Some(generation)
                }
            }
        };

        match generation {
            Some(generation) => self.spawn_run(filters, key, generation).await,
            None => self.settled().await,
        }
    }

    /// Run the request on its own task so the generation bookkeeping
    /// completes even if the caller stops waiting.
    async fn spawn_run(&self, filters: FilterState, key: String, generation: u64) -> FeedSnapshot {
        let feed = self.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move { feed.run(filters, task_key, generation).await });
        match handle.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %key, error = %e, "sales fetch task failed");
                self.abandon(&key, generation, e.to_string())
            }
        }
    }

    /// Release a request whose task died before settling.
    fn abandon(&self, key: &str, generation: u64, message: String) -> FeedSnapshot {
        let mut state = self.state();
        if state.in_flight.get(key) == Some(&generation) {
            state.in_flight.remove(key);
        }
        if state.current != generation {
            return self.snapshot();
        }
        let snapshot = FeedSnapshot::failed(
            key,
            DashboardError::FetchFailure {
                status: None,
                message,
            },
        );
        self.inner.tx.send_replace(snapshot.clone());
        snapshot
    }

    async fn run(&self, filters: FilterState, key: String, generation: u64) -> FeedSnapshot {
        let outcome = self.inner.client.fetch_sales(&filters).await;

        let mut state = self.state();
        // Only the newest request for a key may write its cache entry.
        let latest = state.in_flight.get(&key) == Some(&generation);
        if latest {
            state.in_flight.remove(&key);
        }

        let snapshot = match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                if latest {
                    self.cache().insert(key.clone(), result.clone());
                }
                FeedSnapshot::ready(&key, result)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "sales fetch failed");
                if latest {
                    self.cache().invalidate(&key);
                }
                FeedSnapshot::failed(&key, e)
            }
        };

        if state.current == generation {
            self.inner.tx.send_replace(snapshot.clone());
            snapshot
        } else {
            debug!(key = %key, generation, "discarding superseded result");
            self.snapshot()
        }
    }

    /// Wait until the snapshot on display is no longer loading.
    async fn settled(&self) -> FeedSnapshot {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|snapshot| !snapshot.is_loading)
            .await
            .map(|snapshot| snapshot.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    fn state(&self) -> MutexGuard<'_, FeedState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cache(&self) -> MutexGuard<'_, QueryCache> {
        self.inner.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
