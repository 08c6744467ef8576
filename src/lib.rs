//! Sales dashboard SDK for Rust.
//!
//! Provides the client-side core of the AutoBizz sales analytics dashboard:
//! a bearer-token session, a query client for the sales endpoint, a cached
//! and debounced fetch feed, a filter store with draft/commit semantics, and
//! the aggregation engine that turns daily totals into chart points.
//! Rendering is left to the caller.
//!
//! # Quick start
//!
//! ```no_run
//! use sales_dashboard_sdk::{Granularity, SalesDashboard};
//!
//! # async fn example() -> sales_dashboard_sdk::Result<()> {
//! let dashboard = SalesDashboard::builder().build()?;
//!
//! // Edit the filter form, then search
//! dashboard.edit_draft(|f| f.price_min = "100".into());
//! let snapshot = dashboard.search().await;
//!
//! // Chart the daily totals by week
//! let points = dashboard.chart(Granularity::Weekly)?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod auth;
pub mod backend;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod cache;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod format;
pub mod models;
pub mod query;
pub mod store;

pub use aggregate::{aggregate, tick_interval, Granularity};
pub use auth::TokenProvider;
pub use backend::{HttpBackend, SalesBackend};
#[cfg(feature = "blocking")]
pub use blocking::BlockingSalesDashboard;
pub use cache::QueryCache;
pub use client::SalesClient;
pub use debounce::Debouncer;
pub use error::{DashboardError, Result};
pub use feed::{FeedSnapshot, SalesFeed};
pub use models::{
    AggregatedPoint, AuthResponse, DailyTotal, FilterField, FilterState, Pagination, QueryResult,
    SalesRecord, SortBy, SortOrder,
};
pub use query::SalesQuery;
pub use store::FilterStore;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

// ---------------------------------------------------------------------------
// SalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesDashboard`].
///
/// Use [`SalesDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SalesDashboardBuilder::build).
pub struct SalesDashboardBuilder {
    base_url: Option<String>,
    timeout: Duration,
    freshness: Duration,
    debounce: Duration,
    cache_capacity: usize,
    token_type: String,
    initial_filters: FilterState,
    backend: Option<Arc<dyn SalesBackend>>,
}

impl Default for SalesDashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            freshness: config::DEFAULT_FRESHNESS,
            debounce: config::DEFAULT_DEBOUNCE,
            cache_capacity: config::DEFAULT_CACHE_CAPACITY,
            token_type: config::TOKEN_TYPE.to_string(),
            initial_filters: FilterState::default(),
            backend: None,
        }
    }
}

impl SalesDashboardBuilder {
    /// Set the API base URL.
    ///
    /// If not set, `SALES_API_BASE_URL` is used when present, otherwise the
    /// public AutoBizz endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a fetched page is served from cache. Defaults to 30 seconds.
    pub fn freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Quiet period for debounced filter edits. Defaults to 500 ms.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Maximum number of cached pages. Defaults to 64.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Token type sent to `/getAuthorize`. Defaults to `frontEndTest`.
    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Filter state the dashboard starts from.
    pub fn initial_filters(mut self, filters: FilterState) -> Self {
        self.initial_filters = filters;
        self
    }

    /// Use a custom transport instead of [`HttpBackend`].
    ///
    /// `base_url` and `timeout` are ignored when a backend is supplied.
    pub fn backend(mut self, backend: Arc<dyn SalesBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Build the dashboard. Nothing is fetched until the first load.
    pub fn build(self) -> Result<SalesDashboard> {
        if self.cache_capacity == 0 {
            return Err(DashboardError::InvalidArgument(
                "cache capacity must be at least 1".to_string(),
            ));
        }

        let base_url = self.base_url.unwrap_or_else(config::default_base_url);
        let backend: Arc<dyn SalesBackend> = match self.backend {
            Some(backend) => backend,
            None => Arc::new(HttpBackend::new(base_url.clone(), self.timeout)?),
        };

        let auth = Arc::new(TokenProvider::new(backend.clone(), self.token_type));
        let client = SalesClient::new(backend, auth);
        let cache = QueryCache::new(self.freshness, self.cache_capacity);
        let feed = SalesFeed::new(client.clone(), cache, self.debounce);

        Ok(SalesDashboard {
            base_url,
            client,
            feed,
            store: Mutex::new(FilterStore::new(self.initial_filters)),
        })
    }
}

// ---------------------------------------------------------------------------
// SalesDashboard
// ---------------------------------------------------------------------------

/// The main entry point: filter store, feed and chart data in one place.
///
/// Discrete actions (search, paging, sort toggles) load immediately; edits
/// that arrive in bursts (typing into filters) go through the debounce.
pub struct SalesDashboard {
    base_url: String,
    client: SalesClient,
    feed: SalesFeed,
    store: Mutex<FilterStore>,
}

impl SalesDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> SalesDashboardBuilder {
        SalesDashboardBuilder::default()
    }

    // -- Accessors ---------------------------------------------------------

    pub fn client(&self) -> &SalesClient {
        &self.client
    }

    pub fn feed(&self) -> &SalesFeed {
        &self.feed
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.feed.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.feed.subscribe()
    }

    /// The committed filter state.
    pub fn filters(&self) -> FilterState {
        self.store().committed().clone()
    }

    /// The filter form's uncommitted state.
    pub fn draft(&self) -> FilterState {
        self.store().draft().clone()
    }

    // -- Filter form -------------------------------------------------------

    /// Edit the draft. Nothing is fetched until [`search`](Self::search).
    pub fn edit_draft<F>(&self, edit: F)
    where
        F: FnOnce(&mut FilterState),
    {
        edit(self.store().draft_mut());
    }

    /// Commit the draft and load it immediately.
    ///
    /// Searching the key already on display forces a refetch.
    pub async fn search(&self) -> FeedSnapshot {
        let filters = self.store().commit().clone();
        if self.feed.current_key().as_deref() == Some(filters.cache_key().as_str()) {
            debug!("search on unchanged filters, refetching");
            self.feed.refetch().await
        } else {
            self.feed.load(filters).await
        }
    }

    /// Load the committed filters immediately (initial page load).
    pub async fn load(&self) -> FeedSnapshot {
        let filters = self.filters();
        self.feed.load(filters).await
    }

    /// Edit the committed filters directly and schedule a debounced load.
    pub fn edit_filters<F>(&self, edit: F)
    where
        F: FnOnce(&mut FilterState),
    {
        let filters = self.store().update(edit).clone();
        self.feed.load_debounced(filters);
    }

    /// Empty all filters and schedule a debounced load.
    pub fn clear_filters(&self) {
        let filters = self.store().clear_filters().clone();
        self.feed.load_debounced(filters);
    }

    /// Remove one filter and schedule a debounced load.
    pub fn remove_filter(&self, field: FilterField) {
        let filters = self.store().remove_filter(field).clone();
        self.feed.load_debounced(filters);
    }

    // -- Table actions -----------------------------------------------------

    /// Sort by `column` (ascending, or descending on a repeat click) and load.
    pub async fn toggle_sort(&self, column: SortBy) -> FeedSnapshot {
        let filters = self.store().toggle_sort(column).clone();
        self.feed.load(filters).await
    }

    /// Load the next page. Returns `None` when the current page has no successor.
    pub async fn next_page(&self) -> Option<FeedSnapshot> {
        let pagination = self.pagination();
        let filters = {
            let mut store = self.store();
            if !store.next_page(&pagination) {
                return None;
            }
            store.committed().clone()
        };
        Some(self.feed.load(filters).await)
    }

    /// Load the previous page. Returns `None` on the first page.
    pub async fn previous_page(&self) -> Option<FeedSnapshot> {
        let pagination = self.pagination();
        let filters = {
            let mut store = self.store();
            if !store.previous_page(&pagination) {
                return None;
            }
            store.committed().clone()
        };
        Some(self.feed.load(filters).await)
    }

    /// Re-issue the current request (the "try again" action).
    pub async fn refetch(&self) -> FeedSnapshot {
        self.feed.refetch().await
    }

    // -- Derived data ------------------------------------------------------

    /// Chart points for the page on display. Empty while loading or failed.
    pub fn chart(&self, granularity: Granularity) -> Result<Vec<AggregatedPoint>> {
        match self.feed.snapshot().data {
            Some(data) => aggregate(&data.totals, granularity),
            None => Ok(Vec::new()),
        }
    }

    /// Cursors of the page on display.
    pub fn pagination(&self) -> Pagination {
        self.feed
            .snapshot()
            .data
            .map(|d| d.pagination.clone())
            .unwrap_or_default()
    }

    /// Drop the cached auth token; the next request fetches a new one.
    pub async fn refresh_session(&self) {
        self.client.auth().invalidate().await;
    }

    fn store(&self) -> MutexGuard<'_, FilterStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SalesDashboard(base_url={}, cached_pages={}, key={})",
            self.base_url,
            self.feed.cache_len(),
            self.feed.current_key().unwrap_or_else(|| "-".to_string())
        )
    }
}
