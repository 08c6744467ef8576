//! Blocking wrapper around [`SalesDashboard`] for callers without an async runtime.
//!
//! Owns a current-thread Tokio runtime and drives every dashboard operation
//! to completion on it. Debounced loads only make progress while some call
//! is running on the runtime, so blocking callers should prefer the
//! immediate actions ([`search`](BlockingSalesDashboard::search), paging).
//!
//! # Example
//!
//! ```no_run
//! use sales_dashboard_sdk::{BlockingSalesDashboard, Granularity, SalesDashboard};
//!
//! let dashboard = BlockingSalesDashboard::new(SalesDashboard::builder()).unwrap();
//! dashboard.load();
//! let points = dashboard.chart(Granularity::Monthly).unwrap();
//! ```

use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::error::Result;
use crate::models::{AggregatedPoint, FilterState, QueryResult, SortBy};
use crate::{FeedSnapshot, Granularity, SalesDashboard, SalesDashboardBuilder};

pub struct BlockingSalesDashboard {
    runtime: Runtime,
    inner: SalesDashboard,
}

impl BlockingSalesDashboard {
    /// Build the dashboard from `builder` inside a dedicated runtime.
    pub fn new(builder: SalesDashboardBuilder) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = builder.build()?;
        Ok(Self { runtime, inner })
    }

    /// Run an async dashboard operation to completion.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use sales_dashboard_sdk::{BlockingSalesDashboard, SalesDashboard, SortBy};
    /// # let dashboard = BlockingSalesDashboard::new(SalesDashboard::builder()).unwrap();
    /// let snapshot = dashboard.run(|d| d.toggle_sort(SortBy::Price));
    /// ```
    pub fn run<'a, F, Fut, T>(&'a self, f: F) -> T
    where
        F: FnOnce(&'a SalesDashboard) -> Fut,
        Fut: Future<Output = T> + 'a,
    {
        self.runtime.block_on(f(&self.inner))
    }

    pub fn dashboard(&self) -> &SalesDashboard {
        &self.inner
    }

    /// Fetch one page directly, bypassing cache and feed.
    pub fn fetch_sales(&self, filters: &FilterState) -> Result<QueryResult> {
        self.runtime.block_on(self.inner.client().fetch_sales(filters))
    }

    pub fn load(&self) -> FeedSnapshot {
        self.run(|d| d.load())
    }

    pub fn search(&self) -> FeedSnapshot {
        self.run(|d| d.search())
    }

    pub fn toggle_sort(&self, column: SortBy) -> FeedSnapshot {
        self.run(|d| d.toggle_sort(column))
    }

    pub fn next_page(&self) -> Option<FeedSnapshot> {
        self.run(|d| d.next_page())
    }

    pub fn previous_page(&self) -> Option<FeedSnapshot> {
        self.run(|d| d.previous_page())
    }

    pub fn refetch(&self) -> FeedSnapshot {
        self.run(|d| d.refetch())
    }

    pub fn chart(&self, granularity: Granularity) -> Result<Vec<AggregatedPoint>> {
        self.inner.chart(granularity)
    }
}
