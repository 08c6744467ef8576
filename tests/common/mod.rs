//! Shared test fixtures for the sales dashboard integration tests.
//!
//! Provides `FakeBackend`, an in-process `SalesBackend` that counts calls,
//! records the queries it receives, and can be told to fail or to answer a
//! given key slowly. Pair it with `#[tokio::test(start_paused = true)]` so
//! latencies and expiry windows run on virtual time.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sales_dashboard_sdk::{
    AuthResponse, DailyTotal, DashboardError, FilterState, Pagination, QueryResult, Result,
    SalesBackend, SalesDashboard, SalesQuery, SalesRecord,
};

pub struct FakeBackend {
    auth_calls: AtomicUsize,
    sales_calls: AtomicUsize,
    expire: Mutex<f64>,
    auth_latency: Mutex<Duration>,
    auth_status: Mutex<Option<u16>>,
    sales_status: Mutex<Option<u16>>,
    latency: Mutex<HashMap<String, Duration>>,
    pages: Mutex<HashMap<String, QueryResult>>,
    queries: Mutex<Vec<Vec<(&'static str, String)>>>,
    tokens: Mutex<Vec<String>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            auth_calls: AtomicUsize::new(0),
            sales_calls: AtomicUsize::new(0),
            expire: Mutex::new(3600.0),
            auth_latency: Mutex::new(Duration::ZERO),
            auth_status: Mutex::new(None),
            sales_status: Mutex::new(None),
            latency: Mutex::new(HashMap::new()),
            pages: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub fn sales_calls(&self) -> usize {
        self.sales_calls.load(Ordering::SeqCst)
    }

    /// Token lifetime in seconds handed out by `authorize`.
    pub fn set_expire(&self, seconds: f64) {
        *self.expire.lock().unwrap() = seconds;
    }

    pub fn set_auth_latency(&self, latency: Duration) {
        *self.auth_latency.lock().unwrap() = latency;
    }

    /// Make `authorize` fail with `status`, or succeed again with `None`.
    pub fn fail_auth(&self, status: Option<u16>) {
        *self.auth_status.lock().unwrap() = status;
    }

    /// Make `sales` fail with `status`, or succeed again with `None`.
    pub fn fail_sales(&self, status: Option<u16>) {
        *self.sales_status.lock().unwrap() = status;
    }

    /// Delay answers for `filters` by `latency`.
    pub fn set_latency(&self, filters: &FilterState, latency: Duration) {
        self.latency
            .lock()
            .unwrap()
            .insert(filters.cache_key(), latency);
    }

    /// Serve `page` for `filters` instead of the generated default.
    pub fn set_page(&self, filters: &FilterState, page: QueryResult) {
        self.pages.lock().unwrap().insert(filters.cache_key(), page);
    }

    pub fn queries(&self) -> Vec<Vec<(&'static str, String)>> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query_value(&self, key: &str) -> Option<String> {
        self.queries
            .lock()
            .unwrap()
            .last()
            .and_then(|q| q.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone()))
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalesBackend for FakeBackend {
    async fn authorize(&self, token_type: &str) -> Result<AuthResponse> {
        let n = self.auth_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let latency = *self.auth_latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(status) = *self.auth_status.lock().unwrap() {
            return Err(DashboardError::AuthFailure {
                status: Some(status),
                message: "Failed to get authorization token".to_string(),
            });
        }
        Ok(AuthResponse {
            token: format!("{}-token-{}", token_type, n),
            expire: *self.expire.lock().unwrap(),
        })
    }

    async fn sales(&self, token: &str, query: &SalesQuery) -> Result<QueryResult> {
        self.sales_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.build());
        self.tokens.lock().unwrap().push(token.to_string());

        let key = query.cache_key();
        let latency = self.latency.lock().unwrap().get(&key).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(status) = *self.sales_status.lock().unwrap() {
            return Err(DashboardError::FetchFailure {
                status: Some(status),
                message: "Failed to fetch sales data".to_string(),
            });
        }

        let page = self.pages.lock().unwrap().get(&key).cloned();
        Ok(page.unwrap_or_else(|| default_page(query.filters())))
    }
}

/// One record whose id names the email filter, a week and a half of totals,
/// and a next-page cursor derived from the current one.
pub fn default_page(filters: &FilterState) -> QueryResult {
    let tag = if filters.email.is_empty() {
        "all".to_string()
    } else {
        filters.email.clone()
    };
    QueryResult {
        records: vec![SalesRecord {
            id: format!("sale-{}", tag),
            date: "2024-03-05T14:30:00.000Z".to_string(),
            price: 250.0,
            customer_email: format!("{}@example.com", tag),
            customer_phone: "555-0100".to_string(),
            version: Some(0),
        }],
        totals: sample_totals(10),
        pagination: Pagination {
            before: if filters.after().is_empty() {
                String::new()
            } else {
                format!("before-{}", filters.after())
            },
            after: format!("next-{}", filters.after()),
        },
    }
}

/// `n` consecutive days starting 2024-03-01 with totals 100, 200, 300, ...
pub fn sample_totals(n: usize) -> Vec<DailyTotal> {
    (0..n)
        .map(|i| DailyTotal::new(format!("2024-03-{:02}", i + 1), (i as f64 + 1.0) * 100.0))
        .collect()
}

pub fn dashboard(backend: Arc<FakeBackend>) -> SalesDashboard {
    SalesDashboard::builder()
        .backend(backend)
        .build()
        .unwrap()
}

pub fn filters_with_email(email: &str) -> FilterState {
    let mut filters = FilterState::default();
    filters.email = email.to_string();
    filters
}
