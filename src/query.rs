//! Query parameter builder for the sales endpoint.
//!
//! The endpoint expects the full parameter set on every call, so every key is
//! always emitted, unset values as empty strings. Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use sales_dashboard_sdk::{SalesQuery, SortBy, SortOrder};
//! let params = SalesQuery::new()
//!     .start_date("2024-01-01")
//!     .price_min("100")
//!     .sort(SortBy::Price, SortOrder::Desc)
//!     .build();
//! assert_eq!(params.len(), 9);
//! ```

use crate::config::QUERY_KEYS;
use crate::models::{FilterState, SortBy, SortOrder};

/// Builds the nine `GET /sales` parameters from a [`FilterState`].
///
/// Cursor and sort setters go through [`FilterState`], so the pagination
/// invariants hold for built queries too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesQuery {
    filters: FilterState,
}

impl SalesQuery {
    /// Start from the default filter state (no filters, date ascending).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_filters(filters: &FilterState) -> Self {
        Self {
            filters: filters.clone(),
        }
    }

    pub fn start_date(&mut self, date: &str) -> &mut Self {
        self.filters.start_date = date.to_string();
        self
    }

    pub fn end_date(&mut self, date: &str) -> &mut Self {
        self.filters.end_date = date.to_string();
        self
    }

    pub fn price_min(&mut self, price: &str) -> &mut Self {
        self.filters.price_min = price.to_string();
        self
    }

    pub fn email(&mut self, email: &str) -> &mut Self {
        self.filters.email = email.to_string();
        self
    }

    pub fn phone(&mut self, phone: &str) -> &mut Self {
        self.filters.phone = phone.to_string();
        self
    }

    /// Set column and direction; clears both cursors.
    pub fn sort(&mut self, sort_by: SortBy, sort_order: SortOrder) -> &mut Self {
        self.filters.set_sort(sort_by, sort_order);
        self
    }

    pub fn after(&mut self, cursor: &str) -> &mut Self {
        self.filters.set_after(cursor);
        self
    }

    pub fn before(&mut self, cursor: &str) -> &mut Self {
        self.filters.set_before(cursor);
        self
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The `(key, value)` pairs in wire order. Always nine entries.
    pub fn build(&self) -> Vec<(&'static str, String)> {
        let f = &self.filters;
        let values = [
            f.start_date.as_str(),
            f.end_date.as_str(),
            f.price_min.as_str(),
            f.email.as_str(),
            f.phone.as_str(),
            f.sort_by().as_str(),
            f.sort_order().as_str(),
            f.after(),
            f.before(),
        ];
        QUERY_KEYS
            .iter()
            .zip(values)
            .map(|(k, v)| (*k, v.to_string()))
            .collect()
    }

    /// Percent-encoded query string in wire order, e.g. `startDate=&endDate=&…`.
    pub fn to_query_string(&self) -> String {
        encode_pairs(self.build())
    }

    /// Canonical cache key: the pairs sorted by key, then percent-encoded.
    ///
    /// Two queries describing the same filters always share a key.
    pub fn cache_key(&self) -> String {
        let mut pairs = self.build();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        encode_pairs(pairs)
    }
}

impl From<&FilterState> for SalesQuery {
    fn from(filters: &FilterState) -> Self {
        Self::from_filters(filters)
    }
}

fn encode_pairs(pairs: Vec<(&'static str, String)>) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
