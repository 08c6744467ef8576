use std::sync::Arc;

use tracing::debug;

use crate::auth::TokenProvider;
use crate::backend::SalesBackend;
use crate::error::{DashboardError, Result};
use crate::models::{FilterState, QueryResult};
use crate::query::SalesQuery;

/// Authenticated access to `GET /sales`.
///
/// Cheap to clone; clones share the backend and the token session.
#[derive(Clone)]
pub struct SalesClient {
    backend: Arc<dyn SalesBackend>,
    auth: Arc<TokenProvider>,
}

impl SalesClient {
    pub fn new(backend: Arc<dyn SalesBackend>, auth: Arc<TokenProvider>) -> Self {
        Self { backend, auth }
    }

    pub fn auth(&self) -> &TokenProvider {
        &self.auth
    }

    /// Fetch the page described by `filters`.
    ///
    /// Issues exactly one sales request. Token failures come back as
    /// [`DashboardError::AuthFailure`], everything else as
    /// [`DashboardError::FetchFailure`].
    pub async fn fetch_sales(&self, filters: &FilterState) -> Result<QueryResult> {
        let token = self.auth.token().await?;
        let query = SalesQuery::from_filters(filters);
        debug!(key = %query.cache_key(), "fetching sales page");
        self.backend
            .sales(&token, &query)
            .await
            .map_err(into_fetch_failure)
    }
}

fn into_fetch_failure(err: DashboardError) -> DashboardError {
    match err {
        DashboardError::FetchFailure { .. } => err,
        other => DashboardError::FetchFailure {
            status: other.status(),
            message: other.to_string(),
        },
    }
}
