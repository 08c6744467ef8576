//! Transport seam to the remote sales API.
//!
//! [`HttpBackend`] is the production implementation over `reqwest`. Anything
//! else implementing [`SalesBackend`] (an in-process fake, a recording proxy)
//! can be handed to the dashboard builder instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{AuthResponse, QueryResult, SalesResponse};
use crate::query::SalesQuery;

#[async_trait]
pub trait SalesBackend: Send + Sync {
    /// Request a fresh bearer token.
    ///
    /// Failures should be reported as [`DashboardError::AuthFailure`].
    async fn authorize(&self, token_type: &str) -> Result<AuthResponse>;

    /// Fetch one page of sales plus the daily totals for `query`.
    ///
    /// Failures should be reported as [`DashboardError::FetchFailure`].
    async fn sales(&self, token: &str, query: &SalesQuery) -> Result<QueryResult>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Create a backend talking to `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Use an existing `reqwest` client (shared pools, custom TLS, proxies).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl SalesBackend for HttpBackend {
    async fn authorize(&self, token_type: &str) -> Result<AuthResponse> {
        let url = self.url(config::AUTHORIZE_PATH);
        debug!(%url, "requesting authorization token");

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "tokenType": token_type }))
            .send()
            .await
            .map_err(|e| auth_failure(None, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "authorization rejected");
            return Err(DashboardError::AuthFailure {
                status: Some(status.as_u16()),
                message: "Failed to get authorization token".to_string(),
            });
        }

        resp.json::<AuthResponse>()
            .await
            .map_err(|e| auth_failure(Some(status.as_u16()), e))
    }

    async fn sales(&self, token: &str, query: &SalesQuery) -> Result<QueryResult> {
        let url = self.url(config::SALES_PATH);
        let params = query.build();
        debug!(%url, query = %query.to_query_string(), "requesting sales page");

        let resp = self
            .client
            .get(&url)
            .header(config::TOKEN_HEADER, token)
            .query(&params)
            .send()
            .await
            .map_err(|e| fetch_failure(None, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "sales request rejected");
            return Err(DashboardError::FetchFailure {
                status: Some(status.as_u16()),
                message: "Failed to fetch sales data".to_string(),
            });
        }

        let body = resp
            .json::<SalesResponse>()
            .await
            .map_err(|e| fetch_failure(Some(status.as_u16()), e))?;
        Ok(body.into())
    }
}

fn auth_failure(status: Option<u16>, err: reqwest::Error) -> DashboardError {
    DashboardError::AuthFailure {
        status: status.or_else(|| err.status().map(|s| s.as_u16())),
        message: err.to_string(),
    }
}

fn fetch_failure(status: Option<u16>, err: reqwest::Error) -> DashboardError {
    DashboardError::FetchFailure {
        status: status.or_else(|| err.status().map(|s| s.as_u16())),
        message: err.to_string(),
    }
}
