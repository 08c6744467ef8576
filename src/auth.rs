//! Bearer-token session for the sales API.
//!
//! One [`TokenProvider`] is built per dashboard and shared by handle. The
//! cached session sits behind an async mutex that stays held across the
//! refresh request, so callers arriving during a refresh wait for it and then
//! reuse the new token instead of issuing their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::backend::SalesBackend;
use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::AuthResponse;

#[derive(Debug, Clone)]
struct AuthSession {
    token: String,
    expires_at: Instant,
}

impl AuthSession {
    /// `expires_at = now + expire − margin`; a lifetime shorter than the
    /// margin gives a session that is already stale. An `expire` too large to
    /// represent is rejected as an auth failure.
    fn from_response(resp: AuthResponse, now: Instant, margin: Duration) -> Result<Self> {
        let lifetime = if resp.expire.is_finite() && resp.expire > 0.0 {
            Duration::try_from_secs_f64(resp.expire).ok()
        } else {
            Some(Duration::ZERO)
        };
        let expires_at = lifetime
            .and_then(|lifetime| now.checked_add(lifetime.saturating_sub(margin)))
            .ok_or_else(|| DashboardError::AuthFailure {
                status: None,
                message: format!("token expiry out of range: {}", resp.expire),
            })?;
        Ok(Self {
            token: resp.token,
            expires_at,
        })
    }

    fn is_valid(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub struct TokenProvider {
    backend: Arc<dyn SalesBackend>,
    token_type: String,
    margin: Duration,
    session: Mutex<Option<AuthSession>>,
}

impl TokenProvider {
    pub fn new(backend: Arc<dyn SalesBackend>, token_type: impl Into<String>) -> Self {
        Self {
            backend,
            token_type: token_type.into(),
            margin: config::TOKEN_REFRESH_MARGIN,
            session: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, requesting a new one if none is cached or
    /// the cached one has reached its refresh point.
    ///
    /// Any failure surfaces as [`DashboardError::AuthFailure`]; nothing is
    /// retried here.
    pub async fn token(&self) -> Result<String> {
        let mut session = self.session.lock().await;

        if let Some(current) = session.as_ref() {
            if current.is_valid(Instant::now()) {
                return Ok(current.token.clone());
            }
            debug!("auth token reached its refresh point");
        }

        let fresh = self
            .backend
            .authorize(&self.token_type)
            .await
            .map_err(into_auth_failure)
            .and_then(|resp| AuthSession::from_response(resp, Instant::now(), self.margin))
            .inspect_err(|e| warn!(error = %e, "token request failed"))?;

        info!(
            valid_for_ms = fresh
                .expires_at
                .saturating_duration_since(Instant::now())
                .as_millis() as u64,
            "obtained auth token"
        );
        let token = fresh.token.clone();
        *session = Some(fresh);
        Ok(token)
    }

    /// Whether a cached token is currently usable without a network call.
    pub async fn has_valid_token(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.is_valid(Instant::now()))
            .unwrap_or(false)
    }

    /// Drop the cached token so the next [`token`](Self::token) call refreshes.
    pub async fn invalidate(&self) {
        *self.session.lock().await = None;
    }
}

fn into_auth_failure(err: DashboardError) -> DashboardError {
    match err {
        DashboardError::AuthFailure { .. } => err,
        other => DashboardError::AuthFailure {
            status: other.status(),
            message: other.to_string(),
        },
    }
}
