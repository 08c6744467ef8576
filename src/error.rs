#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Authorization failed{}: {message}", fmt_status(.status))]
    AuthFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("Sales request failed{}: {message}", fmt_status(.status))]
    FetchFailure {
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    /// HTTP status attached to an auth or fetch failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::AuthFailure { status, .. }
            | DashboardError::FetchFailure { status, .. } => *status,
            DashboardError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
