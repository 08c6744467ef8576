use std::time::Duration;

pub const API_BASE_URL: &str = "https://autobizz-425913.uc.r.appspot.com";
pub const BASE_URL_ENV: &str = "SALES_API_BASE_URL";

pub const AUTHORIZE_PATH: &str = "getAuthorize";
pub const SALES_PATH: &str = "sales";
pub const TOKEN_HEADER: &str = "X-AUTOBIZZ-TOKEN";
pub const TOKEN_TYPE: &str = "frontEndTest";

/// Tokens are refreshed this long before the server-declared expiry.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(30);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Query parameter names, in the order the sales endpoint receives them.
pub const QUERY_KEYS: [&str; 9] = [
    "startDate",
    "endDate",
    "priceMin",
    "email",
    "phone",
    "sortBy",
    "sortOrder",
    "after",
    "before",
];

pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => API_BASE_URL.to_string(),
    }
}
