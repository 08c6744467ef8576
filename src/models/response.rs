use serde::{Deserialize, Deserializer, Serialize};

use super::sale::{DailyTotal, SalesRecord};

// ---------------------------------------------------------------------------
// AuthResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expire: f64,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Cursors for the neighbouring pages. Empty means there is no such page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub before: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub after: String,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        !self.before.is_empty()
    }

    pub fn has_next(&self) -> bool {
        !self.after.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// SalesResponse: wire envelope of GET /sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesResults {
    #[serde(rename = "TotalSales", default)]
    pub total_sales: Vec<DailyTotal>,
    #[serde(rename = "Sales", default)]
    pub sales: Vec<SalesRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesResponse {
    #[serde(default)]
    pub results: SalesResults,
    #[serde(default)]
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// QueryResult: one cached page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub records: Vec<SalesRecord>,
    pub totals: Vec<DailyTotal>,
    pub pagination: Pagination,
}

impl From<SalesResponse> for QueryResult {
    fn from(resp: SalesResponse) -> Self {
        Self {
            records: resp.results.sales,
            totals: resp.results.total_sales,
            pagination: resp.pagination,
        }
    }
}
