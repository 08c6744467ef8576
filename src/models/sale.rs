use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format;

// ---------------------------------------------------------------------------
// SalesRecord: one transaction row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub price: f64,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl SalesRecord {
    /// Table date cell, e.g. `Mar 05, 2024`.
    pub fn date_label(&self) -> Result<String> {
        format::record_date_label(&self.date)
    }

    /// Table time cell, e.g. `14:30`.
    pub fn time_label(&self) -> Result<String> {
        format::record_time_label(&self.date)
    }
}

// ---------------------------------------------------------------------------
// DailyTotal: server-side daily sum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub day: String,
    pub total_sale: f64,
}

impl DailyTotal {
    pub fn new(day: impl Into<String>, total_sale: f64) -> Self {
        Self {
            day: day.into(),
            total_sale,
        }
    }
}

// ---------------------------------------------------------------------------
// AggregatedPoint: one chart point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoint {
    pub day: String,
    pub total_sale: f64,
    pub display_label: String,
}
