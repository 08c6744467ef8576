//! Chart bucketing of the server's daily totals.
//!
//! Daily points pass through with a label. Weekly points average consecutive
//! runs of [`WEEK_LEN`] inputs by position, not by calendar week, so a series
//! with missing days shifts the buckets. Monthly points average by `YYYY-MM`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::format;
use crate::models::{AggregatedPoint, DailyTotal};

/// Number of inputs folded into one weekly point.
pub const WEEK_LEN: usize = 7;

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(DashboardError::InvalidArgument(format!(
                "Unknown granularity: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

/// Bucket a date-ordered daily series for charting.
///
/// Pure: the same input always yields the same points. An empty series
/// yields no points. A day that doesn't parse fails with
/// [`DashboardError::InvalidDate`].
pub fn aggregate(series: &[DailyTotal], granularity: Granularity) -> Result<Vec<AggregatedPoint>> {
    match granularity {
        Granularity::Daily => daily(series),
        Granularity::Weekly => weekly(series),
        Granularity::Monthly => monthly(series),
    }
}

fn daily(series: &[DailyTotal]) -> Result<Vec<AggregatedPoint>> {
    series
        .iter()
        .map(|item| {
            Ok(AggregatedPoint {
                day: item.day.clone(),
                total_sale: item.total_sale,
                display_label: format::day_label(&item.day)?,
            })
        })
        .collect()
}

fn weekly(series: &[DailyTotal]) -> Result<Vec<AggregatedPoint>> {
    series
        .chunks(WEEK_LEN)
        .map(|week| {
            let first = &week[0];
            let sum: f64 = week.iter().map(|d| d.total_sale).sum();
            Ok(AggregatedPoint {
                day: first.day.clone(),
                total_sale: rounded_mean(sum, week.len()),
                display_label: format::day_label(&first.day)?,
            })
        })
        .collect()
}

fn monthly(series: &[DailyTotal]) -> Result<Vec<AggregatedPoint>> {
    // (month, sum, count) in first-seen order
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in series {
        let month = item
            .day
            .get(..7)
            .ok_or_else(|| DashboardError::InvalidDate(item.day.clone()))?;
        match index.get(month) {
            Some(&i) => {
                groups[i].1 += item.total_sale;
                groups[i].2 += 1;
            }
            None => {
                index.insert(month, groups.len());
                groups.push((month, item.total_sale, 1));
            }
        }
    }

    groups
        .into_iter()
        .map(|(month, sum, count)| {
            let day = format!("{}-01", month);
            let display_label = format::month_label(&day)?;
            Ok(AggregatedPoint {
                day,
                total_sale: rounded_mean(sum, count),
                display_label,
            })
        })
        .collect()
}

fn rounded_mean(sum: f64, count: usize) -> f64 {
    (sum / count as f64).round()
}

/// How many x-axis labels to skip between drawn ticks for `len` points.
///
/// `0` draws every label.
pub fn tick_interval(len: usize) -> usize {
    if len > 200 {
        len / 10
    } else if len > 100 {
        len / 15
    } else if len > 50 {
        len / 20
    } else {
        0
    }
}
