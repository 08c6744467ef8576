use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::format;

// ---------------------------------------------------------------------------
// SortBy / SortOrder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Price,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Price => "price",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "price" => Ok(SortBy::Price),
            other => Err(DashboardError::InvalidArgument(format!(
                "Unknown sort column: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DashboardError::InvalidArgument(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterField: the user-editable filters (everything except sort and cursors)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    StartDate,
    EndDate,
    PriceMin,
    Email,
    Phone,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::PriceMin,
        FilterField::Email,
        FilterField::Phone,
    ];

    /// Short caption used on active-filter chips.
    pub fn caption(&self) -> &'static str {
        match self {
            FilterField::StartDate => "Start",
            FilterField::EndDate => "End",
            FilterField::PriceMin => "Min Price",
            FilterField::Email => "Email",
            FilterField::Phone => "Phone",
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Everything the sales endpoint is asked for: filters, sort and page cursor.
///
/// Empty strings mean "unset". Sort and cursor fields are private so the
/// pagination invariants always hold:
///
/// - at most one of `after` / `before` is non-empty;
/// - any sort change clears both cursors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFilterState")]
pub struct FilterState {
    pub start_date: String,
    pub end_date: String,
    pub price_min: String,
    pub email: String,
    pub phone: String,
    sort_by: SortBy,
    sort_order: SortOrder,
    after: String,
    before: String,
}

/// Deserialization shape of [`FilterState`]; cursors go through the setters.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFilterState {
    start_date: String,
    end_date: String,
    price_min: String,
    email: String,
    phone: String,
    sort_by: SortBy,
    sort_order: SortOrder,
    after: String,
    before: String,
}

impl From<RawFilterState> for FilterState {
    /// If both cursors are set, `after` wins.
    fn from(raw: RawFilterState) -> Self {
        let mut state = FilterState {
            start_date: raw.start_date,
            end_date: raw.end_date,
            price_min: raw.price_min,
            email: raw.email,
            phone: raw.phone,
            sort_by: raw.sort_by,
            sort_order: raw.sort_order,
            after: String::new(),
            before: String::new(),
        };
        state.set_before(&raw.before);
        state.set_after(&raw.after);
        state
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn before(&self) -> &str {
        &self.before
    }

    /// Change the sort column. Resets pagination.
    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
        self.clear_cursors();
    }

    /// Change the sort direction. Resets pagination.
    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
        self.clear_cursors();
    }

    /// Change column and direction together. Resets pagination.
    pub fn set_sort(&mut self, sort_by: SortBy, sort_order: SortOrder) {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self.clear_cursors();
    }

    /// Request the page after `cursor`. A non-empty cursor clears `before`.
    pub fn set_after(&mut self, cursor: &str) {
        self.after = cursor.to_string();
        if !cursor.is_empty() {
            self.before.clear();
        }
    }

    /// Request the page before `cursor`. A non-empty cursor clears `after`.
    pub fn set_before(&mut self, cursor: &str) {
        self.before = cursor.to_string();
        if !cursor.is_empty() {
            self.after.clear();
        }
    }

    pub fn clear_cursors(&mut self) {
        self.after.clear();
        self.before.clear();
    }

    pub fn field(&self, field: FilterField) -> &str {
        match field {
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
            FilterField::PriceMin => &self.price_min,
            FilterField::Email => &self.email,
            FilterField::Phone => &self.phone,
        }
    }

    pub fn field_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
            FilterField::PriceMin => &mut self.price_min,
            FilterField::Email => &mut self.email,
            FilterField::Phone => &mut self.phone,
        }
    }

    /// Whether any of the five user filters is set. Sort and cursors don't count.
    pub fn has_active_filters(&self) -> bool {
        FilterField::ALL
            .iter()
            .any(|f| !self.field(*f).is_empty())
    }

    /// Chip labels for every set filter, in form order.
    ///
    /// Dates render as `Mar 5, 2024`; a date that doesn't parse is shown as typed.
    pub fn active_filters(&self) -> Vec<(FilterField, String)> {
        FilterField::ALL
            .iter()
            .filter(|f| !self.field(**f).is_empty())
            .map(|f| {
                let raw = self.field(*f);
                let value = match f {
                    FilterField::StartDate | FilterField::EndDate => {
                        format::long_date_label(raw).unwrap_or_else(|_| raw.to_string())
                    }
                    _ => raw.to_string(),
                };
                (*f, format!("{}: {}", f.caption(), value))
            })
            .collect()
    }

    /// `Sorted by date (asc)`.
    pub fn sort_label(&self) -> String {
        format!("Sorted by {} ({})", self.sort_by, self.sort_order)
    }

    /// Canonical cache key for this filter state.
    ///
    /// See [`SalesQuery::cache_key`](crate::query::SalesQuery::cache_key).
    pub fn cache_key(&self) -> String {
        crate::query::SalesQuery::from_filters(self).cache_key()
    }
}
