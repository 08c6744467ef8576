//! Wire shapes of the sales API and display formatting helpers.

use sales_dashboard_sdk::format;
use sales_dashboard_sdk::models::SalesResponse;
use sales_dashboard_sdk::{AuthResponse, DashboardError, QueryResult};

// ---------------------------------------------------------------------------
// Wire parsing
// ---------------------------------------------------------------------------

#[test]
fn sales_response_parses_into_query_result() {
    let body = serde_json::json!({
        "results": {
            "TotalSales": [
                {"day": "2024-03-01", "totalSale": 1200.5},
                {"day": "2024-03-02", "totalSale": 800}
            ],
            "Sales": [
                {
                    "_id": "65f0a1",
                    "date": "2024-03-01T09:15:00.000Z",
                    "price": 420,
                    "customerEmail": "ann@example.com",
                    "customerPhone": "555-0101",
                    "__v": 0
                }
            ]
        },
        "pagination": {"before": "", "after": "65f0a1"}
    });

    let resp: SalesResponse = serde_json::from_value(body).unwrap();
    let result = QueryResult::from(resp);

    assert_eq!(result.totals.len(), 2);
    assert_eq!(result.totals[0].total_sale, 1200.5);
    assert_eq!(result.records[0].id, "65f0a1");
    assert_eq!(result.records[0].customer_email, "ann@example.com");
    assert_eq!(result.records[0].version, Some(0));
    assert!(result.pagination.has_next());
    assert!(!result.pagination.has_previous());
}

#[test]
fn sales_response_tolerates_missing_and_null_parts() {
    let body = serde_json::json!({
        "results": {"Sales": []},
        "pagination": {"before": null}
    });
    let result = QueryResult::from(serde_json::from_value::<SalesResponse>(body).unwrap());
    assert!(result.records.is_empty());
    assert!(result.totals.is_empty());
    assert_eq!(result.pagination.before, "");
    assert_eq!(result.pagination.after, "");
}

#[test]
fn auth_response_parses() {
    let resp: AuthResponse =
        serde_json::from_str(r#"{"token": "abc", "expire": 3600}"#).unwrap();
    assert_eq!(resp.token, "abc");
    assert_eq!(resp.expire, 3600.0);
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[test]
fn day_and_month_labels() {
    assert_eq!(format::day_label("2024-03-05").unwrap(), "Mar 5");
    assert_eq!(format::month_label("2024-01-01").unwrap(), "Jan 2024");
    assert_eq!(format::long_date_label("2024-12-25").unwrap(), "Dec 25, 2024");
}

#[test]
fn record_labels_render_in_utc() {
    let ts = "2024-03-05T14:30:00.000Z";
    assert_eq!(format::record_date_label(ts).unwrap(), "Mar 05, 2024");
    assert_eq!(format::record_time_label(ts).unwrap(), "14:30");

    let offset = "2024-03-05T23:45:00+02:00";
    assert_eq!(format::record_time_label(offset).unwrap(), "21:45");
}

#[test]
fn record_labels_accept_naive_timestamps() {
    assert_eq!(format::record_time_label("2024-03-05T08:05:09").unwrap(), "08:05");
    assert_eq!(format::record_time_label("2024-03-05").unwrap(), "00:00");
}

#[test]
fn bad_dates_are_errors() {
    assert!(matches!(
        format::parse_day("05/03/2024"),
        Err(DashboardError::InvalidDate(_))
    ));
    assert!(format::record_date_label("").is_err());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn failures_carry_status() {
    let err = DashboardError::FetchFailure {
        status: Some(503),
        message: "Failed to fetch sales data".to_string(),
    };
    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.to_string(),
        "Sales request failed (HTTP 503): Failed to fetch sales data"
    );

    let err = DashboardError::AuthFailure {
        status: None,
        message: "connection refused".to_string(),
    };
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "Authorization failed: connection refused");
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "no reactor");
    let err = DashboardError::from(io);
    assert!(matches!(err, DashboardError::Io(_)));
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "IO error: no reactor");
}
