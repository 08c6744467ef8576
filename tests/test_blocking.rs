//! Blocking wrapper, driven from plain synchronous tests.

mod common;

use common::FakeBackend;
use sales_dashboard_sdk::{
    BlockingSalesDashboard, FilterState, Granularity, SalesDashboard, SortBy, SortOrder,
};

fn blocking(backend: &std::sync::Arc<FakeBackend>) -> BlockingSalesDashboard {
    BlockingSalesDashboard::new(SalesDashboard::builder().backend(backend.clone())).unwrap()
}

#[test]
fn load_and_chart() {
    let backend = FakeBackend::new();
    let dash = blocking(&backend);

    let snapshot = dash.load();
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.data.unwrap().records[0].id, "sale-all");

    let weekly = dash.chart(Granularity::Weekly).unwrap();
    assert_eq!(weekly.len(), 2);
    assert_eq!(backend.sales_calls(), 1);
}

#[test]
fn table_actions() {
    let backend = FakeBackend::new();
    let dash = blocking(&backend);
    dash.load();

    assert!(dash.previous_page().is_none());
    assert!(dash.next_page().is_some());
    assert_eq!(dash.dashboard().filters().after(), "next-");

    dash.toggle_sort(SortBy::Price);
    let filters = dash.dashboard().filters();
    assert_eq!(filters.sort_by(), SortBy::Price);
    assert_eq!(filters.sort_order(), SortOrder::Asc);

    dash.refetch();
    assert_eq!(backend.sales_calls(), 4);
}

#[test]
fn search_commits_draft() {
    let backend = FakeBackend::new();
    let dash = blocking(&backend);

    dash.dashboard().edit_draft(|f| f.phone = "555".to_string());
    dash.search();
    assert_eq!(backend.last_query_value("phone").as_deref(), Some("555"));
}

#[test]
fn fetch_sales_bypasses_feed() {
    let backend = FakeBackend::new();
    let dash = blocking(&backend);

    let page = dash.fetch_sales(&FilterState::default()).unwrap();
    assert_eq!(page.totals.len(), 10);
    assert!(dash.dashboard().snapshot().key.is_none());

    backend.fail_sales(Some(500));
    assert!(dash.fetch_sales(&FilterState::default()).is_err());
}
