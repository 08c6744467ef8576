//! Load the first page of sales from the live API and print a weekly chart.
//!
//! ```sh
//! RUST_LOG=sales_dashboard_sdk=debug cargo run --example dashboard
//! ```

use sales_dashboard_sdk::{tick_interval, Granularity, SalesDashboard, SortBy};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dashboard = SalesDashboard::builder()
        .build()
        .expect("Failed to build dashboard");
    eprintln!("{}", dashboard);

    let snapshot = dashboard.load().await;
    if let Some(err) = snapshot.error {
        eprintln!("Error loading data: {}", err);
        std::process::exit(1);
    }

    let data = snapshot.data.unwrap_or_default();
    println!("{} sales on this page", data.records.len());
    for record in data.records.iter().take(5) {
        println!(
            "  {} {}  {:>10.2}  {}",
            record.date_label().unwrap_or_else(|_| record.date.clone()),
            record.time_label().unwrap_or_default(),
            record.price,
            record.customer_email
        );
    }

    let points = dashboard
        .chart(Granularity::Weekly)
        .expect("Failed to aggregate totals");
    println!(
        "weekly averages ({} points, label every {}):",
        points.len(),
        tick_interval(points.len()) + 1
    );
    for point in &points {
        println!("  {:<8} {:>12}", point.display_label, point.total_sale);
    }

    let sorted = dashboard.toggle_sort(SortBy::Price).await;
    println!("{}", dashboard.filters().sort_label());
    if let Some(data) = sorted.data {
        if let Some(top) = data.records.first() {
            println!("  first: {} at {:.2}", top.id, top.price);
        }
    }
}
