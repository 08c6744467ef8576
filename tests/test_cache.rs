//! QueryCache freshness window and LRU bound.

use std::sync::Arc;
use std::time::Duration;

use sales_dashboard_sdk::{QueryCache, QueryResult};

fn page() -> Arc<QueryResult> {
    Arc::new(QueryResult::default())
}

#[tokio::test(start_paused = true)]
async fn fresh_entry_is_served() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 8);
    let result = page();
    cache.insert("k".to_string(), result.clone());

    tokio::time::advance(Duration::from_secs(29)).await;
    let hit = cache.get_fresh("k").unwrap();
    assert!(Arc::ptr_eq(&hit, &result));
}

#[tokio::test(start_paused = true)]
async fn stale_entry_is_a_miss_and_dropped() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 8);
    cache.insert("k".to_string(), page());

    tokio::time::advance(Duration::from_secs(30)).await;
    assert!(cache.get_fresh("k").is_none());
    assert!(!cache.contains("k"));
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reinsert_restarts_freshness() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 8);
    cache.insert("k".to_string(), page());
    tokio::time::advance(Duration::from_secs(20)).await;
    cache.insert("k".to_string(), page());
    tokio::time::advance(Duration::from_secs(20)).await;
    assert!(cache.get_fresh("k").is_some());
    assert_eq!(cache.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn full_cache_evicts_least_recently_used() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 2);
    cache.insert("a".to_string(), page());
    cache.insert("b".to_string(), page());

    // touch "a" so "b" becomes the eviction candidate
    assert!(cache.get_fresh("a").is_some());
    cache.insert("c".to_string(), page());

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
}

#[tokio::test(start_paused = true)]
async fn invalidate_and_clear() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 4);
    cache.insert("a".to_string(), page());
    cache.insert("b".to_string(), page());

    assert!(cache.invalidate("a"));
    assert!(!cache.invalidate("a"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn zero_capacity_holds_one_entry() {
    let mut cache = QueryCache::new(Duration::from_secs(30), 0);
    assert_eq!(cache.capacity(), 1);
    cache.insert("a".to_string(), page());
    cache.insert("b".to_string(), page());
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("b"));
}
