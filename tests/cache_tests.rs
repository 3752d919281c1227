// Cache store tests - public API only
// Author: kelexine (https://github.com/kelexine)

use std::time::Duration;
use wayfarer::cache::{compute_key, CacheStore};
use wayfarer::config::CacheConfig;
use wayfarer::models::Payload;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert_eq!(config.ttl_seconds, 3600);
    assert!(config.enabled); // Should be enabled by default
}

#[test]
fn test_store_from_config() {
    let store = CacheStore::from_config(&CacheConfig {
        enabled: true,
        ttl_seconds: 120,
    });

    assert_eq!(store.ttl(), Duration::from_secs(120));
    assert!(store.is_empty());
}

#[test]
fn test_missing_key_is_a_miss() {
    let store = CacheStore::default();
    assert_eq!(store.get("absent"), None);
}

#[test]
fn test_set_overwrites() {
    let store = CacheStore::default();
    store.set("k", "first");
    store.set("k", "second");

    assert_eq!(store.get("k").as_deref(), Some("second"));
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_default_ttl_is_one_hour() {
    let store = CacheStore::default();
    let key = compute_key(&Payload::Prompt("Best time to visit Iceland?".into()), "m");
    store.set(key.clone(), "June to August");

    tokio::time::advance(Duration::from_secs(3600) - Duration::from_millis(1)).await;
    assert!(store.get(&key).is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(store.get(&key).is_none());

    tokio::time::advance(Duration::from_secs(7200)).await;
    assert!(store.get(&key).is_none());
}
