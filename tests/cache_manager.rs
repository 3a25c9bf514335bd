mod common;

use std::time::Duration;

use common::*;
use identity_cache::mapping::{ClientMapper, TokenMapper};
use identity_cache::models::{Client, Token};
use identity_cache::services::cache::{CacheClient, CacheManager, MemoryClient};
use identity_cache::services::codec::JsonCodec;
use identity_cache::{CacheConfig, Compression, Error};

fn token_cache<C: CacheClient>(client: C, config: CacheConfig) -> CacheManager<Token, C> {
    CacheManager::new(
        client,
        JsonCodec::for_mapper(TokenMapper::<Token>::new()),
        config,
    )
}

#[tokio::test]
async fn never_written_key_is_a_miss() {
    init_tracing();
    let cache = token_cache(MemoryClient::new(), CacheConfig::default());
    assert_eq!(cache.get(&handle()).await.unwrap(), None);
}

#[tokio::test]
async fn every_compression_setting_round_trips() {
    init_tracing();
    let configs = [
        CacheConfig::default().without_compression(),
        CacheConfig::default().with_compression(Compression::None),
        CacheConfig::default().with_compression(Compression::Deflate),
        CacheConfig::default().with_compression(Compression::Gzip),
    ];

    for config in configs {
        let cache = token_cache(MemoryClient::new(), config);
        let key = handle();
        cache
            .set(&key, &token(600), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(token(600)));
    }
}

#[tokio::test]
async fn compressed_payload_is_base64_and_smaller() {
    init_tracing();
    let plain = token_cache(MemoryClient::new(), CacheConfig::default().without_compression());
    let packed = token_cache(
        MemoryClient::new(),
        CacheConfig::default().with_compression(Compression::Gzip),
    );

    plain.set("h", &token(600), Duration::from_secs(60)).await.unwrap();
    packed.set("h", &token(600), Duration::from_secs(60)).await.unwrap();

    let plain_raw = plain.client().raw("rsftid3cache_h").unwrap();
    let packed_raw = packed.client().raw("rsftid3cache_h").unwrap();
    assert!(plain_raw.starts_with('{'));
    assert!(!packed_raw.starts_with('{'));
    assert!(packed_raw.len() < plain_raw.len());
}

#[tokio::test]
async fn corrupt_entry_is_not_a_miss() {
    init_tracing();
    let store = MemoryClient::new();
    let cache = token_cache(store.clone(), CacheConfig::default().without_compression());
    store
        .set_with_ttl("rsftid3cache_bad", r#"{"lt":"two minutes"}"#, Duration::from_secs(60))
        .await
        .unwrap();

    let err = cache.get("bad").await.unwrap_err();
    assert!(matches!(err, Error::Codec(_)));
}

#[tokio::test]
async fn later_writes_win() {
    init_tracing();
    let cache = token_cache(MemoryClient::new(), CacheConfig::default());
    cache.set("h", &token(60), Duration::from_secs(60)).await.unwrap();
    cache.set("h", &token(90), Duration::from_secs(60)).await.unwrap();

    assert_eq!(cache.get("h").await.unwrap().unwrap().lifetime, 90);
}

#[tokio::test]
async fn delete_removes_the_entry() {
    init_tracing();
    let cache = token_cache(MemoryClient::new(), CacheConfig::default());
    cache.set("h", &token(60), Duration::from_secs(60)).await.unwrap();
    cache.delete("h").await.unwrap();
    assert_eq!(cache.get("h").await.unwrap(), None);

    // deleting again is still acknowledged
    cache.delete("h").await.unwrap();
}

#[tokio::test]
async fn get_all_follows_input_order() {
    init_tracing();
    let cache = CacheManager::new(
        MemoryClient::new(),
        JsonCodec::for_mapper(ClientMapper::<Client>::new()),
        CacheConfig::default(),
    );
    let ttl = Duration::from_secs(60);
    cache.set("web", &Client::new("web", "Web"), ttl).await.unwrap();
    cache.set("cli", &Client::new("cli", "CLI"), ttl).await.unwrap();

    let keys: Vec<String> = ["cli", "nope", "web"].map(String::from).into();
    let found = cache.get_all(&keys).await.unwrap();

    let summary: Vec<(&str, Option<&str>)> = found
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_ref().map(|c| c.client_name.as_str())))
        .collect();
    assert_eq!(
        summary,
        vec![("cli", Some("CLI")), ("nope", None), ("web", Some("Web"))]
    );

    assert!(cache.get_all(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_all_surfaces_corrupt_entries() {
    init_tracing();
    let store = MemoryClient::new();
    let cache = token_cache(store.clone(), CacheConfig::default());
    cache.set("ok", &token(60), Duration::from_secs(60)).await.unwrap();
    store
        .set_with_ttl("rsftid3cache_bad", "@@@", Duration::from_secs(60))
        .await
        .unwrap();

    let keys: Vec<String> = vec!["ok".into(), "bad".into()];
    assert!(cache.get_all(&keys).await.is_err());
}

#[tokio::test]
async fn transport_failures_degrade_to_miss_and_no_op() {
    init_tracing();
    let cache = token_cache(FailingClient, CacheConfig::default());

    cache
        .set("h", &token(120), Duration::from_secs(115))
        .await
        .unwrap();
    assert_eq!(cache.get("h").await.unwrap(), None);
    cache.delete("h").await.unwrap();

    let keys: Vec<String> = vec!["a".into(), "b".into()];
    let found = cache.get_all(&keys).await.unwrap();
    assert_eq!(found, vec![("a".to_string(), None), ("b".to_string(), None)]);
}

#[tokio::test(start_paused = true)]
async fn entry_expires_after_its_ttl() {
    init_tracing();
    let cache = token_cache(MemoryClient::new(), CacheConfig::default());
    cache
        .set("h1", &token(120), identity_cache::cache_ttl(120))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(114)).await;
    assert_eq!(cache.get("h1").await.unwrap(), Some(token(120)));

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(cache.get("h1").await.unwrap(), None);
}
