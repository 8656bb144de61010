mod common;

use common::{SpyTransport, BONK, USDC, WSOL};
use dex_client::{DexScreenerClient, DexScreenerConfig, PriceClientError};
use serde_json::{json, Value};

fn pair(pair_address: &str, base: &str, quote: &str, usd: Value) -> Value {
    json!({
        "chainId": "solana",
        "dexId": "raydium",
        "pairAddress": pair_address,
        "baseToken": {"address": base, "name": "Bonk", "symbol": "Bonk"},
        "quoteToken": {"address": quote, "name": "Wrapped SOL", "symbol": "SOL"},
        "priceUsd": "0.00002",
        "liquidity": {"usd": usd, "base": 1, "quote": 2}
    })
}

fn client(body: Value) -> (DexScreenerClient<SpyTransport>, SpyTransport) {
    let spy = SpyTransport::ok(body);
    let client =
        DexScreenerClient::with_transport(DexScreenerConfig::default(), spy.clone()).unwrap();
    (client, spy)
}

#[tokio::test]
async fn test_best_pool_picks_deepest_sol_pair() {
    let (client, spy) = client(json!({
        "schemaVersion": "1.0.0",
        "pairs": [
            pair("small", BONK, WSOL, json!("500")),
            pair("usdc", BONK, USDC, json!(90000)),
            pair("large", BONK, WSOL, json!("1500")),
        ]
    }));

    let best = client.fetch_best_pool(BONK).await.unwrap().unwrap();
    assert_eq!(best.pair_address.as_deref(), Some("large"));
    assert_eq!(best.dex_id.as_deref(), Some("raydium"));
    assert_eq!(spy.calls(), 1);
    assert_eq!(
        spy.last_request().url,
        format!("https://api.dexscreener.com/latest/dex/tokens/{}", BONK)
    );
}

#[tokio::test]
async fn test_best_pool_none_when_no_sol_pair() {
    let (client, _spy) = client(json!({
        "pairs": [pair("usdc", BONK, USDC, json!(90000))]
    }));

    assert!(client.fetch_best_pool(BONK).await.unwrap().is_none());
}

#[tokio::test]
async fn test_best_pool_none_when_no_pairs() {
    let (client, _spy) = client(json!({"schemaVersion": "1.0.0", "pairs": null}));
    assert!(client.fetch_best_pool(BONK).await.unwrap().is_none());
}

#[tokio::test]
async fn test_best_pool_from_keyed_body() {
    let (client, _spy) = client(json!({
        BONK: {"pairs": [pair("only", BONK, WSOL, json!(0))]}
    }));

    let best = client.fetch_best_pool(BONK).await.unwrap().unwrap();
    assert_eq!(best.pair_address.as_deref(), Some("only"));
}

#[tokio::test]
async fn test_best_pool_first_wins_ties() {
    let (client, _spy) = client(json!([
        pair("first", BONK, WSOL, json!("700")),
        pair("second", BONK, WSOL, json!(700)),
    ]));

    let best = client.fetch_best_pool(BONK).await.unwrap().unwrap();
    assert_eq!(best.pair_address.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_best_pool_against_custom_reference() {
    let spy = SpyTransport::ok(json!({
        "pairs": [
            pair("sol", BONK, WSOL, json!(10)),
            pair("usdc", BONK, USDC, json!(5)),
        ]
    }));
    let config = DexScreenerConfig {
        reference_mint: USDC.to_string(),
        ..DexScreenerConfig::default()
    };
    let client = DexScreenerClient::with_transport(config, spy).unwrap();

    let best = client.fetch_best_pool(BONK).await.unwrap().unwrap();
    assert_eq!(best.pair_address.as_deref(), Some("usdc"));
}

#[tokio::test]
async fn test_best_pool_validates_before_request() {
    let (client, spy) = client(json!({"pairs": []}));

    assert!(matches!(
        client.fetch_best_pool("nope").await,
        Err(PriceClientError::InvalidAddress { .. })
    ));
    assert!(matches!(
        client.fetch_best_pool("").await,
        Err(PriceClientError::NoPositions)
    ));
    assert_eq!(spy.calls(), 0);
}

#[tokio::test]
async fn test_best_pool_error_status() {
    let spy = SpyTransport::new(503, Value::Null);
    let client =
        DexScreenerClient::with_transport(DexScreenerConfig::default(), spy).unwrap();

    assert!(matches!(
        client.fetch_best_pool(BONK).await,
        Err(PriceClientError::InvalidTokens { .. })
    ));
}

#[tokio::test]
async fn test_best_pool_without_pair_list() {
    let (client, _spy) = client(json!({"schemaVersion": "1.0.0"}));

    assert!(matches!(
        client.fetch_best_pool(BONK).await,
        Err(PriceClientError::InvalidTokens { .. })
    ));
}

#[tokio::test]
async fn test_best_pool_tolerates_sparse_pairs() {
    let mut fresh = pair("fresh", BONK, WSOL, json!(null));
    fresh["liquidity"] = Value::Null;
    fresh["priceUsd"] = json!(0.5);

    let (client, _spy) = client(json!({
        "pairs": [
            pair("deep", BONK, WSOL, json!(5000)),
            fresh,
            {"pairAddress": "broken", "baseToken": {"address": BONK}},
        ]
    }));

    let best = client.fetch_best_pool(BONK).await.unwrap().unwrap();
    assert_eq!(best.pair_address.as_deref(), Some("deep"));
}
