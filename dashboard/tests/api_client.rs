//! HTTP-level tests for the market-data client against a mock server.

use dashboard::core::{AppError, MarketDataService};
use dashboard::services::api::ApiClient;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(server.uri()).with_retry(2, Duration::from_millis(5))
}

fn coin_json(id: &str, rank: u32, price: f64, change: f64) -> Value {
    json!({
        "id": id,
        "symbol": &id[..3],
        "name": id.to_uppercase(),
        "image": format!("https://img.example/{}.png", id),
        "current_price": price,
        "price_change_percentage_24h": change,
        "market_cap": 1_000_000.0 / rank as f64,
        "market_cap_rank": rank,
        "total_volume": 5_000.0,
        "high_24h": price * 1.1,
        "low_24h": price * 0.9
    })
}

// ========== Coin List Tests ==========

#[tokio::test]
async fn test_get_coins_sends_market_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .and(query_param("vs_currency", "inr"))
        .and(query_param("order", "market_cap_desc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coin_json("bitcoin", 1, 5_000_000.0, 2.5),
            coin_json("ethereum", 2, 250_000.0, -1.25)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coins = client(&server).get_coins().await.unwrap();

    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].id, "bitcoin");
    assert_eq!(coins[1].price_change_percentage_24h, -1.25);
    assert_eq!(coins[1].market_cap_rank, Some(2));
}

#[tokio::test]
async fn test_get_coins_drops_duplicate_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coin_json("bitcoin", 1, 10.0, 0.0),
            coin_json("bitcoin", 2, 11.0, 0.0),
            coin_json("solana", 3, 12.0, 0.0)
        ])))
        .mount(&server)
        .await;

    let coins = client(&server).get_coins().await.unwrap();
    let ids: Vec<_> = coins.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(ids, vec!["bitcoin", "solana"]);
    assert_eq!(coins[0].current_price, 10.0);
}

#[tokio::test]
async fn test_get_coins_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": "lots" }
        ])))
        .mount(&server)
        .await;

    let err = client(&server).get_coins().await.unwrap_err();

    assert!(matches!(err, AppError::Schema(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_coins_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_coins().await.unwrap_err();

    assert!(matches!(err, AppError::Decode(_)));
}

// ========== Retry Tests ==========

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([coin_json("bitcoin", 1, 1.0, 0.0)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coins = client(&server).get_coins().await.unwrap();

    assert_eq!(coins.len(), 1);
}

#[tokio::test]
async fn test_retries_exhausted_returns_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/global"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server).get_global_market().await.unwrap_err();

    assert_eq!(
        err,
        AppError::Http {
            status: 500,
            message: "upstream down".to_string()
        }
    );
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/nope/market_chart"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_price_series("nope").await.unwrap_err();

    assert!(matches!(err, AppError::Http { status: 404, .. }));
}

// ========== Global Market Tests ==========

#[tokio::test]
async fn test_get_global_market() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "active_cryptocurrencies": 12000,
                "markets": 900,
                "total_market_cap": { "usd": 2.5e12, "inr": 2.1e14 },
                "total_volume": { "usd": 9.0e10 },
                "market_cap_percentage": { "btc": 51.2, "eth": 17.4 },
                "market_cap_change_percentage_24h_usd": -0.8,
                "updated_at": 1_700_000_000
            }
        })))
        .mount(&server)
        .await;

    let global = client(&server).get_global_market().await.unwrap();

    assert_eq!(global.active_cryptocurrencies, 12000);
    assert_eq!(global.markets, 900);
    assert_eq!(global.market_cap_in("inr").amount, 2.1e14);
    assert_eq!(global.dominance("btc"), 51.2);
}

#[tokio::test]
async fn test_get_global_market_missing_envelope_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let global = client(&server).get_global_market().await.unwrap();

    assert_eq!(global.active_cryptocurrencies, 0);
    assert_eq!(global.market_cap_in("usd").amount, 0.0);
}

#[tokio::test]
async fn test_get_global_market_wrong_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/global"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "markets": "many" } })))
        .mount(&server)
        .await;

    let err = client(&server).get_global_market().await.unwrap_err();

    assert!(matches!(err, AppError::Schema(_)));
}

// ========== Price Series Tests ==========

#[tokio::test]
async fn test_get_price_series_sorted_by_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .and(query_param("vs_currency", "inr"))
        .and(query_param("days", "30"))
        .and(query_param("interval", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prices": [
                [1_704_153_600_000_i64, 101.0],
                [1_704_067_200_000_i64, 100.0],
                [1_704_240_000_000_i64, 102.5]
            ],
            "market_caps": [],
            "total_volumes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let points = client(&server).get_price_series("bitcoin").await.unwrap();
    let prices: Vec<_> = points.iter().map(|p| p.price).collect();

    assert_eq!(prices, vec![100.0, 101.0, 102.5]);
    assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn test_invalid_coin_id_never_hits_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).get_price_series("../global").await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}
