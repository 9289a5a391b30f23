//! Endpoint tests against a local mock server

use httpmock::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;
use upbit_rest::{
    CancelTarget, ClientConfig, Credentials, OrderRequest, OrderSide, OrderType, RestError,
    TimeInForce, TradeTickQuery, UpbitClient, UpbitErrorCode,
};

fn public_client(server: &MockServer) -> UpbitClient {
    UpbitClient::with_config(ClientConfig::new().with_base_url(server.base_url()))
}

fn signed_client(server: &MockServer) -> UpbitClient {
    let creds = Credentials::new("test-access", "test-secret").unwrap();
    UpbitClient::with_config(
        ClientConfig::new()
            .with_base_url(server.base_url())
            .with_credentials(creds),
    )
}

fn order_body(ord_type: &str, side: &str) -> serde_json::Value {
    json!({
        "uuid": "order-uuid",
        "side": side,
        "ord_type": ord_type,
        "state": "wait",
        "market": "KRW-BTC"
    })
}

#[tokio::test]
async fn places_bid_limit_order_with_canonical_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/orders")
                .header("content-type", "application/x-www-form-urlencoded")
                .header_exists("authorization")
                .body("ord_type=limit&market=KRW-BTC&side=bid&price=50000000&volume=1");
            then.status(200).json_body(order_body("limit", "bid"));
        })
        .await;

    let client = signed_client(&server);
    let request = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(50000000), dec!(1));
    let order = client.place_order(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(order.uuid, "order-uuid");
    assert_eq!(order.state, "wait");
    assert_eq!(order.ord_type, OrderType::Limit);
}

#[tokio::test]
async fn places_market_buy_without_volume() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/orders")
                .body("ord_type=price&market=KRW-BTC&side=bid&price=10000");
            then.status(200).json_body(order_body("price", "bid"));
        })
        .await;

    let client = signed_client(&server);
    let order = client
        .place_order(&OrderRequest::market_buy("KRW-BTC", dec!(10000)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(order.ord_type, OrderType::Price);
    assert_eq!(order.side, OrderSide::Bid);
}

#[tokio::test]
async fn places_best_ask_with_time_in_force() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/orders")
                .body("ord_type=best&market=KRW-BTC&side=ask&volume=1&time_in_force=fok");
            then.status(200).json_body(order_body("best", "ask"));
        })
        .await;

    let client = signed_client(&server);
    let order = client
        .place_order(&OrderRequest::best_sell("KRW-BTC", dec!(1), TimeInForce::Fok))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(order.ord_type, OrderType::Best);
}

#[tokio::test]
async fn invalid_order_never_reaches_the_network() {
    let server = MockServer::start_async().await;
    // No mock registered; any request would fail the test with a 404 body
    // that doesn't parse as an order.
    let client = signed_client(&server);

    let mut request = OrderRequest::market_buy("KRW-BTC", dec!(10000));
    request.volume = Some(dec!(1));

    let err = client.place_order(&request).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidOrder { field: "volume", .. }));
}

#[tokio::test]
async fn cancels_order_by_uuid() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/v1/order")
                .query_param("uuid", "order-uuid")
                .header_exists("authorization");
            then.status(200).json_body(json!({
                "uuid": "order-uuid",
                "side": "bid",
                "ord_type": "limit",
                "state": "cancel",
                "market": "KRW-BTC"
            }));
        })
        .await;

    let client = signed_client(&server);
    let order = client
        .cancel_order(&CancelTarget::uuid("order-uuid"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(order.state, "cancel");
}

#[tokio::test]
async fn normalizes_comma_grouped_ticker_prices() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/ticker")
                .query_param("markets", "KRW-BTC");
            then.status(200).json_body(json!([{
                "market": "KRW-BTC",
                "trade_date": "20250101",
                "trade_time": "120000",
                "trade_date_kst": "20250101",
                "trade_time_kst": "210000",
                "trade_price": "50,000,000",
                "opening_price": 49000000.0,
                "high_price": 51000000.0,
                "low_price": 48500000.0,
                "prev_closing_price": 49500000.0,
                "change": "RISE",
                "change_price": 500000.0,
                "change_rate": 0.0101,
                "signed_change_price": 500000.0,
                "signed_change_rate": 0.0101,
                "trade_volume": 0.015,
                "acc_trade_price": 123456789.0,
                "acc_trade_price_24h": 987654321.0,
                "acc_trade_volume": 12.5,
                "acc_trade_volume_24h": 98.7,
                "trade_timestamp": 1735732800000i64,
                "timestamp": 1735732800123i64,
                "highest_52_week_price": 60000000.0,
                "highest_52_week_date": "2024-03-14",
                "lowest_52_week_price": 30000000.0,
                "lowest_52_week_date": "2024-09-06"
            }]));
        })
        .await;

    let client = public_client(&server);
    let tickers = client.get_ticker(&["KRW-BTC"]).await.unwrap();

    mock.assert_async().await;
    assert_eq!(tickers.len(), 1);
    assert_eq!(tickers[0].trade_price, 50_000_000.0);
    assert_eq!(tickers[0].market.as_str(), "KRW-BTC");
}

#[tokio::test]
async fn empty_market_list_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let client = public_client(&server);

    let err = client.get_ticker(&[]).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));

    let err = client.get_orderbook(&[], None, None).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
}

#[tokio::test]
async fn minute_candle_count_is_clamped() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/candles/minutes/15")
                .query_param("market", "KRW-BTC")
                .query_param("count", "200");
            then.status(200).json_body(json!([{
                "market": "KRW-BTC",
                "candle_date_time_kst": "2025-01-01T21:00:00",
                "timestamp": 1735732800000i64,
                "opening_price": 49000000.0,
                "high_price": 51000000.0,
                "low_price": 48500000.0,
                "trade_price": 50000000.0,
                "candle_acc_trade_price": 123456789.0,
                "candle_acc_trade_volume": 12.5,
                "unit": 15
            }]));
        })
        .await;

    let client = public_client(&server);
    let candles = client
        .get_minute_candles("KRW-BTC", 15, None, Some(5000))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(candles[0].unit, 15);
    assert_eq!(candles[0].trade_price, 50_000_000.0);
}

#[tokio::test]
async fn rejects_unsupported_minute_unit() {
    let server = MockServer::start_async().await;
    let client = public_client(&server);

    let err = client
        .get_minute_candles("KRW-BTC", 7, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
}

#[tokio::test]
async fn rejects_out_of_range_days_ago() {
    let server = MockServer::start_async().await;
    let client = public_client(&server);

    let mut query = TradeTickQuery::new("KRW-BTC");
    query.days_ago = Some(8);

    let err = client.get_trade_ticks(&query).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
}

#[tokio::test]
async fn fetches_accounts_with_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/accounts")
                .header_exists("authorization");
            then.status(200).json_body(json!([{
                "currency": "KRW",
                "balance": "1000000.0",
                "locked": "0.0",
                "avg_buy_price": "0",
                "avg_buy_price_modified": false,
                "unit_currency": "KRW"
            }, {
                "currency": "BTC",
                "balance": "0.5",
                "locked": "0.1",
                "avg_buy_price": "48,000,000",
                "avg_buy_price_modified": false,
                "unit_currency": "KRW"
            }]));
        })
        .await;

    let client = signed_client(&server);
    let accounts = client.get_accounts().await.unwrap();

    mock.assert_async().await;
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].currency, "BTC");
    assert_eq!(accounts[1].avg_buy_price, 48_000_000.0);
}

#[tokio::test]
async fn surfaces_exchange_error_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/accounts");
            then.status(401).json_body(json!({
                "error": {
                    "name": "invalid_access_key",
                    "message": "잘못된 엑세스 키입니다."
                }
            }));
        })
        .await;

    let client = signed_client(&server);
    let err = client.get_accounts().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.code(), Some(UpbitErrorCode::InvalidAccessKey));
}

#[tokio::test]
async fn unauthenticated_client_cannot_use_exchange() {
    let server = MockServer::start_async().await;
    let client = public_client(&server);

    let err = client.get_accounts().await.unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));
}
