//! Integration tests for the signing and dispatch pipeline
//!
//! Exercises the full flow against a local TCP server: payload
//! canonicalization, header assembly, outcome classification, and timeout
//! behavior.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use gemini_rest::{
    ClientConfig, Credentials, Environment, GeminiRestClient, OrderRequest, OrderSide, RestError,
};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve exactly one request, capturing its head and optionally replying
///
/// `response` is a complete HTTP response; `None` holds the connection open
/// without ever replying.
async fn one_shot_server(
    response: Option<String>,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let _ = tx.send(String::from_utf8_lossy(&head).to_string());

        match response {
            Some(body) => {
                socket.write_all(body.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
            None => {
                // Hold the connection open until the client gives up
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
        }
    });

    (format!("http://{}", addr), rx)
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

fn test_client(base_url: &str, timeout_secs: u64) -> GeminiRestClient {
    let creds = Credentials::new("test-account-key", "test-account-secret").unwrap();
    GeminiRestClient::with_config(
        ClientConfig::new()
            .with_credentials(creds)
            .with_base_url(base_url)
            .with_timeout(timeout_secs),
    )
    .unwrap()
}

// =============================================================================
// Scenario A: order payload canonicalization and signature sensitivity
// =============================================================================

#[test]
fn test_order_payload_canonicalization() {
    use gemini_rest::NonceGenerator;

    let order = OrderRequest::limit(
        "btcusd",
        OrderSide::Buy,
        Decimal::ONE,
        Decimal::from(100),
    );
    let canonical = gemini_auth::build_payload("/v1/order/new", 42, &order.to_params()).unwrap();

    // Exactly the five order fields plus request and nonce
    assert_eq!(canonical.len(), 7);
    assert_eq!(canonical["request"], json!("/v1/order/new"));
    assert_eq!(canonical["nonce"], json!(42));
    assert_eq!(canonical["symbol"], json!("btcusd"));
    assert_eq!(canonical["amount"], json!("1"));
    assert_eq!(canonical["price"], json!("100"));
    assert_eq!(canonical["side"], json!("buy"));
    assert_eq!(canonical["type"], json!("exchange limit"));

    // Changing any single value changes the signature
    let creds = Credentials::new("key", "secret").unwrap();
    let base = gemini_auth::sign_payload(&canonical, &creds).unwrap();
    for key in ["symbol", "amount", "price", "side", "type", "nonce"] {
        let mut mutated = canonical.clone();
        mutated.insert(key.to_string(), json!("mutated"));
        let signed = gemini_auth::sign_payload(&mutated, &creds).unwrap();
        assert_ne!(base.signature, signed.signature, "field {}", key);
    }

    // The generator never repeats, so two signings of the same logical
    // request still differ
    let nonces = NonceGenerator::new();
    let first = gemini_auth::build_payload("/v1/order/new", nonces.next(), &order.to_params());
    let second = gemini_auth::build_payload("/v1/order/new", nonces.next(), &order.to_params());
    assert_ne!(first.unwrap()["nonce"], second.unwrap()["nonce"]);
}

// =============================================================================
// Scenario B: environment resolution and URL building
// =============================================================================

#[test]
fn test_sandbox_url_building() {
    let client = GeminiRestClient::with_config(
        ClientConfig::new().with_environment(Environment::Sandbox),
    )
    .unwrap();

    let url = client.endpoint_url("/v1/symbols");
    assert_eq!(url, "https://api.sandbox.gemini.com/v1/symbols");
    assert!(!url.contains("//v1"));

    let prod = GeminiRestClient::new().unwrap();
    assert_eq!(
        prod.endpoint_url("/v1/symbols"),
        "https://api.gemini.com/v1/symbols"
    );
}

// =============================================================================
// Header assembly and classification against a local server
// =============================================================================

#[tokio::test]
async fn test_private_post_sends_signed_headers_and_empty_body() {
    let body = r#"{"result":"ok"}"#;
    let (base_url, head_rx) = one_shot_server(Some(http_response("200 OK", body))).await;
    let client = test_client(&base_url, 5);

    let mut params = Map::new();
    params.insert("symbol".to_string(), Value::String("btcusd".to_string()));

    let _: Value = client.post_private("/v1/mytrades", &params).await.unwrap();

    let head = head_rx.await.unwrap();
    let lower = head.to_lowercase();

    assert!(head.starts_with("POST /v1/mytrades HTTP/1.1"));
    assert!(lower.contains("x-gemini-apikey: test-account-key"));
    assert!(lower.contains("x-gemini-payload: "));
    assert!(lower.contains("x-gemini-signature: "));
    assert!(lower.contains("content-type: text/plain"));
    assert!(lower.contains("content-length: 0"));
    assert!(lower.contains("cache-control: no-cache"));

    // The payload header decodes back to the canonical map
    let payload_b64 = head
        .lines()
        .find_map(|l| l.strip_prefix("x-gemini-payload: ").or_else(|| {
            l.strip_prefix("X-GEMINI-PAYLOAD: ").or_else(|| l.strip_prefix("x-gemini-payload:"))
        }))
        .map(str::trim)
        .expect("payload header present");
    let decoded: Map<String, Value> =
        serde_json::from_slice(&BASE64.decode(payload_b64).unwrap()).unwrap();
    assert_eq!(decoded["request"], json!("/v1/mytrades"));
    assert_eq!(decoded["symbol"], json!("btcusd"));
    assert!(decoded["nonce"].is_u64());
}

#[tokio::test]
async fn test_private_get_signs_path_and_leaves_query_unsigned() {
    let body = r#"{"result":"ok"}"#;
    let (base_url, head_rx) = one_shot_server(Some(http_response("200 OK", body))).await;
    let client = test_client(&base_url, 5);

    let query = [("limit_trades", "10".to_string()), ("symbol", "btcusd".to_string())];
    let _: Value = client.get_private("/v1/orders", &query).await.unwrap();

    let head = head_rx.await.unwrap();
    let lower = head.to_lowercase();

    // Query params travel URL-encoded in the request line
    assert!(head.starts_with("GET /v1/orders?limit_trades=10&symbol=btcusd HTTP/1.1"));

    // Auth headers are attached like a private POST
    assert!(lower.contains("x-gemini-apikey: test-account-key"));
    assert!(lower.contains("x-gemini-payload: "));
    assert!(lower.contains("x-gemini-signature: "));
    assert!(lower.contains("cache-control: no-cache"));

    // The signed payload binds the bare path only; the query string never
    // enters the canonical map
    let payload_b64 = head
        .lines()
        .find_map(|l| l.strip_prefix("x-gemini-payload: "))
        .map(str::trim)
        .expect("payload header present");
    let decoded: Map<String, Value> =
        serde_json::from_slice(&BASE64.decode(payload_b64).unwrap()).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded["request"], json!("/v1/orders"));
    assert!(decoded["nonce"].is_u64());
    assert!(!decoded.contains_key("limit_trades"));
}

#[tokio::test]
async fn test_public_get_has_no_auth_headers() {
    let body = r#"["btcusd","ethusd"]"#;
    let (base_url, head_rx) = one_shot_server(Some(http_response("200 OK", body))).await;
    let client = test_client(&base_url, 5);

    let symbols: Vec<String> = client.get_public("/v1/symbols", &[]).await.unwrap();
    assert_eq!(symbols, vec!["btcusd", "ethusd"]);

    let head = head_rx.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /v1/symbols http/1.1"));
    assert!(!head.contains("x-gemini-apikey"));
    assert!(!head.contains("x-gemini-payload"));
}

#[tokio::test]
async fn test_non_2xx_classified_with_body_preserved() {
    let body = r#"{"result":"error","reason":"OrderNotFound","message":"Order 1 not found"}"#;
    let (base_url, _head_rx) = one_shot_server(Some(http_response("404 Not Found", body))).await;
    let client = test_client(&base_url, 5);

    let result: Result<Value, RestError> = client
        .post_private("/v1/order/status", &Map::new())
        .await;

    match result {
        Err(err @ RestError::Api { status: 404, .. }) => {
            let envelope = err.api_error_body().unwrap();
            assert_eq!(envelope.reason, "OrderNotFound");
        }
        other => panic!("expected 404 Api error, got {:?}", other.map(|_| ())),
    }
}

// =============================================================================
// Scenario C: timeout surfaces as a transport error in bounded time
// =============================================================================

#[tokio::test]
async fn test_timeout_returns_transport_error() {
    let (base_url, _head_rx) = one_shot_server(None).await;
    let client = test_client(&base_url, 1);

    let start = Instant::now();
    let result: Result<Value, RestError> = client.post_private("/v1/balances", &Map::new()).await;
    let elapsed = start.elapsed();

    match result {
        Err(err) => assert!(err.is_transport(), "expected transport error, got {}", err),
        Ok(_) => panic!("expected timeout"),
    }
    // Bounded: well past the 1s timeout is a hang
    assert!(elapsed < Duration::from_secs(10), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = test_client(&format!("http://{}", addr), 2);
    let result: Result<Value, RestError> = client.get_public("/v1/symbols", &[]).await;

    match result {
        Err(err) => assert!(err.is_transport(), "expected transport error, got {}", err),
        Ok(_) => panic!("expected connection failure"),
    }
}
