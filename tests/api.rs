use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_test::assert_ok;

use sol_gateway::{api::router::create_router, config::Config};

const WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
const WSOL: &str = "So11111111111111111111111111111111111111112";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const UNLISTED_MINT: &str = "9n4nbM75f5Ui33ZbPYXn59EwSgE8CGsHtAeTH5YFeJ9E";
const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const TOKEN_2022_PROGRAM: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";
const API_KEY: &str = "test-key";

#[derive(Clone, Default)]
struct MockState {
    price_calls: Arc<AtomicUsize>,
    rpc_calls: Arc<AtomicUsize>,
}

fn token_account(mint: &str, amount: &str, decimals: u8, ui: &str) -> Value {
    json!({
        "pubkey": "AccountPubkey",
        "account": {
            "data": {
                "parsed": {
                    "info": {
                        "mint": mint,
                        "owner": WALLET,
                        "tokenAmount": {
                            "amount": amount,
                            "decimals": decimals,
                            "uiAmountString": ui
                        }
                    },
                    "type": "account"
                },
                "program": "spl-token"
            },
            "lamports": 2039280
        }
    })
}

async fn mock_rpc(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.rpc_calls.fetch_add(1, Ordering::SeqCst);

    let result = match body["method"].as_str() {
        Some("getBalance") => json!({ "context": { "slot": 1 }, "value": 2_500_000_000u64 }),
        Some("getTokenAccountsByOwner") if body["params"][1]["programId"] == TOKEN_PROGRAM => json!({
            "context": { "slot": 1 },
            "value": [
                token_account(USDC, "10000000", 6, "10"),
                token_account(USDC, "2500000", 6, "2.5"),
                token_account(UNLISTED_MINT, "3000000000", 9, "3"),
            ]
        }),
        Some("getTokenAccountsByOwner") if body["params"][1]["programId"] == TOKEN_2022_PROGRAM => json!({
            "context": { "slot": 1 },
            "value": [token_account(USDC, "1500000", 6, "1.5")]
        }),
        Some("getTokenAccountsByOwner") => json!({ "context": { "slot": 1 }, "value": [] }),
        _ => {
            return Json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32601, "message": "Method not found" }
            }))
        }
    };

    Json(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
}

async fn mock_price(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.price_calls.fetch_add(1, Ordering::SeqCst);

    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Unauthorized" })),
        );
    }

    let price = match params.get("address").map(String::as_str) {
        Some(WSOL) => 150.23,
        Some(USDC) => 1.0,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": "address is invalid format" })),
            )
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": { "value": price, "updateUnixTime": 1700000000 }
        })),
    )
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_config(upstream: &str, api_key: &str) -> Config {
    test_config_with_timeout(upstream, api_key, "5s")
}

fn test_config_with_timeout(upstream: &str, api_key: &str, timeout: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("APP_ENV", "test".to_string()),
        ("SOLANA_RPC_URL", format!("{}/rpc", upstream)),
        ("BIRDEYE_API_URL", upstream.to_string()),
        ("BIRDEYE_API_KEY", api_key.to_string()),
        ("UPSTREAM_TIMEOUT", timeout.to_string()),
    ]);
    Config::from_lookup(|key: &str| vars.get(key).cloned()).unwrap()
}

struct TestApp {
    base_url: String,
    state: MockState,
    client: reqwest::Client,
}

impl TestApp {
    async fn start() -> Self {
        Self::start_with_key(API_KEY).await
    }

    async fn start_with_key(api_key: &str) -> Self {
        let state = MockState::default();
        let upstream = Router::new()
            .route("/rpc", post(mock_rpc))
            .route("/defi/price", get(mock_price))
            .with_state(state.clone());
        let upstream_url = spawn(upstream).await;

        let app = create_router(test_config(&upstream_url, api_key)).unwrap();
        let base_url = spawn(app).await;

        Self {
            base_url,
            state,
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = assert_ok!(
            self.client
                .get(format!("{}{}", self.base_url, path))
                .send()
                .await
        );
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        let body = assert_ok!(response.json::<Value>().await);
        (status, body)
    }
}

#[tokio::test]
async fn health_check_reports_running() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn wallet_returns_symbol_balances() {
    let app = TestApp::start().await;
    let (status, body) = app.get(&format!("/wallet/{}", WALLET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "SOL": 2.5,
            "USDC": 14.0,
            UNLISTED_MINT: 3.0,
        })
    );
    assert!(body
        .as_object()
        .unwrap()
        .values()
        .all(|v| v.as_f64().map_or(false, |n| n >= 0.0)));
    assert_eq!(app.state.rpc_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn wallet_tokens_lists_each_mint_once() {
    let app = TestApp::start().await;
    let (status, body) = app.get(&format!("/wallet/{}/tokens", WALLET)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], WALLET);
    assert_eq!(body["sol_balance"], 2.5);

    let tokens = body["tokens"].as_array().unwrap();
    assert_eq!(tokens.len(), 2);
    let usdc = tokens.iter().find(|t| t["mint"] == USDC).unwrap();
    assert_eq!(usdc["symbol"], "USDC");
    // 10 + 2.5 from the Token program, 1.5 from Token-2022
    assert_eq!(usdc["amount"], 14.0);
    assert_eq!(usdc["decimals"], 6);
    let unlisted = tokens.iter().find(|t| t["mint"] == UNLISTED_MINT).unwrap();
    assert!(unlisted.get("symbol").is_none());
}

#[tokio::test]
async fn malformed_wallet_address_is_a_client_error() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/wallet/invalid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("invalid"));
    assert_eq!(app.state.rpc_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wallet_upstream_failure_is_bad_gateway() {
    let broken = Router::new().route(
        "/rpc",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "node is behind") }),
    );
    let upstream_url = spawn(broken).await;
    let base_url = spawn(create_router(test_config(&upstream_url, API_KEY)).unwrap()).await;

    let response = assert_ok!(
        reqwest::get(format!("{}/wallet/{}", base_url, WALLET)).await
    );
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = assert_ok!(response.json().await);
    assert!(body["message"].as_str().unwrap().contains("node is behind"));
}

#[tokio::test]
async fn padded_wallet_address_is_rejected_before_upstream() {
    let app = TestApp::start().await;
    let (status, body) = app.get(&format!("/wallet/%20{}", WALLET)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(app.state.rpc_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wallet_rpc_error_member_is_bad_gateway() {
    let erroring = Router::new().route(
        "/rpc",
        post(|| async {
            Json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32005, "message": "Node is unhealthy" }
            }))
        }),
    );
    let upstream_url = spawn(erroring).await;
    let base_url = spawn(create_router(test_config(&upstream_url, API_KEY)).unwrap()).await;

    let response = assert_ok!(
        reqwest::get(format!("{}/wallet/{}", base_url, WALLET)).await
    );
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = assert_ok!(response.json().await);
    assert!(body["message"].as_str().unwrap().contains("Node is unhealthy"));
}

#[tokio::test]
async fn slow_upstream_is_gateway_timeout() {
    let slow = Router::new().route(
        "/rpc",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(2)).await;
            Json(json!({ "jsonrpc": "2.0", "id": 1, "result": { "value": 0 } }))
        }),
    );
    let upstream_url = spawn(slow).await;
    let config = test_config_with_timeout(&upstream_url, API_KEY, "100ms");
    let base_url = spawn(create_router(config).unwrap()).await;

    let response = assert_ok!(
        reqwest::get(format!("{}/wallet/{}", base_url, WALLET)).await
    );
    assert_eq!(response.status().as_u16(), 504);
    let body: Value = assert_ok!(response.json().await);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn price_for_known_symbol() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/price/SOL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "symbol": "SOL", "price": 150.23, "currency": "USD" })
    );
}

#[tokio::test]
async fn price_accepts_mint_address() {
    let app = TestApp::start().await;
    let (status, body) = app.get(&format!("/price/{}", USDC)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["symbol"], USDC);
    assert_eq!(body["price"], 1.0);
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/price/DOGE").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("address is invalid format"));
}

#[tokio::test]
async fn rejected_api_key_is_bad_gateway() {
    let app = TestApp::start_with_key("wrong-key").await;
    let (status, body) = app.get("/price/SOL").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn swap_estimates_from_price_ratio() {
    let app = TestApp::start().await;
    let path = format!("/swap?input_mint={}&output_mint=USDC&amount=2.0", WSOL);

    let (status, body) = app.get(&path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_mint"], WSOL);
    assert_eq!(body["output_mint"], "USDC");
    assert_eq!(body["amount_in"], 2.0);

    let estimate = body["estimated_amount_out"].as_f64().unwrap();
    assert!(estimate > 0.0);
    assert!((estimate - 2.0 * 150.23 * 0.995).abs() < 1e-9);

    let (_, again) = app.get(&path).await;
    assert_eq!(again["estimated_amount_out"], body["estimated_amount_out"]);
}

#[tokio::test]
async fn swap_honours_slippage_parameter() {
    let app = TestApp::start().await;
    let (status, body) = app
        .get("/swap?input_mint=USDC&output_mint=SOL&amount=150.23&slippage_bps=0")
        .await;

    assert_eq!(status, StatusCode::OK);
    let estimate = body["estimated_amount_out"].as_f64().unwrap();
    assert!((estimate - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn swap_rejects_non_positive_amounts_without_upstream_calls() {
    let app = TestApp::start().await;

    for amount in ["0", "-1.5", "NaN"] {
        let (status, body) = app
            .get(&format!("/swap?input_mint=SOL&output_mint=USDC&amount={}", amount))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount={}", amount);
        assert_eq!(body["status"], "error");
        assert!(body.get("estimated_amount_out").is_none());
    }

    assert_eq!(app.state.price_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn swap_overflow_is_a_client_error() {
    let app = TestApp::start().await;
    let (status, body) = app
        .get(&format!("/swap?input_mint={}&output_mint=USDC&amount=1e307", WSOL))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("estimated_amount_out").is_none());
    assert!(body["message"].as_str().unwrap().contains("too large"));
}

#[tokio::test]
async fn swap_rejects_bad_query() {
    let app = TestApp::start().await;

    let (status, body) = app.get("/swap?input_mint=SOL&output_mint=USDC").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = app
        .get("/swap?input_mint=SOL&output_mint=USDC&amount=lots")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .get("/swap?input_mint=not-a-mint&output_mint=USDC&amount=1")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not-a-mint"));

    for slippage in ["10000", "20000"] {
        let (status, _) = app
            .get(&format!(
                "/swap?input_mint=SOL&output_mint=USDC&amount=1&slippage_bps={}",
                slippage
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "slippage_bps={}", slippage);
    }

    assert_eq!(app.state.price_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let app = TestApp::start().await;
    let (status, body) = app.get("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}
