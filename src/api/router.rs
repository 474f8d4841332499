use axum::{
  error_handling::HandleErrorLayer,
  routing::get,
  http::StatusCode,
  BoxError, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::{timeout::{error::Elapsed, TimeoutLayer}, ServiceBuilder};
use tower_http::{
  compression::CompressionLayer,
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{
  config::Config,
  error::AppError,
  market::{routes::market_routes, service::MarketService},
  swap::{routes::swap_routes, service::SwapService},
  upstream::{build_http_client, BirdeyeClient, SolanaRpcClient},
  wallet::{routes::wallet_routes, service::WalletService},
};

pub fn create_router(config: Config) -> Result<Router, AppError> {
  // Setup CORS
  let cors = CorsLayer::new()
      .allow_origin(Any)
      .allow_methods(Any)
      .allow_headers(Any);

  // Setup upstream clients
  let http_client = build_http_client(&config)?;
  let rpc_client = SolanaRpcClient::new(http_client.clone(), config.solana_rpc_url.clone());
  let birdeye_client = BirdeyeClient::new(
      http_client,
      config.birdeye_api_url.clone(),
      config.birdeye_api_key.clone(),
  );

  // Setup services
  let wallet_service = WalletService::new(rpc_client);
  let market_service = MarketService::new(birdeye_client);
  let swap_service = SwapService::new(market_service.clone());

  // Build the router
  let app = Router::new()
      .route("/health", get(health_check))
      .merge(wallet_routes(wallet_service))
      .merge(market_routes(market_service))
      .merge(swap_routes(swap_service))
      .fallback(route_not_found)
      .layer(
          ServiceBuilder::new()
              .layer(TraceLayer::new_for_http())
              .layer(HandleErrorLayer::new(handle_timeout_error))
              .layer(TimeoutLayer::new(config.request_timeout))
              .layer(CompressionLayer::new())
              .layer(cors),
      );

  Ok(app)
}

/// Binds `HOST:PORT`, resolving hostnames and accepting bare IPv6 hosts.
pub async fn bind_listener(config: &Config) -> std::io::Result<TcpListener> {
  TcpListener::bind((config.host.as_str(), config.port)).await
}

async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
  (
      StatusCode::OK,
      Json(json!({
          "status": "success",
          "message": "Server is running"
      })),
  )
}

async fn route_not_found() -> AppError {
  AppError::NotFoundError("No such route".into())
}

async fn handle_timeout_error(err: BoxError) -> AppError {
  if err.is::<Elapsed>() {
      AppError::RequestTimeout
  } else {
      AppError::InternalError(err.to_string())
  }
}
