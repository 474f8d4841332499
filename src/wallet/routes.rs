use axum::{routing::get, Router};

use crate::wallet::{handler, service::WalletService};

pub fn wallet_routes(service: WalletService) -> Router {
  Router::new()
      .route("/wallet/:address", get(handler::get_balances))
      .route("/wallet/:address/tokens", get(handler::get_tokens))
      .with_state(service)
}
