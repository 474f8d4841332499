use axum::{routing::get, Router};

use crate::market::{handler, service::MarketService};

pub fn market_routes(service: MarketService) -> Router {
  Router::new()
      .route("/price/:symbol", get(handler::get_price))
      .with_state(service)
}
