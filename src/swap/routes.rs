use axum::{routing::get, Router};

use crate::swap::{handler, service::SwapService};

pub fn swap_routes(service: SwapService) -> Router {
  Router::new()
      .route("/swap", get(handler::simulate_swap))
      .with_state(service)
}
