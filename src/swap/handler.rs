use axum::{
  extract::{rejection::QueryRejection, Query, State},
  Json,
};
use validator::Validate;

use crate::{
  error::AppError,
  swap::{
      model::{SwapEstimateResponse, SwapQuery},
      service::SwapService,
  },
};

pub async fn simulate_swap(
  State(service): State<SwapService>,
  query: Result<Query<SwapQuery>, QueryRejection>,
) -> Result<Json<SwapEstimateResponse>, AppError> {
  let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
  query.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;

  let estimate = service.estimate(query).await?;
  Ok(Json(estimate))
}
