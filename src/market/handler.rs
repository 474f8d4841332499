use axum::{
  extract::{Path, State},
  Json,
};
use validator::Validate;

use crate::{
  error::AppError,
  market::{
      model::{MarketPriceResponse, PriceQuery, QUOTE_CURRENCY},
      service::MarketService,
  },
};

pub async fn get_price(
  State(service): State<MarketService>,
  Path(query): Path<PriceQuery>,
) -> Result<Json<MarketPriceResponse>, AppError> {
  query.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;

  let price = service.get_usd_price(&query.symbol).await?;
  Ok(Json(MarketPriceResponse {
      symbol: query.symbol,
      price,
      currency: QUOTE_CURRENCY.to_string(),
  }))
}
