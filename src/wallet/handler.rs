use std::collections::BTreeMap;

use axum::{
  extract::{Path, State},
  Json,
};
use validator::Validate;

use crate::{
  error::AppError,
  wallet::{
      model::{WalletQuery, WalletResponse},
      service::WalletService,
  },
};

pub async fn get_balances(
  State(service): State<WalletService>,
  Path(query): Path<WalletQuery>,
) -> Result<Json<BTreeMap<String, f64>>, AppError> {
  query.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;

  let balances = service.get_balances(&query.address).await?;
  Ok(Json(balances))
}

pub async fn get_tokens(
  State(service): State<WalletService>,
  Path(query): Path<WalletQuery>,
) -> Result<Json<WalletResponse>, AppError> {
  query.validate().map_err(|e| AppError::ValidationError(e.to_string()))?;

  let wallet = service.get_wallet(&query.address).await?;
  Ok(Json(wallet))
}
