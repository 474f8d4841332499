use tracing::info;

use crate::{
    error::AppError,
    market::service::MarketService,
    swap::model::{SwapEstimateResponse, SwapQuery, DEFAULT_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS},
};

/// Price-ratio swap simulation. Nothing is executed or signed.
#[derive(Clone)]
pub struct SwapService {
    market_service: MarketService,
}

impl SwapService {
    pub fn new(market_service: MarketService) -> Self {
        Self { market_service }
    }

    pub async fn estimate(&self, query: SwapQuery) -> Result<SwapEstimateResponse, AppError> {
        validate_amount(query.amount)?;
        let slippage_bps = query.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS);

        let (price_in, price_out) = futures::try_join!(
            self.market_service.get_usd_price(&query.input_mint),
            self.market_service.get_usd_price(&query.output_mint),
        )?;

        let estimated_amount_out = estimate_output(query.amount, price_in, price_out, slippage_bps)?;
        info!(
            "Swap estimate {} {} -> {} {} ({} bps)",
            query.amount, query.input_mint, estimated_amount_out, query.output_mint, slippage_bps
        );

        Ok(SwapEstimateResponse {
            input_mint: query.input_mint,
            output_mint: query.output_mint,
            amount_in: query.amount,
            estimated_amount_out,
        })
    }
}

pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::ValidationError(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(())
}

/// `amount * price_in / price_out`, less slippage.
pub fn estimate_output(
    amount: f64,
    price_in: f64,
    price_out: f64,
    slippage_bps: u32,
) -> Result<f64, AppError> {
    validate_amount(amount)?;
    if price_in <= 0.0 || price_out <= 0.0 {
        return Err(AppError::NotFoundError("No usable price for swap pair".into()));
    }

    if slippage_bps > MAX_SLIPPAGE_BPS {
        return Err(AppError::ValidationError(format!(
            "slippage_bps must be below 10000, got {}",
            slippage_bps
        )));
    }

    let slippage = slippage_bps as f64 / 10_000.0;
    let estimate = amount * price_in / price_out * (1.0 - slippage);
    if !estimate.is_finite() {
        return Err(AppError::ValidationError(format!(
            "amount {} is too large to estimate",
            amount
        )));
    }
    if estimate <= 0.0 {
        return Err(AppError::ValidationError(format!(
            "amount {} is too small to estimate",
            amount
        )));
    }
    Ok(estimate)
}
