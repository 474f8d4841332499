use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tokens::validate_mint;

pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const MAX_SLIPPAGE_BPS: u32 = 9_999;

#[derive(Debug, Deserialize, Validate)]
pub struct SwapQuery {
    #[validate(custom = "validate_mint")]
    pub input_mint: String,
    #[validate(custom = "validate_mint")]
    pub output_mint: String,
    pub amount: f64,
    #[validate(range(max = 9999, message = "slippage_bps must be below 10000"))]
    pub slippage_bps: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapEstimateResponse {
    pub input_mint: String,
    pub output_mint: String,
    pub amount_in: f64,
    pub estimated_amount_out: f64,
}
