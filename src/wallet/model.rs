use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tokens::validate_address;

#[derive(Debug, Deserialize, Validate)]
pub struct WalletQuery {
    #[validate(custom = "validate_address")]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenBalance {
    pub mint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub amount: f64,
    pub decimals: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WalletResponse {
    pub address: String,
    pub sol_balance: f64,
    pub tokens: Vec<TokenBalance>,
}
