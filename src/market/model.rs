use serde::{Deserialize, Serialize};
use validator::Validate;

pub const QUOTE_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize, Validate)]
pub struct PriceQuery {
    #[validate(length(min = 1, max = 64, message = "symbol must be 1 to 64 characters"))]
    pub symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarketPriceResponse {
    pub symbol: String,
    pub price: f64,
    pub currency: String,
}
