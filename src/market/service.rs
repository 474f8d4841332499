use tracing::info;

use crate::{error::AppError, tokens, upstream::BirdeyeClient};

#[derive(Clone)]
pub struct MarketService {
    client: BirdeyeClient,
}

impl MarketService {
    pub fn new(client: BirdeyeClient) -> Self {
        Self { client }
    }

    /// USD price for a known symbol or a mint address. Anything unrecognised is sent
    /// to Birdeye as-is and its verdict is relayed.
    pub async fn get_usd_price(&self, sym_or_mint: &str) -> Result<f64, AppError> {
        let mint = tokens::resolve_mint(sym_or_mint);
        let price = self.client.get_price(&mint).await?;
        info!("Price for {} ({}): {}", sym_or_mint, mint, price);
        Ok(price)
    }
}
