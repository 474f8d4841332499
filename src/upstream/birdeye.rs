use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AppError;

use super::error_message;

/// Birdeye public price API client.
#[derive(Clone)]
pub struct BirdeyeClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PriceEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<PriceData>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    value: Option<f64>,
}

impl BirdeyeClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn create_headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-chain", HeaderValue::from_static("solana"));

        let key_value = HeaderValue::from_str(&self.api_key)
            .map_err(|e| AppError::ConfigError(format!("Invalid Birdeye API key header: {}", e)))?;
        headers.insert("x-api-key", key_value);

        Ok(headers)
    }

    /// Current USD price of `mint`. Unknown or unpriced tokens are `NotFoundError`.
    pub async fn get_price(&self, mint: &str) -> Result<f64, AppError> {
        let url = format!("{}/defi/price", self.base_url);
        debug!("Birdeye price lookup for {}", mint);

        let response = self
            .http_client
            .get(&url)
            .headers(self.create_headers()?)
            .query(&[("address", mint)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return match status.as_u16() {
                400 | 404 => Err(AppError::NotFoundError(format!(
                    "No price data for {}: {}",
                    mint, message
                ))),
                code => {
                    warn!("Birdeye returned {}: {}", code, message);
                    Err(AppError::upstream(code, format!("Birdeye price API error: {}", message)))
                }
            };
        }

        let envelope: PriceEnvelope = response.json().await?;
        price_from_envelope(mint, envelope)
    }
}

fn price_from_envelope(mint: &str, envelope: PriceEnvelope) -> Result<f64, AppError> {
    if !envelope.success {
        let reason = envelope.message.unwrap_or_else(|| "request unsuccessful".into());
        return Err(AppError::NotFoundError(format!("No price data for {}: {}", mint, reason)));
    }

    match envelope.data.and_then(|data| data.value) {
        Some(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(AppError::NotFoundError(format!("No price data for {}", mint))),
    }
}
