pub mod birdeye;
pub mod solana_rpc;

pub use birdeye::BirdeyeClient;
pub use solana_rpc::SolanaRpcClient;

use tracing::warn;

use crate::{config::Config, error::AppError};

/// One pooled HTTP client shared by every upstream, carrying the configured timeout.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))
}

/// Reads the body of a failed response and pulls out a message if it is JSON.
pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read upstream error body ({}): {}", status, e);
            String::new()
        }
    };

    let message = serde_json::from_str::<serde_json::Value>(&body_text)
        .ok()
        .and_then(|json| {
            json.get("message")
                .or_else(|| json.pointer("/error/message"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body_text);

    if message.is_empty() {
        status.to_string()
    } else {
        message
    }
}
