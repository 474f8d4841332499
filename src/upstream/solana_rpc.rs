use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;

use super::error_message;

/// Read-only Solana JSON-RPC client.
#[derive(Clone)]
pub struct SolanaRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcValue<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct KeyedTokenAccount {
    account: TokenAccount,
}

#[derive(Debug, Deserialize)]
struct TokenAccount {
    data: TokenAccountData,
}

#[derive(Debug, Deserialize)]
struct TokenAccountData {
    parsed: ParsedTokenAccount,
}

#[derive(Debug, Deserialize)]
struct ParsedTokenAccount {
    info: TokenAccountInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAccountInfo {
    mint: String,
    token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAmount {
    amount: String,
    decimals: u8,
    ui_amount_string: Option<String>,
}

/// One SPL token account's balance, already scaled by the mint's decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHolding {
    pub mint: String,
    pub amount: f64,
    pub decimals: u8,
}

fn holding_from_info(info: TokenAccountInfo) -> TokenHolding {
    let amount = info
        .token_amount
        .ui_amount_string
        .as_deref()
        .and_then(|ui| ui.parse::<f64>().ok())
        .unwrap_or_else(|| {
            let raw = info.token_amount.amount.parse::<u64>().unwrap_or(0);
            raw as f64 / 10f64.powi(info.token_amount.decimals as i32)
        });

    TokenHolding {
        mint: info.mint,
        amount: amount.max(0.0),
        decimals: info.token_amount.decimals,
    }
}

impl SolanaRpcClient {
    pub fn new(http_client: reqwest::Client, rpc_url: impl Into<String>) -> Self {
        Self {
            http_client,
            rpc_url: rpc_url.into(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, AppError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!("Solana RPC {}", method);
        let response = self.http_client.post(&self.rpc_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(AppError::upstream(
                status.as_u16(),
                format!("Solana RPC {} failed: {}", method, message),
            ));
        }

        let rpc_response: RpcResponse<T> = response.json().await?;
        if let Some(error) = rpc_response.error {
            return Err(AppError::upstream(
                502,
                format!("Solana RPC error {}: {}", error.code, error.message),
            ));
        }

        rpc_response
            .result
            .ok_or_else(|| AppError::upstream(502, format!("Solana RPC {}: missing 'result' field", method)))
    }

    /// Native balance in lamports.
    pub async fn get_balance(&self, address: &str) -> Result<u64, AppError> {
        let result: RpcValue<u64> = self.call("getBalance", json!([address])).await?;
        Ok(result.value)
    }

    /// All token accounts owned by `owner` under the given token program.
    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &str,
        program_id: &str,
    ) -> Result<Vec<TokenHolding>, AppError> {
        let result: RpcValue<Vec<KeyedTokenAccount>> = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    owner,
                    { "programId": program_id },
                    { "encoding": "jsonParsed" }
                ]),
            )
            .await?;

        Ok(result
            .value
            .into_iter()
            .map(|keyed| holding_from_info(keyed.account.data.parsed.info))
            .collect())
    }
}
