use std::collections::BTreeMap;

use tracing::info;

use crate::{
    error::AppError,
    tokens::{self, LAMPORTS_PER_SOL, TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID, WRAPPED_SOL_MINT},
    upstream::{solana_rpc::TokenHolding, SolanaRpcClient},
    wallet::model::{TokenBalance, WalletResponse},
};

#[derive(Clone)]
pub struct WalletService {
    rpc: SolanaRpcClient,
}

impl WalletService {
    pub fn new(rpc: SolanaRpcClient) -> Self {
        Self { rpc }
    }

    /// Native balance plus every SPL holding, one entry per mint.
    pub async fn get_wallet(&self, address: &str) -> Result<WalletResponse, AppError> {
        let (lamports, legacy, token_2022) = futures::try_join!(
            self.rpc.get_balance(address),
            self.rpc.get_token_accounts_by_owner(address, TOKEN_PROGRAM_ID),
            self.rpc.get_token_accounts_by_owner(address, TOKEN_2022_PROGRAM_ID),
        )?;

        let tokens = merge_holdings(legacy.into_iter().chain(token_2022));
        info!("Fetched wallet {} ({} mints)", address, tokens.len());

        Ok(WalletResponse {
            address: address.to_string(),
            sol_balance: lamports as f64 / LAMPORTS_PER_SOL,
            tokens,
        })
    }

    pub async fn get_balances(&self, address: &str) -> Result<BTreeMap<String, f64>, AppError> {
        let wallet = self.get_wallet(address).await?;
        Ok(balances_by_symbol(&wallet))
    }
}

/// Sums accounts that share a mint and labels known mints with their symbol.
pub fn merge_holdings(holdings: impl IntoIterator<Item = TokenHolding>) -> Vec<TokenBalance> {
    let mut by_mint: BTreeMap<String, TokenBalance> = BTreeMap::new();

    for holding in holdings {
        by_mint
            .entry(holding.mint.clone())
            .and_modify(|balance| balance.amount += holding.amount)
            .or_insert_with(|| TokenBalance {
                symbol: tokens::symbol_for_mint(&holding.mint).map(str::to_string),
                mint: holding.mint,
                amount: holding.amount,
                decimals: holding.decimals,
            });
    }

    by_mint.into_values().collect()
}

/// Flattens a wallet into `symbol -> amount`. Unknown mints are keyed by address,
/// wrapped SOL is folded into the native `SOL` entry.
pub fn balances_by_symbol(wallet: &WalletResponse) -> BTreeMap<String, f64> {
    let mut balances = BTreeMap::new();
    balances.insert("SOL".to_string(), wallet.sol_balance);

    for token in &wallet.tokens {
        let key = if token.mint == WRAPPED_SOL_MINT {
            "SOL".to_string()
        } else {
            token.symbol.clone().unwrap_or_else(|| token.mint.clone())
        };
        *balances.entry(key).or_insert(0.0) += token.amount;
    }

    balances
}
