//! Well-known SPL tokens and helpers for turning user input into mint addresses.

use validator::ValidationError;

/// Wrapped SOL mint. Native SOL balances are reported under its symbol.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Well-known SPL tokens on Solana mainnet (symbol, mint_address, decimals)
pub const KNOWN_TOKENS: &[(&str, &str, u8)] = &[
    ("SOL", WRAPPED_SOL_MINT, 9),
    ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6),
    ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", 6),
    ("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", 5),
    ("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", 6),
    ("RAY", "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R", 6),
    ("PYTH", "HZ1JovNiVvGrGNiiYvEozEVgZ58xaU3RKwX8eACQBCt3", 6),
    ("WIF", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", 6),
    ("ORCA", "orcaEKTdK7LKz57vaAYr9QeNsVEPfiu6QeMU1kektZE", 6),
    ("MSOL", "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So", 9),
    ("JITOSOL", "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn", 9),
];

/// A Solana public key is 32 bytes, base58 encoded (32 to 44 characters).
/// Surrounding whitespace is rejected, the value is forwarded upstream verbatim.
pub fn is_valid_address(address: &str) -> bool {
    if address.len() < 32 || address.len() > 44 {
        return false;
    }
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == 32)
}

pub fn mint_for_symbol(symbol: &str) -> Option<&'static str> {
    let upper = symbol.trim().to_uppercase();
    KNOWN_TOKENS
        .iter()
        .find(|(sym, _, _)| *sym == upper)
        .map(|(_, mint, _)| *mint)
}

pub fn symbol_for_mint(mint: &str) -> Option<&'static str> {
    KNOWN_TOKENS
        .iter()
        .find(|(_, addr, _)| *addr == mint)
        .map(|(sym, _, _)| *sym)
}

/// Known symbols map to their mint; anything else is taken to be a mint already.
pub fn resolve_mint(sym_or_addr: &str) -> String {
    mint_for_symbol(sym_or_addr)
        .map(str::to_string)
        .unwrap_or_else(|| sym_or_addr.trim().to_string())
}

pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if is_valid_address(address) {
        return Ok(());
    }
    let mut err = ValidationError::new("invalid_address");
    err.message = Some(
        format!(
            "'{}' is not a valid Solana address (expected a base58-encoded 32-byte public key)",
            address
        )
        .into(),
    );
    Err(err)
}

/// Accepts a mint address or one of the known symbols.
pub fn validate_mint(value: &str) -> Result<(), ValidationError> {
    if mint_for_symbol(value).is_some() || is_valid_address(value) {
        return Ok(());
    }
    let known = KNOWN_TOKENS
        .iter()
        .map(|(sym, _, _)| *sym)
        .collect::<Vec<_>>()
        .join(", ");
    let mut err = ValidationError::new("invalid_mint");
    err.message = Some(
        format!(
            "'{}' is neither a mint address nor a known symbol ({})",
            value, known
        )
        .into(),
    );
    Err(err)
}
