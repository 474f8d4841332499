use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_BIRDEYE_API_URL: &str = "https://public-api.birdeye.so";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub app_env: AppEnv,
    pub solana_rpc_url: String,
    pub birdeye_api_url: String,
    pub birdeye_api_key: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, so callers other than
    /// `from_env` never have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server config
        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".into())
            .parse::<u16>()
            .map_err(|_| AppError::ConfigError("Invalid PORT".into()))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let app_env_str = lookup("APP_ENV").unwrap_or_else(|| "development".into());
        let app_env = match app_env_str.to_lowercase().as_str() {
            "production" => AppEnv::Production,
            "test" => AppEnv::Test,
            _ => AppEnv::Development,
        };

        // Upstream config
        let solana_rpc_url = lookup("SOLANA_RPC_URL")
            .unwrap_or_else(|| DEFAULT_SOLANA_RPC_URL.into());

        let birdeye_api_url = lookup("BIRDEYE_API_URL")
            .unwrap_or_else(|| DEFAULT_BIRDEYE_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let birdeye_api_key = lookup("BIRDEYE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("BIRDEYE_API_KEY must be set".into()))?;

        let upstream_timeout_str = lookup("UPSTREAM_TIMEOUT").unwrap_or_else(|| "10s".into());
        let upstream_timeout = parse_duration(&upstream_timeout_str)
            .map_err(|_| AppError::ConfigError("Invalid UPSTREAM_TIMEOUT format".into()))?;

        let request_timeout_str = lookup("REQUEST_TIMEOUT").unwrap_or_else(|| "30s".into());
        let request_timeout = parse_duration(&request_timeout_str)
            .map_err(|_| AppError::ConfigError("Invalid REQUEST_TIMEOUT format".into()))?;

        Ok(Self {
            port,
            host,
            app_env,
            solana_rpc_url,
            birdeye_api_url,
            birdeye_api_key,
            upstream_timeout,
            request_timeout,
        })
    }
}

fn parse_duration(duration_str: &str) -> Result<Duration, &'static str> {
    let duration_str = duration_str.trim();

    if duration_str.is_empty() {
        return Err("Duration string is empty");
    }

    // Extract the number and unit parts
    let len = duration_str.len();
    let (num_part, unit_part) = duration_str.split_at(
        duration_str
            .chars()
            .position(|c| !c.is_ascii_digit())
            .unwrap_or(len)
    );

    let num = num_part.parse::<u64>().map_err(|_| "Invalid number")?;

    match unit_part {
        "" | "s" => Ok(Duration::from_secs(num)),
        "ms" => Ok(Duration::from_millis(num)),
        "m" => Ok(Duration::from_secs(num * 60)),
        "h" => Ok(Duration::from_secs(num * 60 * 60)),
        _ => Err("Unknown time unit, use ms, s, m, or h"),
    }
}
