use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Public endpoint used when `ETHEREUM_RPC_URL` is not set
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";

/// Client configuration structure
///
/// Transport timeouts are explicit here rather than left to the HTTP
/// library defaults. Retries are never performed.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ethereum RPC endpoint URL
    pub ethereum_rpc_url: String,

    /// Upper bound on a whole request, from connect to last response byte
    pub request_timeout: Duration,

    /// Upper bound on establishing the TCP/TLS connection
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_url(DEFAULT_RPC_URL)
    }
}

impl Config {
    /// Default timeouts for the given endpoint
    pub fn for_url(rpc_url: impl Into<String>) -> Self {
        Config {
            ethereum_rpc_url: rpc_url.into(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `ETHEREUM_RPC_URL` - Ethereum RPC URL (default: "https://eth.llamarpc.com")
    /// * `RPC_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    /// * `RPC_CONNECT_TIMEOUT_SECS` - Connect timeout in seconds (default: 10)
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        let defaults = Config::default();
        Ok(Config {
            ethereum_rpc_url: env::var("ETHEREUM_RPC_URL")
                .unwrap_or(defaults.ethereum_rpc_url),
            request_timeout: secs_from_env("RPC_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout),
            connect_timeout: secs_from_env("RPC_CONNECT_TIMEOUT_SECS")?
                .unwrap_or(defaults.connect_timeout),
        })
    }
}

fn secs_from_env(key: &str) -> Result<Option<Duration>> {
    match env::var(key) {
        Ok(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("{key} must be a whole number of seconds"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
