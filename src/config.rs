use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use lazy_static::lazy_static;
use log::{debug, info};

use crate::errors::{EtherfunError, Result};

lazy_static! {
    pub static ref CONFIG: Arc<Config> = Arc::new(Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}. Using default settings.", e);
        Config::default()
    }));
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint used for all on-chain reads.
    pub eth_rpc_url: String,
    pub chain_id: u64,
    /// Base URL of the hosted signing widget.
    pub widget_base_url: String,
    /// Sessions not advanced within this window are expired lazily on read.
    pub session_expiry_minutes: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();
        info!("Loading configuration from environment variables.");

        let defaults = Config::default();
        let config = Config {
            eth_rpc_url: env::var("ETH_RPC_URL").unwrap_or(defaults.eth_rpc_url),
            chain_id: match env::var("ETH_CHAIN_ID") {
                Ok(raw) => raw.parse().map_err(|_| {
                    EtherfunError::Config(format!("Invalid ETH_CHAIN_ID: {}", raw))
                })?,
                Err(_) => defaults.chain_id,
            },
            widget_base_url: env::var("WIDGET_BASE_URL").unwrap_or(defaults.widget_base_url),
            session_expiry_minutes: match env::var("SESSION_EXPIRY_MINUTES") {
                Ok(raw) => raw.parse().map_err(|_| {
                    EtherfunError::Config(format!("Invalid SESSION_EXPIRY_MINUTES: {}", raw))
                })?,
                Err(_) => defaults.session_expiry_minutes,
            },
        };

        debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            eth_rpc_url: "https://eth.llamarpc.com".to_string(),
            chain_id: 1, // Mainnet
            widget_base_url: "https://etherfun.app/launch".to_string(),
            session_expiry_minutes: 15,
        }
    }
}
