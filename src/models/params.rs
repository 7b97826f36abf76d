use ethers::types::Address;
use serde::{Deserialize, Serialize};

// Validation limits for user-supplied launch parameters.
pub const MIN_SUPPLY: u64 = 1_000_000;
pub const MAX_SUPPLY: u64 = 1_000_000_000_000_000;
pub const MIN_ETH_LIQUIDITY: f64 = 0.01;
pub const MAX_ETH_LIQUIDITY: f64 = 100.0;
pub const MIN_SYMBOL_LENGTH: usize = 2;
pub const MAX_SYMBOL_LENGTH: usize = 8;
pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 64;
pub const DEFAULT_LP_PERCENTAGE: u8 = 80;

/// Validated parameters for a token launch.
///
/// Immutable once validated, except `creator_address` which is filled in when
/// the first transaction is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchParams {
    pub name: String,
    pub symbol: String,
    pub supply: u64,
    pub eth_liquidity: f64,
    pub lp_percentage: u8,
    pub creator_address: Option<Address>,
}

impl LaunchParams {
    /// Build params from raw user input. The symbol is normalized to
    /// uppercase here; everything else is taken as-is and checked by
    /// `validate`.
    pub fn new(
        name: &str,
        symbol: &str,
        supply: u64,
        eth_liquidity: f64,
        lp_percentage: u8,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_uppercase(),
            supply,
            eth_liquidity,
            lp_percentage,
            creator_address: None,
        }
    }

    /// Validate parameters, returning every violated rule as a message.
    /// All checks run unconditionally so a caller can show the user the full
    /// list at once.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        // Symbol validation
        if self.symbol.is_empty() || !self.symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push("Symbol must be alphanumeric only".to_string());
        }
        if self.symbol.len() < MIN_SYMBOL_LENGTH {
            errors.push(format!("Symbol too short (min {} chars)", MIN_SYMBOL_LENGTH));
        }
        if self.symbol.len() > MAX_SYMBOL_LENGTH {
            errors.push(format!("Symbol too long (max {} chars)", MAX_SYMBOL_LENGTH));
        }

        // Name validation
        if self.name.len() < MIN_NAME_LENGTH {
            errors.push(format!("Name too short (min {} chars)", MIN_NAME_LENGTH));
        }
        if self.name.len() > MAX_NAME_LENGTH {
            errors.push(format!("Name too long (max {} chars)", MAX_NAME_LENGTH));
        }

        // Supply validation
        if self.supply < MIN_SUPPLY {
            errors.push(format!("Supply too low (min {})", MIN_SUPPLY));
        }
        if self.supply > MAX_SUPPLY {
            errors.push(format!("Supply too high (max {})", MAX_SUPPLY));
        }

        // ETH liquidity validation
        if self.eth_liquidity < MIN_ETH_LIQUIDITY {
            errors.push(format!("ETH too low (min {} ETH)", MIN_ETH_LIQUIDITY));
        }
        if self.eth_liquidity > MAX_ETH_LIQUIDITY {
            errors.push(format!("ETH too high (max {} ETH)", MAX_ETH_LIQUIDITY));
        }

        // LP percentage
        if self.lp_percentage < 1 || self.lp_percentage > 100 {
            errors.push("LP percentage must be 1-100".to_string());
        }

        errors
    }

    /// Token amount reserved for the liquidity pool, truncating division.
    pub fn lp_token_amount(&self) -> u64 {
        self.supply * self.lp_percentage as u64 / 100
    }
}
