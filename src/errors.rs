use thiserror::Error;
use ethers::providers::ProviderError;

#[derive(Error, Debug)]
pub enum EtherfunError {
    #[error("RPC provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("ABI error: {0}")]
    Abi(#[from] ethers::abi::Error),

    #[error("Unit conversion error: {0}")]
    Conversion(#[from] ethers::utils::ConversionError),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid session status: expected {expected}, found {actual}")]
    InvalidStatus { expected: String, actual: String },

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, EtherfunError>;

// Allow `?` on anyhow results at the CLI boundary.
impl From<anyhow::Error> for EtherfunError {
    fn from(err: anyhow::Error) -> Self {
        EtherfunError::Generic(err.to_string())
    }
}
