use thiserror::Error;

/// Errors the storefront surfaces to its pages and API callers. Fetch-side
/// failures (`MetadataFetchError`, `MetadataValidationError`) and
/// submission-side failures (`TransactionSetupError`, `TransactionError`,
/// `TransactionFailure`) stay distinct so pages can render them differently.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Failed to fetch token metadata: {0}")]
    MetadataFetchError(String),
    #[error("Invalid token metadata: {0}")]
    MetadataValidationError(String),
    #[error("Failed to parse price: {0}")]
    PriceParseError(String),
    #[error("Failed to setup transaction: {0}")]
    TransactionSetupError(String),
    #[error("Failed to send transaction: {0}")]
    TransactionError(String),
    #[error("Transaction failed: {0}")]
    TransactionFailure(String),
    #[error("Failed rpc request: {0}")]
    RpcRequestError(String),
}

pub type Result<T> = core::result::Result<T, ShopError>;
