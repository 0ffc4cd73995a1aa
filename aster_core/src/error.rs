use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
}

#[derive(Debug, Error)]
pub enum AsterError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid signing key")]
    InvalidKey,
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet indexer request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("index entry {0} points at a missing snapshot document")]
    DanglingIndex(String),
    #[error("malformed index key")]
    MalformedKey,
}

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Failed to fetch wallet balance: {0}")]
    Wallet(#[from] WalletError),
    #[error("Failed to parse wallet token: {0}")]
    Token(#[from] serde_json::Error),
    #[error("Failed to save snapshot: {0}")]
    Store(#[from] StoreError),
}
