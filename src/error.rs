//! Errors - one enum for the crate, indexer failures nested

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MintError>;

#[derive(Debug, Error)]
pub enum MintError {
    #[error("wallet extension is not available")]
    WalletUnavailable,
    #[error("wallet: {0}")]
    Wallet(String),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("wallet address is not available")]
    MissingAddress,
    #[error("wallet public key is not available")]
    MissingPublicKey,
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("config: {0}")]
    Config(String),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
    #[error("funding utxo of {value} sats does not cover {required} sats of postage + fee")]
    InsufficientFunds { value: u64, required: u64 },
    #[error("no funding utxo at {address} after {attempts} attempts")]
    FundingTimedOut { address: String, attempts: u32 },
    #[error("{operation} timed out after {after:?}")]
    CallTimedOut { operation: &'static str, after: Duration },
    #[error("cancelled")]
    Cancelled,
    #[error("psbt: {0}")]
    Psbt(String),
}

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("indexer request failed: {0}")]
    Http(String),
    #[error("indexer returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed indexer response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for IndexerError {
    fn from(e: reqwest::Error) -> Self { IndexerError::Http(e.to_string()) }
}

impl From<bitcoin::psbt::Error> for MintError {
    fn from(e: bitcoin::psbt::Error) -> Self { MintError::Psbt(e.to_string()) }
}
