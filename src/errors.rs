use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Invalid tax table: {0}")]
    InvalidTable(String),
    #[error("Extraction failed: {0}")]
    Extraction(String),
}
