use crate::domain::account::AccountId;
use miette::Diagnostic;
use rust_decimal::Decimal;
use thiserror::Error;

/// Everything that can go wrong while creating, funding or moving money between accounts.
///
/// Caller-side violations (`InvalidInput`, `InvalidAmount`, `InvalidTransfer`) are never
/// retried. `StoreUnavailable` carries the backend failure unchanged.
#[derive(Error, Debug, Diagnostic)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    #[diagnostic(code(ledger::invalid_input))]
    InvalidInput(String),

    #[error("Invalid amount: {0}")]
    #[diagnostic(code(ledger::invalid_amount))]
    InvalidAmount(Decimal),

    #[error("Invalid transfer: {0}")]
    #[diagnostic(code(ledger::invalid_transfer))]
    InvalidTransfer(String),

    #[error("Account {0} not found")]
    #[diagnostic(code(ledger::not_found))]
    NotFound(AccountId),

    #[error("Account {0} already exists")]
    #[diagnostic(code(ledger::already_exists))]
    AlreadyExists(AccountId),

    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    #[diagnostic(code(ledger::insufficient_funds))]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("Store unavailable: {0}")]
    #[diagnostic(code(ledger::store_unavailable))]
    StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("CSV error: {0}")]
    #[diagnostic(code(ledger::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(ledger::io))]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Wraps any backend failure as `StoreUnavailable`.
    pub fn store<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::StoreUnavailable(err.into())
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LedgerError {
    fn from(err: rocksdb::Error) -> Self {
        Self::store(err)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::store(err)
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
