use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid identity encoding: {0}")]
    InvalidIdentity(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by the balance ledger collaborator.
///
/// The ledger guarantees conservation: credits grow supply, debits shrink it,
/// and a debit that exceeds the account balance is rejected with no change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("total supply overflow")]
    SupplyOverflow,
}

pub type LedgerResult<T> = Result<T, LedgerError>;
