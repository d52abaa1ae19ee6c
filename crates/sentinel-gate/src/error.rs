use sentinel_core::LedgerError;
use thiserror::Error;

/// Request-scoped errors of the authorization core.
///
/// Every error is synchronous, reported to the caller immediately, and
/// atomic: no partial state change accompanies any of them. None is fatal to
/// the gate — state stays valid for subsequent requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// Caller is not the administrative owner (admin operations only).
    #[error("caller is not the owner")]
    Unauthorized,

    /// Caller is not a registered validator (issuance only).
    #[error("caller is not a registered validator")]
    NotAuthorized,

    /// The null identity was supplied where a concrete identity is required.
    #[error("null identity supplied where a concrete identity is required")]
    InvalidAccount,

    /// Signature recovery failed, the recovered identity is not the trusted
    /// signer, or no trusted signer is configured.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The attestation instance was already consumed by an earlier issuance.
    #[error("attestation already consumed")]
    AlreadyUsed,

    /// Zero amount where a positive amount is required.
    #[error("amount must be positive")]
    InvalidAmount,

    /// Redemption exceeds the caller's holdings.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Credit would overflow total supply.
    #[error("total supply overflow")]
    SupplyOverflow,
}

impl From<LedgerError> for GateError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientBalance => GateError::InsufficientBalance,
            LedgerError::SupplyOverflow => GateError::SupplyOverflow,
        }
    }
}

pub type GateResult<T> = Result<T, GateError>;
