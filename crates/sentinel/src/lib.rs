//! Sentinel server library.
//!
//! Thin shell around the authorization core: loads configuration, wires the
//! gate to an in-memory ledger, and exposes the issuance, redemption,
//! administrative, and read surfaces over HTTP.
//!
//! # Concurrency
//!
//! The execution model the core assumes — all state-mutating requests
//! serialized globally — is reproduced here by a single `Mutex` around the
//! gate. Each request runs to completion under the lock before the next
//! begins; ordering among queued requests stays with the runtime and is not
//! something the core defends beyond first-committed-wins.

pub mod config;
pub mod error;
pub mod http;

pub use config::SentinelConfig;
pub use error::{ServerError, ServerResult};

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::info;

use sentinel_gate::Gate;
use sentinel_ledger::InMemoryLedger;

/// Shared application state for the HTTP handlers.
pub struct AppState {
    pub config: SentinelConfig,
    pub gate: Mutex<Gate>,
}

/// Build the gate from configuration: parse the owner, seed the trusted
/// signer and initial validators if configured.
pub fn initialize(config: SentinelConfig) -> ServerResult<AppState> {
    config.validate()?;
    let owner = config.owner_account()?;

    let mut gate = Gate::new(owner, Box::new(InMemoryLedger::new()))?;

    if let Some(signer) = config.signer_account()? {
        gate.set_signer(owner, signer)?;
    }
    for validator in config.validator_accounts()? {
        gate.grant_validator(owner, validator)?;
    }

    info!(
        owner = %owner,
        signer = ?gate.trusted_signer(),
        validators = gate.validator_count(),
        "sentinel gate initialized"
    );

    Ok(AppState {
        config,
        gate: Mutex::new(gate),
    })
}

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    /// Hex account id of the requesting validator.
    pub caller: String,
    pub amount: u64,
    pub document_id: String,
    /// Hex signature blob (public key || signature).
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintResponse {
    pub consumption_id: String,
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub caller: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSignerRequest {
    pub caller: String,
    pub signer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorRequest {
    pub caller: String,
    pub account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
