//! Sentinel authorization core.
//!
//! A privileged action — crediting value tokens — is permitted only when two
//! independent approvals coincide: membership in a human-administered
//! validator registry, and a cryptographic attestation from the designated
//! trusted signer over a document identifier. A replay guard ensures each
//! attestation instance triggers issuance at most once across the system's
//! entire history.
//!
//! Composition per request (short-circuiting, all-or-nothing):
//!
//! 1. registry membership check
//! 2. attestation verification against the configured signer
//! 3. replay check-and-commit
//! 4. ledger credit + event emission
//!
//! All mutable state (registry, signer, replay records, event log) lives in
//! the [`Gate`] context object; nothing here is a process-wide singleton.
//! The gate itself is synchronous and lock-free — callers that admit
//! concurrent requests must serialize them through a single-writer boundary
//! around the gate (the server wraps it in a `Mutex`).

pub mod attestation;
pub mod error;
pub mod events;
pub mod gate;
pub mod registry;
pub mod replay;

pub use attestation::{sign_document, verify_attestation, Attestation};
pub use error::{GateError, GateResult};
pub use events::{EventLog, GateEvent, GateEventKind};
pub use gate::Gate;
pub use registry::ValidatorRegistry;
pub use replay::{consumption_id, ReplayGuard};
