//! Replay prevention.
//!
//! Each attestation instance maps to a consumption identifier derived from
//! the document digest *and* the signature bytes. Binding the signature
//! means a second, different valid signature over the same document is a
//! fresh, unconsumed instance — the guard's scope is "this exact
//! attestation", not "this document".

use std::collections::HashSet;

use sentinel_core::{document_digest, ConsumptionId, DocumentId};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::{GateError, GateResult};

const CONSUMPTION_DOMAIN: &[u8] = b"sentinel consumption v1";

/// Derive the consumption identifier for an attestation instance.
///
/// Deterministic over (document digest, signature bytes). Neither the
/// requested amount nor the caller enters the derivation.
pub fn consumption_id(document_id: &DocumentId, signature: &[u8]) -> ConsumptionId {
    let mut hasher = Sha256::new();
    hasher.update(CONSUMPTION_DOMAIN);
    hasher.update(document_digest(document_id));
    hasher.update(signature);
    ConsumptionId(hasher.finalize().into())
}

/// Grow-only set of consumed identifiers.
///
/// Once an identifier is committed it can never be unmarked or reused; the
/// set only grows for the lifetime of the gate. `check_and_commit` is the
/// single point in the system requiring mutual exclusion — it must not be
/// interleaved with another request touching the same identifier, which the
/// `&mut self` receiver enforces as long as the owning gate sits behind a
/// single-writer boundary.
#[derive(Debug, Default)]
pub struct ReplayGuard {
    consumed: HashSet<ConsumptionId>,
}

impl ReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic check-then-set. The first commit of an identifier succeeds;
    /// every later commit of the same identifier observes `AlreadyUsed`.
    pub fn check_and_commit(&mut self, id: ConsumptionId) -> GateResult<()> {
        if self.consumed.insert(id) {
            Ok(())
        } else {
            warn!(consumption_id = %id, "replay rejected");
            Err(GateError::AlreadyUsed)
        }
    }

    pub fn is_consumed(&self, id: &ConsumptionId) -> bool {
        self.consumed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}
