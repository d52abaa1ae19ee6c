//! Gate orchestration: the context object tying registry, verifier, replay
//! guard, event log, and the external ledger together.

use sentinel_core::{AccountId, ConsumptionId, DocumentId, Ledger};
use tracing::info;

use crate::attestation::verify_attestation;
use crate::error::{GateError, GateResult};
use crate::events::{EventLog, GateEvent, GateEventKind};
use crate::registry::ValidatorRegistry;
use crate::replay::{consumption_id, ReplayGuard};

/// The dual-authorization issuance gate.
///
/// Owns all process-wide mutable state: the validator registry, the trusted
/// signer, the replay records, and the event log. The replay records are
/// written only as a side effect of a successful issuance check — no other
/// path touches them.
///
/// The gate is synchronous; every operation runs to completion and either
/// commits atomically or fails atomically. Callers that admit concurrent
/// requests must serialize them through a single-writer boundary around the
/// gate. Request *ordering* ahead of that boundary is external and
/// adversarial: when several authorized callers hold the same attestation,
/// whoever is ordered first consumes it, and the gate cannot tell a fair
/// scheduler from a front-runner. That residual risk is inherent to the
/// attestation format, which binds neither amount nor recipient.
pub struct Gate {
    owner: AccountId,
    registry: ValidatorRegistry,
    trusted_signer: Option<AccountId>,
    replay: ReplayGuard,
    events: EventLog,
    ledger: Box<dyn Ledger>,
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("owner", &self.owner)
            .field("registry", &self.registry)
            .field("trusted_signer", &self.trusted_signer)
            .field("replay", &self.replay)
            .field("events", &self.events)
            .field("ledger", &"<dyn Ledger>")
            .finish()
    }
}

impl Gate {
    /// Create a gate administered by `owner` over the given ledger.
    pub fn new(owner: AccountId, ledger: Box<dyn Ledger>) -> GateResult<Self> {
        if owner.is_zero() {
            return Err(GateError::InvalidAccount);
        }
        Ok(Self {
            owner,
            registry: ValidatorRegistry::new(),
            trusted_signer: None,
            replay: ReplayGuard::new(),
            events: EventLog::new(),
            ledger,
        })
    }

    fn require_owner(&self, caller: AccountId) -> GateResult<()> {
        if caller != self.owner {
            return Err(GateError::Unauthorized);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Administrative surface (owner-gated)
    // -----------------------------------------------------------------------

    /// Designate the attestation authority. At most one signer is active at
    /// a time; setting a new one replaces the old.
    pub fn set_signer(&mut self, caller: AccountId, signer: AccountId) -> GateResult<()> {
        self.require_owner(caller)?;
        if signer.is_zero() {
            return Err(GateError::InvalidAccount);
        }
        info!(signer = %signer, "trusted signer set");
        self.trusted_signer = Some(signer);
        Ok(())
    }

    pub fn grant_validator(&mut self, caller: AccountId, account: AccountId) -> GateResult<()> {
        self.require_owner(caller)?;
        self.registry.grant(account)
    }

    /// Revoking a non-member succeeds silently.
    pub fn revoke_validator(&mut self, caller: AccountId, account: AccountId) -> GateResult<()> {
        self.require_owner(caller)?;
        self.registry.revoke(account);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Issuance
    // -----------------------------------------------------------------------

    /// Issue `amount` tokens to `caller` against an attestation.
    ///
    /// Checks run sequentially and short-circuit: registry membership,
    /// positive amount, attestation verification, replay check-and-commit,
    /// ledger credit. Every failure leaves all components in their pre-call
    /// state; in particular the replay guard is only reached after every
    /// other check has passed, so a failed request never consumes an
    /// attestation.
    ///
    /// Known weakness, preserved from the protocol this implements: the
    /// attestation covers only the document identifier. `amount` is
    /// caller-supplied and any positive value is accepted, and nothing binds
    /// the attestation to a recipient — any registered validator can consume
    /// any valid attestation. Closing either hole requires the attester to
    /// sign a richer payload, a coordinated protocol change.
    pub fn mint(
        &mut self,
        caller: AccountId,
        amount: u64,
        document_id: &DocumentId,
        signature: &[u8],
    ) -> GateResult<ConsumptionId> {
        if !self.registry.is_authorized(caller) {
            return Err(GateError::NotAuthorized);
        }
        if amount == 0 {
            return Err(GateError::InvalidAmount);
        }

        verify_attestation(document_id, signature, self.trusted_signer)?;

        let id = consumption_id(document_id, signature);
        self.replay.check_and_commit(id)?;

        // Past this point the attestation is spent. The only way the credit
        // can fail is supply overflow, and a consumed id stays consumed:
        // un-marking would break the grow-only invariant.
        self.ledger.credit(caller, amount)?;

        self.events.append(GateEventKind::Issuance {
            caller,
            amount,
            document_id: document_id.clone(),
        });
        info!(caller = %caller, amount, document_id = %document_id, "issuance committed");
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Redemption
    // -----------------------------------------------------------------------

    /// Burn `amount` tokens from the caller's balance.
    ///
    /// Self-service: no registry, verifier, or replay interaction. The
    /// ledger rejects the debit if the balance is insufficient.
    pub fn redeem(&mut self, caller: AccountId, amount: u64) -> GateResult<()> {
        if amount == 0 {
            return Err(GateError::InvalidAmount);
        }
        self.ledger.debit(caller, amount)?;

        self.events.append(GateEventKind::Redemption { caller, amount });
        info!(caller = %caller, amount, "redemption committed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn trusted_signer(&self) -> Option<AccountId> {
        self.trusted_signer
    }

    pub fn is_validator(&self, account: AccountId) -> bool {
        self.registry.is_authorized(account)
    }

    pub fn validator_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether the attestation instance `(document_id, signature)` has been
    /// consumed.
    pub fn is_consumed(&self, document_id: &DocumentId, signature: &[u8]) -> bool {
        self.replay
            .is_consumed(&consumption_id(document_id, signature))
    }

    pub fn is_consumed_id(&self, id: &ConsumptionId) -> bool {
        self.replay.is_consumed(id)
    }

    pub fn balance_of(&self, account: AccountId) -> u64 {
        self.ledger.balance_of(account)
    }

    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    pub fn events(&self) -> &[GateEvent] {
        self.events.entries()
    }

    pub fn events_since(&self, seq: u64) -> &[GateEvent] {
        self.events.since(seq)
    }
}
