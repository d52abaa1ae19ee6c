//! Append-only event log.
//!
//! Every committed state transition emits exactly one record; failed
//! requests emit nothing. Observers (audit backends, dashboards) read the
//! log by sequence number — the gate guarantees "emitted iff the state
//! change committed" and nothing about delivery beyond that.

use serde::{Deserialize, Serialize};

use sentinel_core::{AccountId, DocumentId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateEventKind {
    Issuance {
        caller: AccountId,
        amount: u64,
        document_id: DocumentId,
    },
    Redemption {
        caller: AccountId,
        amount: u64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateEvent {
    pub seq: u64,
    pub timestamp: Timestamp,
    pub kind: GateEventKind,
}

/// In-memory, append-only, ordered event record.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<GateEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event; sequence numbers are dense and start at 0.
    pub fn append(&mut self, kind: GateEventKind) -> u64 {
        let seq = self.entries.len() as u64;
        self.entries.push(GateEvent {
            seq,
            timestamp: Timestamp::now(),
            kind,
        });
        seq
    }

    pub fn entries(&self) -> &[GateEvent] {
        &self.entries
    }

    /// Entries at or after the given sequence number.
    pub fn since(&self, seq: u64) -> &[GateEvent] {
        let start = (seq as usize).min(self.entries.len());
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
