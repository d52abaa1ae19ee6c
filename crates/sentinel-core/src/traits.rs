use crate::crypto::account_id_from_pubkey;
use crate::error::{CoreResult, LedgerResult};
use crate::types::AccountId;

// ---------------------------------------------------------------------------
// Signer — Ed25519 signing capability
// ---------------------------------------------------------------------------

pub trait Signer: Send + Sync {
    fn sign_ed25519(&self, message: &[u8]) -> CoreResult<[u8; 64]>;
    fn public_key_ed25519(&self) -> [u8; 32];

    /// The identity this signer's signatures recover to.
    fn account_id(&self) -> AccountId {
        account_id_from_pubkey(&self.public_key_ed25519())
    }
}

// ---------------------------------------------------------------------------
// Ledger — the external balance ledger
//
// The gate consumes exactly two mutating primitives. Conservation is the
// ledger's contract: total supply equals cumulative credits minus cumulative
// debits at every observation point, and a debit exceeding the account
// balance is rejected with no state change.
// ---------------------------------------------------------------------------

pub trait Ledger: Send + Sync {
    fn credit(&mut self, account: AccountId, amount: u64) -> LedgerResult<()>;
    fn debit(&mut self, account: AccountId, amount: u64) -> LedgerResult<()>;
    fn balance_of(&self, account: AccountId) -> u64;
    fn total_supply(&self) -> u64;
}
