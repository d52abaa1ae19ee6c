use std::collections::HashSet;

use sentinel_core::AccountId;
use tracing::info;

use crate::error::{GateError, GateResult};

/// Membership set of accounts authorized to request issuance.
///
/// Membership is a flat boolean per identity — no state machine, no implicit
/// expiry. Owner gating happens in the [`Gate`](crate::Gate); the registry
/// itself only validates the identity it is handed.
#[derive(Debug, Default)]
pub struct ValidatorRegistry {
    members: HashSet<AccountId>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure membership lookup, no side effects.
    pub fn is_authorized(&self, caller: AccountId) -> bool {
        self.members.contains(&caller)
    }

    /// Add a validator. Re-granting an existing member succeeds silently.
    pub fn grant(&mut self, account: AccountId) -> GateResult<()> {
        if account.is_zero() {
            return Err(GateError::InvalidAccount);
        }
        if self.members.insert(account) {
            info!(validator = %account, "validator granted");
        }
        Ok(())
    }

    /// Remove a validator. Revoking a non-member succeeds silently.
    pub fn revoke(&mut self, account: AccountId) {
        if self.members.remove(&account) {
            info!(validator = %account, "validator revoked");
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> impl Iterator<Item = &AccountId> {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(tag: u8) -> AccountId {
        AccountId([tag; 20])
    }

    #[test]
    fn test_grant_and_lookup() {
        let mut registry = ValidatorRegistry::new();
        assert!(!registry.is_authorized(account(1)));
        registry.grant(account(1)).unwrap();
        assert!(registry.is_authorized(account(1)));
        assert!(!registry.is_authorized(account(2)));
    }

    #[test]
    fn test_grant_rejects_null_identity() {
        let mut registry = ValidatorRegistry::new();
        assert_eq!(
            registry.grant(AccountId::ZERO).unwrap_err(),
            GateError::InvalidAccount
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut registry = ValidatorRegistry::new();
        registry.grant(account(1)).unwrap();
        registry.grant(account(1)).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_revoke_removes_membership() {
        let mut registry = ValidatorRegistry::new();
        registry.grant(account(1)).unwrap();
        registry.revoke(account(1));
        assert!(!registry.is_authorized(account(1)));
    }

    #[test]
    fn test_revoke_non_member_succeeds_silently() {
        let mut registry = ValidatorRegistry::new();
        registry.revoke(account(1));
        registry.revoke(AccountId::ZERO);
        assert!(registry.is_empty());
    }
}
