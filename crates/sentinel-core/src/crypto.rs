use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};
use crate::types::{AccountId, DocumentId};

/// Domain-separation prefix for attestation envelopes. Signatures over a bare
/// document digest would be replayable in any protocol hashing the same way;
/// the prefix pins them to this one.
pub const ATTESTATION_DOMAIN: &[u8] = b"\x19sentinel attestation:\n";

/// Length of the self-contained signature blob: 32-byte Ed25519 public key
/// followed by the 64-byte signature.
pub const SIGNATURE_BLOB_LEN: usize = 96;

/// Derive an AccountId from an Ed25519 public key.
///
/// Formula: SHA-256(pubkey)[0:20], hex-encoded for display.
///
/// Self-certifying identity: no registry, no resolution protocol.
pub fn account_id_from_pubkey(pubkey: &[u8; 32]) -> AccountId {
    let hash = Sha256::digest(pubkey);
    let mut truncated = [0u8; 20];
    truncated.copy_from_slice(&hash[..20]);
    AccountId(truncated)
}

/// Content digest of a document identifier.
pub fn document_digest(document_id: &DocumentId) -> [u8; 32] {
    Sha256::digest(document_id.as_str().as_bytes()).into()
}

/// The exact byte string an attester signs: domain prefix + content digest.
pub fn signing_envelope(digest: &[u8; 32]) -> Vec<u8> {
    let mut envelope = Vec::with_capacity(ATTESTATION_DOMAIN.len() + digest.len());
    envelope.extend_from_slice(ATTESTATION_DOMAIN);
    envelope.extend_from_slice(digest);
    envelope
}

/// Recover the signing identity from a message and a self-contained
/// signature blob (public key || signature).
///
/// Well-formed input always yields a concrete, non-null identity: a
/// signature made with the wrong key recovers to that key's identity and is
/// left for the caller to compare against whatever it trusts. Malformed
/// input (wrong length, invalid key bytes, signature that does not verify)
/// is an explicit error — never coerced into a default identity.
pub fn recover_signer(message: &[u8], signature_blob: &[u8]) -> CoreResult<AccountId> {
    if signature_blob.len() != SIGNATURE_BLOB_LEN {
        return Err(CoreError::MalformedSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_BLOB_LEN,
            signature_blob.len()
        )));
    }

    let mut pubkey = [0u8; 32];
    pubkey.copy_from_slice(&signature_blob[..32]);
    let verifying_key = VerifyingKey::from_bytes(&pubkey)
        .map_err(|_| CoreError::MalformedSignature("invalid Ed25519 public key".into()))?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(&signature_blob[32..]);
    let signature = Signature::from_bytes(&sig_bytes);

    verifying_key
        .verify(message, &signature)
        .map_err(|_| CoreError::VerificationFailed)?;

    Ok(account_id_from_pubkey(&pubkey))
}

// ---------------------------------------------------------------------------
// LocalSigner — in-process Ed25519 signer
// ---------------------------------------------------------------------------

/// Signer backed by an in-process Ed25519 keypair. Used by the attestation
/// tooling and tests; a production attester would live behind the same
/// `Signer` trait with its key elsewhere.
pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl crate::traits::Signer for LocalSigner {
    fn sign_ed25519(&self, message: &[u8]) -> CoreResult<[u8; 64]> {
        Ok(self.signing_key.sign(message).to_bytes())
    }

    fn public_key_ed25519(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}
