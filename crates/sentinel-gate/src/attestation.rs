//! Attestation production and verification.
//!
//! An attestation is the trusted signer's claim over a document identifier:
//! `{document_id, signature}` where the signature blob is the signer's
//! public key followed by an Ed25519 signature over the domain-separated
//! envelope of the document digest. The attestation deliberately binds
//! neither an amount nor a recipient — see [`Gate::mint`](crate::Gate::mint)
//! for the consequences.

use serde::{Deserialize, Serialize};

use sentinel_core::{
    document_digest, recover_signer, signing_envelope, AccountId, CoreResult, DocumentId, Signer,
};

use crate::error::{GateError, GateResult};

/// A document identifier plus the signature blob covering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub document_id: DocumentId,
    #[serde(with = "sentinel_core::types::hex_vec")]
    pub signature: Vec<u8>,
}

/// Produce an attestation over a document identifier.
///
/// This is the signer-side half of the protocol: digest the document id,
/// wrap it in the signing envelope, sign, and prepend the public key so the
/// verifier can recover the signing identity from the blob alone.
pub fn sign_document(document_id: &DocumentId, signer: &dyn Signer) -> CoreResult<Attestation> {
    let digest = document_digest(document_id);
    let envelope = signing_envelope(&digest);
    let signature = signer.sign_ed25519(&envelope)?;

    let mut blob = Vec::with_capacity(96);
    blob.extend_from_slice(&signer.public_key_ed25519());
    blob.extend_from_slice(&signature);

    Ok(Attestation {
        document_id: document_id.clone(),
        signature: blob,
    })
}

/// Verify an attestation against the configured trusted signer and return
/// the recovered identity.
///
/// Reads `trusted_signer`, mutates nothing. Fails with `InvalidSignature`
/// when no signer is configured, when the blob is malformed or does not
/// verify, and when the recovered identity is not the trusted signer.
/// Recovery never falls back to a default identity, so a missing signer is
/// rejected explicitly rather than by comparison against null.
pub fn verify_attestation(
    document_id: &DocumentId,
    signature: &[u8],
    trusted_signer: Option<AccountId>,
) -> GateResult<AccountId> {
    let trusted = match trusted_signer {
        Some(id) => id,
        None => {
            return Err(GateError::InvalidSignature(
                "no trusted signer configured".into(),
            ))
        }
    };

    let digest = document_digest(document_id);
    let envelope = signing_envelope(&digest);
    let recovered =
        recover_signer(&envelope, signature).map_err(|e| GateError::InvalidSignature(e.to_string()))?;

    if recovered != trusted {
        return Err(GateError::InvalidSignature(format!(
            "recovered signer {} is not the trusted signer",
            recovered
        )));
    }

    Ok(recovered)
}
