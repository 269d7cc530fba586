//! Ethereum personal-sign (EIP-191) verification.
//!
//! The signed digest is
//! `keccak256("\x19Ethereum Signed Message:\n" ‖ len ‖ text)` where `len` is
//! the decimal byte length of the text. Signatures are 65 bytes `r ‖ s ‖ v`.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};
use siwx_core::{SignatureKind, SignedMessage};

use crate::error::VerifyError;
use crate::verifier::{ensure_kind, SignatureVerifier};

/// EIP-191 version `0x45` prefix.
pub const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Keccak-256 of the personal-message envelope around `message`.
pub fn personal_message_digest(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Lower-case `0x` address of a secp256k1 public key.
pub fn address_of(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    // Skip the 0x04 uncompressed tag.
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Split a 65-byte signature into its ECDSA part and recovery id.
///
/// Accepts `v` as 27/28 or as a raw 0/1. High-`s` signatures are
/// normalized, flipping the recovery id to match.
fn decode_signature(bytes: &[u8]) -> Result<(Signature, RecoveryId), VerifyError> {
    let malformed = |reason: &str| VerifyError::malformed_signature(SignatureKind::Eip191, reason);

    if bytes.len() != SIGNATURE_LENGTH {
        return Err(malformed(&format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    let v = match bytes[64] {
        v @ (27 | 28) => v - 27,
        v @ (0 | 1) => v,
        v => return Err(malformed(&format!("invalid recovery byte {v}"))),
    };
    let signature =
        Signature::from_slice(&bytes[..64]).map_err(|_| malformed("r or s out of range"))?;
    let recovery_id = RecoveryId::from_byte(v).ok_or_else(|| malformed("invalid recovery id"))?;

    Ok(match signature.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    })
}

/// Recover the signer address of a personal-sign signature over `message`.
///
/// `Ok(None)` if no public key can be recovered.
pub fn recover_address(message: &[u8], signature: &[u8]) -> Result<Option<String>, VerifyError> {
    let (signature, recovery_id) = decode_signature(signature)?;
    let digest = personal_message_digest(message);
    Ok(VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .ok()
        .map(|key| address_of(&key)))
}

/// Verifier for [`SignatureKind::Eip191`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip191Verifier;

impl SignatureVerifier for Eip191Verifier {
    fn kind(&self) -> SignatureKind {
        SignatureKind::Eip191
    }

    fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError> {
        ensure_kind(&SignatureKind::Eip191, signed)?;
        let message = signed.message();
        let recovered = recover_address(&message.signing_input(), signed.signature().bytes())?;
        Ok(recovered.is_some_and(|address| {
            address.eq_ignore_ascii_case(message.address().as_str())
        }))
    }
}
