//! Solana Ed25519 verification.
//!
//! The address is the base58 public key; the signature is a plain Ed25519
//! signature over the UTF-8 message text.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use siwx_core::{SignatureKind, SignedMessage};

use crate::error::VerifyError;
use crate::verifier::{ensure_kind, SignatureVerifier};

/// Decode a base58 Solana address into its Ed25519 public key.
pub fn decode_address(address: &str) -> Result<VerifyingKey, VerifyError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| VerifyError::malformed_address(address, e.to_string()))?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        VerifyError::malformed_address(address, format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|_| VerifyError::malformed_address(address, "not an Ed25519 public key"))
}

/// Encode an Ed25519 public key as a Solana address.
pub fn encode_address(key: &VerifyingKey) -> String {
    bs58::encode(key.as_bytes()).into_string()
}

/// Verifier for [`SignatureKind::SolanaEd25519`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaVerifier;

impl SignatureVerifier for SolanaVerifier {
    fn kind(&self) -> SignatureKind {
        SignatureKind::SolanaEd25519
    }

    fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError> {
        ensure_kind(&SignatureKind::SolanaEd25519, signed)?;
        let message = signed.message();
        let key = decode_address(message.address().as_str())?;

        let bytes: [u8; 64] = signed.signature().bytes().try_into().map_err(|_| {
            VerifyError::malformed_signature(
                SignatureKind::SolanaEd25519,
                format!("expected 64 bytes, got {}", signed.signature().bytes().len()),
            )
        })?;
        let signature = Signature::from_bytes(&bytes);

        Ok(key.verify(&message.signing_input(), &signature).is_ok())
    }
}
