//! Error types for SIWx verification.

use siwx_core::SignatureKind;
use thiserror::Error;

/// Verification could not reach a yes/no answer.
///
/// A well-formed signature that simply does not match is `Ok(false)`, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("no verifier registered for signature kind {0}")]
    UnsupportedSignatureKind(SignatureKind),

    #[error("malformed {kind} signature: {reason}")]
    MalformedSignature { kind: SignatureKind, reason: String },

    #[error("malformed address {address:?}: {reason}")]
    MalformedAddress { address: String, reason: String },

    #[error("malformed public key {key:?}: {reason}")]
    MalformedPublicKey { key: String, reason: String },

    #[error("no public key available for {0}")]
    KeyUnavailable(String),

    #[error("capability failed: {0}")]
    Capability(String),
}

impl VerifyError {
    pub(crate) fn malformed_signature(kind: SignatureKind, reason: impl Into<String>) -> Self {
        Self::MalformedSignature {
            kind,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
