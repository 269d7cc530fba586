//! The verifier capability.

use siwx_core::{SignatureKind, SignedMessage};

use crate::error::VerifyError;

/// Checks signatures of one [`SignatureKind`].
///
/// Implementations must be pure: the same signed message always yields the
/// same answer. `Ok(false)` means the signature is well-formed but was not
/// produced by the message's address.
pub trait SignatureVerifier: Send + Sync {
    /// The kind this verifier handles.
    fn kind(&self) -> SignatureKind;

    /// Verify `signed.signature()` over the canonical text of `signed.message()`.
    fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError>;
}

/// Rejects signatures of a kind other than `expected`.
pub(crate) fn ensure_kind(
    expected: &SignatureKind,
    signed: &SignedMessage,
) -> Result<(), VerifyError> {
    let kind = signed.signature().kind();
    if kind != expected {
        return Err(VerifyError::UnsupportedSignatureKind(kind.clone()));
    }
    Ok(())
}
