//! Smart-contract account signatures (EIP-1271).
//!
//! Validity is decided by the account contract, so this verifier only
//! computes the personal-message digest and asks a caller-supplied
//! [`ContractSignatureChecker`].

use std::error::Error as StdError;

use siwx_core::{SignatureKind, SignedMessage};

use crate::eip191::personal_message_digest;
use crate::error::VerifyError;
use crate::verifier::{ensure_kind, SignatureVerifier};

/// Boxed error returned by a capability.
pub type CapabilityError = Box<dyn StdError + Send + Sync>;

/// Calls `isValidSignature(bytes32, bytes)` on an account contract.
pub trait ContractSignatureChecker: Send + Sync {
    /// Whether the contract at `address` accepts `signature` for `digest`.
    fn is_valid_signature(
        &self,
        address: &str,
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool, CapabilityError>;
}

impl<F> ContractSignatureChecker for F
where
    F: Fn(&str, &[u8; 32], &[u8]) -> Result<bool, CapabilityError> + Send + Sync,
{
    fn is_valid_signature(
        &self,
        address: &str,
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<bool, CapabilityError> {
        self(address, digest, signature)
    }
}

/// Verifier for [`SignatureKind::Eip1271`].
#[derive(Debug, Clone)]
pub struct Eip1271Verifier<C> {
    checker: C,
}

impl<C: ContractSignatureChecker> Eip1271Verifier<C> {
    pub fn new(checker: C) -> Self {
        Self { checker }
    }
}

impl<C: ContractSignatureChecker> SignatureVerifier for Eip1271Verifier<C> {
    fn kind(&self) -> SignatureKind {
        SignatureKind::Eip1271
    }

    fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError> {
        ensure_kind(&SignatureKind::Eip1271, signed)?;
        let message = signed.message();
        let digest = personal_message_digest(&message.signing_input());
        self.checker
            .is_valid_signature(message.address().as_str(), &digest, signed.signature().bytes())
            .map_err(|e| VerifyError::Capability(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwx_core::{MessageFields, Signature, SiwxMessage};
    use std::sync::Mutex;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn signed(signature: &[u8]) -> SignedMessage {
        let message = SiwxMessage::new(MessageFields {
            domain: "example.com".into(),
            network: "Ethereum".into(),
            address: CONTRACT.into(),
            uri: "https://example.com".into(),
            chain_id: "1".into(),
            nonce: "12345678".into(),
            issued_at: "2024-01-01T00:00:00Z".into(),
            ..Default::default()
        })
        .unwrap();
        SignedMessage::new(message, Signature::new(SignatureKind::Eip1271, signature.to_vec()))
    }

    #[derive(Default)]
    struct RecordingChecker {
        calls: Mutex<Vec<(String, [u8; 32], Vec<u8>)>>,
    }

    impl ContractSignatureChecker for RecordingChecker {
        fn is_valid_signature(
            &self,
            address: &str,
            digest: &[u8; 32],
            signature: &[u8],
        ) -> Result<bool, CapabilityError> {
            self.calls
                .lock()
                .map_err(|_| "poisoned")?
                .push((address.to_string(), *digest, signature.to_vec()));
            Ok(signature == b"magic")
        }
    }

    #[test]
    fn test_delegates_with_personal_digest() {
        let verifier = Eip1271Verifier::new(RecordingChecker::default());
        let signed = signed(b"magic");
        assert!(verifier.verify(&signed).unwrap());

        let calls = verifier.checker.calls.lock().unwrap();
        let (address, digest, signature) = &calls[0];
        assert_eq!(address, CONTRACT);
        assert_eq!(
            digest,
            &personal_message_digest(&signed.message().signing_input())
        );
        assert_eq!(signature, b"magic");
    }

    #[test]
    fn test_contract_rejection() {
        let verifier = Eip1271Verifier::new(RecordingChecker::default());
        assert!(!verifier.verify(&signed(b"nope")).unwrap());
    }

    #[test]
    fn test_capability_failure() {
        let verifier = Eip1271Verifier::new(
            |_: &str, _: &[u8; 32], _: &[u8]| -> Result<bool, CapabilityError> {
                Err("rpc unavailable".into())
            },
        );
        assert_eq!(
            verifier.verify(&signed(b"magic")).unwrap_err(),
            VerifyError::Capability("rpc unavailable".into())
        );
    }
}
