//! Dispatch from signature kind to verifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use siwx_core::{SignatureKind, SignedMessage};
use tracing::{debug, warn};

use crate::eip191::Eip191Verifier;
use crate::error::VerifyError;
use crate::solana::SolanaVerifier;
use crate::verifier::SignatureVerifier;

/// A set of verifiers keyed by the kind they handle.
///
/// Registering a second verifier for the same kind replaces the first.
#[derive(Clone, Default)]
pub struct VerifierRegistry {
    verifiers: HashMap<SignatureKind, Arc<dyn SignatureVerifier>>,
}

impl VerifierRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// `eip191` and `solana:ed25519`, which need no external capability.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Eip191Verifier);
        registry.register(SolanaVerifier);
        registry
    }

    pub fn register<V: SignatureVerifier + 'static>(&mut self, verifier: V) -> &mut Self {
        self.register_arc(Arc::new(verifier))
    }

    pub fn register_arc(&mut self, verifier: Arc<dyn SignatureVerifier>) -> &mut Self {
        let kind = verifier.kind();
        if self.verifiers.insert(kind.clone(), verifier).is_some() {
            debug!(%kind, "replaced signature verifier");
        }
        self
    }

    pub fn supports(&self, kind: &SignatureKind) -> bool {
        self.verifiers.contains_key(kind)
    }

    /// Registered kinds, sorted by wire name.
    pub fn kinds(&self) -> Vec<SignatureKind> {
        let mut kinds: Vec<_> = self.verifiers.keys().cloned().collect();
        kinds.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        kinds
    }

    /// Verify with the verifier registered for the signature's kind.
    pub fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError> {
        let kind = signed.signature().kind();
        let verifier = self
            .verifiers
            .get(kind)
            .ok_or_else(|| VerifyError::UnsupportedSignatureKind(kind.clone()))?;

        let result = verifier.verify(signed);
        match &result {
            Ok(valid) => debug!(
                %kind,
                address = %signed.message().address(),
                valid,
                "verified signature"
            ),
            Err(e) => warn!(%kind, error = %e, "signature verification failed"),
        }
        result
    }
}

impl fmt::Debug for VerifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Verify with the default registry (`eip191`, `solana:ed25519`).
pub fn verify(signed: &SignedMessage) -> Result<bool, VerifyError> {
    static DEFAULT: OnceLock<VerifierRegistry> = OnceLock::new();
    DEFAULT.get_or_init(VerifierRegistry::with_defaults).verify(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwx_core::{MessageFields, Signature, SiwxMessage};

    struct AlwaysTrue(SignatureKind);

    impl SignatureVerifier for AlwaysTrue {
        fn kind(&self) -> SignatureKind {
            self.0.clone()
        }

        fn verify(&self, _signed: &SignedMessage) -> Result<bool, VerifyError> {
            Ok(true)
        }
    }

    fn signed(kind: SignatureKind) -> SignedMessage {
        let message = SiwxMessage::new(MessageFields {
            domain: "example.com".into(),
            network: "Cosmos".into(),
            address: "cosmos1abc".into(),
            uri: "https://example.com".into(),
            chain_id: "cosmoshub-4".into(),
            nonce: "12345678".into(),
            issued_at: "2024-01-01T00:00:00Z".into(),
            ..Default::default()
        })
        .unwrap();
        SignedMessage::new(message, Signature::new(kind, vec![0u8; 64]))
    }

    #[test]
    fn test_defaults() {
        let registry = VerifierRegistry::with_defaults();
        assert_eq!(
            registry.kinds(),
            [SignatureKind::Eip191, SignatureKind::SolanaEd25519]
        );
        assert!(!registry.supports(&SignatureKind::Eip1271));
        assert!(!registry.supports(&SignatureKind::TezosEd25519));
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = VerifierRegistry::new();
        let err = registry.verify(&signed(SignatureKind::Eip191)).unwrap_err();
        assert_eq!(err, VerifyError::UnsupportedSignatureKind(SignatureKind::Eip191));

        let other = SignatureKind::Other("cosmos:secp256k1".into());
        let err = verify(&signed(other.clone())).unwrap_err();
        assert_eq!(err, VerifyError::UnsupportedSignatureKind(other));
    }

    #[test]
    fn test_custom_kind_dispatch() {
        let kind = SignatureKind::Other("cosmos:secp256k1".into());
        let mut registry = VerifierRegistry::with_defaults();
        registry.register(AlwaysTrue(kind.clone()));
        assert!(registry.supports(&kind));
        assert!(registry.verify(&signed(kind)).unwrap());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = VerifierRegistry::new();
        registry
            .register(AlwaysTrue(SignatureKind::Eip191))
            .register(Eip191Verifier);
        assert_eq!(registry.kinds().len(), 1);
        // The real verifier rejects the zeroed 64-byte signature.
        assert!(registry.verify(&signed(SignatureKind::Eip191)).is_err());
    }
}
