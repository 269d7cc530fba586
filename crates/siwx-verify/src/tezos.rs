//! Tezos Ed25519 (`tz1`) verification.
//!
//! A `tz1` address is a hash of the public key, so the key itself must come
//! from a [`TezosKeyResolver`]. Wallets sign the Micheline-packed message
//! (`0x05 0x01 ‖ u32be(len) ‖ text`), and Ed25519 runs over the
//! blake2b-256 digest of that payload.

use std::collections::HashMap;

use blake2::digest::consts::{U20, U32};
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use siwx_core::{SignatureKind, SignedMessage};

use crate::error::VerifyError;
use crate::verifier::{ensure_kind, SignatureVerifier};

/// Base58check prefixes.
pub mod prefix {
    /// `tz1` address.
    pub const TZ1: [u8; 3] = [6, 161, 159];
    /// `edpk` public key.
    pub const EDPK: [u8; 4] = [13, 15, 37, 217];
    /// `edsig` signature.
    pub const EDSIG: [u8; 5] = [9, 245, 205, 134, 18];
}

/// Micheline tag for a packed value.
const PACKED: u8 = 0x05;
/// Micheline tag for a string.
const STRING: u8 = 0x01;

/// Supplies the Ed25519 public key behind a `tz1` address.
pub trait TezosKeyResolver: Send + Sync {
    /// `None` if the key is not known (e.g. the account was never revealed).
    fn public_key(&self, address: &str) -> Result<Option<[u8; 32]>, VerifyError>;
}

/// In-memory [`TezosKeyResolver`].
#[derive(Debug, Clone, Default)]
pub struct StaticTezosKeys {
    keys: HashMap<String, [u8; 32]>,
}

impl StaticTezosKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key under its derived `tz1` address.
    pub fn insert(&mut self, public_key: [u8; 32]) -> String {
        let address = tz1_address(&public_key);
        self.keys.insert(address.clone(), public_key);
        address
    }

    /// Add an `edpk…` encoded key.
    pub fn insert_edpk(&mut self, edpk: &str) -> Result<String, VerifyError> {
        Ok(self.insert(decode_edpk(edpk)?))
    }
}

impl TezosKeyResolver for StaticTezosKeys {
    fn public_key(&self, address: &str) -> Result<Option<[u8; 32]>, VerifyError> {
        Ok(self.keys.get(address).copied())
    }
}

fn encode_check(prefix: &[u8], payload: &[u8]) -> String {
    bs58::encode([prefix, payload].concat())
        .with_check()
        .into_string()
}

fn decode_check<const N: usize>(encoded: &str, prefix: &[u8]) -> Result<[u8; N], String> {
    let bytes = bs58::decode(encoded)
        .with_check(None)
        .into_vec()
        .map_err(|e| e.to_string())?;
    let payload = bytes
        .strip_prefix(prefix)
        .ok_or_else(|| "unexpected prefix".to_string())?;
    payload
        .try_into()
        .map_err(|_| format!("expected {N} bytes, got {}", payload.len()))
}

/// `tz1` address of an Ed25519 public key.
pub fn tz1_address(public_key: &[u8; 32]) -> String {
    let hash = Blake2b::<U20>::digest(public_key);
    encode_check(&prefix::TZ1, &hash)
}

pub fn encode_edpk(public_key: &[u8; 32]) -> String {
    encode_check(&prefix::EDPK, public_key)
}

pub fn decode_edpk(edpk: &str) -> Result<[u8; 32], VerifyError> {
    decode_check(edpk, &prefix::EDPK)
        .map_err(|reason| VerifyError::MalformedPublicKey {
            key: edpk.to_string(),
            reason,
        })
}

pub fn encode_edsig(signature: &[u8; 64]) -> String {
    encode_check(&prefix::EDSIG, signature)
}

pub fn decode_edsig(edsig: &str) -> Result<[u8; 64], VerifyError> {
    decode_check(edsig, &prefix::EDSIG)
        .map_err(|reason| VerifyError::malformed_signature(SignatureKind::TezosEd25519, reason))
}

/// Micheline-packed string: `0x05 0x01 ‖ u32be(len) ‖ text`.
///
/// `None` if `text` is longer than `u32::MAX` bytes.
pub fn micheline_payload(text: &[u8]) -> Option<Vec<u8>> {
    let len = u32::try_from(text.len()).ok()?;
    let mut payload = Vec::with_capacity(6 + text.len());
    payload.push(PACKED);
    payload.push(STRING);
    payload.extend_from_slice(&len.to_be_bytes());
    payload.extend_from_slice(text);
    Some(payload)
}

/// The 32-byte digest an Ed25519 wallet signs for `payload`.
pub fn signing_digest(payload: &[u8]) -> [u8; 32] {
    Blake2b::<U32>::digest(payload).into()
}

/// Verifier for [`SignatureKind::TezosEd25519`].
#[derive(Debug, Clone)]
pub struct TezosVerifier<R> {
    resolver: R,
}

impl<R: TezosKeyResolver> TezosVerifier<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: TezosKeyResolver> SignatureVerifier for TezosVerifier<R> {
    fn kind(&self) -> SignatureKind {
        SignatureKind::TezosEd25519
    }

    fn verify(&self, signed: &SignedMessage) -> Result<bool, VerifyError> {
        ensure_kind(&SignatureKind::TezosEd25519, signed)?;
        let message = signed.message();
        let address = message.address().as_str();
        if !address.starts_with("tz1") {
            return Err(VerifyError::malformed_address(
                address,
                "only tz1 (Ed25519) addresses are supported",
            ));
        }

        let signature: [u8; 64] = signed.signature().bytes().try_into().map_err(|_| {
            VerifyError::malformed_signature(
                SignatureKind::TezosEd25519,
                format!("expected 64 bytes, got {}", signed.signature().bytes().len()),
            )
        })?;

        let public_key = self
            .resolver
            .public_key(address)?
            .ok_or_else(|| VerifyError::KeyUnavailable(address.to_string()))?;
        if tz1_address(&public_key) != address {
            return Ok(false);
        }
        let Ok(key) = VerifyingKey::from_bytes(&public_key) else {
            return Ok(false);
        };

        let payload = micheline_payload(&message.signing_input()).ok_or_else(|| {
            VerifyError::malformed_signature(
                SignatureKind::TezosEd25519,
                "message too long for a Micheline string",
            )
        })?;
        let digest = signing_digest(&payload);
        Ok(key.verify(&digest, &Signature::from_bytes(&signature)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use siwx_core::{MessageFields, Signature as SiwxSignature, SiwxMessage};

    fn message(address: &str) -> SiwxMessage {
        SiwxMessage::new(MessageFields {
            domain: "example.com".into(),
            network: "Tezos".into(),
            address: address.into(),
            uri: "https://example.com".into(),
            chain_id: "NetXdQprcVkpaWU".into(),
            nonce: "12345678".into(),
            issued_at: "2024-01-01T00:00:00Z".into(),
            ..Default::default()
        })
        .unwrap()
    }

    fn sign(key: &SigningKey, message: &SiwxMessage) -> Vec<u8> {
        let payload = micheline_payload(&message.signing_input()).unwrap();
        key.sign(&signing_digest(&payload)).to_bytes().to_vec()
    }

    fn setup(seed: u8) -> (SigningKey, StaticTezosKeys, String) {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let mut keys = StaticTezosKeys::new();
        let address = keys.insert(key.verifying_key().to_bytes());
        (key, keys, address)
    }

    #[test]
    fn test_payload_layout() {
        let payload = micheline_payload(b"abc").unwrap();
        assert_eq!(payload, [0x05, 0x01, 0, 0, 0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn test_insert_rejects_malformed_edpk() {
        let mut keys = StaticTezosKeys::new();
        let err = keys.insert_edpk("edpkNotBase58Check0OIl").unwrap_err();
        assert!(matches!(
            err,
            VerifyError::MalformedPublicKey { ref key, .. } if key.starts_with("edpk")
        ));
    }

    #[test]
    fn test_address_shape() {
        let (_, _, address) = setup(1);
        assert!(address.starts_with("tz1"));
        assert_eq!(address.len(), 36);
    }

    #[test]
    fn test_base58check_roundtrip_rejects_wrong_prefix() {
        let (key, _, _) = setup(1);
        let pk = key.verifying_key().to_bytes();
        let edpk = encode_edpk(&pk);
        assert!(edpk.starts_with("edpk"));
        assert_eq!(decode_edpk(&edpk).unwrap(), pk);

        let edsig = encode_edsig(&[3u8; 64]);
        assert!(edsig.starts_with("edsig"));
        assert!(matches!(
            decode_edpk(&edsig),
            Err(VerifyError::MalformedPublicKey { .. })
        ));
        assert!(matches!(
            decode_edsig(&edpk),
            Err(VerifyError::MalformedSignature { .. })
        ));
    }

    fn tezos_signed(message: SiwxMessage, bytes: Vec<u8>) -> SignedMessage {
        SignedMessage::new(message, SiwxSignature::new(SignatureKind::TezosEd25519, bytes))
    }

    #[test]
    fn test_valid_signature() {
        let (key, keys, address) = setup(1);
        let message = message(&address);
        let bytes = sign(&key, &message);
        let signed = tezos_signed(message, bytes);
        assert!(TezosVerifier::new(keys).verify(&signed).unwrap());
    }

    #[test]
    fn test_resolver_returning_foreign_key() {
        struct Liar([u8; 32]);
        impl TezosKeyResolver for Liar {
            fn public_key(&self, _: &str) -> Result<Option<[u8; 32]>, VerifyError> {
                Ok(Some(self.0))
            }
        }

        let (_, _, address) = setup(1);
        let (other, _, _) = setup(2);
        let message = message(&address);
        let bytes = sign(&other, &message);
        let signed = tezos_signed(message, bytes);
        let verifier = TezosVerifier::new(Liar(other.verifying_key().to_bytes()));
        assert!(!verifier.verify(&signed).unwrap());
    }

    #[test]
    fn test_unknown_key() {
        let (key, _, address) = setup(1);
        let message = message(&address);
        let bytes = sign(&key, &message);
        let signed = tezos_signed(message, bytes);
        assert_eq!(
            TezosVerifier::new(StaticTezosKeys::new()).verify(&signed).unwrap_err(),
            VerifyError::KeyUnavailable(address)
        );
    }

    #[test]
    fn test_raw_text_signature_rejected() {
        let (key, keys, address) = setup(1);
        let message = message(&address);
        let bytes = key.sign(&message.signing_input()).to_bytes().to_vec();
        let signed = tezos_signed(message, bytes);
        assert!(!TezosVerifier::new(keys).verify(&signed).unwrap());
    }
}
