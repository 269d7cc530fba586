//! Signatures and signed messages.
//!
//! A [`Signature`] is a kind tag plus raw bytes. Byte length is not checked
//! here; each verifier checks the layout for its own kind.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignatureError;
use crate::message::SiwxMessage;

/// Signature scheme discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SignatureKind {
    /// Ethereum personal-sign over the message text.
    Eip191,
    /// Ethereum smart-contract account signature.
    Eip1271,
    /// Ed25519 over the raw UTF-8 text.
    SolanaEd25519,
    /// Ed25519 over the Micheline-packed text.
    TezosEd25519,
    /// Anything else; verifiers may be registered for it.
    Other(String),
}

impl SignatureKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Eip191 => "eip191",
            Self::Eip1271 => "eip1271",
            Self::SolanaEd25519 => "solana:ed25519",
            Self::TezosEd25519 => "tezos:ed25519",
            Self::Other(kind) => kind,
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureKind {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" => return Err(SignatureError::EmptyKind),
            "eip191" => Self::Eip191,
            "eip1271" => Self::Eip1271,
            "solana:ed25519" | "solana-ed25519" => Self::SolanaEd25519,
            "tezos:ed25519" | "tezos-ed25519" => Self::TezosEd25519,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<SignatureKind> for String {
    fn from(kind: SignatureKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for SignatureKind {
    type Error = SignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A signature over the canonical text of a message.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "SignatureRepr", try_from = "SignatureRepr")]
pub struct Signature {
    kind: SignatureKind,
    bytes: Bytes,
}

impl Signature {
    pub fn new(kind: SignatureKind, bytes: impl Into<Bytes>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    /// Parse hex bytes, with or without a `0x` prefix.
    pub fn from_hex(kind: SignatureKind, s: &str) -> Result<Self, SignatureError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| SignatureError::InvalidHex(e.to_string()))?;
        Ok(Self::new(kind, bytes))
    }

    pub fn kind(&self) -> &SignatureKind {
        &self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `0x`-prefixed hex of the raw bytes.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}, {} bytes)", self.kind, self.bytes.len())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.to_hex())
    }
}

#[derive(Serialize, Deserialize)]
struct SignatureRepr {
    kind: SignatureKind,
    bytes: String,
}

impl From<Signature> for SignatureRepr {
    fn from(sig: Signature) -> Self {
        Self {
            bytes: sig.to_hex(),
            kind: sig.kind,
        }
    }
}

impl TryFrom<SignatureRepr> for Signature {
    type Error = SignatureError;

    fn try_from(repr: SignatureRepr) -> Result<Self, Self::Error> {
        Signature::from_hex(repr.kind, &repr.bytes)
    }
}

/// A message paired with the signature over its canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    message: SiwxMessage,
    signature: Signature,
}

impl SignedMessage {
    pub fn new(message: SiwxMessage, signature: Signature) -> Self {
        Self { message, signature }
    }

    pub fn message(&self) -> &SiwxMessage {
        &self.message
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn into_parts(self) -> (SiwxMessage, Signature) {
        (self.message, self.signature)
    }
}
