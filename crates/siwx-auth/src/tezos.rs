//! Tezos helpers for signers.
//!
//! Only `tz1` (Ed25519) accounts are supported.

use std::fmt;
use std::str::FromStr;

use siwx_core::{AccountId, ChainId, Signature, SignatureKind};
use siwx_verify::tezos::{decode_edsig, micheline_payload};

use crate::error::AuthError;

/// CAIP-2 namespace for Tezos.
pub const CHAIN_NAMESPACE: &str = "tezos";

/// Network label written into messages.
pub const NETWORK: &str = "Tezos";

/// Networks a wallet may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TezosNetwork {
    Mainnet,
    Devnet,
}

impl TezosNetwork {
    /// CAIP-2 reference (chain id prefix).
    pub const fn reference(self) -> &'static str {
        match self {
            Self::Mainnet => "NetXdQprcVkpaWU",
            Self::Devnet => "NetXm8tYqnMWky1",
        }
    }

    pub fn chain_id(self) -> ChainId {
        ChainId::new(CHAIN_NAMESPACE, self.reference())
    }

    pub fn account_id(self, address: impl Into<String>) -> AccountId {
        AccountId::new(self.chain_id(), address)
    }
}

impl fmt::Display for TezosNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
        })
    }
}

impl FromStr for TezosNetwork {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(AuthError::UnknownNetwork(other.to_string())),
        }
    }
}

/// The Micheline payload a wallet signs for `input`.
pub fn signing_payload(input: &[u8]) -> Result<Vec<u8>, AuthError> {
    micheline_payload(input).ok_or_else(|| {
        AuthError::InvalidSignatureEncoding("message too long for a Micheline string".into())
    })
}

/// [`signing_payload`] as the hex string passed to `requestSignPayload`.
pub fn signing_payload_hex(input: &[u8]) -> Result<String, AuthError> {
    Ok(hex::encode(signing_payload(input)?))
}

/// Wrap the `edsig…` string returned by a wallet.
pub fn signature_from_edsig(edsig: &str) -> Result<Signature, AuthError> {
    let bytes =
        decode_edsig(edsig).map_err(|e| AuthError::InvalidSignatureEncoding(e.to_string()))?;
    Ok(Signature::new(SignatureKind::TezosEd25519, bytes.to_vec()))
}
