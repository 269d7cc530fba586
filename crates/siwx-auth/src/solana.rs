//! Solana helpers for signers.

use bytes::Bytes;
use siwx_core::{AccountId, ChainId, Signature, SignatureKind};

/// CAIP-2 namespace for Solana clusters.
pub const CHAIN_NAMESPACE: &str = "solana";

/// Network label written into messages.
pub const NETWORK: &str = "Solana";

/// Genesis hash of mainnet-beta.
pub const MAINNET_GENESIS_HASH: &str = "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d";

/// Length of a CAIP-2 Solana reference.
const REFERENCE_LENGTH: usize = 32;

/// CAIP-2 reference of a cluster: the first 32 characters of its genesis hash.
pub fn chain_reference(genesis_hash: &str) -> &str {
    match genesis_hash.char_indices().nth(REFERENCE_LENGTH) {
        Some((end, _)) => &genesis_hash[..end],
        None => genesis_hash,
    }
}

pub fn chain_id(genesis_hash: &str) -> ChainId {
    ChainId::new(CHAIN_NAMESPACE, chain_reference(genesis_hash))
}

pub fn account_id(genesis_hash: &str, address: impl Into<String>) -> AccountId {
    AccountId::new(chain_id(genesis_hash), address)
}

/// Base58 address of an Ed25519 public key.
pub fn address(public_key: &[u8; 32]) -> String {
    bs58::encode(public_key).into_string()
}

/// Wrap the raw bytes returned by a wallet's `signMessage`.
pub fn signature(bytes: impl Into<Bytes>) -> Signature {
    Signature::new(SignatureKind::SolanaEd25519, bytes)
}
