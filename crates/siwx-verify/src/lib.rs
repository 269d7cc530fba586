//! # SIWx Verify
//!
//! Signature verification for SIWx messages.
//!
//! Each signature scheme is a [`SignatureVerifier`]; a [`VerifierRegistry`]
//! dispatches on [`SignatureKind`](siwx_core::SignatureKind). Schemes that
//! need outside state (a contract call for EIP-1271, a key lookup for Tezos)
//! take it as a capability trait instead of doing I/O themselves.
//!
//! ## Schemes
//!
//! - [`eip191`] - Ethereum personal-sign, secp256k1 key recovery
//! - [`eip1271`] - Ethereum contract accounts, via [`ContractSignatureChecker`]
//! - [`solana`] - Ed25519 over the raw text
//! - [`tezos`] - Ed25519 over the Micheline payload, via [`TezosKeyResolver`]

pub mod eip1271;
pub mod eip191;
pub mod error;
pub mod registry;
pub mod solana;
pub mod tezos;
pub mod verifier;

pub use eip1271::{CapabilityError, ContractSignatureChecker, Eip1271Verifier};
pub use eip191::{personal_message_digest, Eip191Verifier};
pub use error::VerifyError;
pub use registry::{verify, VerifierRegistry};
pub use solana::SolanaVerifier;
pub use tezos::{StaticTezosKeys, TezosKeyResolver, TezosVerifier};
pub use verifier::SignatureVerifier;
