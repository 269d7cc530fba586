//! # SIWx Auth
//!
//! The signing side of Sign-In-With-X.
//!
//! A wallet or key store implements [`Signer`] (and [`Auth`] if it knows
//! its own account). [`request`] builds a message for that account and
//! signs it; [`sign`] signs a message built elsewhere.
//!
//! The per-network modules shape wallet output into [`Signature`]s:
//!
//! - [`ethereum`] - hex signatures, `eip191` vs `eip1271` by account code
//! - [`solana`] - raw Ed25519 bytes, genesis-hash chain references
//! - [`tezos`] - Micheline payloads and `edsig` signatures
//!
//! [`Signature`]: siwx_core::Signature

pub mod error;
pub mod ethereum;
pub mod signer;
pub mod solana;
pub mod tezos;

pub use error::AuthError;
pub use signer::{request, request_with, sign, Auth, Result, Signer};
pub use tezos::TezosNetwork;
