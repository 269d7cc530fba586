//! # SIWx
//!
//! Sign-In-With-X: chain-agnostic sign-in messages. A user proves control of
//! a blockchain account by signing a structured, human-readable message.
//!
//! ## Overview
//!
//! - **Messages**: immutable, validated, with one canonical text form
//! - **Parsing**: canonical text back into a message, strictly
//! - **Signing**: wallets plug in as [`Signer`] / [`Auth`] collaborators
//! - **Verification**: per-scheme verifiers behind a registry
//!
//! ## Usage
//!
//! ```rust,no_run
//! use siwx::{AccountId, BuildFields, Siwx, SiwxConfig};
//!
//! fn example(signed_text: &str) -> siwx::Result<()> {
//!     let client = Siwx::new(SiwxConfig::default());
//!
//!     let account: AccountId = "eip155:1:0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
//!         .parse()
//!         .expect("valid CAIP-10 id");
//!     let fields = BuildFields::new("example.com", "https://example.com");
//!     let message = client.make(&account, fields)?;
//!
//!     // The canonical text is what the wallet signs.
//!     let text = message.to_string();
//!     assert_eq!(client.parse(&text)?, message);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `siwx::core` - Message model, fields, parser, signatures
//! - `siwx::verify` - Verifiers and the registry
//! - `siwx::auth` - Signer traits and per-network helpers

pub mod client;
pub mod config;
pub mod error;

// Re-export component crates
pub use siwx_auth as auth;
pub use siwx_core as core;
pub use siwx_verify as verify;

pub use client::Siwx;
pub use config::SiwxConfig;
pub use error::{Result, SiwxError};

// Commonly used types
pub use siwx_auth::{Auth, AuthError, Signer};
pub use siwx_core::{
    AccountId, BuildFields, ChainId, FieldError, MessageError, MessageFields, ParseError,
    Signature, SignatureKind, SignedMessage, SiwxMessage, TimeInput,
};
pub use siwx_verify::{SignatureVerifier, VerifierRegistry, VerifyError};
