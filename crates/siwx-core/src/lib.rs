//! # SIWx Core
//!
//! Pure primitives for Sign-In-With-X: validated fields, the message model,
//! its canonical text, the grammar parser and the signature model.
//!
//! This crate does no I/O and no cryptography. The only impure operation is
//! [`SiwxMessage::make`], which reads the clock and the thread-local RNG.
//!
//! ## Key Types
//!
//! - [`SiwxMessage`] - Immutable, validated sign-in message
//! - [`SignedMessage`] - A message plus the [`Signature`] over its text
//! - [`SignatureKind`] - Discriminator selecting the verification scheme
//! - [`AccountId`] - CAIP-10 account identifier used to build messages
//!
//! ## Canonical text
//!
//! The serialized text is the signing input. See the [`canonical`] module
//! for the exact layout and [`parse`] for the reverse direction.

pub mod account;
pub mod canonical;
pub mod error;
pub mod fields;
pub mod message;
pub mod nonce;
pub mod parse;
pub mod signature;

pub use account::{AccountId, ChainId};
pub use canonical::{canonical_text, signing_input};
pub use error::{AccountIdError, FieldError, FieldName, MessageError, ParseError, SignatureError};
pub use fields::{
    AddressString, ChainIdString, DateTimeString, DomainString, NetworkString, NonEmptyString,
    NonceString, UriString, VersionString, MIN_NONCE_LENGTH, SUPPORTED_VERSION,
};
pub use message::{BuildFields, MakeOptions, MessageFields, SiwxMessage, TimeInput};
pub use nonce::{generate_nonce, DEFAULT_NONCE_ENTROPY_BITS};
pub use signature::{Signature, SignatureKind, SignedMessage};
