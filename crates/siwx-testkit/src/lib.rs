//! # SIWx Testkit
//!
//! Testing utilities for SIWx.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fields with their exact canonical text, plus texts that must be rejected
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic wallets for every supported network
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical text across implementations:
//!
//! ```rust
//! use siwx_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     assert_eq!(vector.message().to_string(), vector.text);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use siwx_testkit::generators::{message_from_params, MessageParams};
//!
//! proptest! {
//!     #[test]
//!     fn text_is_deterministic(params: MessageParams) {
//!         let m1 = message_from_params(&params);
//!         let m2 = message_from_params(&params);
//!         prop_assert_eq!(m1.to_string(), m2.to_string());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use siwx_testkit::fixtures::{example_fields, fixed_options, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let signed =
//!     siwx_auth::request_with(&fixture.solana, example_fields(), &fixed_options()).await?;
//! assert!(fixture.registry().verify(&signed)?);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    example_fields, fixed_now, fixed_options, multi_party_fixtures, EthereumKey, SolanaKey,
    TestFixture, TezosKey,
};
pub use generators::{message_from_params, MessageParams};
pub use vectors::{all_vectors, rejection_vectors, vectors_json, GoldenVector, RejectionVector};
