//! Error types for the signing workflow.

use siwx_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("signer failed: {0}")]
    Signer(String),

    #[error("account unavailable: {0}")]
    Account(String),

    #[error("invalid message: {0}")]
    Message(#[from] FieldError),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
