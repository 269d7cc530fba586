//! Error types for the SIWx facade.

use siwx_auth::AuthError;
use siwx_core::{FieldError, MessageError};
use siwx_verify::VerifyError;
use thiserror::Error;

/// Errors from any SIWx operation.
#[derive(Debug, Error)]
pub enum SiwxError {
    /// A field failed validation while building a message.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Message text could not be parsed or validated.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// Verification could not be completed.
    #[error("verification error: {0}")]
    Verify(#[from] VerifyError),

    /// Signing failed.
    #[error("signing error: {0}")]
    Auth(#[from] AuthError),
}

/// Result type for SIWx operations.
pub type Result<T> = std::result::Result<T, SiwxError>;
