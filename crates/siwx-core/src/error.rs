//! Error types for SIWx core.

use std::fmt;

use thiserror::Error;

/// Name of a message field, spelled the way it appears in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Domain,
    Network,
    Address,
    Statement,
    Uri,
    Version,
    ChainId,
    Nonce,
    IssuedAt,
    ExpirationTime,
    NotBefore,
    RequestId,
    Resources,
}

impl FieldName {
    /// Wire spelling of the field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Network => "network",
            Self::Address => "address",
            Self::Statement => "statement",
            Self::Uri => "uri",
            Self::Version => "version",
            Self::ChainId => "chainId",
            Self::Nonce => "nonce",
            Self::IssuedAt => "issuedAt",
            Self::ExpirationTime => "expirationTime",
            Self::NotBefore => "notBefore",
            Self::RequestId => "requestId",
            Self::Resources => "resources",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value failed its field grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {raw_value:?}: {reason}")]
pub struct FieldError {
    pub field: FieldName,
    pub raw_value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: FieldName, raw_value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            raw_value: raw_value.into(),
            reason: reason.into(),
        }
    }
}

/// Structural error in canonical message text.
///
/// `offset` is the byte offset of the start of the offending line and `line`
/// its 1-based number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line} (offset {offset}): expected {expected}, found {found:?}")]
pub struct ParseError {
    pub offset: usize,
    pub line: usize,
    pub expected: String,
    pub found: String,
}

/// Either stage of turning text into a message can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Errors decoding a signature from its external representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid signature hex: {0}")]
    InvalidHex(String),

    #[error("signature kind must not be empty")]
    EmptyKind,
}

/// Errors parsing a CAIP-2 chain id or CAIP-10 account id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountIdError {
    #[error("malformed chain id {0:?}: expected namespace:reference")]
    MalformedChainId(String),

    #[error("malformed account id {0:?}: expected namespace:reference:address")]
    MalformedAccountId(String),
}
