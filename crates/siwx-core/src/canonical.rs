//! Canonical message text.
//!
//! The text produced here is exactly what gets signed:
//!
//! ```text
//! {domain} wants you to sign in with your {network} account:
//! {address}
//!
//! {statement}
//! URI: {uri}
//! Version: {version}
//! Chain ID: {chainId}
//! Nonce: {nonce}
//! Issued At: {issuedAt}
//! Expiration Time: {expirationTime}
//! Not Before: {notBefore}
//! Request ID: {requestId}
//! Resources:
//! - {resource}
//! ```
//!
//! The statement, the last three tagged lines and the resources block are
//! omitted when absent. Lines are joined with `\n`, with no trailing newline.
//!
//! **CRITICAL**: This layout is FROZEN. Any change breaks verification of
//! signatures produced by other implementations.

use std::fmt::{self, Write};

use crate::message::SiwxMessage;

/// Fixed pieces of the line grammar, shared with the parser.
pub(crate) mod tags {
    pub const WANTS: &str = " wants you to sign in with your ";
    pub const ACCOUNT: &str = " account:";
    pub const URI: &str = "URI: ";
    pub const VERSION: &str = "Version: ";
    pub const CHAIN_ID: &str = "Chain ID: ";
    pub const NONCE: &str = "Nonce: ";
    pub const ISSUED_AT: &str = "Issued At: ";
    pub const EXPIRATION_TIME: &str = "Expiration Time: ";
    pub const NOT_BEFORE: &str = "Not Before: ";
    pub const REQUEST_ID: &str = "Request ID: ";
    pub const RESOURCES: &str = "Resources:";
    pub const RESOURCE_ITEM: &str = "- ";
}

/// Write the canonical text of `message` to `out`.
pub fn write_canonical<W: Write>(message: &SiwxMessage, out: &mut W) -> fmt::Result {
    write!(
        out,
        "{}{}{}{}\n{}\n\n",
        message.domain(),
        tags::WANTS,
        message.network(),
        tags::ACCOUNT,
        message.address()
    )?;
    if let Some(statement) = message.statement() {
        writeln!(out, "{statement}")?;
    }
    write!(out, "{}{}", tags::URI, message.uri())?;
    write!(out, "\n{}{}", tags::VERSION, message.version())?;
    write!(out, "\n{}{}", tags::CHAIN_ID, message.chain_id())?;
    write!(out, "\n{}{}", tags::NONCE, message.nonce())?;
    write!(out, "\n{}{}", tags::ISSUED_AT, message.issued_at())?;
    if let Some(time) = message.expiration_time() {
        write!(out, "\n{}{}", tags::EXPIRATION_TIME, time)?;
    }
    if let Some(time) = message.not_before() {
        write!(out, "\n{}{}", tags::NOT_BEFORE, time)?;
    }
    if let Some(request_id) = message.request_id() {
        write!(out, "\n{}{}", tags::REQUEST_ID, request_id)?;
    }
    if let Some(resources) = message.resources() {
        write!(out, "\n{}", tags::RESOURCES)?;
        for resource in resources {
            write!(out, "\n{}{}", tags::RESOURCE_ITEM, resource)?;
        }
    }
    Ok(())
}

/// The canonical text as an owned string.
pub fn canonical_text(message: &SiwxMessage) -> String {
    let mut text = String::with_capacity(256);
    // Writing into a String cannot fail.
    let _ = write_canonical(message, &mut text);
    text
}

/// The bytes a signer signs: the UTF-8 encoding of the canonical text.
pub fn signing_input(message: &SiwxMessage) -> Vec<u8> {
    canonical_text(message).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageFields;

    fn base_fields() -> MessageFields {
        MessageFields {
            domain: "example.com".into(),
            network: "Ethereum".into(),
            address: "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01".into(),
            uri: "https://example.com/login".into(),
            chain_id: "1".into(),
            nonce: "12345678".into(),
            issued_at: "2024-01-01T00:00:00Z".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_layout() {
        let message = SiwxMessage::new(base_fields()).unwrap();
        let expected = "example.com wants you to sign in with your Ethereum account:\n\
            0xAbCdEf0123456789aBcDeF0123456789AbCdEf01\n\
            \n\
            URI: https://example.com/login\n\
            Version: 1\n\
            Chain ID: 1\n\
            Nonce: 12345678\n\
            Issued At: 2024-01-01T00:00:00Z";
        assert_eq!(canonical_text(&message), expected);
        assert!(!canonical_text(&message).ends_with('\n'));
    }

    #[test]
    fn test_full_layout() {
        let message = SiwxMessage::new(MessageFields {
            statement: Some("Sign in to Example".into()),
            expiration_time: Some("2024-01-02T00:00:00Z".into()),
            not_before: Some("2024-01-01T00:00:00Z".into()),
            request_id: Some("req-42".into()),
            resources: Some(vec!["ipfs://a".into(), "https://b".into()]),
            ..base_fields()
        })
        .unwrap();
        let expected = "example.com wants you to sign in with your Ethereum account:\n\
            0xAbCdEf0123456789aBcDeF0123456789AbCdEf01\n\
            \n\
            Sign in to Example\n\
            URI: https://example.com/login\n\
            Version: 1\n\
            Chain ID: 1\n\
            Nonce: 12345678\n\
            Issued At: 2024-01-01T00:00:00Z\n\
            Expiration Time: 2024-01-02T00:00:00Z\n\
            Not Before: 2024-01-01T00:00:00Z\n\
            Request ID: req-42\n\
            Resources:\n\
            - ipfs://a\n\
            - https://b";
        assert_eq!(canonical_text(&message), expected);
    }

    #[test]
    fn test_optional_lines_keep_relative_order() {
        let message = SiwxMessage::new(MessageFields {
            request_id: Some("r1".into()),
            not_before: Some("2024-01-01T00:00:00Z".into()),
            ..base_fields()
        })
        .unwrap();
        let text = canonical_text(&message);
        let nbf = text.find("Not Before: ").unwrap();
        let rid = text.find("Request ID: ").unwrap();
        assert!(nbf < rid);
        assert!(!text.contains("Expiration Time"));
    }

    #[test]
    fn test_signing_input_is_utf8_text() {
        let message = SiwxMessage::new(MessageFields {
            statement: Some("Привет".into()),
            ..base_fields()
        })
        .unwrap();
        assert_eq!(signing_input(&message), canonical_text(&message).as_bytes());
    }
}
