//! Proptest generators for property-based testing.
//!
//! Every strategy yields values that satisfy the field grammars, so a
//! generated [`MessageFields`] always builds a valid message.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use siwx_core::{DateTimeString, MessageFields, SiwxMessage};

/// Generate a `host[:port]` authority.
pub fn domain() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9-]{0,15}[a-z0-9]",
        prop_oneof![Just("com"), Just("org"), Just("xyz"), Just("io")],
        proptest::option::of(1u16..=65535),
    )
        .prop_map(|(name, tld, port)| match port {
            Some(port) => format!("{name}.{tld}:{port}"),
            None => format!("{name}.{tld}"),
        })
}

/// Generate a network label.
pub fn network() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Ethereum".to_string()),
        Just("Solana".to_string()),
        Just("Tezos".to_string()),
        "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,2}",
    ]
}

/// Generate an address in one of the supported shapes.
pub fn address() -> impl Strategy<Value = String> {
    prop_oneof![
        "0x[0-9a-fA-F]{40}",
        "[1-9A-HJ-NP-Za-km-z]{32,44}",
        "tz1[1-9A-HJ-NP-Za-km-z]{33}",
    ]
}

/// Generate a single-line statement.
pub fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9][A-Za-z0-9 ,.!?'-]{0,79}",
        // Must still round-trip when it looks like a tag.
        "URI: [a-z]{1,10}",
        "[\\p{L}\\p{N} ]{1,40}",
    ]
}

/// Generate an absolute URI.
pub fn uri() -> impl Strategy<Value = String> {
    prop_oneof![
        "https://[a-z]{1,12}\\.com(/[a-z0-9]{1,10}){0,3}",
        "http://localhost:[1-9][0-9]{1,3}(/[a-z]{1,8})?",
        "ipfs://[1-9A-HJ-NP-Za-km-z]{10,46}",
        "urn:[a-z]{3,8}:[a-z0-9]{1,16}",
    ]
}

/// Generate a chain reference.
pub fn chain_id() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u64..=1_000_000).prop_map(|id| id.to_string()),
        "[1-9A-HJ-NP-Za-km-z]{32}",
        "NetX[1-9A-HJ-NP-Za-km-z]{11}",
    ]
}

/// Generate a nonce of at least 8 alphanumeric characters.
pub fn nonce() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{8,32}".prop_map(String::from)
}

/// Generate a canonical date-time between 1970 and ~2100.
pub fn date_time() -> impl Strategy<Value = String> {
    (0i64..=4_102_444_800).prop_map(|secs| {
        let time = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(Utc::now);
        DateTimeString::from_datetime(time).into_inner()
    })
}

/// Generate a request id.
pub fn request_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9-]{1,24}".prop_map(String::from)
}

/// Generate a resources list, including the empty list.
pub fn resources() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(uri(), 0..=4)
}

/// Parameters for generating a message.
#[derive(Debug, Clone)]
pub struct MessageParams {
    pub fields: MessageFields,
}

impl Arbitrary for MessageParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let required = (
            domain(),
            network(),
            address(),
            uri(),
            chain_id(),
            nonce(),
            date_time(),
        );
        let optional = (
            proptest::option::of(statement()),
            proptest::option::of(date_time()),
            proptest::option::of(date_time()),
            proptest::option::of(request_id()),
            proptest::option::of(resources()),
        );
        (required, optional)
            .prop_map(
                |(
                    (domain, network, address, uri, chain_id, nonce, issued_at),
                    (statement, expiration_time, not_before, request_id, resources),
                )| MessageParams {
                    fields: MessageFields {
                        domain,
                        network,
                        address,
                        statement,
                        uri,
                        version: Some("1".to_string()),
                        chain_id,
                        nonce,
                        issued_at,
                        expiration_time,
                        not_before,
                        request_id,
                        resources,
                    },
                },
            )
            .boxed()
    }
}

/// Build the message for generated parameters.
///
/// Panics if a generator produced an invalid field.
pub fn message_from_params(params: &MessageParams) -> SiwxMessage {
    SiwxMessage::new(params.fields.clone()).expect("generated fields are valid")
}
