//! Golden test vectors for the canonical text.
//!
//! The canonical text is the signing input, so every implementation must
//! produce these exact bytes from these fields.

use serde::Serialize;
use siwx_core::{FieldName, MessageFields, SiwxMessage};

/// A golden test vector: fields in, exact text out.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub domain: &'static str,
    pub network: &'static str,
    pub address: &'static str,
    pub statement: Option<&'static str>,
    pub uri: &'static str,
    pub chain_id: &'static str,
    pub nonce: &'static str,
    pub issued_at: &'static str,
    pub expiration_time: Option<&'static str>,
    pub not_before: Option<&'static str>,
    pub request_id: Option<&'static str>,
    pub resources: Option<&'static [&'static str]>,
    /// Expected canonical text.
    pub text: &'static str,
}

impl GoldenVector {
    pub fn fields(&self) -> MessageFields {
        MessageFields {
            domain: self.domain.to_string(),
            network: self.network.to_string(),
            address: self.address.to_string(),
            statement: self.statement.map(str::to_string),
            uri: self.uri.to_string(),
            version: Some("1".to_string()),
            chain_id: self.chain_id.to_string(),
            nonce: self.nonce.to_string(),
            issued_at: self.issued_at.to_string(),
            expiration_time: self.expiration_time.map(str::to_string),
            not_before: self.not_before.map(str::to_string),
            request_id: self.request_id.map(str::to_string),
            resources: self
                .resources
                .map(|list| list.iter().map(|r| r.to_string()).collect()),
        }
    }

    /// Build the message. Panics if the vector's fields are invalid.
    pub fn message(&self) -> SiwxMessage {
        SiwxMessage::new(self.fields()).expect("golden vector fields are valid")
    }
}

const ETH_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    let base = GoldenVector {
        name: "ethereum_minimal",
        domain: "example.com",
        network: "Ethereum",
        address: ETH_ADDRESS,
        statement: None,
        uri: "https://example.com",
        chain_id: "1",
        nonce: "12345678",
        issued_at: "2024-01-01T00:00:00Z",
        expiration_time: None,
        not_before: None,
        request_id: None,
        resources: None,
        text: "example.com wants you to sign in with your Ethereum account:\n\
               0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
               \n\
               URI: https://example.com\n\
               Version: 1\n\
               Chain ID: 1\n\
               Nonce: 12345678\n\
               Issued At: 2024-01-01T00:00:00Z",
    };

    vec![
        base.clone(),
        GoldenVector {
            name: "ethereum_with_statement",
            statement: Some("I accept the ExampleOrg Terms of Service: https://example.com/tos"),
            text: "example.com wants you to sign in with your Ethereum account:\n\
                   0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
                   \n\
                   I accept the ExampleOrg Terms of Service: https://example.com/tos\n\
                   URI: https://example.com\n\
                   Version: 1\n\
                   Chain ID: 1\n\
                   Nonce: 12345678\n\
                   Issued At: 2024-01-01T00:00:00Z",
            ..base.clone()
        },
        GoldenVector {
            name: "ethereum_all_fields",
            domain: "localhost:4361",
            statement: Some("Sign in to Example"),
            uri: "http://localhost:4361/login",
            chain_id: "137",
            nonce: "aB3dE6gH9jK2mN5pQ",
            issued_at: "2024-01-01T12:30:00Z",
            expiration_time: Some("2024-01-02T12:30:00Z"),
            not_before: Some("2024-01-01T12:30:00Z"),
            request_id: Some("req-0001"),
            resources: Some(&[
                "ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq",
                "https://example.com/my-web2-claim.json",
            ]),
            text: "localhost:4361 wants you to sign in with your Ethereum account:\n\
                   0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
                   \n\
                   Sign in to Example\n\
                   URI: http://localhost:4361/login\n\
                   Version: 1\n\
                   Chain ID: 137\n\
                   Nonce: aB3dE6gH9jK2mN5pQ\n\
                   Issued At: 2024-01-01T12:30:00Z\n\
                   Expiration Time: 2024-01-02T12:30:00Z\n\
                   Not Before: 2024-01-01T12:30:00Z\n\
                   Request ID: req-0001\n\
                   Resources:\n\
                   - ipfs://bafybeiemxf5abjwjbikoz4mc3a3dla6ual3jsgpdr4cjr3oz3evfyavhwq\n\
                   - https://example.com/my-web2-claim.json",
            ..base.clone()
        },
        GoldenVector {
            name: "empty_resources",
            resources: Some(&[]),
            text: "example.com wants you to sign in with your Ethereum account:\n\
                   0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
                   \n\
                   URI: https://example.com\n\
                   Version: 1\n\
                   Chain ID: 1\n\
                   Nonce: 12345678\n\
                   Issued At: 2024-01-01T00:00:00Z\n\
                   Resources:",
            ..base.clone()
        },
        GoldenVector {
            name: "solana",
            network: "Solana",
            address: "GcZVNbpFBThoCdCbBEAQx2pEbYNRTbrQd4zpt9t3Sjwp",
            chain_id: "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
            statement: Some("Sign in with Solana"),
            text: "example.com wants you to sign in with your Solana account:\n\
                   GcZVNbpFBThoCdCbBEAQx2pEbYNRTbrQd4zpt9t3Sjwp\n\
                   \n\
                   Sign in with Solana\n\
                   URI: https://example.com\n\
                   Version: 1\n\
                   Chain ID: 5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp\n\
                   Nonce: 12345678\n\
                   Issued At: 2024-01-01T00:00:00Z",
            ..base.clone()
        },
        GoldenVector {
            name: "tezos_offset_time",
            network: "Tezos",
            address: "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb",
            chain_id: "NetXdQprcVkpaWU",
            issued_at: "2024-01-01T01:00:00.250+01:00",
            request_id: Some("tezos-1"),
            text: "example.com wants you to sign in with your Tezos account:\n\
                   tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb\n\
                   \n\
                   URI: https://example.com\n\
                   Version: 1\n\
                   Chain ID: NetXdQprcVkpaWU\n\
                   Nonce: 12345678\n\
                   Issued At: 2024-01-01T01:00:00.250+01:00\n\
                   Request ID: tezos-1",
            ..base
        },
    ]
}

/// All golden vectors as pretty-printed JSON, for other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

/// Text that must be rejected, and at which stage.
#[derive(Debug, Clone)]
pub struct RejectionVector {
    pub name: &'static str,
    pub text: String,
    /// `None` for a structural (parse) failure, otherwise the failing field.
    pub field: Option<FieldName>,
}

/// Get all rejection vectors, derived from the minimal golden text.
pub fn rejection_vectors() -> Vec<RejectionVector> {
    let minimal = all_vectors()[0].text;
    let edit = |from: &str, to: &str| minimal.replacen(from, to, 1);

    vec![
        RejectionVector {
            name: "trailing_newline",
            text: format!("{minimal}\n"),
            field: None,
        },
        RejectionVector {
            name: "missing_blank_line",
            text: edit("\n\nURI", "\nURI"),
            field: None,
        },
        RejectionVector {
            name: "missing_version",
            text: edit("Version: 1\n", ""),
            field: None,
        },
        RejectionVector {
            name: "lines_out_of_order",
            text: edit("Version: 1\nChain ID: 1", "Chain ID: 1\nVersion: 1"),
            field: None,
        },
        RejectionVector {
            name: "crlf_line_endings",
            text: minimal.replace('\n', "\r\n"),
            field: None,
        },
        RejectionVector {
            name: "short_nonce",
            text: edit("Nonce: 12345678", "Nonce: 1234567"),
            field: Some(FieldName::Nonce),
        },
        RejectionVector {
            name: "unsupported_version",
            text: edit("Version: 1", "Version: 2"),
            field: Some(FieldName::Version),
        },
        RejectionVector {
            name: "domain_with_scheme",
            text: edit("example.com wants", "https://example.com wants"),
            field: Some(FieldName::Domain),
        },
        RejectionVector {
            name: "relative_uri",
            text: edit("URI: https://example.com", "URI: /login"),
            field: Some(FieldName::Uri),
        },
        RejectionVector {
            name: "bad_issued_at",
            text: edit("2024-01-01T00:00:00Z", "January 1st"),
            field: Some(FieldName::IssuedAt),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwx_core::MessageError;

    #[test]
    fn test_vectors_produce_expected_text() {
        for vector in all_vectors() {
            assert_eq!(
                vector.message().to_string(),
                vector.text,
                "vector '{}' text mismatch",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_parse_back() {
        for vector in all_vectors() {
            let parsed = SiwxMessage::from_string(vector.text)
                .unwrap_or_else(|e| panic!("vector '{}': {e}", vector.name));
            assert_eq!(parsed.fields(), vector.fields(), "vector '{}'", vector.name);
        }
    }

    #[test]
    fn test_json_export_carries_text() {
        let json: serde_json::Value = serde_json::from_str(&vectors_json().unwrap()).unwrap();
        let vectors = json.as_array().unwrap();
        assert_eq!(vectors.len(), all_vectors().len());
        assert_eq!(vectors[0]["name"], "ethereum_minimal");
        assert_eq!(vectors[3]["resources"], serde_json::json!([]));
        assert!(vectors[0]["statement"].is_null());
    }

    #[test]
    fn test_rejections() {
        for vector in rejection_vectors() {
            let err = SiwxMessage::from_string(&vector.text)
                .expect_err(vector.name);
            match (vector.field, err) {
                (None, MessageError::Parse(_)) => {}
                (Some(field), MessageError::Field(e)) => {
                    assert_eq!(e.field, field, "vector '{}'", vector.name)
                }
                (expected, err) => panic!(
                    "vector '{}': expected {expected:?}, got {err}",
                    vector.name
                ),
            }
        }
    }
}
