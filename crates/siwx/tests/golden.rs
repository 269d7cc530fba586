//! Golden signed messages for cross-implementation verification.
//!
//! Every implementation must produce identical:
//! - canonical text
//! - signing input (the UTF-8 text, or its Micheline packing for Tezos)
//! - signature (deterministic for all three fixture schemes)

use serde::Serialize;
use siwx::auth::tezos::signing_payload_hex;
use siwx::{MessageFields, Signer, SignedMessage, SiwxMessage};
use siwx_testkit::vectors::GoldenVector;
use siwx_testkit::{all_vectors, TestFixture};

/// A golden vector signed by one fixture wallet.
#[derive(Debug, Serialize)]
struct SignedVector {
    name: String,
    network: String,
    address: String,
    text: String,
    signing_payload: String,
    signature_kind: String,
    signature: String,
}

fn with_account(
    vector: &GoldenVector,
    network: &str,
    address: String,
    chain_id: &str,
) -> SiwxMessage {
    SiwxMessage::new(MessageFields {
        network: network.to_string(),
        address,
        chain_id: chain_id.to_string(),
        ..vector.fields()
    })
    .unwrap()
}

async fn sign_with<S: Signer>(signer: &S, message: SiwxMessage) -> SignedMessage {
    siwx::auth::sign(message, signer).await.unwrap()
}

async fn generate_signed_vectors() -> Vec<SignedVector> {
    let fixture = TestFixture::new();
    let mut out = Vec::new();

    for vector in all_vectors() {
        let signed = [
            sign_with(
                &fixture.ethereum,
                with_account(&vector, "Ethereum", fixture.ethereum.address(), "1"),
            )
            .await,
            sign_with(
                &fixture.solana,
                with_account(
                    &vector,
                    "Solana",
                    fixture.solana.address(),
                    "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
                ),
            )
            .await,
            sign_with(
                &fixture.tezos,
                with_account(&vector, "Tezos", fixture.tezos.address(), "NetXdQprcVkpaWU"),
            )
            .await,
        ];

        for signed in signed {
            let message = signed.message();
            let input = message.signing_input();
            let signing_payload = if message.network().as_str() == "Tezos" {
                signing_payload_hex(&input).unwrap()
            } else {
                hex::encode(&input)
            };
            out.push(SignedVector {
                name: format!("{}/{}", vector.name, message.network()),
                network: message.network().to_string(),
                address: message.address().to_string(),
                text: message.to_string(),
                signing_payload,
                signature_kind: signed.signature().kind().to_string(),
                signature: signed.signature().to_hex(),
            });
        }
    }
    out
}

#[tokio::test]
async fn test_generate_vectors() {
    let vectors = generate_signed_vectors().await;
    assert_eq!(vectors.len(), all_vectors().len() * 3);

    for v in &vectors {
        println!("=== {} ===", v.name);
        println!("  address: {}", v.address);
        println!("  kind: {}", v.signature_kind);
        println!("  signature: {}", v.signature);
        println!();
    }
}

#[tokio::test]
async fn test_vectors_deterministic() {
    let v1 = generate_signed_vectors().await;
    let v2 = generate_signed_vectors().await;

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.text, b.text, "text mismatch for {}", a.name);
        assert_eq!(a.signing_payload, b.signing_payload, "payload mismatch for {}", a.name);
        assert_eq!(a.signature, b.signature, "signature mismatch for {}", a.name);
    }
}

#[tokio::test]
async fn test_vectors_verify() {
    let fixture = TestFixture::new();
    let registry = fixture.registry();

    for v in generate_signed_vectors().await {
        let message = SiwxMessage::from_string(&v.text).unwrap();
        let kind = v.signature_kind.parse().unwrap();
        let signature = siwx::Signature::from_hex(kind, &v.signature).unwrap();
        let signed = SignedMessage::new(message, signature);

        assert!(registry.verify(&signed).unwrap(), "verify failed for {}", v.name);
    }
}

#[test]
fn test_tezos_payload_layout() {
    let text = all_vectors()[0].text;
    let payload = hex::decode(signing_payload_hex(text.as_bytes()).unwrap()).unwrap();

    assert_eq!(&payload[..2], &[0x05, 0x01]);
    assert_eq!(&payload[2..6], &(text.len() as u32).to_be_bytes());
    assert_eq!(&payload[6..], text.as_bytes());
}

#[tokio::test]
async fn print_golden_vectors_json() {
    #[derive(Serialize)]
    struct VectorFile {
        version: String,
        description: String,
        messages: Vec<GoldenVector>,
        signed: Vec<SignedVector>,
    }

    let file = VectorFile {
        version: "1".to_string(),
        description: "Golden test vectors for SIWx. \
                      Every implementation must produce identical outputs."
            .to_string(),
        messages: all_vectors(),
        signed: generate_signed_vectors().await,
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);
}
