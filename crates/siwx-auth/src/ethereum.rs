//! Ethereum (`eip155`) helpers for signers.

use siwx_core::{AccountId, ChainId, Signature, SignatureKind};

use crate::error::AuthError;

/// CAIP-2 namespace for EVM chains.
pub const CHAIN_NAMESPACE: &str = "eip155";

/// Network label written into messages.
pub const NETWORK: &str = "Ethereum";

/// `eth_getCode` result for an account without code.
const EMPTY_CODE: &str = "0x";

pub fn chain_id(reference: u64) -> ChainId {
    ChainId::new(CHAIN_NAMESPACE, reference.to_string())
}

/// Chain id from an `eth_chainId` response such as `0x89`.
pub fn chain_id_from_hex(hex: &str) -> Result<ChainId, AuthError> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    u64::from_str_radix(digits, 16)
        .map(chain_id)
        .map_err(|e| AuthError::UnknownNetwork(format!("bad eth_chainId {hex:?}: {e}")))
}

pub fn account_id(chain_reference: u64, address: impl Into<String>) -> AccountId {
    AccountId::new(chain_id(chain_reference), address)
}

/// Lower-case the address. Ethereum addresses are case-insensitive; the
/// mixed case form is only a checksum.
pub fn normalize_account_id(account_id: &AccountId) -> AccountId {
    AccountId::new(
        account_id.chain_id.clone(),
        account_id.address.to_lowercase(),
    )
}

/// `0x`-hex of the signing input, as passed to `personal_sign`.
pub fn personal_sign_payload(input: &[u8]) -> String {
    format!("0x{}", hex::encode(input))
}

/// Wrap a hex signature returned by a wallet.
///
/// `code` is the signer's `eth_getCode` result. An account without code
/// (`None` or `0x`) is an EOA and signs with `eip191`; anything else is a
/// contract account and gets `eip1271`.
pub fn signature_from_hex(hex: &str, code: Option<&str>) -> Result<Signature, AuthError> {
    let kind = match code {
        None | Some(EMPTY_CODE) | Some("") => SignatureKind::Eip191,
        Some(_) => SignatureKind::Eip1271,
    };
    Signature::from_hex(kind, hex).map_err(|e| AuthError::InvalidSignatureEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_code() {
        let sig = "0x".to_string() + &"ab".repeat(65);
        assert_eq!(signature_from_hex(&sig, None).unwrap().kind(), &SignatureKind::Eip191);
        assert_eq!(
            signature_from_hex(&sig, Some("0x")).unwrap().kind(),
            &SignatureKind::Eip191
        );
        assert_eq!(
            signature_from_hex(&sig, Some("0x6080604052")).unwrap().kind(),
            &SignatureKind::Eip1271
        );
        assert_eq!(signature_from_hex(&sig, None).unwrap().bytes().len(), 65);
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(
            signature_from_hex("0xnothex", None),
            Err(AuthError::InvalidSignatureEncoding(_))
        ));
    }

    #[test]
    fn test_account_ids() {
        let account = account_id(1, "0xAbC0000000000000000000000000000000000DeF");
        assert_eq!(
            account.to_string(),
            "eip155:1:0xAbC0000000000000000000000000000000000DeF"
        );
        assert_eq!(
            normalize_account_id(&account).address,
            "0xabc0000000000000000000000000000000000def"
        );
        assert_eq!(chain_id_from_hex("0x89").unwrap(), chain_id(137));
        assert!(chain_id_from_hex("0xzz").is_err());
    }

    #[test]
    fn test_personal_sign_payload() {
        assert_eq!(personal_sign_payload(b"hi"), "0x6869");
    }
}
