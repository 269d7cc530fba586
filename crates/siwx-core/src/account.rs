//! Chain-qualified account identifiers (CAIP-2 / CAIP-10).
//!
//! Only the shape needed to populate a message: namespace, reference and
//! address. No chain registry, no per-namespace address validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccountIdError;

/// A CAIP-2 chain id, e.g. `eip155:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId {
    pub namespace: String,
    pub reference: String,
}

impl ChainId {
    pub fn new(namespace: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            reference: reference.into(),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

impl FromStr for ChainId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, reference))
                if !namespace.is_empty() && !reference.is_empty() && !reference.contains(':') =>
            {
                Ok(Self::new(namespace, reference))
            }
            _ => Err(AccountIdError::MalformedChainId(s.to_string())),
        }
    }
}

/// A CAIP-10 account id, e.g. `eip155:1:0xab16…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId {
    pub address: String,
    pub chain_id: ChainId,
}

impl AccountId {
    pub fn new(chain_id: ChainId, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            chain_id,
        }
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.address)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AccountIdError::MalformedAccountId(s.to_string());
        let (chain, address) = s.rsplit_once(':').ok_or_else(malformed)?;
        if address.is_empty() {
            return Err(malformed());
        }
        let chain_id = chain.parse().map_err(|_| malformed())?;
        Ok(Self::new(chain_id, address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_caip10_roundtrip() {
        let raw = "eip155:1:0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B";
        let account: AccountId = raw.parse().unwrap();
        assert_eq!(account.chain_id.namespace, "eip155");
        assert_eq!(account.chain_id.reference, "1");
        assert_eq!(account.address, "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B");
        assert_eq!(account.to_string(), raw);
    }

    #[test]
    fn test_malformed_ids() {
        assert!("eip155".parse::<ChainId>().is_err());
        assert!(":1".parse::<ChainId>().is_err());
        assert!("eip155:1".parse::<AccountId>().is_err());
        assert!("eip155:1:".parse::<AccountId>().is_err());
    }
}
