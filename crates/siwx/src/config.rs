//! Client configuration.

use serde::Deserialize;
use siwx_core::DEFAULT_NONCE_ENTROPY_BITS;

/// Configuration for a [`Siwx`](crate::Siwx) client.
///
/// Deserializable so it can live in an application's config file; missing
/// keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SiwxConfig {
    /// Entropy of generated nonces, in bits.
    pub nonce_entropy_bits: u32,
    /// Statement used when a built message does not set one.
    pub default_statement: Option<String>,
}

impl Default for SiwxConfig {
    fn default() -> Self {
        Self {
            nonce_entropy_bits: DEFAULT_NONCE_ENTROPY_BITS,
            default_statement: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiwxConfig::default();
        assert_eq!(config.nonce_entropy_bits, 96);
        assert!(config.default_statement.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config: SiwxConfig =
            serde_json::from_str(r#"{"default_statement": "Sign in to Example"}"#).unwrap();
        assert_eq!(config.nonce_entropy_bits, 96);
        assert_eq!(config.default_statement.as_deref(), Some("Sign in to Example"));
    }
}
