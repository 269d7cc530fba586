//! The Siwx client: one entry point for building, parsing, signing and
//! verifying messages.

use chrono::{DateTime, Utc};
use siwx_auth::{Auth, Signer};
use siwx_core::{AccountId, BuildFields, MakeOptions, SignedMessage, SiwxMessage};
use siwx_verify::{SignatureVerifier, VerifierRegistry};
use tracing::debug;

use crate::config::SiwxConfig;
use crate::error::Result;

/// A configured SIWx client.
///
/// Holds the [`SiwxConfig`] used when building messages and the
/// [`VerifierRegistry`] used when verifying them.
#[derive(Debug, Clone)]
pub struct Siwx {
    config: SiwxConfig,
    registry: VerifierRegistry,
}

impl Default for Siwx {
    fn default() -> Self {
        Self::new(SiwxConfig::default())
    }
}

impl Siwx {
    /// Client with the default verifiers (`eip191`, `solana:ed25519`).
    pub fn new(config: SiwxConfig) -> Self {
        Self::with_registry(config, VerifierRegistry::with_defaults())
    }

    pub fn with_registry(config: SiwxConfig, registry: VerifierRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &SiwxConfig {
        &self.config
    }

    pub fn registry(&self) -> &VerifierRegistry {
        &self.registry
    }

    /// Add a verifier, e.g. an `Eip1271Verifier` or `TezosVerifier`.
    pub fn register<V: SignatureVerifier + 'static>(&mut self, verifier: V) -> &mut Self {
        self.registry.register(verifier);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a message for `account_id` at the current time.
    pub fn make(&self, account_id: &AccountId, fields: BuildFields) -> Result<SiwxMessage> {
        self.make_at(account_id, fields, Utc::now())
    }

    /// Build a message with `now` as the clock.
    pub fn make_at(
        &self,
        account_id: &AccountId,
        fields: BuildFields,
        now: DateTime<Utc>,
    ) -> Result<SiwxMessage> {
        let fields = self.apply_defaults(fields);
        Ok(SiwxMessage::make_with(account_id, fields, &self.make_options(now))?)
    }

    /// Parse and validate canonical text.
    pub fn parse(&self, text: &str) -> Result<SiwxMessage> {
        Ok(SiwxMessage::from_string(text)?)
    }

    /// Verify a signed message with the registered verifiers.
    ///
    /// Only the signature is checked. Time bounds are left to the caller
    /// (see [`SiwxMessage::is_valid_at`]).
    pub fn verify(&self, signed: &SignedMessage) -> Result<bool> {
        Ok(self.registry.verify(signed)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn sign<S>(&self, message: SiwxMessage, signer: &S) -> Result<SignedMessage>
    where
        S: Signer + ?Sized,
    {
        Ok(siwx_auth::sign(message, signer).await?)
    }

    /// Build a message for the signer's own account and sign it.
    pub async fn request<A>(&self, auth: &A, fields: BuildFields) -> Result<SignedMessage>
    where
        A: Auth + ?Sized,
    {
        let fields = self.apply_defaults(fields);
        let options = self.make_options(Utc::now());
        Ok(siwx_auth::request_with(auth, fields, &options).await?)
    }

    fn make_options(&self, now: DateTime<Utc>) -> MakeOptions {
        MakeOptions {
            now,
            nonce_entropy_bits: self.config.nonce_entropy_bits,
        }
    }

    fn apply_defaults(&self, mut fields: BuildFields) -> BuildFields {
        if fields.statement.is_none() {
            if let Some(statement) = &self.config.default_statement {
                debug!("using configured default statement");
                fields.statement = Some(statement.clone());
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiwxError;
    use chrono::TimeZone;
    use siwx_core::{ChainId, FieldName};

    fn account() -> AccountId {
        AccountId::new(
            ChainId::new("eip155", "1"),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_statement_applies_only_when_unset() {
        let client = Siwx::new(SiwxConfig {
            default_statement: Some("Welcome".into()),
            ..Default::default()
        });

        let message = client
            .make_at(&account(), BuildFields::new("example.com", "https://example.com"), now())
            .unwrap();
        assert_eq!(message.statement().map(|s| s.as_str()), Some("Welcome"));

        let message = client
            .make_at(
                &account(),
                BuildFields::new("example.com", "https://example.com").statement("Custom"),
                now(),
            )
            .unwrap();
        assert_eq!(message.statement().map(|s| s.as_str()), Some("Custom"));
    }

    #[test]
    fn test_configured_entropy() {
        let client = Siwx::new(SiwxConfig {
            nonce_entropy_bits: 128,
            ..Default::default()
        });
        let message = client
            .make_at(&account(), BuildFields::new("example.com", "https://example.com"), now())
            .unwrap();
        assert_eq!(message.nonce().as_str().len(), 22);

        let weak = Siwx::new(SiwxConfig {
            nonce_entropy_bits: 16,
            ..Default::default()
        });
        let err = weak
            .make_at(&account(), BuildFields::new("example.com", "https://example.com"), now())
            .unwrap_err();
        assert!(matches!(err, SiwxError::Field(e) if e.field == FieldName::Nonce));
    }

    #[test]
    fn test_parse_errors_are_message_errors() {
        let err = Siwx::default().parse("not a message").unwrap_err();
        assert!(matches!(err, SiwxError::Message(_)));
    }
}
