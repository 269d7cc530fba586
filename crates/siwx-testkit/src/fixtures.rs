//! Test fixtures and helpers.
//!
//! Deterministic in-process signers for each supported network. They stand
//! in for wallets: each implements [`Signer`] and [`Auth`] and signs exactly
//! the way the matching wallet does.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ed25519_dalek::Signer as _;
use k256::ecdsa::SigningKey as EcdsaKey;

use siwx_auth::{ethereum, solana, tezos, Auth, AuthError, Signer, TezosNetwork};
use siwx_core::{AccountId, BuildFields, MakeOptions, Signature, SignatureKind};
use siwx_verify::eip191::{address_of, personal_message_digest};
use siwx_verify::tezos::{encode_edpk, encode_edsig, signing_digest, tz1_address};
use siwx_verify::{StaticTezosKeys, TezosVerifier, VerifierRegistry};

/// 2024-01-01T00:00:00Z, the clock used by fixtures.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// [`MakeOptions`] at [`fixed_now`].
pub fn fixed_options() -> MakeOptions {
    MakeOptions::at(fixed_now())
}

/// Minimal build fields for `example.com`.
pub fn example_fields() -> BuildFields {
    BuildFields::new("example.com", "https://example.com/login")
}

/// An externally owned Ethereum account.
#[derive(Clone)]
pub struct EthereumKey {
    key: EcdsaKey,
    chain: u64,
}

impl EthereumKey {
    /// Key from a 32-byte seed used directly as the secret scalar.
    ///
    /// Panics if the seed is zero or not below the curve order.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            key: EcdsaKey::from_slice(&seed).expect("seed is a valid secp256k1 scalar"),
            chain: 1,
        }
    }

    pub fn on_chain(mut self, chain: u64) -> Self {
        self.chain = chain;
        self
    }

    /// Lower-case `0x` address.
    pub fn address(&self) -> String {
        address_of(self.key.verifying_key())
    }

    pub fn account_id(&self) -> AccountId {
        ethereum::account_id(self.chain, self.address())
    }

    /// 65-byte `r ‖ s ‖ v` personal-sign signature, `v` in {27, 28}.
    pub fn personal_sign(&self, input: &[u8]) -> Result<Vec<u8>, AuthError> {
        let digest = personal_message_digest(input);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| AuthError::Signer(e.to_string()))?;
        let mut bytes = signature.to_bytes().to_vec();
        bytes.push(recovery_id.to_byte() + 27);
        Ok(bytes)
    }
}

#[async_trait]
impl Signer for EthereumKey {
    async fn sign(&self, input: &[u8]) -> Result<Signature, AuthError> {
        // Wallets hand back hex; the account has no code.
        let hex = format!("0x{}", hex::encode(self.personal_sign(input)?));
        ethereum::signature_from_hex(&hex, None)
    }
}

#[async_trait]
impl Auth for EthereumKey {
    fn network(&self) -> &str {
        ethereum::NETWORK
    }

    async fn account_id(&self) -> Result<AccountId, AuthError> {
        Ok(EthereumKey::account_id(self))
    }
}

/// A Solana keypair.
#[derive(Clone)]
pub struct SolanaKey {
    key: ed25519_dalek::SigningKey,
    genesis_hash: String,
}

impl SolanaKey {
    /// Mainnet-beta key from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            key: ed25519_dalek::SigningKey::from_bytes(&seed),
            genesis_hash: solana::MAINNET_GENESIS_HASH.to_string(),
        }
    }

    pub fn address(&self) -> String {
        solana::address(self.key.verifying_key().as_bytes())
    }

    pub fn account_id(&self) -> AccountId {
        solana::account_id(&self.genesis_hash, self.address())
    }
}

#[async_trait]
impl Signer for SolanaKey {
    async fn sign(&self, input: &[u8]) -> Result<Signature, AuthError> {
        Ok(solana::signature(self.key.sign(input).to_bytes().to_vec()))
    }
}

#[async_trait]
impl Auth for SolanaKey {
    fn network(&self) -> &str {
        solana::NETWORK
    }

    async fn account_id(&self) -> Result<AccountId, AuthError> {
        Ok(SolanaKey::account_id(self))
    }
}

/// A Tezos `tz1` account.
#[derive(Clone)]
pub struct TezosKey {
    key: ed25519_dalek::SigningKey,
    network: TezosNetwork,
}

impl TezosKey {
    /// Mainnet key from a 32-byte seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            key: ed25519_dalek::SigningKey::from_bytes(&seed),
            network: TezosNetwork::Mainnet,
        }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    pub fn edpk(&self) -> String {
        encode_edpk(&self.public_key())
    }

    pub fn address(&self) -> String {
        tz1_address(&self.public_key())
    }

    pub fn account_id(&self) -> AccountId {
        self.network.account_id(self.address())
    }

    /// A resolver that knows this account's key.
    pub fn resolver(&self) -> StaticTezosKeys {
        let mut keys = StaticTezosKeys::new();
        keys.insert(self.public_key());
        keys
    }
}

#[async_trait]
impl Signer for TezosKey {
    async fn sign(&self, input: &[u8]) -> Result<Signature, AuthError> {
        let payload = tezos::signing_payload(input)?;
        let signature = self.key.sign(&signing_digest(&payload));
        tezos::signature_from_edsig(&encode_edsig(&signature.to_bytes()))
    }
}

#[async_trait]
impl Auth for TezosKey {
    fn network(&self) -> &str {
        tezos::NETWORK
    }

    async fn account_id(&self) -> Result<AccountId, AuthError> {
        Ok(TezosKey::account_id(self))
    }
}

/// One signer per network, derived from a single seed byte.
pub struct TestFixture {
    pub ethereum: EthereumKey,
    pub solana: SolanaKey,
    pub tezos: TezosKey,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_seed(0x42)
    }

    /// Deterministic keys; `seed` must be non-zero.
    pub fn with_seed(seed: u8) -> Self {
        let seed = [seed; 32];
        Self {
            ethereum: EthereumKey::from_seed(seed),
            solana: SolanaKey::from_seed(seed),
            tezos: TezosKey::from_seed(seed),
        }
    }

    /// Default verifiers plus a Tezos verifier that knows this fixture's key.
    pub fn registry(&self) -> VerifierRegistry {
        let mut registry = VerifierRegistry::with_defaults();
        registry.register(TezosVerifier::new(self.tezos.resolver()));
        registry
    }

    /// The signature kind each network's signer produces.
    pub fn kinds() -> [SignatureKind; 3] {
        [
            SignatureKind::Eip191,
            SignatureKind::SolanaEd25519,
            SignatureKind::TezosEd25519,
        ]
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixtures with distinct keys for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count).map(|i| TestFixture::with_seed(i as u8 + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use siwx_auth::request_with;
    use siwx_verify::SignatureVerifier;

    #[tokio::test]
    async fn test_every_network_signs_verifiable_messages() {
        let fixture = TestFixture::new();
        let registry = fixture.registry();

        let ethereum = request_with(&fixture.ethereum, example_fields(), &fixed_options())
            .await
            .unwrap();
        let solana = request_with(&fixture.solana, example_fields(), &fixed_options())
            .await
            .unwrap();
        let tezos = request_with(&fixture.tezos, example_fields(), &fixed_options())
            .await
            .unwrap();

        for (signed, kind) in [ethereum, solana, tezos].iter().zip(TestFixture::kinds()) {
            assert_eq!(signed.signature().kind(), &kind);
            assert!(registry.verify(signed).unwrap(), "{kind} did not verify");
        }
    }

    #[tokio::test]
    async fn test_messages_carry_account_fields() {
        let fixture = TestFixture::new();
        let signed = request_with(&fixture.tezos, example_fields(), &fixed_options())
            .await
            .unwrap();
        let message = signed.message();
        assert_eq!(message.network().as_str(), "Tezos");
        assert_eq!(message.chain_id().as_str(), "NetXdQprcVkpaWU");
        assert!(message.address().as_str().starts_with("tz1"));
        assert_eq!(message.issued_at().as_str(), "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_tezos_verifier_needs_the_key() {
        let fixture = TestFixture::new();
        let signed = request_with(&fixture.tezos, example_fields(), &fixed_options())
            .await
            .unwrap();
        let stranger = TezosVerifier::new(TestFixture::with_seed(7).tezos.resolver());
        assert!(stranger.verify(&signed).is_err());
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);
        let addresses: Vec<_> = parties.iter().map(|p| p.ethereum.address()).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
    }

    #[test]
    fn test_edpk_matches_address() {
        let key = TestFixture::new().tezos;
        let mut keys = StaticTezosKeys::new();
        assert_eq!(keys.insert_edpk(&key.edpk()).unwrap(), key.address());
    }
}
