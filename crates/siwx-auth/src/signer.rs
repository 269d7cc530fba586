//! Signer collaborators and the sign-in workflow.
//!
//! Wallets and key stores live outside this crate. They are reached through
//! [`Signer`] (produces signatures) and [`Auth`] (also knows its account).

use async_trait::async_trait;
use siwx_core::{AccountId, BuildFields, MakeOptions, Signature, SignedMessage, SiwxMessage};
use tracing::{debug, info};

use crate::error::AuthError;

/// Result type for signing operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Produces a signature over the canonical message bytes.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign `input`, the UTF-8 canonical text of a message.
    async fn sign(&self, input: &[u8]) -> Result<Signature>;
}

/// A signer bound to one account on one network.
#[async_trait]
pub trait Auth: Signer {
    /// Network label written into messages, e.g. `Ethereum`.
    fn network(&self) -> &str;

    /// The account this signer signs for.
    async fn account_id(&self) -> Result<AccountId>;
}

/// Sign an existing message.
pub async fn sign<S>(message: SiwxMessage, signer: &S) -> Result<SignedMessage>
where
    S: Signer + ?Sized,
{
    let signature = signer.sign(&message.signing_input()).await?;
    debug!(kind = %signature.kind(), address = %message.address(), "signed message");
    Ok(SignedMessage::new(message, signature))
}

/// Build a message for the signer's own account and sign it.
///
/// Network, address and chain id come from `auth`; the rest from `fields`.
pub async fn request<A>(auth: &A, fields: BuildFields) -> Result<SignedMessage>
where
    A: Auth + ?Sized,
{
    request_with(auth, fields, &MakeOptions::default()).await
}

/// [`request`] with an explicit clock and nonce entropy.
pub async fn request_with<A>(
    auth: &A,
    mut fields: BuildFields,
    options: &MakeOptions,
) -> Result<SignedMessage>
where
    A: Auth + ?Sized,
{
    let account_id = auth.account_id().await?;
    if fields.network.is_none() {
        fields.network = Some(auth.network().to_string());
    }
    let message = SiwxMessage::make_with(&account_id, fields, options)?;
    info!(
        account = %account_id,
        domain = %message.domain(),
        "requesting sign-in signature"
    );
    sign(message, auth).await
}
