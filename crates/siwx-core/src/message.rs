//! SiwxMessage: the immutable sign-in message.
//!
//! A message is built once, either from a complete field set
//! ([`SiwxMessage::new`]), from an account id plus partial fields
//! ([`SiwxMessage::make`]), or from canonical text
//! ([`SiwxMessage::from_string`]). It is never edited afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::account::AccountId;
use crate::canonical;
use crate::error::{FieldError, FieldName, MessageError};
use crate::fields::{
    AddressString, ChainIdString, DateTimeString, DomainString, NetworkString, NonEmptyString,
    NonceString, UriString, VersionString, MIN_NONCE_LENGTH,
};
use crate::nonce::{generate_nonce, DEFAULT_NONCE_ENTROPY_BITS};
use crate::parse;

/// Raw, unvalidated message fields.
///
/// This is both the input of [`SiwxMessage::new`] and the output of the
/// grammar parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFields {
    pub domain: String,
    pub network: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub chain_id: String,
    pub nonce: String,
    pub issued_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

/// A point in time given either as text or as a structured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeInput {
    /// Passed through verbatim, validated later.
    Text(String),
    /// Formatted with seconds precision and a `Z` suffix.
    At(DateTime<Utc>),
}

impl TimeInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::At(time) => DateTimeString::from_datetime(time).into_inner(),
        }
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(time: DateTime<Utc>) -> Self {
        Self::At(time)
    }
}

/// Fields a caller provides to [`SiwxMessage::make`].
///
/// Address and chain id come from the account id; everything left unset
/// is either generated or omitted.
#[derive(Debug, Clone, Default)]
pub struct BuildFields {
    pub domain: String,
    pub uri: String,
    /// Overrides the network label derived from the account namespace.
    pub network: Option<String>,
    pub statement: Option<String>,
    pub nonce: Option<String>,
    pub issued_at: Option<TimeInput>,
    pub expiration_time: Option<TimeInput>,
    pub not_before: Option<TimeInput>,
    pub request_id: Option<String>,
    pub resources: Option<Vec<String>>,
}

impl BuildFields {
    pub fn new(domain: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn issued_at(mut self, time: impl Into<TimeInput>) -> Self {
        self.issued_at = Some(time.into());
        self
    }

    pub fn expiration_time(mut self, time: impl Into<TimeInput>) -> Self {
        self.expiration_time = Some(time.into());
        self
    }

    pub fn not_before(mut self, time: impl Into<TimeInput>) -> Self {
        self.not_before = Some(time.into());
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = Some(resources.into_iter().map(Into::into).collect());
        self
    }
}

/// Clock and entropy used by [`SiwxMessage::make_with`].
#[derive(Debug, Clone)]
pub struct MakeOptions {
    /// Used for `issuedAt` and `notBefore` when not supplied.
    pub now: DateTime<Utc>,
    /// Entropy target for a generated nonce.
    pub nonce_entropy_bits: u32,
}

impl MakeOptions {
    /// Options with a fixed clock.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            nonce_entropy_bits: DEFAULT_NONCE_ENTROPY_BITS,
        }
    }
}

impl Default for MakeOptions {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Default network label for a CAIP-2 namespace.
pub fn network_for_namespace(namespace: &str) -> Option<&'static str> {
    match namespace {
        "eip155" => Some("Ethereum"),
        "solana" => Some("Solana"),
        "tezos" => Some("Tezos"),
        _ => None,
    }
}

/// A validated sign-in message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MessageFields")]
pub struct SiwxMessage {
    domain: DomainString,
    network: NetworkString,
    address: AddressString,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<NonEmptyString>,
    uri: UriString,
    version: VersionString,
    chain_id: ChainIdString,
    nonce: NonceString,
    issued_at: DateTimeString,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_time: Option<DateTimeString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_before: Option<DateTimeString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<NonEmptyString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resources: Option<Vec<UriString>>,
}

impl SiwxMessage {
    /// Validate a complete field set.
    ///
    /// Fields are checked in canonical order and the first failure is
    /// returned. A missing version defaults to `1`.
    pub fn new(fields: MessageFields) -> Result<Self, FieldError> {
        let domain = DomainString::parse(fields.domain)?;
        let network = NetworkString::parse(fields.network)?;
        let address = AddressString::parse(fields.address)?;
        let statement = fields
            .statement
            .map(|s| NonEmptyString::parse(s, FieldName::Statement))
            .transpose()?;
        let uri = UriString::parse(fields.uri, FieldName::Uri)?;
        let version = match fields.version {
            Some(version) => VersionString::parse(version)?,
            None => VersionString::default(),
        };
        let chain_id = ChainIdString::parse(fields.chain_id)?;
        let nonce = NonceString::parse(fields.nonce)?;
        let issued_at = DateTimeString::parse(fields.issued_at, FieldName::IssuedAt)?;
        let expiration_time = fields
            .expiration_time
            .map(|t| DateTimeString::parse(t, FieldName::ExpirationTime))
            .transpose()?;
        let not_before = fields
            .not_before
            .map(|t| DateTimeString::parse(t, FieldName::NotBefore))
            .transpose()?;
        let request_id = fields
            .request_id
            .map(|s| NonEmptyString::parse(s, FieldName::RequestId))
            .transpose()?;
        let resources = fields
            .resources
            .map(|list| {
                list.into_iter()
                    .map(|r| UriString::parse(r, FieldName::Resources))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            domain,
            network,
            address,
            statement,
            uri,
            version,
            chain_id,
            nonce,
            issued_at,
            expiration_time,
            not_before,
            request_id,
            resources,
        })
    }

    /// Build a message for `account_id`, generating what the caller left out.
    ///
    /// - `network`: from `fields.network`, else from the account namespace.
    /// - `nonce`: random alphanumeric, 96 bits of entropy.
    /// - `issuedAt` / `notBefore`: the current time.
    pub fn make(account_id: &AccountId, fields: BuildFields) -> Result<Self, FieldError> {
        Self::make_with(account_id, fields, &MakeOptions::default())
    }

    /// [`make`](Self::make) with an explicit clock and nonce entropy.
    pub fn make_with(
        account_id: &AccountId,
        fields: BuildFields,
        options: &MakeOptions,
    ) -> Result<Self, FieldError> {
        let namespace = &account_id.chain_id.namespace;
        let network = match fields.network {
            Some(network) => network,
            None => network_for_namespace(namespace)
                .ok_or_else(|| {
                    FieldError::new(
                        FieldName::Network,
                        namespace.as_str(),
                        "no network label known for this namespace",
                    )
                })?
                .to_string(),
        };

        let nonce = match fields.nonce {
            Some(nonce) => nonce,
            None => {
                let nonce = generate_nonce(options.nonce_entropy_bits);
                if nonce.chars().count() < MIN_NONCE_LENGTH {
                    return Err(FieldError::new(
                        FieldName::Nonce,
                        nonce,
                        "nonce generation produced fewer than 8 characters",
                    ));
                }
                nonce
            }
        };

        let now = || DateTimeString::from_datetime(options.now).into_inner();
        let issued_at = fields.issued_at.map_or_else(now, TimeInput::into_text);
        let not_before = fields.not_before.map_or_else(now, TimeInput::into_text);

        Self::new(MessageFields {
            domain: fields.domain,
            network,
            address: account_id.address.clone(),
            statement: fields.statement,
            uri: fields.uri,
            version: None,
            chain_id: account_id.chain_id.reference.clone(),
            nonce,
            issued_at,
            expiration_time: fields.expiration_time.map(TimeInput::into_text),
            not_before: Some(not_before),
            request_id: fields.request_id,
            resources: fields.resources,
        })
    }

    /// Parse and validate canonical text.
    pub fn from_string(text: &str) -> Result<Self, MessageError> {
        let fields = parse::parse(text)?;
        Ok(Self::new(fields)?)
    }

    /// Like [`from_string`](Self::from_string), discarding the reason.
    pub fn from_string_safe(text: &str) -> Option<Self> {
        Self::from_string(text).ok()
    }

    /// The raw field set, as the parser would produce it.
    pub fn fields(&self) -> MessageFields {
        MessageFields {
            domain: self.domain.to_string(),
            network: self.network.to_string(),
            address: self.address.to_string(),
            statement: self.statement.as_ref().map(ToString::to_string),
            uri: self.uri.to_string(),
            version: Some(self.version.to_string()),
            chain_id: self.chain_id.to_string(),
            nonce: self.nonce.to_string(),
            issued_at: self.issued_at.to_string(),
            expiration_time: self.expiration_time.as_ref().map(ToString::to_string),
            not_before: self.not_before.as_ref().map(ToString::to_string),
            request_id: self.request_id.as_ref().map(ToString::to_string),
            resources: self
                .resources
                .as_ref()
                .map(|list| list.iter().map(ToString::to_string).collect()),
        }
    }

    /// UTF-8 bytes of the canonical text.
    pub fn signing_input(&self) -> Vec<u8> {
        canonical::signing_input(self)
    }

    pub fn domain(&self) -> &DomainString {
        &self.domain
    }

    pub fn network(&self) -> &NetworkString {
        &self.network
    }

    pub fn address(&self) -> &AddressString {
        &self.address
    }

    pub fn statement(&self) -> Option<&NonEmptyString> {
        self.statement.as_ref()
    }

    pub fn uri(&self) -> &UriString {
        &self.uri
    }

    pub fn version(&self) -> &VersionString {
        &self.version
    }

    pub fn chain_id(&self) -> &ChainIdString {
        &self.chain_id
    }

    pub fn nonce(&self) -> &NonceString {
        &self.nonce
    }

    pub fn issued_at(&self) -> &DateTimeString {
        &self.issued_at
    }

    pub fn expiration_time(&self) -> Option<&DateTimeString> {
        self.expiration_time.as_ref()
    }

    pub fn not_before(&self) -> Option<&DateTimeString> {
        self.not_before.as_ref()
    }

    pub fn request_id(&self) -> Option<&NonEmptyString> {
        self.request_id.as_ref()
    }

    /// Resources in the order they were given.
    pub fn resources(&self) -> Option<&[UriString]> {
        self.resources.as_deref()
    }

    pub fn issued_at_time(&self) -> DateTime<Utc> {
        self.issued_at.instant()
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration_time.as_ref().map(DateTimeString::instant)
    }

    pub fn not_before_time(&self) -> Option<DateTime<Utc>> {
        self.not_before.as_ref().map(DateTimeString::instant)
    }

    /// True if an expiration time is set and `now` is at or past it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time
            .as_ref()
            .is_some_and(|exp| now >= exp.instant())
    }

    /// True if a not-before time is set and `now` is earlier.
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before.as_ref().is_some_and(|nbf| now < nbf.instant())
    }

    /// Within the message's own time bounds at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && !self.is_not_yet_valid_at(now)
    }
}

impl fmt::Display for SiwxMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        canonical::write_canonical(self, f)
    }
}

impl FromStr for SiwxMessage {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<MessageFields> for SiwxMessage {
    type Error = FieldError;

    fn try_from(fields: MessageFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}
