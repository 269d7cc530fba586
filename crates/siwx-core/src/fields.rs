//! Validated message fields.
//!
//! Every field of a SIWx message is a newtype that can only be constructed
//! from a value satisfying that field's grammar. Values are stored exactly as
//! given: a field that is already canonical passes through unchanged, so
//! parsing the serialized text yields the same value back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::error::{FieldError, FieldName};

/// The only message version currently defined.
pub const SUPPORTED_VERSION: &str = "1";

/// Minimum nonce length, in characters.
pub const MIN_NONCE_LENGTH: usize = 8;

/// Shared impls for string-backed field types.
macro_rules! string_field {
    ($name:ident) => {
        impl $name {
            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the underlying string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

/// Adds `FromStr` / `TryFrom<String>` / `Deserialize` for fields that need
/// no name context.
macro_rules! parse_impls {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(raw).map_err(de::Error::custom)
            }
        }
    };
}

/// Rejects empty values and anything that would break the line structure.
fn check_single_line(field: FieldName, raw: &str) -> Result<(), FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(field, raw, "must not be empty"));
    }
    if raw.chars().any(char::is_control) {
        return Err(FieldError::new(
            field,
            raw,
            "must be a single line without control characters",
        ));
    }
    Ok(())
}

/// Like [`check_single_line`], and additionally rejects any whitespace.
fn check_token(field: FieldName, raw: &str) -> Result<(), FieldError> {
    check_single_line(field, raw)?;
    if raw.chars().any(char::is_whitespace) {
        return Err(FieldError::new(field, raw, "must not contain whitespace"));
    }
    Ok(())
}

/// RFC 3986 authority of the requesting site: `host[:port]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DomainString(String);

impl DomainString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(FieldName::Domain, &raw)?;
        if raw.contains("://") {
            return Err(FieldError::new(
                FieldName::Domain,
                raw,
                "must not include a scheme",
            ));
        }
        if raw.contains(['/', '\\', '?', '#', '@']) {
            return Err(FieldError::new(
                FieldName::Domain,
                raw,
                "must be host[:port] without path, query, fragment or userinfo",
            ));
        }
        if raw.ends_with(':') {
            return Err(FieldError::new(FieldName::Domain, raw, "empty port"));
        }
        match Url::parse(&format!("https://{raw}")) {
            Ok(url) if url.path() != "/" || url.query().is_some() || url.fragment().is_some() => {
                Err(FieldError::new(
                    FieldName::Domain,
                    raw,
                    "must be host[:port] without path, query, fragment or userinfo",
                ))
            }
            Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(Self(raw)),
            Ok(_) => Err(FieldError::new(FieldName::Domain, raw, "missing host")),
            Err(e) => Err(FieldError::new(
                FieldName::Domain,
                raw,
                format!("not a valid authority: {e}"),
            )),
        }
    }
}

string_field!(DomainString);
parse_impls!(DomainString);

/// Human-readable chain family label, e.g. `Ethereum`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NetworkString(String);

impl NetworkString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_single_line(FieldName::Network, &raw)?;
        if raw.contains(" account:") {
            return Err(FieldError::new(
                FieldName::Network,
                raw,
                "must not contain the header separator \" account:\"",
            ));
        }
        Ok(Self(raw))
    }
}

string_field!(NetworkString);
parse_impls!(NetworkString);

/// Network-specific account string. Case is preserved as given.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AddressString(String);

impl AddressString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(FieldName::Address, &raw)?;
        Ok(Self(raw))
    }
}

string_field!(AddressString);
parse_impls!(AddressString);

/// Non-empty single-line text, used for `statement` and `requestId`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    pub fn parse(raw: impl Into<String>, field: FieldName) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_single_line(field, &raw)?;
        Ok(Self(raw))
    }
}

string_field!(NonEmptyString);

/// Absolute URI, kept verbatim (no normalization).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UriString(String);

impl UriString {
    /// `field` is [`FieldName::Uri`] or [`FieldName::Resources`].
    pub fn parse(raw: impl Into<String>, field: FieldName) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(field, &raw)?;
        Url::parse(&raw)
            .map_err(|e| {
                FieldError::new(field, raw.as_str(), format!("not an absolute URI: {e}"))
            })?;
        Ok(Self(raw))
    }
}

string_field!(UriString);

/// Message version. Integer-valued; only `1` exists.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VersionString(String);

impl VersionString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        match raw.parse::<u32>() {
            Ok(_) if raw == SUPPORTED_VERSION => Ok(Self(raw)),
            Ok(_) => Err(FieldError::new(
                FieldName::Version,
                raw,
                format!("unsupported version, expected {SUPPORTED_VERSION}"),
            )),
            Err(_) => Err(FieldError::new(
                FieldName::Version,
                raw,
                "must be an integer",
            )),
        }
    }
}

impl Default for VersionString {
    fn default() -> Self {
        Self(SUPPORTED_VERSION.to_string())
    }
}

string_field!(VersionString);
parse_impls!(VersionString);

/// Chain reference (CAIP-2 reference part), e.g. `1` or a genesis hash prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChainIdString(String);

impl ChainIdString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(FieldName::ChainId, &raw)?;
        Ok(Self(raw))
    }
}

impl From<u64> for ChainIdString {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

string_field!(ChainIdString);
parse_impls!(ChainIdString);

/// Replay-protection nonce, at least [`MIN_NONCE_LENGTH`] characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NonceString(String);

impl NonceString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(FieldName::Nonce, &raw)?;
        if raw.chars().count() < MIN_NONCE_LENGTH {
            return Err(FieldError::new(
                FieldName::Nonce,
                raw,
                format!("must be at least {MIN_NONCE_LENGTH} characters"),
            ));
        }
        Ok(Self(raw))
    }
}

string_field!(NonceString);
parse_impls!(NonceString);

/// ISO-8601 / RFC 3339 date-time, stored verbatim alongside its UTC instant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DateTimeString {
    raw: String,
    instant: DateTime<Utc>,
}

impl DateTimeString {
    /// `field` is one of `issuedAt`, `expirationTime`, `notBefore`.
    pub fn parse(raw: impl Into<String>, field: FieldName) -> Result<Self, FieldError> {
        let raw = raw.into();
        check_token(field, &raw)?;
        let instant = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| {
                FieldError::new(field, raw.as_str(), format!("not an ISO-8601 date-time: {e}"))
            })?
            .with_timezone(&Utc);
        Ok(Self { raw, instant })
    }

    /// Format a structured time: seconds precision, `Z` suffix.
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        let instant = time.trunc_subsecs(0);
        Self {
            raw: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            instant,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The instant this string denotes, in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn into_inner(self) -> String {
        self.raw
    }
}

impl fmt::Debug for DateTimeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTimeString({:?})", self.raw)
    }
}

impl fmt::Display for DateTimeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for DateTimeString {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl From<DateTimeString> for String {
    fn from(value: DateTimeString) -> Self {
        value.raw
    }
}

impl Serialize for DateTimeString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
