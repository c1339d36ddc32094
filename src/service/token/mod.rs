//! Authentication token value object and its cache record format.
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub mod cache;
pub mod session;

pub use cache::{TokenCache, TokenStore};
pub use session::TokenGuardedSession;

/// Token issued by the web service after authenticating with the eFirma.
///
/// Timestamps keep whole-second precision, which is what the cache record
/// stores, so a token survives a serialize/deserialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    created: DateTime<Utc>,
    expires: DateTime<Utc>,
    value: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("token value must not be empty")]
pub struct EmptyTokenValue;

impl Token {
    pub fn new(
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
        value: impl Into<String>,
    ) -> Result<Self, EmptyTokenValue> {
        let value = value.into();
        if value.is_empty() {
            return Err(EmptyTokenValue);
        }
        Ok(Self {
            created: created.trunc_subsecs(0),
            expires: expires.trunc_subsecs(0),
            value,
        })
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// A token is usable while `now` is inside `[created, expires)`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.created <= now && now < self.expires
    }

    /// Compact JSON form written to the cache file.
    pub fn serialize(&self) -> String {
        let record = CacheRecord {
            created: self.created.timestamp(),
            expires: self.expires.timestamp(),
            token: &self.value,
        };
        // Serializing two integers and a string cannot fail.
        serde_json::to_string(&record).unwrap_or_default()
    }

    /// Parse a cache record, reporting the first offending field.
    pub fn deserialize(contents: &str) -> Result<Self, RecordError> {
        let document: Value =
            serde_json::from_str(contents).map_err(|err| RecordError::new("document", err))?;
        let values = document
            .as_object()
            .ok_or_else(|| RecordError::new("document", "JSON content is not an object"))?;

        let created = timestamp_field(values.get("created"), "created")?;
        let expires = timestamp_field(values.get("expires"), "expires")?;
        let value = match values.get("token").and_then(Value::as_str) {
            Some(value) if !value.is_empty() => value,
            _ => return Err(RecordError::new("token", "expected a non-empty string")),
        };

        Token::new(created, expires, value).map_err(|err| RecordError::new("token", err))
    }
}

#[derive(Serialize)]
struct CacheRecord<'a> {
    created: i64,
    expires: i64,
    token: &'a str,
}

/// Structural problem found while reading a cache record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value on key `{field}`: {reason}")]
pub struct RecordError {
    pub field: &'static str,
    pub reason: String,
}

impl RecordError {
    fn new(field: &'static str, reason: impl ToString) -> Self {
        Self {
            field,
            reason: reason.to_string(),
        }
    }
}

fn timestamp_field(value: Option<&Value>, field: &'static str) -> Result<DateTime<Utc>, RecordError> {
    let seconds = value
        .and_then(Value::as_i64)
        .ok_or_else(|| RecordError::new(field, "expected an integer"))?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| RecordError::new(field, "timestamp out of range"))
}
