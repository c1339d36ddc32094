use std::{fmt, sync::OnceLock};

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Taxpayer identifier (RFC).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rfc(String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RfcError {
    #[error("`{0}` does not follow the RFC pattern")]
    Pattern(String),
    #[error("`{0}` contains an invalid date")]
    Date(String),
}

fn rfc_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-ZÑ&]{3,4}([0-9]{2})([0-9]{2})([0-9]{2})[A-Z0-9]{3}$")
            .expect("RFC pattern is a valid regex")
    })
}

impl Rfc {
    /// Parse an RFC, normalizing it to upper case.
    pub fn parse(value: &str) -> Result<Self, RfcError> {
        let normalized = value.trim().to_uppercase();
        let captures = rfc_pattern()
            .captures(&normalized)
            .ok_or_else(|| RfcError::Pattern(value.to_string()))?;

        let number = |index: usize| -> u32 {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or_default()
        };
        // Two-digit years are ambiguous; 2000-based years accept every valid day and month.
        let (year, month, day) = (2000 + number(1) as i32, number(2), number(3));
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            return Err(RfcError::Date(value.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rfc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
