//! Timestamp value type that keeps its literal form.
//!
//! # Responsibility
//! - Carry ISO-8601 timestamps exactly as received (business dates and
//!   optimistic-concurrency version tokens).
//! - Compare timestamps by instant, ignoring fractional-second padding.
//!
//! # Invariants
//! - The literal is never reformatted; `value()` returns the original bytes.
//! - Every stored literal parses to an instant.

use crate::model::invariant::{InvariantError, InvariantResult};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// ISO-8601 timestamp whose literal serialization is preserved byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatPreservingDate {
    value: String,
    #[serde(skip)]
    instant: DateTime<Utc>,
}

impl FormatPreservingDate {
    /// Parses a literal while retaining it unchanged.
    ///
    /// Literals without offset are read as UTC.
    ///
    /// # Errors
    /// - Returns `InvariantError` when `value` is not an ISO-8601 date-time.
    pub fn of(value: impl Into<String>) -> InvariantResult<Self> {
        let value = value.into();
        let instant = parse_instant(value.trim()).ok_or_else(|| {
            InvariantError::new(format!("date `{value}` is not a valid ISO-8601 date-time"))
        })?;
        Ok(Self { value, instant })
    }

    /// Builds a literal with millisecond precision from an instant.
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            value: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }

    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }

    /// Literal form, exactly as received.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Strictly earlier instant.
    pub fn before(&self, other: &Self) -> bool {
        self.instant < other.instant
    }

    /// Strictly later instant.
    pub fn after(&self, other: &Self) -> bool {
        self.instant > other.instant
    }

    /// Same instant, regardless of literal padding.
    pub fn same_instant(&self, other: &Self) -> bool {
        self.instant == other.instant
    }

    /// Returns `false` only when both sides denote the same instant or are both
    /// absent.
    pub fn is_functionally_changed(left: Option<&Self>, right: Option<&Self>) -> bool {
        match (left, right) {
            (None, None) => false,
            (Some(left), Some(right)) => !left.same_instant(right),
            _ => true,
        }
    }
}

impl Display for FormatPreservingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for FormatPreservingDate {
    type Error = InvariantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::of(value)
    }
}

impl From<FormatPreservingDate> for String {
    fn from(value: FormatPreservingDate) -> Self {
        value.value
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
