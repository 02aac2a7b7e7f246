//! Business-rule violations raised by domain constructors and operations.
//!
//! # Responsibility
//! - Provide one error type for caller-caused rule breaches.
//! - Offer small `require_*` helpers so constructors read as a list of rules.
//!
//! # Invariants
//! - Messages are stable; callers and tests may match on them.
//! - An `InvariantError` is never retried by core.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// Caller-caused business-rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError {
    message: String,
}

impl InvariantError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl Display for InvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for InvariantError {}

pub type InvariantResult<T> = Result<T, InvariantError>;

/// Rejects blank text values.
pub fn require_non_blank(value: &str, name: &str) -> InvariantResult<()> {
    if value.trim().is_empty() {
        return Err(InvariantError::new(format!("{name} should not be absent")));
    }
    Ok(())
}

/// Rejects a combination where only some of the named values are present.
pub fn require_all_present_or_all_absent(present: &[bool], names: &str) -> InvariantResult<()> {
    let count = present.iter().filter(|value| **value).count();
    if count != 0 && count != present.len() {
        return Err(InvariantError::new(format!(
            "{names} should all be present or all be absent"
        )));
    }
    Ok(())
}

/// Rejects collections containing the same value twice.
pub fn require_no_duplicates<T: Eq + Hash>(values: &[T], name: &str) -> InvariantResult<()> {
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        if !seen.insert(value) {
            return Err(InvariantError::new(format!(
                "{name} should not contain duplicates"
            )));
        }
    }
    Ok(())
}

/// Rejects child collections whose `order` values collide.
pub fn require_unique_orders(
    orders: impl IntoIterator<Item = i64>,
    name: &str,
) -> InvariantResult<()> {
    let orders = orders.into_iter().collect::<Vec<_>>();
    require_no_duplicates(&orders, &format!("{name} order"))
}

#[cfg(test)]
mod tests {
    use super::{require_all_present_or_all_absent, require_no_duplicates, require_unique_orders};

    #[test]
    fn all_present_or_absent_accepts_both_extremes() {
        assert!(require_all_present_or_all_absent(&[true, true], "a, b").is_ok());
        assert!(require_all_present_or_all_absent(&[false, false], "a, b").is_ok());
        let err = require_all_present_or_all_absent(&[true, false], "a, b").unwrap_err();
        assert_eq!(err.message(), "a, b should all be present or all be absent");
    }

    #[test]
    fn duplicate_orders_are_rejected() {
        assert!(require_unique_orders([1, 2, 3], "requirements").is_ok());
        let err = require_unique_orders([1, 1], "requirements").unwrap_err();
        assert!(err.message().contains("requirements order"));
        assert!(require_no_duplicates(&["x", "y"], "codes").is_ok());
    }
}
