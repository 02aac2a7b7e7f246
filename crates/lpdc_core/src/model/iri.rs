//! Global identifier value type.

use crate::model::invariant::{InvariantError, InvariantResult};
use once_cell::sync::Lazy;
use oxigraph::model::{NamedNode, Term};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static IRI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>]+$").expect("valid iri regex"));

/// Opaque, URI-shaped identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    /// Validates and wraps an identifier.
    ///
    /// # Errors
    /// - Returns `InvariantError` when `value` is blank or not URI-shaped.
    pub fn new(value: impl Into<String>) -> InvariantResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(InvariantError::new("iri should not be absent"));
        }
        if !IRI_RE.is_match(&value) {
            return Err(InvariantError::new(format!("iri `{value}` is not valid")));
        }
        Ok(Self(value))
    }

    /// Wraps an identifier known to be valid, such as a vocabulary constant.
    pub(crate) fn trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&Iri> for NamedNode {
    fn from(value: &Iri) -> Self {
        NamedNode::new_unchecked(value.0.as_str())
    }
}

impl From<Iri> for NamedNode {
    fn from(value: Iri) -> Self {
        NamedNode::new_unchecked(value.0)
    }
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Term::NamedNode(value.into())
    }
}

impl TryFrom<&NamedNode> for Iri {
    type Error = InvariantError;

    fn try_from(value: &NamedNode) -> Result<Self, Self::Error> {
        Self::new(value.as_str())
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iri {
    type Error = InvariantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.0
    }
}
