//! Statement-level projection of instances.
//!
//! # Responsibility
//! - Model graph statements and the set algebra of partial edits.
//! - Parse Turtle edit fragments and serialize statements.
//! - Map instances to statements and back.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod instance_mapper;
pub mod statement;
pub mod turtle;
pub mod vocab;

pub use instance_mapper::{
    InstanceStatementMapper, MappingResult, SemanticFormsMapper, StatementMappingError,
};
pub use statement::{Literal, Statement, StatementSet, Term};
pub use turtle::{parse_statements, serialize_statements, StatementParseError};

/// Failure of a delta merge: either fragment was malformed or the merged
/// statements no longer describe a valid instance.
#[derive(Debug)]
pub enum SemanticError {
    Parse(StatementParseError),
    Mapping(StatementMappingError),
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Mapping(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SemanticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Mapping(err) => Some(err),
        }
    }
}

impl From<StatementParseError> for SemanticError {
    fn from(value: StatementParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<StatementMappingError> for SemanticError {
    fn from(value: StatementMappingError) -> Self {
        Self::Mapping(value)
    }
}
