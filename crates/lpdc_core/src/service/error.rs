//! Service-level error model.

use crate::model::invariant::InvariantError;
use crate::repo::{ConcurrentUpdateError, RepoError};
use crate::semantic::{SemanticError, StatementMappingError, StatementParseError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Business rule breach; the caller's fault, never retried.
    Invariant(InvariantError),
    /// Stale version token; recoverable by reload and retry.
    ConcurrentUpdate(ConcurrentUpdateError),
    NotFound { kind: &'static str, id: String },
    Parse(StatementParseError),
    Mapping(StatementMappingError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invariant(err) => write!(f, "{err}"),
            Self::ConcurrentUpdate(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Mapping(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(err) => Some(err),
            Self::ConcurrentUpdate(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Parse(err) => Some(err),
            Self::Mapping(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ConcurrentUpdate(err) => Self::ConcurrentUpdate(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::Invariant(err) => Self::Invariant(err),
            other => Self::Repo(other),
        }
    }
}

impl From<InvariantError> for ServiceError {
    fn from(value: InvariantError) -> Self {
        Self::Invariant(value)
    }
}

impl From<SemanticError> for ServiceError {
    fn from(value: SemanticError) -> Self {
        match value {
            SemanticError::Parse(err) => Self::Parse(err),
            SemanticError::Mapping(StatementMappingError::Invariant(err)) => Self::Invariant(err),
            SemanticError::Mapping(err) => Self::Mapping(err),
        }
    }
}

impl ServiceError {
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    pub fn is_concurrent_update(&self) -> bool {
        matches!(self, Self::ConcurrentUpdate(_))
    }
}
