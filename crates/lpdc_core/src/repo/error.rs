//! Repository error model and connection readiness checks.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::semantic::StatementMappingError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Stored version token no longer matches the one the caller observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcurrentUpdateError {
    pub instance_id: Iri,
    pub expected_version: String,
    pub stored_version: String,
}

impl Display for ConcurrentUpdateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "instance {} was modified concurrently: expected version `{}`, stored version `{}`",
            self.instance_id, self.expected_version, self.stored_version
        )
    }
}

impl Error for ConcurrentUpdateError {}

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { kind: &'static str, id: String },
    AlreadyExists { kind: &'static str, id: String },
    ConcurrentUpdate(ConcurrentUpdateError),
    Invariant(InvariantError),
    Mapping(StatementMappingError),
    /// Stored rows cannot be turned back into domain values.
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl RepoError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::AlreadyExists { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::ConcurrentUpdate(err) => write!(f, "{err}"),
            Self::Invariant(err) => write!(f, "{err}"),
            Self::Mapping(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ConcurrentUpdate(err) => Some(err),
            Self::Invariant(err) => Some(err),
            Self::Mapping(err) => Some(err),
            Self::NotFound { .. }
            | Self::AlreadyExists { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ConcurrentUpdateError> for RepoError {
    fn from(value: ConcurrentUpdateError) -> Self {
        Self::ConcurrentUpdate(value)
    }
}

impl From<InvariantError> for RepoError {
    fn from(value: InvariantError) -> Self {
        Self::Invariant(value)
    }
}

impl From<StatementMappingError> for RepoError {
    fn from(value: StatementMappingError) -> Self {
        Self::Mapping(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Rejects connections that are not fully migrated or miss `tables`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    for &table in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn parse_iri(value: String, column: &str) -> RepoResult<Iri> {
    Iri::new(value).map_err(|err| RepoError::InvalidData(format!("{column}: {err}")))
}
