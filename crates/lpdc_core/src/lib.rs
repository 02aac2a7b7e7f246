//! Core domain logic for the public service catalog.
//! This crate is the single source of truth for business invariants of
//! concepts, snapshots and authority-owned instances.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod semantic;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, open_db_with_config, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::authority::{Bestuurseenheid, ChosenForm, FormalInformalChoice};
pub use model::concept::{Concept, ConceptDisplayConfiguration, ConceptSnapshot};
pub use model::date::FormatPreservingDate;
pub use model::instance::Instance;
pub use model::invariant::{InvariantError, InvariantResult};
pub use model::iri::Iri;
pub use model::language::{Language, LanguageString};
pub use repo::{ConcurrentUpdateError, RepoError, RepoResult};
pub use service::{ServiceContext, ServiceError, ServiceResult, SqliteRepositories};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
