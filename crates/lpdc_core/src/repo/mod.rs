//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the persistence collaborators the services depend on.
//! - Keep SQL and storage layout inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate aggregates before touching storage.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Missing entities surface as `RepoError::NotFound`.

pub mod address_fetcher;
pub mod bestuurseenheid_repo;
pub mod choice_repo;
pub mod concept_repo;
pub mod display_config_repo;
pub mod error;
pub mod instance_repo;

pub use address_fetcher::{AddressFetcher, AddressMatch, InMemoryAddressRegister};
pub use bestuurseenheid_repo::{BestuurseenheidRepository, SqliteBestuurseenheidRepository};
pub use choice_repo::{FormalInformalChoiceRepository, SqliteFormalInformalChoiceRepository};
pub use concept_repo::{
    ConceptRepository, ConceptSnapshotRepository, SqliteConceptRepository,
    SqliteConceptSnapshotRepository,
};
pub use display_config_repo::{
    ConceptDisplayConfigurationRepository, SqliteConceptDisplayConfigurationRepository,
};
pub use error::{ConcurrentUpdateError, RepoError, RepoResult};
pub use instance_repo::{InstanceReference, InstanceRepository, SqliteInstanceRepository};
