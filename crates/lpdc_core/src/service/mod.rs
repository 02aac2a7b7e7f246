//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage and statement details.
//!
//! # Invariants
//! - Services are synchronous; their only blocking points are repository
//!   calls.
//! - Instance writes go through versioned updates; conflicts surface as
//!   `ServiceError::ConcurrentUpdate` and are never retried here.

pub mod clock;
pub mod concept_link;
pub mod concept_review;
pub mod context;
pub mod error;
pub mod formal_informal_choice;
pub mod informal_conversion;
pub mod instance_update;
pub mod language_selection;
pub mod lifecycle;
pub mod new_instance;
pub mod reconciliation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use concept_link::LinkConceptToInstanceService;
pub use concept_review::ConceptReviewService;
pub use context::{ServiceContext, SqliteRepositories};
pub use error::{ServiceError, ServiceResult};
pub use formal_informal_choice::FormalInformalChoiceService;
pub use informal_conversion::ConvertInstanceToInformalService;
pub use instance_update::InstanceUpdateService;
pub use language_selection::{
    select_language_for_choice, select_language_for_instance,
    select_language_using_informal_flag,
};
pub use lifecycle::InstanceLifecycleService;
pub use new_instance::NewInstanceDomainService;
pub use reconciliation::ConceptSnapshotReconciliationService;
