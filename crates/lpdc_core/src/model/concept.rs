//! Centrally maintained concepts and their immutable snapshots.
//!
//! # Responsibility
//! - Model the upstream, read-only side of the catalog.
//! - Expose available registers through `LanguageVersionSource` so concepts and
//!   snapshots are interchangeable for language selection.
//!
//! # Invariants
//! - A snapshot is never mutated after creation; snapshots order by
//!   `generated_at_time`.
//! - `Concept::latest_concept_snapshot` is never listed among
//!   `previous_concept_snapshots`.

use crate::model::content::PublicServiceContent;
use crate::model::date::FormatPreservingDate;
use crate::model::invariant::{require_non_blank, InvariantError, InvariantResult};
use crate::model::iri::Iri;
use crate::model::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Document whose content is available in a set of registers.
pub trait LanguageVersionSource {
    fn language_versions(&self) -> BTreeSet<Language>;
}

/// Canonical, centrally maintained service description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: Iri,
    pub uuid: String,
    pub content: PublicServiceContent,
    pub product_id: String,
    pub latest_concept_snapshot: Iri,
    pub previous_concept_snapshots: BTreeSet<Iri>,
    /// Advances only on non-cosmetic changes.
    pub latest_functionally_changed_concept_snapshot: Iri,
    pub is_archived: bool,
}

impl Concept {
    pub fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "concept uuid")?;
        require_non_blank(&self.product_id, "concept product id")?;
        if self
            .previous_concept_snapshots
            .contains(&self.latest_concept_snapshot)
        {
            return Err(InvariantError::new(
                "latest concept snapshot should not be a previous concept snapshot",
            ));
        }
        self.content.validate()
    }

    /// Every snapshot id belonging to this concept.
    pub fn all_snapshot_ids(&self) -> BTreeSet<&Iri> {
        let mut ids = self.previous_concept_snapshots.iter().collect::<BTreeSet<_>>();
        ids.insert(&self.latest_concept_snapshot);
        ids
    }
}

impl LanguageVersionSource for Concept {
    fn language_versions(&self) -> BTreeSet<Language> {
        self.content.language_versions()
    }
}

/// One immutable historical version of a concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSnapshot {
    pub id: Iri,
    pub content: PublicServiceContent,
    pub is_version_of_concept: Iri,
    pub date_created: FormatPreservingDate,
    pub date_modified: FormatPreservingDate,
    pub generated_at_time: FormatPreservingDate,
    pub product_id: String,
    pub is_archived: bool,
}

impl ConceptSnapshot {
    pub fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.product_id, "concept snapshot product id")?;
        self.content.validate()
    }

    /// Whether `other` differs from `self` in anything a reader would notice.
    /// Identities and generation metadata are ignored.
    pub fn is_functionally_changed(&self, other: &ConceptSnapshot) -> bool {
        self.is_archived != other.is_archived
            || self.product_id != other.product_id
            || self.content.is_functionally_changed(&other.content)
    }
}

impl LanguageVersionSource for ConceptSnapshot {
    fn language_versions(&self) -> BTreeSet<Language> {
        self.content.language_versions()
    }
}

/// Per-authority display flags for one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDisplayConfiguration {
    pub id: Iri,
    pub uuid: String,
    pub concept_is_new: bool,
    pub concept_is_instantiated: bool,
    pub bestuurseenheid_id: Iri,
    pub concept_id: Iri,
}
