//! Authority-owned, editable public service instance.
//!
//! # Responsibility
//! - Hold an authority's copy of a service description plus its lifecycle,
//!   review and publication state.
//! - Enforce aggregate invariants on every derived value (`validated`).
//!
//! # Invariants
//! - `concept_id`, `concept_snapshot_id` and `product_id` are all present or
//!   all absent; a review status needs a linked concept.
//! - A sent instance has `date_sent`; a publication status needs
//!   `date_published`.
//! - Every Dutch text uses exactly `dutch_language_variant`.
//! - `needs_conversion_from_formal_to_informal` is only set on instances that
//!   are not informal yet.
//!
//! Instances are values: operations return a new instance and never mutate
//! the receiver. Derive variations with struct update syntax and finish with
//! `validated()`.

use crate::model::authority::{ChosenForm, FormalInformalChoice};
use crate::model::children::{validate_collection, ContactPoint};
use crate::model::codes::{
    InstancePublicationStatus, InstanceReviewStatus, InstanceStatus, LanguageType,
};
use crate::model::content::PublicServiceContent;
use crate::model::date::FormatPreservingDate;
use crate::model::invariant::{
    require_all_present_or_all_absent, require_no_duplicates, require_non_blank, InvariantError,
    InvariantResult,
};
use crate::model::iri::Iri;
use crate::model::language::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: Iri,
    pub uuid: String,
    /// Owning authority.
    pub created_by: Iri,
    pub content: PublicServiceContent,
    pub contact_points: Vec<ContactPoint>,
    pub concept_id: Option<Iri>,
    pub concept_snapshot_id: Option<Iri>,
    pub product_id: Option<String>,
    pub languages: Vec<LanguageType>,
    pub dutch_language_variant: Language,
    pub needs_conversion_from_formal_to_informal: bool,
    pub date_created: FormatPreservingDate,
    /// Also the optimistic-concurrency version token.
    pub date_modified: FormatPreservingDate,
    pub date_sent: Option<FormatPreservingDate>,
    pub date_published: Option<FormatPreservingDate>,
    pub status: InstanceStatus,
    pub review_status: Option<InstanceReviewStatus>,
    pub publication_status: Option<InstancePublicationStatus>,
    pub spatials: Vec<Iri>,
    pub for_municipality_merger: bool,
    pub copy_of: Option<Iri>,
}

impl Instance {
    /// Returns `self` when every aggregate invariant holds.
    pub fn validated(self) -> InvariantResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "instance uuid")?;
        require_all_present_or_all_absent(
            &[
                self.concept_id.is_some(),
                self.concept_snapshot_id.is_some(),
                self.product_id.is_some(),
            ],
            "concept id, concept snapshot id and product id",
        )?;
        if self.review_status.is_some() && self.concept_id.is_none() {
            return Err(InvariantError::new(
                "review status can only be present when a concept is linked",
            ));
        }
        if self.status == InstanceStatus::Sent && self.date_sent.is_none() {
            return Err(InvariantError::new(
                "date sent should be present when status is sent",
            ));
        }
        if self.publication_status.is_some() && self.date_published.is_none() {
            return Err(InvariantError::new(
                "date published should be present when publication status is present",
            ));
        }
        if !matches!(
            self.dutch_language_variant,
            Language::Nl | Language::Formal | Language::Informal
        ) {
            return Err(InvariantError::new(format!(
                "dutch language variant `{}` is not allowed for an instance",
                self.dutch_language_variant.tag()
            )));
        }
        if self.needs_conversion_from_formal_to_informal
            && self.dutch_language_variant == Language::Informal
        {
            return Err(InvariantError::new(
                "an informal instance cannot need conversion from formal to informal",
            ));
        }
        for language in self.content.language_versions() {
            if language.is_dutch() && language != self.dutch_language_variant {
                return Err(InvariantError::new(format!(
                    "instance texts use `{}` while the dutch language variant is `{}`",
                    language.tag(),
                    self.dutch_language_variant.tag()
                )));
            }
        }
        require_no_duplicates(&self.languages, "languages")?;
        require_no_duplicates(&self.spatials, "spatials")?;
        self.content.validate()?;
        validate_collection(&self.contact_points, "contact points")
    }

    pub fn is_linked_to_concept(&self) -> bool {
        self.concept_id.is_some()
    }

    /// Whether the last version of this instance is the published one.
    ///
    /// A reopened instance stays "to be republished" until it is published
    /// again, even though an older version is still online.
    pub fn is_published(&self) -> bool {
        self.publication_status == Some(InstancePublicationStatus::Published)
    }

    /// Sent → Draft. A published instance becomes "to be republished".
    ///
    /// # Errors
    /// - Returns `InvariantError` when the instance is already a draft.
    pub fn reopen(&self) -> InvariantResult<Self> {
        if self.status == InstanceStatus::Draft {
            return Err(InvariantError::new("instance is already in status draft"));
        }
        let publication_status = match self.publication_status {
            Some(InstancePublicationStatus::Published) => {
                Some(InstancePublicationStatus::ToBeRepublished)
            }
            other => other,
        };
        Self {
            status: InstanceStatus::Draft,
            publication_status,
            ..self.clone()
        }
        .validated()
    }

    /// Draft → Sent.
    ///
    /// # Errors
    /// - Returns `InvariantError` when the instance is already sent.
    pub fn publish(&self, date_sent: FormatPreservingDate) -> InvariantResult<Self> {
        if self.status == InstanceStatus::Sent {
            return Err(InvariantError::new("instance is already sent"));
        }
        Self {
            status: InstanceStatus::Sent,
            date_sent: Some(date_sent),
            ..self.clone()
        }
        .validated()
    }

    /// Records a completed publication of the sent version.
    pub fn mark_published(&self, date_published: FormatPreservingDate) -> InvariantResult<Self> {
        if self.status != InstanceStatus::Sent {
            return Err(InvariantError::new(
                "only a sent instance can be marked as published",
            ));
        }
        Self {
            publication_status: Some(InstancePublicationStatus::Published),
            date_published: Some(date_published),
            ..self.clone()
        }
        .validated()
    }

    /// Derived conversion flag for the given authority preference.
    pub fn needs_conversion_for(&self, choice: Option<&FormalInformalChoice>) -> bool {
        choice.map(|choice| choice.chosen_form) == Some(ChosenForm::Informal)
            && self.dutch_language_variant != Language::Informal
    }
}
