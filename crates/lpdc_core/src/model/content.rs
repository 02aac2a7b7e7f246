//! Service description content shared by concepts, snapshots and instances.
//!
//! # Responsibility
//! - Hold the concept-owned field set (texts, dates, classifications,
//!   authority levels and sets, publication media, keywords, child
//!   collections).
//! - Provide the bulk transformations the reconciliation and lifecycle
//!   services apply: localize-from-concept, register conversion and
//!   re-identification.
//!
//! # Invariants
//! - Keywords always live in the neutral `nl` register.
//! - Child `order` values are unique per collection.

use crate::model::children::{
    collection_changed, copy_all_from_concept, transform_languages, validate_collection,
    with_new_identities, ChildValueObject, Cost, FinancialAdvantage, LegalResource, Procedure,
    Requirement, Website,
};
use crate::model::codes::{
    CompetentAuthorityLevel, ExecutingAuthorityLevel, ProductType, PublicationMedium,
    TargetAudience, Theme,
};
use crate::model::date::FormatPreservingDate;
use crate::model::identity::IdentityGenerator;
use crate::model::invariant::{require_no_duplicates, InvariantResult};
use crate::model::iri::Iri;
use crate::model::language::{Language, LanguageString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicServiceContent {
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub additional_description: Option<LanguageString>,
    pub exception: Option<LanguageString>,
    pub regulation: Option<LanguageString>,
    pub start_date: Option<FormatPreservingDate>,
    pub end_date: Option<FormatPreservingDate>,
    pub product_type: Option<ProductType>,
    pub target_audiences: Vec<TargetAudience>,
    pub themes: Vec<Theme>,
    pub competent_authority_levels: Vec<CompetentAuthorityLevel>,
    pub competent_authorities: Vec<Iri>,
    pub executing_authority_levels: Vec<ExecutingAuthorityLevel>,
    pub executing_authorities: Vec<Iri>,
    pub publication_media: Vec<PublicationMedium>,
    /// Your Europe category codes; the code list is too large to enumerate.
    pub your_europe_categories: Vec<Iri>,
    pub keywords: Vec<LanguageString>,
    pub requirements: Vec<Requirement>,
    pub procedures: Vec<Procedure>,
    pub websites: Vec<Website>,
    pub costs: Vec<Cost>,
    pub financial_advantages: Vec<FinancialAdvantage>,
    pub legal_resources: Vec<LegalResource>,
}

impl PublicServiceContent {
    fn texts(&self) -> [Option<&LanguageString>; 5] {
        [
            self.title.as_ref(),
            self.description.as_ref(),
            self.additional_description.as_ref(),
            self.exception.as_ref(),
            self.regulation.as_ref(),
        ]
    }

    /// Registers in which this content has text, children included, keywords
    /// excluded.
    pub fn language_versions(&self) -> BTreeSet<Language> {
        let mut languages = LanguageString::extract_language_versions(self.texts());
        extend_children(&mut languages, &self.requirements);
        extend_children(&mut languages, &self.procedures);
        extend_children(&mut languages, &self.websites);
        extend_children(&mut languages, &self.costs);
        extend_children(&mut languages, &self.financial_advantages);
        extend_children(&mut languages, &self.legal_resources);
        languages
    }

    /// Copy for an instance: texts moved from the concept register `from` to
    /// the instance register `to`, every child freshly identified and linked to
    /// its concept-side source, keywords limited to those with a neutral value.
    pub fn localized_for_instance(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        let localize = |value: &Option<LanguageString>| {
            value
                .as_ref()
                .and_then(|value| localize_text(value, from, to))
        };
        Ok(Self {
            title: localize(&self.title),
            description: localize(&self.description),
            additional_description: localize(&self.additional_description),
            exception: localize(&self.exception),
            regulation: localize(&self.regulation),
            keywords: self
                .keywords
                .iter()
                .filter(|keyword| keyword.nl.is_some())
                .cloned()
                .collect(),
            requirements: copy_all_from_concept(&self.requirements, ids, from, to)?,
            procedures: copy_all_from_concept(&self.procedures, ids, from, to)?,
            websites: copy_all_from_concept(&self.websites, ids, from, to)?,
            costs: copy_all_from_concept(&self.costs, ids, from, to)?,
            financial_advantages: copy_all_from_concept(&self.financial_advantages, ids, from, to)?,
            legal_resources: copy_all_from_concept(&self.legal_resources, ids, from, to)?,
            ..self.clone()
        })
    }

    /// Same identities, every text moved from register `from` to `to`.
    pub fn transform_language(&self, from: Language, to: Language) -> Self {
        let transform = |value: &Option<LanguageString>| {
            value
                .as_ref()
                .and_then(|value| localize_text(value, from, to))
        };
        Self {
            title: transform(&self.title),
            description: transform(&self.description),
            additional_description: transform(&self.additional_description),
            exception: transform(&self.exception),
            regulation: transform(&self.regulation),
            requirements: transform_languages(&self.requirements, from, to),
            procedures: transform_languages(&self.procedures, from, to),
            websites: transform_languages(&self.websites, from, to),
            costs: transform_languages(&self.costs, from, to),
            financial_advantages: transform_languages(&self.financial_advantages, from, to),
            legal_resources: transform_languages(&self.legal_resources, from, to),
            ..self.clone()
        }
    }

    /// Same content, fresh identities for every child.
    pub fn with_new_child_identities(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        Ok(Self {
            requirements: with_new_identities(&self.requirements, ids)?,
            procedures: with_new_identities(&self.procedures, ids)?,
            websites: with_new_identities(&self.websites, ids)?,
            costs: with_new_identities(&self.costs, ids)?,
            financial_advantages: with_new_identities(&self.financial_advantages, ids)?,
            legal_resources: with_new_identities(&self.legal_resources, ids)?,
            ..self.clone()
        })
    }

    /// Content comparison that ignores child identities and compares dates by
    /// instant.
    pub fn is_functionally_changed(&self, other: &Self) -> bool {
        self.texts() != other.texts()
            || FormatPreservingDate::is_functionally_changed(
                self.start_date.as_ref(),
                other.start_date.as_ref(),
            )
            || FormatPreservingDate::is_functionally_changed(
                self.end_date.as_ref(),
                other.end_date.as_ref(),
            )
            || self.product_type != other.product_type
            || !same_members(&self.target_audiences, &other.target_audiences)
            || !same_members(&self.themes, &other.themes)
            || !same_members(
                &self.competent_authority_levels,
                &other.competent_authority_levels,
            )
            || !same_members(&self.competent_authorities, &other.competent_authorities)
            || !same_members(
                &self.executing_authority_levels,
                &other.executing_authority_levels,
            )
            || !same_members(&self.executing_authorities, &other.executing_authorities)
            || !same_members(&self.publication_media, &other.publication_media)
            || !same_members(&self.your_europe_categories, &other.your_europe_categories)
            || !same_members(&self.keywords, &other.keywords)
            || collection_changed(&self.requirements, &other.requirements)
            || collection_changed(&self.procedures, &other.procedures)
            || collection_changed(&self.websites, &other.websites)
            || collection_changed(&self.costs, &other.costs)
            || collection_changed(&self.financial_advantages, &other.financial_advantages)
            || collection_changed(&self.legal_resources, &other.legal_resources)
    }

    pub fn validate(&self) -> InvariantResult<()> {
        require_no_duplicates(&self.target_audiences, "target audiences")?;
        require_no_duplicates(&self.themes, "themes")?;
        require_no_duplicates(
            &self.competent_authority_levels,
            "competent authority levels",
        )?;
        require_no_duplicates(&self.competent_authorities, "competent authorities")?;
        require_no_duplicates(
            &self.executing_authority_levels,
            "executing authority levels",
        )?;
        require_no_duplicates(&self.executing_authorities, "executing authorities")?;
        require_no_duplicates(&self.publication_media, "publication media")?;
        require_no_duplicates(&self.your_europe_categories, "your europe categories")?;
        validate_collection(&self.requirements, "requirements")?;
        validate_collection(&self.procedures, "procedures")?;
        validate_collection(&self.websites, "websites")?;
        validate_collection(&self.costs, "costs")?;
        validate_collection(&self.financial_advantages, "financial advantages")?;
        validate_collection(&self.legal_resources, "legal resources")
    }
}

/// The `from` value placed in `to`, English kept. `None` when nothing remains.
pub(crate) fn localize_text(value: &LanguageString, from: Language, to: Language) -> Option<LanguageString> {
    let transformed = value.transform_language(from, to);
    if transformed.is_empty() {
        None
    } else {
        Some(transformed)
    }
}

fn extend_children<T: ChildValueObject>(languages: &mut BTreeSet<Language>, items: &[T]) {
    for item in items {
        languages.extend(item.language_versions());
    }
}

fn same_members<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    left.len() == right.len() && left.iter().all(|item| right.contains(item))
}
