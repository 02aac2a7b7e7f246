//! Child value objects owned by concepts, snapshots and instances.
//!
//! # Responsibility
//! - Model requirements (with evidence), procedures (with websites), websites,
//!   costs, financial advantages, legal resources, contact points and
//!   addresses.
//! - Re-identify content whenever it crosses an aggregate boundary.
//!
//! # Invariants
//! - Copies across aggregates always get fresh ids/uuids, nested objects too.
//! - `concept_source_id` only points at concept-side ids.
//! - Address texts are not register-localized.

use crate::model::content::localize_text;
use crate::model::identity::{EntityKind, IdentityGenerator};
use crate::model::invariant::{require_non_blank, require_unique_orders, InvariantResult};
use crate::model::iri::Iri;
use crate::model::language::{Language, LanguageString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Behavior shared by ordered child collections.
pub trait ChildValueObject: Sized + Clone {
    fn id(&self) -> &Iri;

    fn order(&self) -> i64;

    /// Same content, fresh identity for this object and everything nested.
    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self>;

    /// Same identity, texts moved from one register to another.
    fn transform_language(&self, from: Language, to: Language) -> Self;

    /// Registers used by texts of this object.
    fn language_versions(&self) -> BTreeSet<Language>;

    /// Content comparison that ignores identities.
    fn is_functionally_changed(&self, other: &Self) -> bool;

    fn validate(&self) -> InvariantResult<()>;
}

/// Children that exist on the concept side and get copied into instances.
pub trait ConceptDerived: ChildValueObject {
    /// Instance-side copy: fresh identity, localized, linked to `self.id`.
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self>;
}

/// Re-identifies every item.
pub fn with_new_identities<T: ChildValueObject>(
    items: &[T],
    ids: &dyn IdentityGenerator,
) -> InvariantResult<Vec<T>> {
    items.iter().map(|item| item.with_new_identity(ids)).collect()
}

pub fn transform_languages<T: ChildValueObject>(items: &[T], from: Language, to: Language) -> Vec<T> {
    items
        .iter()
        .map(|item| item.transform_language(from, to))
        .collect()
}

pub fn copy_all_from_concept<T: ConceptDerived>(
    items: &[T],
    ids: &dyn IdentityGenerator,
    from: Language,
    to: Language,
) -> InvariantResult<Vec<T>> {
    items
        .iter()
        .map(|item| item.copy_from_concept(ids, from, to))
        .collect()
}

/// Compares collections by order, ignoring identities.
pub fn collection_changed<T: ChildValueObject>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return true;
    }
    let mut left = left.iter().collect::<Vec<_>>();
    let mut right = right.iter().collect::<Vec<_>>();
    left.sort_by_key(|item| item.order());
    right.sort_by_key(|item| item.order());
    left.iter()
        .zip(right.iter())
        .any(|(left, right)| left.is_functionally_changed(right))
}

pub fn validate_collection<T: ChildValueObject>(items: &[T], name: &str) -> InvariantResult<()> {
    for item in items {
        item.validate()?;
    }
    require_unique_orders(items.iter().map(ChildValueObject::order), name)
}

fn transform(value: &Option<LanguageString>, from: Language, to: Language) -> Option<LanguageString> {
    value
        .as_ref()
        .and_then(|value| localize_text(value, from, to))
}

fn versions(values: [&Option<LanguageString>; 2]) -> BTreeSet<Language> {
    LanguageString::extract_language_versions(values.into_iter().map(Option::as_ref))
}

/// Proof a requirement can be met with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub concept_source_id: Option<Iri>,
}

impl Evidence {
    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Evidence)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            ..self.clone()
        }
    }

    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        Ok(Self {
            concept_source_id: Some(self.id.clone()),
            ..self.with_new_identity(ids)?.transform_language(from, to)
        })
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title || self.description != other.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub order: i64,
    pub evidence: Option<Evidence>,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for Requirement {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Requirement)?;
        let evidence = self
            .evidence
            .as_ref()
            .map(|evidence| evidence.with_new_identity(ids))
            .transpose()?;
        Ok(Self {
            id,
            uuid,
            evidence,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            evidence: self
                .evidence
                .as_ref()
                .map(|evidence| evidence.transform_language(from, to)),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        let mut languages = versions([&self.title, &self.description]);
        if let Some(evidence) = &self.evidence {
            languages.extend(versions([&evidence.title, &evidence.description]));
        }
        languages
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        let evidence_changed = match (&self.evidence, &other.evidence) {
            (None, None) => false,
            (Some(left), Some(right)) => left.is_functionally_changed(right),
            _ => true,
        };
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
            || evidence_changed
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "requirement uuid")?;
        if let Some(evidence) = &self.evidence {
            require_non_blank(&evidence.uuid, "evidence uuid")?;
        }
        Ok(())
    }
}

impl ConceptDerived for Requirement {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Requirement)?;
        let evidence = self
            .evidence
            .as_ref()
            .map(|evidence| evidence.copy_from_concept(ids, from, to))
            .transpose()?;
        Ok(Self {
            id,
            uuid,
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            order: self.order,
            evidence,
            concept_source_id: Some(self.id.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub order: i64,
    pub url: Option<String>,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for Website {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Website)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        versions([&self.title, &self.description])
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
            || self.url != other.url
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "website uuid")
    }
}

impl ConceptDerived for Website {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        Ok(Self {
            concept_source_id: Some(self.id.clone()),
            ..self.with_new_identity(ids)?.transform_language(from, to)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub order: i64,
    pub websites: Vec<Website>,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for Procedure {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Procedure)?;
        Ok(Self {
            id,
            uuid,
            websites: with_new_identities(&self.websites, ids)?,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            websites: transform_languages(&self.websites, from, to),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        let mut languages = versions([&self.title, &self.description]);
        for website in &self.websites {
            languages.extend(website.language_versions());
        }
        languages
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
            || collection_changed(&self.websites, &other.websites)
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "procedure uuid")?;
        validate_collection(&self.websites, "procedure websites")
    }
}

impl ConceptDerived for Procedure {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Procedure)?;
        Ok(Self {
            id,
            uuid,
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            order: self.order,
            websites: copy_all_from_concept(&self.websites, ids, from, to)?,
            concept_source_id: Some(self.id.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub order: i64,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for Cost {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Cost)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        versions([&self.title, &self.description])
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "cost uuid")
    }
}

impl ConceptDerived for Cost {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        Ok(Self {
            concept_source_id: Some(self.id.clone()),
            ..self.with_new_identity(ids)?.transform_language(from, to)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAdvantage {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub order: i64,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for FinancialAdvantage {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::FinancialAdvantage)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        versions([&self.title, &self.description])
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "financial advantage uuid")
    }
}

impl ConceptDerived for FinancialAdvantage {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        Ok(Self {
            concept_source_id: Some(self.id.clone()),
            ..self.with_new_identity(ids)?.transform_language(from, to)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalResource {
    pub id: Iri,
    pub uuid: String,
    pub title: Option<LanguageString>,
    pub description: Option<LanguageString>,
    pub url: Option<String>,
    pub order: i64,
    pub concept_source_id: Option<Iri>,
}

impl ChildValueObject for LegalResource {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::LegalResource)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            title: transform(&self.title, from, to),
            description: transform(&self.description, from, to),
            ..self.clone()
        }
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        versions([&self.title, &self.description])
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.order != other.order
            || self.url != other.url
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "legal resource uuid")
    }
}

impl ConceptDerived for LegalResource {
    fn copy_from_concept(
        &self,
        ids: &dyn IdentityGenerator,
        from: Language,
        to: Language,
    ) -> InvariantResult<Self> {
        Ok(Self {
            concept_source_id: Some(self.id.clone()),
            ..self.with_new_identity(ids)?.transform_language(from, to)
        })
    }
}

/// Postal address of a contact point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Iri,
    pub uuid: String,
    /// `gemeentenaam`, neutral Dutch.
    pub municipality: Option<LanguageString>,
    /// `straatnaam`, neutral Dutch.
    pub street: Option<LanguageString>,
    pub house_number: Option<String>,
    pub box_number: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<LanguageString>,
    pub order: i64,
    /// Canonical address-register entry (`verwijstNaar`).
    pub register_id: Option<Iri>,
}

impl Address {
    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::Address)?;
        Ok(Self {
            id,
            uuid,
            ..self.clone()
        })
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        self.municipality != other.municipality
            || self.street != other.street
            || self.house_number != other.house_number
            || self.box_number != other.box_number
            || self.postcode != other.postcode
            || self.country != other.country
            || self.register_id != other.register_id
    }

    pub fn municipality_nl(&self) -> Option<&str> {
        self.municipality
            .as_ref()
            .and_then(|value| value.get(Language::Nl))
    }

    pub fn street_nl(&self) -> Option<&str> {
        self.street.as_ref().and_then(|value| value.get(Language::Nl))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub id: Iri,
    pub uuid: String,
    pub url: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub opening_hours: Option<String>,
    pub order: i64,
    pub address: Option<Address>,
}

impl ChildValueObject for ContactPoint {
    fn id(&self) -> &Iri {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn with_new_identity(&self, ids: &dyn IdentityGenerator) -> InvariantResult<Self> {
        let (id, uuid) = ids.new_identity(EntityKind::ContactPoint)?;
        let address = self
            .address
            .as_ref()
            .map(|address| address.with_new_identity(ids))
            .transpose()?;
        Ok(Self {
            id,
            uuid,
            address,
            ..self.clone()
        })
    }

    fn transform_language(&self, _from: Language, _to: Language) -> Self {
        self.clone()
    }

    fn language_versions(&self) -> BTreeSet<Language> {
        BTreeSet::new()
    }

    fn is_functionally_changed(&self, other: &Self) -> bool {
        let address_changed = match (&self.address, &other.address) {
            (None, None) => false,
            (Some(left), Some(right)) => left.is_functionally_changed(right),
            _ => true,
        };
        self.url != other.url
            || self.email != other.email
            || self.telephone != other.telephone
            || self.opening_hours != other.opening_hours
            || self.order != other.order
            || address_changed
    }

    fn validate(&self) -> InvariantResult<()> {
        require_non_blank(&self.uuid, "contact point uuid")?;
        if let Some(address) = &self.address {
            require_non_blank(&address.uuid, "address uuid")?;
        }
        Ok(())
    }
}
