//! Identity minting capability.
//!
//! Every entity carries an IRI built from a kind-specific base plus a uuid.
//! Minting goes through `IdentityGenerator` so tests can supply deterministic
//! identities.

use crate::model::invariant::InvariantResult;
use crate::model::iri::Iri;
use std::cell::Cell;
use uuid::Uuid;

const ID_BASE: &str = "http://data.lblod.info/id";

/// IRI path segment per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Instance,
    Requirement,
    Evidence,
    Procedure,
    Website,
    Cost,
    FinancialAdvantage,
    LegalResource,
    ContactPoint,
    Address,
    FormalInformalChoice,
    ConceptDisplayConfiguration,
}

impl EntityKind {
    fn path(self) -> &'static str {
        match self {
            EntityKind::Instance => "public-service",
            EntityKind::Requirement => "requirement",
            EntityKind::Evidence => "evidence",
            EntityKind::Procedure => "rule",
            EntityKind::Website => "website",
            EntityKind::Cost => "cost",
            EntityKind::FinancialAdvantage => "financial-advantage",
            EntityKind::LegalResource => "legal-resource",
            EntityKind::ContactPoint => "contact-point",
            EntityKind::Address => "address",
            EntityKind::FormalInformalChoice => "formal-informal-choice",
            EntityKind::ConceptDisplayConfiguration => "conceptual-display-configuration",
        }
    }
}

/// Source of fresh uuids.
pub trait IdentityGenerator {
    fn new_uuid(&self) -> String;

    /// Mints `(id, uuid)` for one entity.
    fn new_identity(&self, kind: EntityKind) -> InvariantResult<(Iri, String)> {
        let uuid = self.new_uuid();
        Ok((identity_iri(kind, &uuid)?, uuid))
    }
}

/// Builds the canonical IRI for an entity kind and uuid.
pub fn identity_iri(kind: EntityKind, uuid: &str) -> InvariantResult<Iri> {
    Iri::new(format!("{ID_BASE}/{}/{uuid}", kind.path()))
}

/// Random v4 uuids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdentityGenerator;

impl IdentityGenerator for UuidIdentityGenerator {
    fn new_uuid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic, monotonically numbered uuids.
#[derive(Debug, Default)]
pub struct SequentialIdentityGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdentityGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdentityGenerator for SequentialIdentityGenerator {
    fn new_uuid(&self) -> String {
        let current = self.next.get();
        self.next.set(current + 1);
        format!("{}{current:08}", self.prefix)
    }
}
