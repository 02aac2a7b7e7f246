//! Linking instances to concepts and unlinking them again.
//!
//! # Invariants
//! - Concept id, snapshot id and product id are set and cleared together.
//! - The authority's "instantiated" flag for a concept stays set while any of
//!   its instances links to that concept.

use crate::model::authority::Bestuurseenheid;
use crate::model::concept::Concept;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use log::info;

pub struct LinkConceptToInstanceService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> LinkConceptToInstanceService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Links the instance to the latest snapshot of `concept`. An instance
    /// linked to another concept is unlinked first.
    ///
    /// # Errors
    /// - `Invariant` when the instance is already linked to `concept`.
    /// - `ConcurrentUpdate` when `expected_version` is stale.
    pub fn link(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
        concept: &Concept,
    ) -> ServiceResult<Instance> {
        if instance.concept_id.as_ref() == Some(&concept.id) {
            return Err(InvariantError::new("instance is already linked to this concept").into());
        }
        let (unlinked, expected_version) = if instance.is_linked_to_concept() {
            let unlinked = self.unlink(bestuurseenheid, instance, expected_version)?;
            let version = unlinked.date_modified.clone();
            (unlinked, version)
        } else {
            (instance.clone(), expected_version.clone())
        };

        let linked = Instance {
            concept_id: Some(concept.id.clone()),
            concept_snapshot_id: Some(concept.latest_concept_snapshot.clone()),
            product_id: Some(concept.product_id.clone()),
            review_status: None,
            date_modified: self.ctx.clock.now(),
            ..unlinked
        }
        .validated()?;
        self.ctx.update_instance(
            "instance_link_concept",
            bestuurseenheid,
            &linked,
            &expected_version,
        )?;
        self.ctx
            .mark_concept_instantiated(bestuurseenheid, &concept.id)?;
        Ok(linked)
    }

    /// Removes the concept link. Unlinking an unlinked instance changes
    /// nothing.
    pub fn unlink(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        let Some(concept_id) = instance.concept_id.clone() else {
            info!(
                "event=instance_unlink_concept module=service status=unchanged instance_id={}",
                instance.id
            );
            return Ok(instance.clone());
        };
        let unlinked = Instance {
            concept_id: None,
            concept_snapshot_id: None,
            product_id: None,
            review_status: None,
            date_modified: self.ctx.clock.now(),
            ..instance.clone()
        }
        .validated()?;
        self.ctx.update_instance(
            "instance_unlink_concept",
            bestuurseenheid,
            &unlinked,
            expected_version,
        )?;
        self.ctx
            .sync_concept_instantiated(bestuurseenheid, &concept_id)?;
        Ok(unlinked)
    }
}
