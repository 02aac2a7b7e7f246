//! Brings instances up to date with snapshots of their concept.
//!
//! # Responsibility
//! - Take the full content of a snapshot over into an instance.
//! - Record that an instance acknowledges a snapshot and decide whether its
//!   review flag may be cleared.
//!
//! # Invariants
//! - Copied children always get fresh identities.
//! - The review flag is only cleared for snapshots generated at or after the
//!   concept's latest functionally changed snapshot.
//! - Every write is a versioned update with the caller's token.

use crate::model::authority::Bestuurseenheid;
use crate::model::codes::InstanceStatus;
use crate::model::concept::ConceptSnapshot;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use crate::service::language_selection::select_language_for_instance;
use log::info;

pub struct ConceptSnapshotReconciliationService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> ConceptSnapshotReconciliationService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Replaces every concept-owned field of the instance with the snapshot's
    /// content, localized into the instance's register, then acknowledges the
    /// snapshot.
    ///
    /// # Errors
    /// - `Invariant` when the instance is not linked or the snapshot belongs
    ///   to another concept.
    /// - `ConcurrentUpdate` when `expected_version` is stale.
    pub fn fully_take_concept_snapshot_over(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
        concept_snapshot_id: &Iri,
    ) -> ServiceResult<Instance> {
        let snapshot = self.ctx.snapshots.find_by_id(concept_snapshot_id)?;
        self.ensure_belongs_to_linked_concept(instance, &snapshot)?;

        let choice = self.ctx.choice_of(bestuurseenheid)?;
        let reopened = if instance.status == InstanceStatus::Sent {
            instance.reopen()?
        } else {
            instance.clone()
        };
        let from = select_language_for_instance(&snapshot, instance, choice.as_ref());
        let content = snapshot.content.localized_for_instance(
            self.ctx.ids,
            from,
            reopened.dutch_language_variant,
        )?;
        let taken_over = Instance {
            content,
            ..reopened
        }
        .validated()?;

        let updated = self.acknowledge(&taken_over, &snapshot)?;
        self.ctx.update_instance(
            "instance_full_take_over",
            bestuurseenheid,
            &updated,
            expected_version,
        )?;
        Ok(updated)
    }

    /// Points the instance at the snapshot without touching its content.
    /// Confirming the snapshot the instance already points at changes nothing.
    ///
    /// # Errors
    /// - `Invariant` when the snapshot belongs to another concept.
    /// - `ConcurrentUpdate` when `expected_version` is stale.
    pub fn confirm_instance_is_already_up_to_date(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
        concept_snapshot_id: &Iri,
    ) -> ServiceResult<Instance> {
        if instance.concept_snapshot_id.as_ref() == Some(concept_snapshot_id) {
            info!(
                "event=instance_confirm_up_to_date module=service status=unchanged instance_id={}",
                instance.id
            );
            return Ok(instance.clone());
        }
        let snapshot = self.ctx.snapshots.find_by_id(concept_snapshot_id)?;
        self.ensure_belongs_to_linked_concept(instance, &snapshot)?;

        let updated = self.acknowledge(instance, &snapshot)?;
        self.ctx.update_instance(
            "instance_confirm_up_to_date",
            bestuurseenheid,
            &updated,
            expected_version,
        )?;
        Ok(updated)
    }

    fn ensure_belongs_to_linked_concept(
        &self,
        instance: &Instance,
        snapshot: &ConceptSnapshot,
    ) -> ServiceResult<()> {
        let concept_id = instance
            .concept_id
            .as_ref()
            .ok_or_else(|| InvariantError::new("instance is not linked to a concept"))?;
        let concept = self.ctx.concepts.find_by_id(concept_id)?;
        if snapshot.is_version_of_concept != concept.id
            || !concept.all_snapshot_ids().contains(&snapshot.id)
        {
            return Err(InvariantError::new(
                "snapshot does not belong to the concept linked to the instance",
            )
            .into());
        }
        Ok(())
    }

    /// Snapshot pointer, review flag and modification timestamp.
    fn acknowledge(&self, instance: &Instance, snapshot: &ConceptSnapshot) -> ServiceResult<Instance> {
        let concept = self
            .ctx
            .concepts
            .find_by_id(&snapshot.is_version_of_concept)?;
        let latest_functional = self
            .ctx
            .snapshots
            .find_by_id(&concept.latest_functionally_changed_concept_snapshot)?;
        let review_status = if snapshot
            .generated_at_time
            .before(&latest_functional.generated_at_time)
        {
            instance.review_status
        } else {
            None
        };
        Ok(Instance {
            concept_snapshot_id: Some(snapshot.id.clone()),
            review_status,
            date_modified: self.ctx.clock.now(),
            ..instance.clone()
        }
        .validated()?)
    }
}
