//! Flags instances for review when a new snapshot of their concept arrives.
//!
//! # Invariants
//! - Cosmetic snapshot changes never flag an instance.
//! - An archiving snapshot always flags linked instances as archived.

use crate::model::codes::InstanceReviewStatus;
use crate::model::concept::ConceptSnapshot;
use crate::model::instance::Instance;
use crate::model::iri::Iri;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use log::info;

pub struct ConceptReviewService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> ConceptReviewService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Marks every instance linked to the snapshot's concept, across
    /// authorities. Returns the number of instances whose review status
    /// changed.
    pub fn mark_linked_instances(&self, concept_snapshot_id: &Iri) -> ServiceResult<usize> {
        let snapshot = self.ctx.snapshots.find_by_id(concept_snapshot_id)?;
        let references = self
            .ctx
            .instances
            .find_all_linked_to_concept(&snapshot.is_version_of_concept)?;

        let mut marked = 0usize;
        for reference in references {
            let bestuurseenheid = self
                .ctx
                .bestuurseenheden
                .find_by_id(&reference.bestuurseenheid_id)?;
            let instance = self
                .ctx
                .instances
                .find_by_id(&bestuurseenheid, &reference.instance_id)?;
            let Some(review_status) = self.review_status_for(&instance, &snapshot)? else {
                continue;
            };
            if instance.review_status == Some(review_status) {
                continue;
            }
            let updated = Instance {
                review_status: Some(review_status),
                date_modified: self.ctx.clock.now(),
                ..instance.clone()
            }
            .validated()?;
            self.ctx.update_instance(
                "instance_mark_for_review",
                &bestuurseenheid,
                &updated,
                &instance.date_modified,
            )?;
            marked += 1;
        }
        info!(
            "event=concept_snapshot_review module=service status=ok snapshot_id={} marked_instances={}",
            snapshot.id, marked
        );
        Ok(marked)
    }

    fn review_status_for(
        &self,
        instance: &Instance,
        snapshot: &ConceptSnapshot,
    ) -> ServiceResult<Option<InstanceReviewStatus>> {
        if snapshot.is_archived {
            return Ok(Some(InstanceReviewStatus::ConceptArchived));
        }
        let Some(current_id) = &instance.concept_snapshot_id else {
            return Ok(None);
        };
        if current_id == &snapshot.id {
            return Ok(None);
        }
        let current = self.ctx.snapshots.find_by_id(current_id)?;
        Ok(current
            .is_functionally_changed(snapshot)
            .then_some(InstanceReviewStatus::ConceptChanged))
    }
}
