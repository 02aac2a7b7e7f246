//! Partial edits and status transitions of stored instances.
//!
//! # Invariants
//! - Edits arrive as statement deltas against the stored projection:
//!   `(current - removals) + additions`.
//! - The identity and owner of an instance never change through an edit.
//! - Every write is a versioned update with the caller's token.

use crate::model::authority::Bestuurseenheid;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;

pub struct InstanceUpdateService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> InstanceUpdateService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Applies a form edit given as removal and addition statement documents.
    ///
    /// # Errors
    /// - `Parse` when either document is malformed.
    /// - `Mapping`/`Invariant` when the merged statements are no valid instance.
    /// - `ConcurrentUpdate` when `expected_version` is stale.
    pub fn update_from_form_delta(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance_id: &Iri,
        expected_version: &FormatPreservingDate,
        removals: &str,
        additions: &str,
    ) -> ServiceResult<Instance> {
        let current = self.ctx.instances.find_by_id(bestuurseenheid, instance_id)?;
        let merged = self
            .ctx
            .mapper
            .merge_instance(bestuurseenheid, &current, removals, additions)?;
        if merged.uuid != current.uuid || merged.created_by != current.created_by {
            return Err(InvariantError::new(
                "an edit cannot change the identity or owner of an instance",
            )
            .into());
        }
        let updated = Instance {
            date_modified: self.ctx.clock.now(),
            ..merged
        }
        .validated()?;
        self.ctx
            .update_instance("instance_update", bestuurseenheid, &updated, expected_version)?;
        Ok(updated)
    }

    /// Draft to sent.
    pub fn publish_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        let now = self.ctx.clock.now();
        let updated = Instance {
            date_modified: now.clone(),
            ..instance.publish(now)?
        };
        self.ctx
            .update_instance("instance_publish", bestuurseenheid, &updated, expected_version)?;
        Ok(updated)
    }

    /// Sent to draft; a published instance becomes "to be republished".
    pub fn reopen_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        let updated = Instance {
            date_modified: self.ctx.clock.now(),
            ..instance.reopen()?
        };
        self.ctx
            .update_instance("instance_reopen", bestuurseenheid, &updated, expected_version)?;
        Ok(updated)
    }

    /// Records that the sent version reached the publication channels.
    pub fn mark_instance_published(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        let now = self.ctx.clock.now();
        let updated = Instance {
            date_modified: now.clone(),
            ..instance.mark_published(now)?
        };
        self.ctx.update_instance(
            "instance_mark_published",
            bestuurseenheid,
            &updated,
            expected_version,
        )?;
        Ok(updated)
    }
}
