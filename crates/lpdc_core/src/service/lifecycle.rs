//! Copying, transferring and deleting instances.
//!
//! # Responsibility
//! - Derive new instances from existing ones, within an authority (copy) or
//!   across authorities (transfer).
//! - Remove instances and keep the concept display flags in sync.
//!
//! # Invariants
//! - A derived instance never shares an identity with its source, nested
//!   children included.
//! - A derived instance starts as an unpublished draft.
//! - Informal texts are never handed to an authority that chose formal.

use crate::model::authority::{Bestuurseenheid, ChosenForm};
use crate::model::children::{with_new_identities, Address, ContactPoint};
use crate::model::codes::{CompetentAuthorityLevel, InstanceStatus};
use crate::model::identity::EntityKind;
use crate::model::instance::Instance;
use crate::model::invariant::InvariantError;
use crate::model::iri::Iri;
use crate::model::language::Language;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use log::{info, warn};

const COPY_PREFIX_NL: &str = "Kopie van ";
const COPY_PREFIX_EN: &str = "Copy of ";

pub struct InstanceLifecycleService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> InstanceLifecycleService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Copies an instance of `bestuurseenheid` into a new draft of the same
    /// authority.
    ///
    /// # Errors
    /// - `Invariant` when `for_municipality_merger` is absent or the source is
    ///   owned by another authority.
    pub fn copy_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        source: &Instance,
        for_municipality_merger: Option<bool>,
    ) -> ServiceResult<Instance> {
        let for_municipality_merger = for_municipality_merger.ok_or_else(|| {
            InvariantError::new("for municipality merger should be specified when copying")
        })?;
        if &source.created_by != bestuurseenheid.id() {
            return Err(InvariantError::new(
                "instance is not created by the given bestuurseenheid",
            )
            .into());
        }

        let mut copy = self.reidentified(source)?;
        copy.content.title = copy
            .content
            .title
            .as_ref()
            .map(|title| title.prefixed(COPY_PREFIX_NL, COPY_PREFIX_EN));
        if for_municipality_merger {
            copy.spatials.clear();
            copy.content.executing_authorities.clear();
            if copy
                .content
                .competent_authority_levels
                .contains(&CompetentAuthorityLevel::Local)
            {
                copy.content.competent_authorities.clear();
            }
        }
        let copy = Instance {
            for_municipality_merger,
            copy_of: Some(source.id.clone()),
            ..copy
        }
        .validated()?;

        self.ctx.instances.save(bestuurseenheid, &copy)?;
        if let Some(concept_id) = &copy.concept_id {
            self.ctx.mark_concept_instantiated(bestuurseenheid, concept_id)?;
        }
        info!(
            "event=instance_copy module=service status=ok instance_id={} source_id={} for_municipality_merger={}",
            copy.id, source.id, for_municipality_merger
        );
        Ok(copy)
    }

    /// Hands a copy of `instance` to another authority.
    ///
    /// # Errors
    /// - `Invariant` when the instance is informal while `target` chose formal.
    pub fn transfer_instance(
        &self,
        instance: &Instance,
        target: &Bestuurseenheid,
    ) -> ServiceResult<Instance> {
        let target_choice = self.ctx.choice_of(target)?;
        let target_chose_formal =
            target_choice.as_ref().map(|choice| choice.chosen_form) == Some(ChosenForm::Formal);
        if target_chose_formal && instance.dutch_language_variant == Language::Informal {
            warn!(
                "event=instance_transfer module=service status=rejected instance_id={} target_id={}",
                instance.id,
                target.id()
            );
            return Err(InvariantError::new(
                "transferring an informal instance to a bestuurseenheid that chose formal is not supported",
            )
            .into());
        }

        let copy = self.reidentified(instance)?;
        let contact_points = copy
            .contact_points
            .iter()
            .map(|contact_point| self.with_resolved_address(contact_point))
            .collect::<ServiceResult<Vec<_>>>()?;
        let transferred = Instance {
            created_by: target.id().clone(),
            contact_points,
            for_municipality_merger: false,
            copy_of: None,
            ..copy
        };
        let transferred = Instance {
            needs_conversion_from_formal_to_informal: transferred
                .needs_conversion_for(target_choice.as_ref()),
            ..transferred
        }
        .validated()?;

        self.ctx.instances.save(target, &transferred)?;
        if let Some(concept_id) = &transferred.concept_id {
            self.ctx.mark_concept_instantiated(target, concept_id)?;
        }
        info!(
            "event=instance_transfer module=service status=ok instance_id={} source_id={} target_id={}",
            transferred.id,
            instance.id,
            target.id()
        );
        Ok(transferred)
    }

    /// # Errors
    /// - `NotFound` when the authority has no such instance.
    pub fn delete_instance(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance_id: &Iri,
    ) -> ServiceResult<()> {
        let instance = self.ctx.instances.find_by_id(bestuurseenheid, instance_id)?;
        self.ctx.instances.delete(bestuurseenheid, instance_id)?;
        if let Some(concept_id) = &instance.concept_id {
            self.ctx
                .sync_concept_instantiated(bestuurseenheid, concept_id)?;
        }
        info!(
            "event=instance_delete module=service status=ok instance_id={} bestuurseenheid_id={}",
            instance_id,
            bestuurseenheid.id()
        );
        Ok(())
    }

    /// Fresh identities throughout, reset to an unpublished draft.
    fn reidentified(&self, source: &Instance) -> ServiceResult<Instance> {
        let (id, uuid) = self.ctx.ids.new_identity(EntityKind::Instance)?;
        let now = self.ctx.clock.now();
        Ok(Instance {
            id,
            uuid,
            content: source.content.with_new_child_identities(self.ctx.ids)?,
            contact_points: with_new_identities(&source.contact_points, self.ctx.ids)?,
            status: InstanceStatus::Draft,
            date_created: now.clone(),
            date_modified: now,
            date_sent: None,
            date_published: None,
            publication_status: None,
            ..source.clone()
        })
    }

    fn with_resolved_address(&self, contact_point: &ContactPoint) -> ServiceResult<ContactPoint> {
        let Some(address) = &contact_point.address else {
            return Ok(contact_point.clone());
        };
        Ok(ContactPoint {
            address: Some(Address {
                register_id: self.resolve_address(address)?,
                ..address.clone()
            }),
            ..contact_point.clone()
        })
    }

    fn resolve_address(&self, address: &Address) -> ServiceResult<Option<Iri>> {
        let (Some(municipality), Some(street), Some(house_number)) = (
            address.municipality_nl(),
            address.street_nl(),
            address.house_number.as_deref(),
        ) else {
            return Ok(None);
        };
        Ok(self
            .ctx
            .addresses
            .find_address_match(
                municipality,
                street,
                house_number,
                address.box_number.as_deref(),
            )?
            .map(|found| found.register_id))
    }
}
