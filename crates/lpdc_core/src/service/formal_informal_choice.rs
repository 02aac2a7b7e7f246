//! Recording an authority's register preference.

use crate::model::authority::{Bestuurseenheid, ChosenForm, FormalInformalChoice};
use crate::model::identity::EntityKind;
use crate::model::instance::Instance;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use log::info;

pub struct FormalInformalChoiceService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> FormalInformalChoiceService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Appends a new choice. An informal choice flags every instance of the
    /// authority that is not informal yet for conversion.
    ///
    /// # Errors
    /// - `ConcurrentUpdate` when an instance changed while it was being synced;
    ///   the choice itself stays recorded and the call may be repeated.
    pub fn save_formal_informal_choice_and_sync_instances(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        chosen_form: ChosenForm,
    ) -> ServiceResult<FormalInformalChoice> {
        let (id, uuid) = self
            .ctx
            .ids
            .new_identity(EntityKind::FormalInformalChoice)?;
        let choice = FormalInformalChoice::new(
            id,
            uuid,
            self.ctx.clock.now(),
            chosen_form,
            bestuurseenheid.id().clone(),
        )?;
        self.ctx.choices.save(&choice)?;

        let mut synced = 0usize;
        if choice.is_informal() {
            for instance_id in self.ctx.instances.find_ids_for_authority(bestuurseenheid)? {
                let instance = self.ctx.instances.find_by_id(bestuurseenheid, &instance_id)?;
                let needs_conversion = instance.needs_conversion_for(Some(&choice));
                if needs_conversion == instance.needs_conversion_from_formal_to_informal {
                    continue;
                }
                let updated = Instance {
                    needs_conversion_from_formal_to_informal: needs_conversion,
                    date_modified: self.ctx.clock.now(),
                    ..instance.clone()
                }
                .validated()?;
                self.ctx.update_instance(
                    "instance_sync_formal_informal",
                    bestuurseenheid,
                    &updated,
                    &instance.date_modified,
                )?;
                synced += 1;
            }
        }
        info!(
            "event=formal_informal_choice_save module=service status=ok bestuurseenheid_id={} chosen_form={} synced_instances={}",
            bestuurseenheid.id(),
            chosen_form.as_str(),
            synced
        );
        Ok(choice)
    }
}
