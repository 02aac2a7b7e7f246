//! Moving published instances of informal authorities to the informal
//! register.

use crate::model::authority::{Bestuurseenheid, FormalInformalChoice};
use crate::model::codes::InstanceStatus;
use crate::model::date::FormatPreservingDate;
use crate::model::instance::Instance;
use crate::model::invariant::{InvariantError, InvariantResult};
use crate::model::language::Language;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use log::warn;

pub struct ConvertInstanceToInformalService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> ConvertInstanceToInformalService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Reopens the instance, moves its texts to the informal register and
    /// sends it again.
    ///
    /// # Errors
    /// - `Invariant` when the authority did not choose informal, the instance
    ///   was never published, or it is already informal.
    /// - `ConcurrentUpdate` when `expected_version` is stale.
    pub fn convert_instance_to_informal(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        self.ensure_convertible(bestuurseenheid, instance)?;

        let reopened = if instance.status == InstanceStatus::Sent {
            instance.reopen()?
        } else {
            instance.clone()
        };
        let now = self.ctx.clock.now();
        let converted = Instance {
            date_modified: now.clone(),
            ..in_informal_register(&reopened)?.publish(now)?
        };
        self.ctx.update_instance(
            "instance_convert_to_informal",
            bestuurseenheid,
            &converted,
            expected_version,
        )?;
        Ok(converted)
    }

    /// Accepts the current texts as informal without republishing; for
    /// instances whose formal texts already read informally.
    ///
    /// # Errors
    /// - Same guards as `convert_instance_to_informal`.
    pub fn confirm_instance_is_already_informal(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
        expected_version: &FormatPreservingDate,
    ) -> ServiceResult<Instance> {
        self.ensure_convertible(bestuurseenheid, instance)?;

        let confirmed = Instance {
            date_modified: self.ctx.clock.now(),
            ..in_informal_register(instance)?
        };
        self.ctx.update_instance(
            "instance_confirm_informal",
            bestuurseenheid,
            &confirmed,
            expected_version,
        )?;
        Ok(confirmed)
    }

    fn ensure_convertible(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        instance: &Instance,
    ) -> ServiceResult<()> {
        let informal = self
            .ctx
            .choice_of(bestuurseenheid)?
            .as_ref()
            .is_some_and(FormalInformalChoice::is_informal);
        let rejection = if !informal {
            Some("bestuurseenheid did not choose informal")
        } else if !instance.is_published() {
            Some("instance should be published before it is converted to informal")
        } else if instance.dutch_language_variant == Language::Informal {
            Some("instance is already informal")
        } else {
            None
        };
        if let Some(message) = rejection {
            warn!(
                "event=instance_convert_to_informal module=service status=rejected instance_id={}",
                instance.id
            );
            return Err(InvariantError::new(message).into());
        }
        Ok(())
    }
}

fn in_informal_register(instance: &Instance) -> InvariantResult<Instance> {
    Instance {
        content: instance
            .content
            .transform_language(instance.dutch_language_variant, Language::Informal),
        dutch_language_variant: Language::Informal,
        needs_conversion_from_formal_to_informal: false,
        ..instance.clone()
    }
    .validated()
}
