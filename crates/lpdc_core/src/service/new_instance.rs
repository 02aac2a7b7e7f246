//! Creation of new instances, blank or from a concept.
//!
//! # Invariants
//! - A new instance is a draft in the register the authority chose (formal
//!   when it chose nothing).
//! - The creating authority is always among the competent and executing
//!   authorities of an instance created from a concept.

use crate::model::authority::{Bestuurseenheid, ChosenForm, FormalInformalChoice};
use crate::model::codes::InstanceStatus;
use crate::model::concept::Concept;
use crate::model::content::PublicServiceContent;
use crate::model::identity::EntityKind;
use crate::model::instance::Instance;
use crate::model::iri::Iri;
use crate::model::language::Language;
use crate::service::context::ServiceContext;
use crate::service::error::ServiceResult;
use crate::service::language_selection::select_language_for_choice;
use log::info;

pub struct NewInstanceDomainService<'a> {
    ctx: ServiceContext<'a>,
}

impl<'a> NewInstanceDomainService<'a> {
    pub fn new(ctx: ServiceContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn create_new_empty(&self, bestuurseenheid: &Bestuurseenheid) -> ServiceResult<Instance> {
        let choice = self.ctx.choice_of(bestuurseenheid)?;
        let content = PublicServiceContent {
            competent_authorities: vec![bestuurseenheid.id().clone()],
            executing_authorities: vec![bestuurseenheid.id().clone()],
            ..PublicServiceContent::default()
        };
        let instance = self.draft(bestuurseenheid, choice.as_ref(), content)?.validated()?;

        self.ctx.instances.save(bestuurseenheid, &instance)?;
        info!(
            "event=instance_create_empty module=service status=ok instance_id={} bestuurseenheid_id={}",
            instance.id,
            bestuurseenheid.id()
        );
        Ok(instance)
    }

    /// Draft holding the concept's content in the authority's register,
    /// linked to the concept's latest snapshot.
    pub fn create_new_from_concept(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        concept: &Concept,
    ) -> ServiceResult<Instance> {
        let choice = self.ctx.choice_of(bestuurseenheid)?;
        let from = select_language_for_choice(concept, choice.as_ref());
        let to = instance_language(choice.as_ref());
        let mut content = concept
            .content
            .localized_for_instance(self.ctx.ids, from, to)?;
        append_if_absent(&mut content.competent_authorities, bestuurseenheid.id());
        append_if_absent(&mut content.executing_authorities, bestuurseenheid.id());

        let instance = Instance {
            concept_id: Some(concept.id.clone()),
            concept_snapshot_id: Some(concept.latest_concept_snapshot.clone()),
            product_id: Some(concept.product_id.clone()),
            ..self.draft(bestuurseenheid, choice.as_ref(), content)?
        }
        .validated()?;

        self.ctx.instances.save(bestuurseenheid, &instance)?;
        self.ctx
            .mark_concept_instantiated(bestuurseenheid, &concept.id)?;
        info!(
            "event=instance_create_from_concept module=service status=ok instance_id={} concept_id={}",
            instance.id, concept.id
        );
        Ok(instance)
    }

    fn draft(
        &self,
        bestuurseenheid: &Bestuurseenheid,
        choice: Option<&FormalInformalChoice>,
        content: PublicServiceContent,
    ) -> ServiceResult<Instance> {
        let (id, uuid) = self.ctx.ids.new_identity(EntityKind::Instance)?;
        let now = self.ctx.clock.now();
        Ok(Instance {
            id,
            uuid,
            created_by: bestuurseenheid.id().clone(),
            content,
            contact_points: Vec::new(),
            concept_id: None,
            concept_snapshot_id: None,
            product_id: None,
            languages: Vec::new(),
            dutch_language_variant: instance_language(choice),
            needs_conversion_from_formal_to_informal: false,
            date_created: now.clone(),
            date_modified: now,
            date_sent: None,
            date_published: None,
            status: InstanceStatus::Draft,
            review_status: None,
            publication_status: None,
            spatials: bestuurseenheid.spatials().to_vec(),
            for_municipality_merger: false,
            copy_of: None,
        })
    }
}

fn instance_language(choice: Option<&FormalInformalChoice>) -> Language {
    choice
        .map(|choice| choice.chosen_form)
        .unwrap_or(ChosenForm::Formal)
        .instance_language()
}

fn append_if_absent(values: &mut Vec<Iri>, value: &Iri) {
    if !values.contains(value) {
        values.push(value.clone());
    }
}
