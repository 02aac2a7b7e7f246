mod common;

use common::{
    authority, concept, draft_instance, iri, linked_instance, save_concept, saved_authority,
    sent_and_published, snapshot, TestEnv,
};
use lpdc_core::db::open_db_in_memory;
use lpdc_core::model::children::ChildValueObject;
use lpdc_core::model::codes::{CompetentAuthorityLevel, InstanceStatus};
use lpdc_core::repo::{
    AddressMatch, ConceptDisplayConfigurationRepository, InstanceRepository,
};
use lpdc_core::service::{FormalInformalChoiceService, InstanceLifecycleService};
use lpdc_core::{ChosenForm, Instance, Language, ServiceError, SqliteRepositories};
use std::collections::BTreeSet;

fn child_ids(instance: &Instance) -> BTreeSet<String> {
    let content = &instance.content;
    let mut ids = BTreeSet::new();
    for requirement in &content.requirements {
        ids.insert(requirement.id().to_string());
        if let Some(evidence) = &requirement.evidence {
            ids.insert(evidence.id.to_string());
        }
    }
    for procedure in &content.procedures {
        ids.insert(procedure.id().to_string());
        ids.extend(procedure.websites.iter().map(|item| item.id().to_string()));
    }
    ids.extend(content.websites.iter().map(|item| item.id().to_string()));
    ids.extend(content.costs.iter().map(|item| item.id().to_string()));
    ids.extend(
        content
            .financial_advantages
            .iter()
            .map(|item| item.id().to_string()),
    );
    ids.extend(content.legal_resources.iter().map(|item| item.id().to_string()));
    for contact_point in &instance.contact_points {
        ids.insert(contact_point.id.to_string());
        if let Some(address) = &contact_point.address {
            ids.insert(address.id.to_string());
        }
    }
    ids
}

#[test]
fn copy_reidentifies_every_child_and_resets_to_draft() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceLifecycleService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let source = sent_and_published(
        draft_instance(&bestuurseenheid, "inst-1"),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &source).unwrap();

    let copy = service
        .copy_instance(&bestuurseenheid, &source, Some(false))
        .unwrap();

    assert_ne!(copy.id, source.id);
    assert_ne!(copy.uuid, source.uuid);
    assert!(child_ids(&copy).is_disjoint(&child_ids(&source)));
    assert_eq!(child_ids(&copy).len(), child_ids(&source).len());
    assert_eq!(
        copy.content.title.as_ref().unwrap().get(Language::Formal),
        Some("Kopie van Afvalophaling")
    );
    assert_eq!(copy.content.description, source.content.description);
    assert_eq!(
        copy.content.requirements[0].title,
        source.content.requirements[0].title
    );
    assert_eq!(
        copy.content.requirements[0].order,
        source.content.requirements[0].order
    );
    let (copied, original) = (&copy.content, &source.content);
    assert_eq!(copied.procedures[0].title, original.procedures[0].title);
    assert_eq!(copied.procedures[0].order, original.procedures[0].order);
    assert_eq!(
        copied.procedures[0].websites[0].url,
        original.procedures[0].websites[0].url
    );
    assert_eq!(copied.websites[0].description, original.websites[0].description);
    assert_eq!(copied.websites[0].url, original.websites[0].url);
    assert_eq!(copied.costs[0].description, original.costs[0].description);
    assert_eq!(
        copied.financial_advantages[0].title,
        original.financial_advantages[0].title
    );
    assert_eq!(copied.legal_resources[0].url, original.legal_resources[0].url);
    assert_eq!(copied.legal_resources[0].order, original.legal_resources[0].order);
    assert_eq!(copy.contact_points[0].email, source.contact_points[0].email);
    assert_eq!(copy.status, InstanceStatus::Draft);
    assert_eq!(copy.date_sent, None);
    assert_eq!(copy.date_published, None);
    assert_eq!(copy.publication_status, None);
    assert_eq!(copy.copy_of, Some(source.id.clone()));
    assert!(!copy.for_municipality_merger);
    assert_eq!(copy.spatials, source.spatials);
    assert_eq!(
        repos.instances.find_by_id(&bestuurseenheid, &copy.id).unwrap(),
        copy
    );
}

#[test]
fn copy_for_municipality_merger_clears_local_authorities_and_spatials() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceLifecycleService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let mut source = draft_instance(&bestuurseenheid, "inst-1");
    source.content.competent_authority_levels = vec![CompetentAuthorityLevel::Local];
    source.content.executing_authorities = vec![bestuurseenheid.id().clone()];
    repos.instances.save(&bestuurseenheid, &source).unwrap();

    let copy = service
        .copy_instance(&bestuurseenheid, &source, Some(true))
        .unwrap();

    assert!(copy.for_municipality_merger);
    assert!(copy.spatials.is_empty());
    assert!(copy.content.executing_authorities.is_empty());
    assert!(copy.content.competent_authorities.is_empty());
    assert_eq!(
        copy.content.competent_authority_levels,
        vec![CompetentAuthorityLevel::Local]
    );
}

#[test]
fn copy_without_merger_flag_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceLifecycleService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let source = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &source).unwrap();

    let err = service
        .copy_instance(&bestuurseenheid, &source, None)
        .unwrap_err();

    assert!(err.is_invariant());
    assert_eq!(
        repos.instances.find_ids_for_authority(&bestuurseenheid).unwrap(),
        vec![source.id.clone()]
    );
}

#[test]
fn transfer_of_sent_and_published_instance_yields_unpublished_draft() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let mut env = TestEnv::new();
    env.addresses.insert(AddressMatch {
        register_id: iri("https://data.vlaanderen.be/id/adres/3706808"),
        municipality: "Aarschot".to_string(),
        street: "Ten Drossaarde".to_string(),
        house_number: "1".to_string(),
        box_number: None,
        postcode: "3200".to_string(),
    });
    let service = InstanceLifecycleService::new(env.context(&repos));
    let source_authority = saved_authority(&repos, "aarschot");
    let target = saved_authority(&repos, "merged-aarschot");
    let source = Instance {
        for_municipality_merger: true,
        copy_of: Some(iri("http://data.lblod.info/id/public-service/original")),
        ..sent_and_published(
            draft_instance(&source_authority, "inst-1"),
            "2024-02-01T00:00:00Z",
            "2024-02-02T00:00:00Z",
        )
    };
    repos.instances.save(&source_authority, &source).unwrap();

    let transferred = service.transfer_instance(&source, &target).unwrap();

    assert_eq!(&transferred.created_by, target.id());
    assert_eq!(transferred.status, InstanceStatus::Draft);
    assert_eq!(transferred.publication_status, None);
    assert_eq!(transferred.date_sent, None);
    assert_eq!(transferred.date_published, None);
    assert!(!transferred.for_municipality_merger);
    assert_eq!(transferred.copy_of, None);
    assert!(!transferred.needs_conversion_from_formal_to_informal);
    assert!(child_ids(&transferred).is_disjoint(&child_ids(&source)));
    assert_eq!(
        transferred.contact_points[0]
            .address
            .as_ref()
            .unwrap()
            .register_id,
        Some(iri("https://data.vlaanderen.be/id/adres/3706808"))
    );
    assert_eq!(
        repos.instances.find_by_id(&target, &transferred.id).unwrap(),
        transferred
    );
    assert!(repos.instances.exists(&source_authority, &source.id).unwrap());
}

#[test]
fn transfer_to_informal_authority_flags_conversion() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let source_authority = saved_authority(&repos, "aarschot");
    let target = saved_authority(&repos, "leuven");
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&target, ChosenForm::Informal)
        .unwrap();
    let source = draft_instance(&source_authority, "inst-1");

    let transferred = InstanceLifecycleService::new(ctx)
        .transfer_instance(&source, &target)
        .unwrap();

    assert!(transferred.needs_conversion_from_formal_to_informal);
    assert_eq!(transferred.dutch_language_variant, Language::Formal);
    assert_eq!(
        transferred.contact_points[0]
            .address
            .as_ref()
            .unwrap()
            .register_id,
        None
    );
}

#[test]
fn transfer_of_informal_instance_to_formal_authority_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let source_authority = saved_authority(&repos, "aarschot");
    let target = saved_authority(&repos, "leuven");
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&target, ChosenForm::Formal)
        .unwrap();
    let draft = draft_instance(&source_authority, "inst-1");
    let source = Instance {
        content: draft
            .content
            .transform_language(Language::Formal, Language::Informal),
        dutch_language_variant: Language::Informal,
        ..draft
    }
    .validated()
    .unwrap();

    let err = InstanceLifecycleService::new(ctx)
        .transfer_instance(&source, &target)
        .unwrap_err();

    match err {
        ServiceError::Invariant(err) => assert_eq!(
            err.message(),
            "transferring an informal instance to a bestuurseenheid that chose formal is not supported"
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert!(repos.instances.find_ids_for_authority(&target).unwrap().is_empty());
}

#[test]
fn deleting_the_last_linked_instance_clears_the_instantiated_flag() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let s1 = snapshot("afval-1", "afval", "2024-01-01T00:00:00Z", "Afval");
    let afval = concept("afval", &[&s1], &s1);
    save_concept(&repos, &afval, &[&s1]);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = linked_instance(&bestuurseenheid, "inst-1", &afval, &s1);
    repos.instances.save(&bestuurseenheid, &instance).unwrap();
    let service = InstanceLifecycleService::new(ctx);
    let copy = service
        .copy_instance(&bestuurseenheid, &instance, Some(false))
        .unwrap();

    let flag = || {
        repos
            .display_configurations
            .find_by_concept_id(&bestuurseenheid, &afval.id)
            .unwrap()
            .unwrap()
            .concept_is_instantiated
    };
    assert!(flag());

    service.delete_instance(&bestuurseenheid, &copy.id).unwrap();
    assert!(flag());

    service.delete_instance(&bestuurseenheid, &instance.id).unwrap();
    assert!(!flag());
    assert!(!repos.instances.exists(&bestuurseenheid, &instance.id).unwrap());
}

#[test]
fn deleting_an_unknown_instance_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let bestuurseenheid = authority("aarschot");

    let err = InstanceLifecycleService::new(env.context(&repos))
        .delete_instance(
            &bestuurseenheid,
            &iri("http://data.lblod.info/id/public-service/missing"),
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { kind: "instance", .. }));
}
