mod common;

use common::{concept, iri, save_concept, saved_authority, snapshot, TestEnv, SERVICE_NOW};
use lpdc_core::db::open_db_in_memory;
use lpdc_core::model::codes::InstanceStatus;
use lpdc_core::repo::{ConceptDisplayConfigurationRepository, InstanceRepository};
use lpdc_core::service::{FormalInformalChoiceService, NewInstanceDomainService};
use lpdc_core::{ChosenForm, Language, SqliteRepositories};

#[test]
fn empty_instance_is_seeded_from_the_authority() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = NewInstanceDomainService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");

    let instance = service.create_new_empty(&bestuurseenheid).unwrap();

    assert_eq!(
        instance.id.as_str(),
        "http://data.lblod.info/id/public-service/test-00000001"
    );
    assert_eq!(&instance.created_by, bestuurseenheid.id());
    assert_eq!(instance.status, InstanceStatus::Draft);
    assert_eq!(instance.dutch_language_variant, Language::Formal);
    assert_eq!(
        instance.content.competent_authorities,
        vec![bestuurseenheid.id().clone()]
    );
    assert_eq!(
        instance.content.executing_authorities,
        vec![bestuurseenheid.id().clone()]
    );
    assert_eq!(instance.spatials, bestuurseenheid.spatials().to_vec());
    assert_eq!(instance.date_created.value(), SERVICE_NOW);
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &instance.id)
            .unwrap(),
        instance
    );
}

#[test]
fn instance_from_concept_uses_the_chosen_register() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let s1 = snapshot("afval-1", "afval", "2024-01-01T00:00:00Z", "Afval");
    let afval = concept("afval", &[&s1], &s1);
    save_concept(&repos, &afval, &[&s1]);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();

    let instance = NewInstanceDomainService::new(ctx)
        .create_new_from_concept(&bestuurseenheid, &afval)
        .unwrap();

    assert_eq!(instance.dutch_language_variant, Language::Informal);
    assert_eq!(
        instance.content.title.as_ref().unwrap().get(Language::Informal),
        Some("Afval (je)")
    );
    assert_eq!(instance.concept_id, Some(afval.id.clone()));
    assert_eq!(instance.concept_snapshot_id, Some(s1.id.clone()));
    assert_eq!(instance.product_id, Some(afval.product_id.clone()));
    assert_eq!(
        instance.content.competent_authorities,
        vec![
            iri("http://data.lblod.info/id/bestuurseenheden/vlaamse-overheid"),
            bestuurseenheid.id().clone(),
        ]
    );
    assert_eq!(
        instance.content.executing_authorities,
        vec![bestuurseenheid.id().clone()]
    );
    assert_eq!(
        instance.content.requirements[0].concept_source_id,
        Some(afval.content.requirements[0].id.clone())
    );
    assert_ne!(
        instance.content.requirements[0].id,
        afval.content.requirements[0].id
    );

    let stored = repos
        .instances
        .find_by_id(&bestuurseenheid, &instance.id)
        .unwrap();
    assert_eq!(stored.content.title, instance.content.title);
    let configuration = repos
        .display_configurations
        .find_by_concept_id(&bestuurseenheid, &afval.id)
        .unwrap()
        .unwrap();
    assert!(!configuration.concept_is_new);
    assert!(configuration.concept_is_instantiated);
}

#[test]
fn authority_already_competent_is_not_added_twice() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let mut s1 = snapshot("afval-1", "afval", "2024-01-01T00:00:00Z", "Afval");
    s1.content.competent_authorities = vec![bestuurseenheid.id().clone()];
    let afval = concept("afval", &[&s1], &s1);
    save_concept(&repos, &afval, &[&s1]);

    let instance = NewInstanceDomainService::new(env.context(&repos))
        .create_new_from_concept(&bestuurseenheid, &afval)
        .unwrap();

    assert_eq!(
        instance.content.competent_authorities,
        vec![bestuurseenheid.id().clone()]
    );
    assert_eq!(instance.dutch_language_variant, Language::Formal);
}
