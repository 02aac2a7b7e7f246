mod common;

use common::{date, draft_instance, iri, saved_authority, sent_and_published, TestEnv};
use lpdc_core::db::open_db_in_memory;
use lpdc_core::model::codes::{InstancePublicationStatus, InstanceStatus};
use lpdc_core::repo::{FormalInformalChoiceRepository, InstanceRepository};
use lpdc_core::service::{
    ConvertInstanceToInformalService, FormalInformalChoiceService, InstanceUpdateService,
};
use lpdc_core::{
    ChosenForm, FormalInformalChoice, Instance, Language, ServiceError, SqliteRepositories,
};

fn informal(instance: Instance) -> Instance {
    Instance {
        content: instance
            .content
            .transform_language(Language::Formal, Language::Informal),
        dutch_language_variant: Language::Informal,
        ..instance
    }
    .validated()
    .unwrap()
}

#[test]
fn informal_choice_flags_formal_instances_for_conversion() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = FormalInformalChoiceService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let formal = draft_instance(&bestuurseenheid, "inst-1");
    let already_informal = informal(draft_instance(&bestuurseenheid, "inst-2"));
    repos.instances.save(&bestuurseenheid, &formal).unwrap();
    repos
        .instances
        .save(&bestuurseenheid, &already_informal)
        .unwrap();

    let choice = service
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();

    assert!(choice.is_informal());
    assert_eq!(
        repos
            .choices
            .find_by_bestuurseenheid(&bestuurseenheid)
            .unwrap(),
        Some(choice)
    );
    let formal_after = repos
        .instances
        .find_by_id(&bestuurseenheid, &formal.id)
        .unwrap();
    assert!(formal_after.needs_conversion_from_formal_to_informal);
    assert_eq!(formal_after.dutch_language_variant, Language::Formal);
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &already_informal.id)
            .unwrap(),
        already_informal
    );
}

#[test]
fn latest_choice_wins() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = FormalInformalChoiceService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");

    service
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Formal)
        .unwrap();
    env.clock.set(date("2024-07-01T00:00:00Z"));
    service
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();

    let latest = repos
        .choices
        .find_by_bestuurseenheid(&bestuurseenheid)
        .unwrap()
        .unwrap();
    assert_eq!(latest.chosen_form, ChosenForm::Informal);
}

#[test]
fn choices_saved_in_the_same_millisecond_resolve_to_the_last_written() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let choice = |name: &str, chosen_form| {
        FormalInformalChoice::new(
            iri(&format!("http://data.lblod.info/id/formal-informal-choice/{name}")),
            name,
            date("2024-06-01T12:00:00.000Z"),
            chosen_form,
            bestuurseenheid.id().clone(),
        )
        .unwrap()
    };

    repos.choices.save(&choice("zz", ChosenForm::Formal)).unwrap();
    repos.choices.save(&choice("aa", ChosenForm::Informal)).unwrap();

    let latest = repos
        .choices
        .find_by_bestuurseenheid(&bestuurseenheid)
        .unwrap()
        .unwrap();
    assert_eq!(latest.uuid, "aa");
    assert_eq!(latest.chosen_form, ChosenForm::Informal);
}

#[test]
fn conversion_reopens_converts_and_sends_again() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let published = sent_and_published(
        draft_instance(&bestuurseenheid, "inst-1"),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &published).unwrap();
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();
    let flagged = repos
        .instances
        .find_by_id(&bestuurseenheid, &published.id)
        .unwrap();

    let converted = ConvertInstanceToInformalService::new(ctx)
        .convert_instance_to_informal(&bestuurseenheid, &flagged, &flagged.date_modified)
        .unwrap();

    assert_eq!(converted.dutch_language_variant, Language::Informal);
    assert!(!converted.needs_conversion_from_formal_to_informal);
    assert_eq!(converted.status, InstanceStatus::Sent);
    assert_eq!(
        converted.publication_status,
        Some(InstancePublicationStatus::ToBeRepublished)
    );
    assert_eq!(
        converted.content.title.as_ref().unwrap().get(Language::Informal),
        Some("Afvalophaling")
    );
    assert_eq!(
        converted.content.title.as_ref().unwrap().get(Language::Formal),
        None
    );
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &published.id)
            .unwrap(),
        converted
    );
}

#[test]
fn conversion_requires_informal_choice() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let published = sent_and_published(
        draft_instance(&bestuurseenheid, "inst-1"),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &published).unwrap();

    let err = ConvertInstanceToInformalService::new(env.context(&repos))
        .convert_instance_to_informal(&bestuurseenheid, &published, &published.date_modified)
        .unwrap_err();

    assert!(err.is_invariant());
}

#[test]
fn conversion_requires_a_published_instance() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();
    let draft = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &draft).unwrap();

    let err = ConvertInstanceToInformalService::new(ctx)
        .convert_instance_to_informal(&bestuurseenheid, &draft, &draft.date_modified)
        .unwrap_err();

    match err {
        ServiceError::Invariant(err) => assert_eq!(
            err.message(),
            "instance should be published before it is converted to informal"
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reopened_instance_with_pending_edits_is_not_converted() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let published = sent_and_published(
        draft_instance(&bestuurseenheid, "inst-1"),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &published).unwrap();
    let reopened = InstanceUpdateService::new(ctx)
        .reopen_instance(&bestuurseenheid, &published, &published.date_modified)
        .unwrap();
    assert_eq!(
        reopened.publication_status,
        Some(InstancePublicationStatus::ToBeRepublished)
    );
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();
    let flagged = repos
        .instances
        .find_by_id(&bestuurseenheid, &published.id)
        .unwrap();

    let err = ConvertInstanceToInformalService::new(ctx)
        .convert_instance_to_informal(&bestuurseenheid, &flagged, &flagged.date_modified)
        .unwrap_err();

    match err {
        ServiceError::Invariant(err) => assert_eq!(
            err.message(),
            "instance should be published before it is converted to informal"
        ),
        other => panic!("unexpected error: {other}"),
    }
    let stored = repos
        .instances
        .find_by_id(&bestuurseenheid, &published.id)
        .unwrap();
    assert_eq!(stored.status, InstanceStatus::Draft);
    assert_eq!(stored.dutch_language_variant, Language::Formal);
}

#[test]
fn converting_an_informal_instance_again_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();
    let published = sent_and_published(
        informal(draft_instance(&bestuurseenheid, "inst-1")),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &published).unwrap();

    let err = ConvertInstanceToInformalService::new(ctx)
        .convert_instance_to_informal(&bestuurseenheid, &published, &published.date_modified)
        .unwrap_err();

    match err {
        ServiceError::Invariant(err) => assert_eq!(err.message(), "instance is already informal"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn confirming_already_informal_keeps_status() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let ctx = env.context(&repos);
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let published = sent_and_published(
        draft_instance(&bestuurseenheid, "inst-1"),
        "2024-02-01T00:00:00Z",
        "2024-02-02T00:00:00Z",
    );
    repos.instances.save(&bestuurseenheid, &published).unwrap();
    FormalInformalChoiceService::new(ctx)
        .save_formal_informal_choice_and_sync_instances(&bestuurseenheid, ChosenForm::Informal)
        .unwrap();
    let flagged = repos
        .instances
        .find_by_id(&bestuurseenheid, &published.id)
        .unwrap();

    let confirmed = ConvertInstanceToInformalService::new(ctx)
        .confirm_instance_is_already_informal(&bestuurseenheid, &flagged, &flagged.date_modified)
        .unwrap();

    assert_eq!(confirmed.dutch_language_variant, Language::Informal);
    assert!(!confirmed.needs_conversion_from_formal_to_informal);
    assert_eq!(confirmed.status, InstanceStatus::Sent);
    assert_eq!(
        confirmed.publication_status,
        Some(InstancePublicationStatus::Published)
    );
}
