mod common;

use common::{draft_instance, saved_authority, TestEnv, SERVICE_NOW};
use lpdc_core::db::open_db_in_memory;
use lpdc_core::repo::InstanceRepository;
use lpdc_core::service::InstanceUpdateService;
use lpdc_core::{Language, ServiceError, SqliteRepositories};

#[test]
fn delta_replaces_title_and_contact_email() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceUpdateService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &instance).unwrap();

    let removals = format!(
        "# old values\n\
         <{id}> <http://purl.org/dc/terms/title> \"Afvalophaling\"@nl-be-x-formal .\n\
         <{cp}> <http://schema.org/email> \"info@gemeente.be\" .\n",
        id = instance.id,
        cp = instance.contact_points[0].id
    );
    let additions = format!(
        "<{id}> <http://purl.org/dc/terms/title> \"Afvalophaling en \\\"containerpark\\\"\"@nl-be-x-formal .\n\
         \n\
         <{cp}> <http://schema.org/email> \"afval@gemeente.be\" .\n",
        id = instance.id,
        cp = instance.contact_points[0].id
    );

    let updated = service
        .update_from_form_delta(
            &bestuurseenheid,
            &instance.id,
            &instance.date_modified,
            &removals,
            &additions,
        )
        .unwrap();

    assert_eq!(
        updated.content.title.as_ref().unwrap().get(Language::Formal),
        Some("Afvalophaling en \"containerpark\"")
    );
    assert_eq!(
        updated.contact_points[0].email.as_deref(),
        Some("afval@gemeente.be")
    );
    assert_eq!(updated.content.description, instance.content.description);
    assert_eq!(updated.date_modified.value(), SERVICE_NOW);
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &instance.id)
            .unwrap(),
        updated
    );
}

#[test]
fn second_update_with_stale_token_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceUpdateService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &instance).unwrap();
    let t0 = instance.date_modified.clone();
    let removals = format!(
        "<{}> <http://schema.org/email> \"info@gemeente.be\" .",
        instance.contact_points[0].id
    );
    let additions = format!(
        "<{}> <http://schema.org/email> \"afval@gemeente.be\" .",
        instance.contact_points[0].id
    );

    let first = service
        .update_from_form_delta(&bestuurseenheid, &instance.id, &t0, &removals, &additions)
        .unwrap();
    let err = service
        .update_from_form_delta(&bestuurseenheid, &instance.id, &t0, &additions, &removals)
        .unwrap_err();

    match err {
        ServiceError::ConcurrentUpdate(err) => {
            assert_eq!(err.expected_version, t0.value());
            assert_eq!(err.stored_version, SERVICE_NOW);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &instance.id)
            .unwrap(),
        first
    );
}

#[test]
fn malformed_delta_is_a_parse_error() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceUpdateService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &instance).unwrap();

    let err = service
        .update_from_form_delta(
            &bestuurseenheid,
            &instance.id,
            &instance.date_modified,
            "",
            "\n<http://example.org/s> <http://example.org/p> broken .\n",
        )
        .unwrap_err();

    match err {
        ServiceError::Parse(err) => assert_eq!(err.line, Some(2)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delta_changing_the_owner_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceUpdateService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &instance).unwrap();

    let err = service
        .update_from_form_delta(
            &bestuurseenheid,
            &instance.id,
            &instance.date_modified,
            &format!(
                "<{}> <http://purl.org/pav/createdBy> <{}> .",
                instance.id,
                bestuurseenheid.id()
            ),
            &format!(
                "<{}> <http://purl.org/pav/createdBy> <http://data.lblod.info/id/bestuurseenheden/leuven> .",
                instance.id
            ),
        )
        .unwrap_err();

    assert!(err.is_invariant());
}

#[test]
fn publish_then_reopen_round_trips_through_storage() {
    let conn = open_db_in_memory().unwrap();
    let repos = SqliteRepositories::try_new(&conn).unwrap();
    let env = TestEnv::new();
    let service = InstanceUpdateService::new(env.context(&repos));
    let bestuurseenheid = saved_authority(&repos, "aarschot");
    let instance = draft_instance(&bestuurseenheid, "inst-1");
    repos.instances.save(&bestuurseenheid, &instance).unwrap();

    let sent = service
        .publish_instance(&bestuurseenheid, &instance, &instance.date_modified)
        .unwrap();
    let published = service
        .mark_instance_published(&bestuurseenheid, &sent, &sent.date_modified)
        .unwrap();
    let reopened = service
        .reopen_instance(&bestuurseenheid, &published, &published.date_modified)
        .unwrap();

    assert_eq!(sent.date_sent.as_ref().map(|date| date.value()), Some(SERVICE_NOW));
    assert_eq!(
        reopened.publication_status,
        Some(lpdc_core::model::codes::InstancePublicationStatus::ToBeRepublished)
    );
    assert_eq!(
        repos
            .instances
            .find_by_id(&bestuurseenheid, &instance.id)
            .unwrap(),
        reopened
    );

    let err = service
        .reopen_instance(&bestuurseenheid, &reopened, &reopened.date_modified)
        .unwrap_err();
    assert!(err.is_invariant());
}
