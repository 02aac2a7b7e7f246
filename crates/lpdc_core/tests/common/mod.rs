#![allow(dead_code)]

use lpdc_core::model::authority::{BestuurseenheidClassification, BestuurseenheidStatus};
use lpdc_core::model::children::{
    Address, ContactPoint, Cost, Evidence, FinancialAdvantage, LegalResource, Procedure,
    Requirement, Website,
};
use lpdc_core::model::codes::{CompetentAuthorityLevel, InstanceStatus};
use lpdc_core::model::content::PublicServiceContent;
use lpdc_core::model::identity::SequentialIdentityGenerator;
use lpdc_core::repo::{
    BestuurseenheidRepository, ConceptRepository, ConceptSnapshotRepository,
    InMemoryAddressRegister,
};
use lpdc_core::service::FixedClock;
use lpdc_core::{
    Bestuurseenheid, Concept, ConceptSnapshot, FormatPreservingDate, Instance, Iri, Language,
    LanguageString, ServiceContext, SqliteRepositories,
};
use std::collections::BTreeSet;

pub const CREATED_AT: &str = "2024-01-01T08:00:00Z";
pub const SERVICE_NOW: &str = "2024-06-01T12:00:00.000Z";

pub struct TestEnv {
    pub ids: SequentialIdentityGenerator,
    pub clock: FixedClock,
    pub addresses: InMemoryAddressRegister,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            ids: SequentialIdentityGenerator::new("test-"),
            clock: FixedClock::new(date(SERVICE_NOW)),
            addresses: InMemoryAddressRegister::default(),
        }
    }

    pub fn context<'a>(&'a self, repos: &'a SqliteRepositories<'_>) -> ServiceContext<'a> {
        repos.context(&self.addresses, &self.ids, &self.clock)
    }
}

pub fn iri(value: &str) -> Iri {
    Iri::new(value).unwrap()
}

pub fn date(value: &str) -> FormatPreservingDate {
    FormatPreservingDate::of(value).unwrap()
}

pub fn text(value: &str, language: Language) -> Option<LanguageString> {
    Some(LanguageString::of_value_in_language(value, language))
}

pub fn authority(uuid: &str) -> Bestuurseenheid {
    Bestuurseenheid::new(
        iri(&format!("http://data.lblod.info/id/bestuurseenheden/{uuid}")),
        uuid,
        format!("Gemeente {uuid}"),
        BestuurseenheidClassification::Municipality,
        BestuurseenheidStatus::Active,
        vec![iri("http://vocab.belgif.be/auth/refnis2019/24001")],
    )
    .unwrap()
}

pub fn saved_authority(repos: &SqliteRepositories<'_>, uuid: &str) -> Bestuurseenheid {
    let bestuurseenheid = authority(uuid);
    repos.bestuurseenheden.save(&bestuurseenheid).unwrap();
    bestuurseenheid
}

pub fn concept_id(name: &str) -> Iri {
    iri(&format!(
        "https://productencatalogus.data.vlaanderen.be/id/concept/{name}"
    ))
}

pub fn snapshot_id(name: &str) -> Iri {
    iri(&format!(
        "https://productencatalogus.data.vlaanderen.be/id/conceptual-public-service-snapshot/{name}"
    ))
}

/// Concept-side content with every register filled and one requirement with
/// evidence and one website.
pub fn concept_content(title: &str) -> PublicServiceContent {
    let registers = |value: &str| {
        Some(
            LanguageString::of_value_in_language(value, Language::Nl)
                .with_value(Language::Formal, Some(format!("{value} (u)")))
                .with_value(Language::Informal, Some(format!("{value} (je)")))
                .with_value(Language::En, Some(format!("{value} (en)"))),
        )
    };
    PublicServiceContent {
        title: registers(title),
        description: registers("Beschrijving"),
        competent_authority_levels: vec![CompetentAuthorityLevel::Local],
        competent_authorities: vec![iri(
            "http://data.lblod.info/id/bestuurseenheden/vlaamse-overheid",
        )],
        keywords: vec![
            LanguageString::of_value_in_language("omgeving", Language::Nl),
            LanguageString::of_value_in_language("environment", Language::En),
        ],
        requirements: vec![Requirement {
            id: iri("http://data.lblod.info/id/requirement/concept-req-1"),
            uuid: "concept-req-1".to_string(),
            title: registers("Voorwaarde"),
            description: registers("Uitleg voorwaarde"),
            order: 1,
            evidence: Some(Evidence {
                id: iri("http://data.lblod.info/id/evidence/concept-ev-1"),
                uuid: "concept-ev-1".to_string(),
                title: registers("Bewijs"),
                description: registers("Uitleg bewijs"),
                concept_source_id: None,
            }),
            concept_source_id: None,
        }],
        websites: vec![Website {
            id: iri("http://data.lblod.info/id/website/concept-web-1"),
            uuid: "concept-web-1".to_string(),
            title: registers("Website"),
            description: None,
            order: 1,
            url: Some("https://example.org/info".to_string()),
            concept_source_id: None,
        }],
        ..PublicServiceContent::default()
    }
}

pub fn snapshot(name: &str, concept: &str, generated_at: &str, title: &str) -> ConceptSnapshot {
    ConceptSnapshot {
        id: snapshot_id(name),
        content: concept_content(title),
        is_version_of_concept: concept_id(concept),
        date_created: date(generated_at),
        date_modified: date(generated_at),
        generated_at_time: date(generated_at),
        product_id: "1502".to_string(),
        is_archived: false,
    }
}

/// Concept `name` whose history is `snapshots` in generation order.
pub fn concept(
    name: &str,
    snapshots: &[&ConceptSnapshot],
    latest_functionally_changed: &ConceptSnapshot,
) -> Concept {
    let (latest, previous) = snapshots.split_last().unwrap();
    Concept {
        id: concept_id(name),
        uuid: format!("{name}-uuid"),
        content: latest.content.clone(),
        product_id: latest.product_id.clone(),
        latest_concept_snapshot: latest.id.clone(),
        previous_concept_snapshots: previous
            .iter()
            .map(|snapshot| snapshot.id.clone())
            .collect::<BTreeSet<_>>(),
        latest_functionally_changed_concept_snapshot: latest_functionally_changed.id.clone(),
        is_archived: false,
    }
}

pub fn save_concept(repos: &SqliteRepositories<'_>, concept: &Concept, snapshots: &[&ConceptSnapshot]) {
    for snapshot in snapshots {
        repos.snapshots.save(snapshot).unwrap();
    }
    repos.concepts.save(concept).unwrap();
}

/// Draft, unlinked instance in the formal register with one child of
/// every kind.
pub fn draft_instance(bestuurseenheid: &Bestuurseenheid, uuid: &str) -> Instance {
    Instance {
        id: iri(&format!("http://data.lblod.info/id/public-service/{uuid}")),
        uuid: uuid.to_string(),
        created_by: bestuurseenheid.id().clone(),
        content: PublicServiceContent {
            title: text("Afvalophaling", Language::Formal),
            description: text("Ophaling aan huis", Language::Formal),
            competent_authorities: vec![bestuurseenheid.id().clone()],
            requirements: vec![Requirement {
                id: iri(&format!("http://data.lblod.info/id/requirement/{uuid}-req")),
                uuid: format!("{uuid}-req"),
                title: text("Inwoner zijn", Language::Formal),
                description: None,
                order: 1,
                evidence: Some(Evidence {
                    id: iri(&format!("http://data.lblod.info/id/evidence/{uuid}-ev")),
                    uuid: format!("{uuid}-ev"),
                    title: text("Identiteitskaart", Language::Formal),
                    description: None,
                    concept_source_id: None,
                }),
                concept_source_id: None,
            }],
            procedures: vec![Procedure {
                id: iri(&format!("http://data.lblod.info/id/rule/{uuid}-proc")),
                uuid: format!("{uuid}-proc"),
                title: text("Aanvraag indienen", Language::Formal),
                description: text("Via het e-loket", Language::Formal),
                order: 1,
                websites: vec![Website {
                    id: iri(&format!("http://data.lblod.info/id/website/{uuid}-proc-web")),
                    uuid: format!("{uuid}-proc-web"),
                    title: text("E-loket", Language::Formal),
                    description: None,
                    order: 1,
                    url: Some("https://loket.gemeente.be".to_string()),
                    concept_source_id: None,
                }],
                concept_source_id: None,
            }],
            websites: vec![Website {
                id: iri(&format!("http://data.lblod.info/id/website/{uuid}-web")),
                uuid: format!("{uuid}-web"),
                title: text("Ophaalkalender", Language::Formal),
                description: text("Data per straat", Language::Formal),
                order: 1,
                url: Some("https://gemeente.be/kalender".to_string()),
                concept_source_id: None,
            }],
            costs: vec![Cost {
                id: iri(&format!("http://data.lblod.info/id/cost/{uuid}-cost")),
                uuid: format!("{uuid}-cost"),
                title: text("Retributie", Language::Formal),
                description: text("25 euro per jaar", Language::Formal),
                order: 1,
                concept_source_id: None,
            }],
            financial_advantages: vec![FinancialAdvantage {
                id: iri(&format!(
                    "http://data.lblod.info/id/financial-advantage/{uuid}-fa"
                )),
                uuid: format!("{uuid}-fa"),
                title: text("Sociaal tarief", Language::Formal),
                description: text("Halve retributie", Language::Formal),
                order: 1,
                concept_source_id: None,
            }],
            legal_resources: vec![LegalResource {
                id: iri(&format!("http://data.lblod.info/id/legal-resource/{uuid}-lr")),
                uuid: format!("{uuid}-lr"),
                title: text("Afvalreglement", Language::Formal),
                description: None,
                url: Some("https://codex.vlaanderen.be/afval".to_string()),
                order: 1,
                concept_source_id: None,
            }],
            ..PublicServiceContent::default()
        },
        contact_points: vec![ContactPoint {
            id: iri(&format!("http://data.lblod.info/id/contact-point/{uuid}-cp")),
            uuid: format!("{uuid}-cp"),
            url: None,
            email: Some("info@gemeente.be".to_string()),
            telephone: None,
            opening_hours: None,
            order: 1,
            address: Some(Address {
                id: iri(&format!("http://data.lblod.info/id/address/{uuid}-addr")),
                uuid: format!("{uuid}-addr"),
                municipality: text("Aarschot", Language::Nl),
                street: text("Ten Drossaarde", Language::Nl),
                house_number: Some("1".to_string()),
                box_number: None,
                postcode: Some("3200".to_string()),
                country: text("België", Language::Nl),
                order: 1,
                register_id: None,
            }),
        }],
        concept_id: None,
        concept_snapshot_id: None,
        product_id: None,
        languages: Vec::new(),
        dutch_language_variant: Language::Formal,
        needs_conversion_from_formal_to_informal: false,
        date_created: date(CREATED_AT),
        date_modified: date(CREATED_AT),
        date_sent: None,
        date_published: None,
        status: InstanceStatus::Draft,
        review_status: None,
        publication_status: None,
        spatials: bestuurseenheid.spatials().to_vec(),
        for_municipality_merger: false,
        copy_of: None,
    }
}

/// Instance linked to `snapshot` of `concept`.
pub fn linked_instance(
    bestuurseenheid: &Bestuurseenheid,
    uuid: &str,
    concept: &Concept,
    snapshot: &ConceptSnapshot,
) -> Instance {
    Instance {
        concept_id: Some(concept.id.clone()),
        concept_snapshot_id: Some(snapshot.id.clone()),
        product_id: Some(concept.product_id.clone()),
        ..draft_instance(bestuurseenheid, uuid)
    }
}

/// `instance` as sent on `sent_at` and published afterwards.
pub fn sent_and_published(instance: Instance, sent_at: &str, published_at: &str) -> Instance {
    instance
        .publish(date(sent_at))
        .unwrap()
        .mark_published(date(published_at))
        .unwrap()
}
