//! Controlled vocabularies used by concepts and instances.
//!
//! Every code maps to exactly one IRI. `InstanceStatus::Sent` additionally
//! accepts the legacy `verstuurd` spelling on read.

use serde::{Deserialize, Serialize};

const CONCEPT_BASE: &str = "https://productencatalogus.data.vlaanderen.be/id/concept";

/// Lifecycle status of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    /// `ontwerp`
    Draft,
    /// `verzonden`
    Sent,
}

impl InstanceStatus {
    pub const ALL: [InstanceStatus; 2] = [InstanceStatus::Draft, InstanceStatus::Sent];

    pub fn iri(self) -> &'static str {
        match self {
            InstanceStatus::Draft => "http://lblod.data.gift/concepts/instance-status/ontwerp",
            InstanceStatus::Sent => "http://lblod.data.gift/concepts/instance-status/verzonden",
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        if iri == "http://lblod.data.gift/concepts/instance-status/verstuurd" {
            return Some(InstanceStatus::Sent);
        }
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Why an instance needs human review after upstream changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceReviewStatus {
    ConceptChanged,
    ConceptArchived,
}

impl InstanceReviewStatus {
    pub const ALL: [InstanceReviewStatus; 2] = [
        InstanceReviewStatus::ConceptChanged,
        InstanceReviewStatus::ConceptArchived,
    ];

    pub fn iri(self) -> &'static str {
        match self {
            InstanceReviewStatus::ConceptChanged => {
                "http://lblod.data.gift/concepts/review-status/concept-gewijzigd"
            }
            InstanceReviewStatus::ConceptArchived => {
                "http://lblod.data.gift/concepts/review-status/concept-gearchiveerd"
            }
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Publication state, independent from `InstanceStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstancePublicationStatus {
    Published,
    ToBeRepublished,
}

impl InstancePublicationStatus {
    pub const ALL: [InstancePublicationStatus; 2] = [
        InstancePublicationStatus::Published,
        InstancePublicationStatus::ToBeRepublished,
    ];

    pub fn iri(self) -> &'static str {
        match self {
            InstancePublicationStatus::Published => {
                "http://lblod.data.gift/concepts/publication-status/gepubliceerd"
            }
            InstancePublicationStatus::ToBeRepublished => {
                "http://lblod.data.gift/concepts/publication-status/te-herpubliceren"
            }
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    AdviceGuidance,
    InfrastructureMaterial,
    FinancialObligation,
    Permit,
    Evidence,
    Object,
    FinancialAdvantage,
}

impl ProductType {
    pub const ALL: [ProductType; 7] = [
        ProductType::AdviceGuidance,
        ProductType::InfrastructureMaterial,
        ProductType::FinancialObligation,
        ProductType::Permit,
        ProductType::Evidence,
        ProductType::Object,
        ProductType::FinancialAdvantage,
    ];

    pub fn iri(self) -> String {
        let name = match self {
            ProductType::AdviceGuidance => "AdviesBegeleiding",
            ProductType::InfrastructureMaterial => "InfrastructuurMateriaal",
            ProductType::FinancialObligation => "FinancieleVerplichting",
            ProductType::Permit => "Toelating",
            ProductType::Evidence => "Bewijs",
            ProductType::Object => "Voorwerp",
            ProductType::FinancialAdvantage => "FinancieelVoordeel",
        };
        format!("{CONCEPT_BASE}/Type/{name}")
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    Citizen,
    Company,
    Organisation,
    Association,
    FlemishGovernment,
    LocalGovernment,
}

impl TargetAudience {
    pub const ALL: [TargetAudience; 6] = [
        TargetAudience::Citizen,
        TargetAudience::Company,
        TargetAudience::Organisation,
        TargetAudience::Association,
        TargetAudience::FlemishGovernment,
        TargetAudience::LocalGovernment,
    ];

    pub fn iri(self) -> String {
        let name = match self {
            TargetAudience::Citizen => "Burger",
            TargetAudience::Company => "Onderneming",
            TargetAudience::Organisation => "Organisatie",
            TargetAudience::Association => "Vereniging",
            TargetAudience::FlemishGovernment => "VlaamseOverheid",
            TargetAudience::LocalGovernment => "LokaalBestuur",
        };
        format!("{CONCEPT_BASE}/Doelgroep/{name}")
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    CitizenGovernment,
    BuildingLiving,
    CultureSportLeisure,
    EconomyWork,
    EnvironmentEnergy,
    MobilityPublicWorks,
    EducationScience,
    WelfareHealth,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::CitizenGovernment,
        Theme::BuildingLiving,
        Theme::CultureSportLeisure,
        Theme::EconomyWork,
        Theme::EnvironmentEnergy,
        Theme::MobilityPublicWorks,
        Theme::EducationScience,
        Theme::WelfareHealth,
    ];

    pub fn iri(self) -> String {
        let name = match self {
            Theme::CitizenGovernment => "BurgerOverheid",
            Theme::BuildingLiving => "BouwenWonen",
            Theme::CultureSportLeisure => "CultuurSportVrijeTijd",
            Theme::EconomyWork => "EconomieWerk",
            Theme::EnvironmentEnergy => "MilieuEnergie",
            Theme::MobilityPublicWorks => "MobiliteitOpenbareWerken",
            Theme::EducationScience => "OnderwijsWetenschap",
            Theme::WelfareHealth => "WelzijnGezondheid",
        };
        format!("{CONCEPT_BASE}/Thema/{name}")
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Government level competent for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetentAuthorityLevel {
    European,
    Federal,
    Flemish,
    Provincial,
    Local,
}

impl CompetentAuthorityLevel {
    pub const ALL: [CompetentAuthorityLevel; 5] = [
        CompetentAuthorityLevel::European,
        CompetentAuthorityLevel::Federal,
        CompetentAuthorityLevel::Flemish,
        CompetentAuthorityLevel::Provincial,
        CompetentAuthorityLevel::Local,
    ];

    pub fn iri(self) -> String {
        format!("{CONCEPT_BASE}/BevoegdBestuursniveau/{}", level_name(self as usize))
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Government level (or third party) executing a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutingAuthorityLevel {
    European,
    Federal,
    Flemish,
    Provincial,
    Local,
    ThirdParty,
}

impl ExecutingAuthorityLevel {
    pub const ALL: [ExecutingAuthorityLevel; 6] = [
        ExecutingAuthorityLevel::European,
        ExecutingAuthorityLevel::Federal,
        ExecutingAuthorityLevel::Flemish,
        ExecutingAuthorityLevel::Provincial,
        ExecutingAuthorityLevel::Local,
        ExecutingAuthorityLevel::ThirdParty,
    ];

    pub fn iri(self) -> String {
        format!("{CONCEPT_BASE}/UitvoerendBestuursniveau/{}", level_name(self as usize))
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

fn level_name(index: usize) -> &'static str {
    ["Europees", "Federaal", "Vlaams", "Provinciaal", "Lokaal", "Derden"][index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationMedium {
    YourEurope,
    RightsExplorer,
}

impl PublicationMedium {
    pub const ALL: [PublicationMedium; 2] =
        [PublicationMedium::YourEurope, PublicationMedium::RightsExplorer];

    pub fn iri(self) -> String {
        let name = match self {
            PublicationMedium::YourEurope => "YourEurope",
            PublicationMedium::RightsExplorer => "Rechtenverkenner",
        };
        format!("{CONCEPT_BASE}/PublicatieKanaal/{name}")
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Language an instance is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageType {
    Dutch,
    English,
    French,
    German,
}

impl LanguageType {
    pub const ALL: [LanguageType; 4] = [
        LanguageType::Dutch,
        LanguageType::English,
        LanguageType::French,
        LanguageType::German,
    ];

    pub fn iri(self) -> String {
        let code = match self {
            LanguageType::Dutch => "NLD",
            LanguageType::English => "ENG",
            LanguageType::French => "FRA",
            LanguageType::German => "DEU",
        };
        format!("http://publications.europa.eu/resource/authority/language/{code}")
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.iri() == iri)
    }
}

/// Uniform access to a code list, used by the statement mapper.
pub trait Code: Copy + PartialEq + 'static {
    /// Every code, in declaration order.
    fn all() -> &'static [Self];

    fn code_iri(self) -> String;

    fn parse_iri(iri: &str) -> Option<Self>;
}

macro_rules! impl_code {
    ($($code:ty),* $(,)?) => {
        $(
            impl Code for $code {
                fn all() -> &'static [Self] {
                    &<$code>::ALL
                }

                fn code_iri(self) -> String {
                    self.iri().to_string()
                }

                fn parse_iri(iri: &str) -> Option<Self> {
                    <$code>::from_iri(iri)
                }
            }
        )*
    };
}

impl_code!(
    InstanceStatus,
    InstanceReviewStatus,
    InstancePublicationStatus,
    ProductType,
    TargetAudience,
    Theme,
    CompetentAuthorityLevel,
    ExecutingAuthorityLevel,
    PublicationMedium,
    LanguageType,
);
