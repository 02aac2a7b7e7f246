//! Authorities and their register preference.

use crate::model::date::FormatPreservingDate;
use crate::model::invariant::{require_no_duplicates, require_non_blank, InvariantResult};
use crate::model::iri::Iri;
use crate::model::language::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestuurseenheidClassification {
    Municipality,
    Province,
    PublicCentreForSocialWelfare,
    District,
    IntermunicipalPartnership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestuurseenheidStatus {
    Active,
    Inactive,
}

/// Government organization owning instances. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bestuurseenheid {
    id: Iri,
    uuid: String,
    pref_label: String,
    classification: BestuurseenheidClassification,
    status: BestuurseenheidStatus,
    spatials: Vec<Iri>,
}

impl Bestuurseenheid {
    pub fn new(
        id: Iri,
        uuid: impl Into<String>,
        pref_label: impl Into<String>,
        classification: BestuurseenheidClassification,
        status: BestuurseenheidStatus,
        spatials: Vec<Iri>,
    ) -> InvariantResult<Self> {
        let uuid = uuid.into();
        let pref_label = pref_label.into();
        require_non_blank(&uuid, "bestuurseenheid uuid")?;
        require_non_blank(&pref_label, "bestuurseenheid pref label")?;
        require_no_duplicates(&spatials, "bestuurseenheid spatials")?;
        Ok(Self {
            id,
            uuid,
            pref_label,
            classification,
            status,
            spatials,
        })
    }

    pub fn id(&self) -> &Iri {
        &self.id
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn pref_label(&self) -> &str {
        &self.pref_label
    }

    pub fn classification(&self) -> BestuurseenheidClassification {
        self.classification
    }

    pub fn status(&self) -> BestuurseenheidStatus {
        self.status
    }

    /// Spatial-coverage codes (NIS codes) of this authority.
    pub fn spatials(&self) -> &[Iri] {
        &self.spatials
    }

    /// Named graph holding this authority's instances.
    pub fn user_graph(&self) -> InvariantResult<Iri> {
        Iri::new(format!(
            "http://mu.semte.ch/graphs/organizations/{}/LoketLB-LPDCGebruiker",
            self.uuid
        ))
    }
}

/// Register an authority addresses citizens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChosenForm {
    Formal,
    Informal,
}

impl ChosenForm {
    pub fn as_str(self) -> &'static str {
        match self {
            ChosenForm::Formal => "formal",
            ChosenForm::Informal => "informal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "formal" => Some(ChosenForm::Formal),
            "informal" => Some(ChosenForm::Informal),
            _ => None,
        }
    }

    /// Register new instance texts are written in.
    pub fn instance_language(self) -> Language {
        match self {
            ChosenForm::Formal => Language::Formal,
            ChosenForm::Informal => Language::Informal,
        }
    }
}

/// One recorded register preference. The latest by `date_created` is
/// authoritative for its authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalInformalChoice {
    pub id: Iri,
    pub uuid: String,
    pub date_created: FormatPreservingDate,
    pub chosen_form: ChosenForm,
    pub bestuurseenheid_id: Iri,
}

impl FormalInformalChoice {
    pub fn new(
        id: Iri,
        uuid: impl Into<String>,
        date_created: FormatPreservingDate,
        chosen_form: ChosenForm,
        bestuurseenheid_id: Iri,
    ) -> InvariantResult<Self> {
        let uuid = uuid.into();
        require_non_blank(&uuid, "formal informal choice uuid")?;
        Ok(Self {
            id,
            uuid,
            date_created,
            chosen_form,
            bestuurseenheid_id,
        })
    }

    pub fn is_informal(&self) -> bool {
        self.chosen_form == ChosenForm::Informal
    }
}
