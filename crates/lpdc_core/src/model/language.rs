//! Register-aware text values.
//!
//! # Responsibility
//! - Name the Dutch register variants (and English) a text may carry.
//! - Hold one piece of text in up to six registers.
//!
//! # Invariants
//! - Equality is per register.
//! - Transforming between registers never touches the English value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Text register. Dutch variants are distinguished by form of address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    /// Neutral Dutch.
    Nl,
    Formal,
    Informal,
    GeneratedFormal,
    GeneratedInformal,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Nl,
        Language::Formal,
        Language::Informal,
        Language::GeneratedFormal,
        Language::GeneratedInformal,
    ];

    /// Language tag used on literals.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
            Language::Formal => "nl-be-x-formal",
            Language::Informal => "nl-be-x-informal",
            Language::GeneratedFormal => "nl-be-x-generated-formal",
            Language::GeneratedInformal => "nl-be-x-generated-informal",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        Self::ALL.into_iter().find(|language| language.tag() == tag)
    }

    pub fn is_dutch(self) -> bool {
        self != Language::En
    }
}

/// One text in up to six registers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageString {
    pub en: Option<String>,
    pub nl: Option<String>,
    pub nl_formal: Option<String>,
    pub nl_informal: Option<String>,
    pub nl_generated_formal: Option<String>,
    pub nl_generated_informal: Option<String>,
}

impl LanguageString {
    /// Single-register value.
    pub fn of_value_in_language(value: impl Into<String>, language: Language) -> Self {
        Self::default().with_value(language, Some(value.into()))
    }

    /// Copy with one register replaced.
    pub fn with_value(mut self, language: Language, value: Option<String>) -> Self {
        *self.slot_mut(language) = value;
        self
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::Nl => self.nl.as_deref(),
            Language::Formal => self.nl_formal.as_deref(),
            Language::Informal => self.nl_informal.as_deref(),
            Language::GeneratedFormal => self.nl_generated_formal.as_deref(),
            Language::GeneratedInformal => self.nl_generated_informal.as_deref(),
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut Option<String> {
        match language {
            Language::En => &mut self.en,
            Language::Nl => &mut self.nl,
            Language::Formal => &mut self.nl_formal,
            Language::Informal => &mut self.nl_informal,
            Language::GeneratedFormal => &mut self.nl_generated_formal,
            Language::GeneratedInformal => &mut self.nl_generated_informal,
        }
    }

    /// Registers holding a value, in `Language` order.
    pub fn defined_languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.get(*language).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.defined_languages().is_empty()
    }

    /// Moves the `from` register's value into `to`, dropping every other Dutch
    /// register. English is kept.
    pub fn transform_language(&self, from: Language, to: Language) -> Self {
        Self {
            en: self.en.clone(),
            ..Self::default()
        }
        .with_value(to, self.get(from).map(str::to_string))
    }

    /// Union of registers used by the given values.
    pub fn extract_language_versions<'a>(
        values: impl IntoIterator<Item = Option<&'a LanguageString>>,
    ) -> BTreeSet<Language> {
        values
            .into_iter()
            .flatten()
            .flat_map(|value| value.defined_languages())
            .collect()
    }

    /// Prefixes every populated register, using `english_prefix` for English.
    pub fn prefixed(&self, dutch_prefix: &str, english_prefix: &str) -> Self {
        let mut result = Self::default();
        for language in self.defined_languages() {
            let prefix = if language.is_dutch() {
                dutch_prefix
            } else {
                english_prefix
            };
            let value = self.get(language).map(|value| format!("{prefix}{value}"));
            result = result.with_value(language, value);
        }
        result
    }

    /// Register-wise comparison of optional values.
    pub fn is_functionally_changed(left: Option<&Self>, right: Option<&Self>) -> bool {
        left != right
    }
}
