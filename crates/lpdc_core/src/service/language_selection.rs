//! Picks the concept register an instance copies its texts from.
//!
//! # Invariants
//! - Pure: no I/O, no failure mode.
//! - A generated formal text is only chosen when a genuine informal text
//!   exists as well.
//! - Without a preference the formal chain applies.

use crate::model::authority::FormalInformalChoice;
use crate::model::concept::LanguageVersionSource;
use crate::model::instance::Instance;
use crate::model::language::Language;

/// Register chosen by the raw "informal required" flag.
pub fn select_language_using_informal_flag(
    source: &dyn LanguageVersionSource,
    informal_required: bool,
) -> Language {
    let available = source.language_versions();
    if informal_required {
        if available.contains(&Language::Informal) {
            Language::Informal
        } else if available.contains(&Language::GeneratedInformal) {
            Language::GeneratedInformal
        } else {
            Language::Nl
        }
    } else if available.contains(&Language::Formal) {
        Language::Formal
    } else if available.contains(&Language::GeneratedFormal)
        && available.contains(&Language::Informal)
    {
        Language::GeneratedFormal
    } else {
        Language::Nl
    }
}

/// Register chosen by the authority's preference.
pub fn select_language_for_choice(
    source: &dyn LanguageVersionSource,
    choice: Option<&FormalInformalChoice>,
) -> Language {
    select_language_using_informal_flag(
        source,
        choice.is_some_and(FormalInformalChoice::is_informal),
    )
}

/// Register chosen for an existing instance. An instance already written in
/// the formal or informal register keeps it; a neutral instance follows the
/// authority's preference.
pub fn select_language_for_instance(
    source: &dyn LanguageVersionSource,
    instance: &Instance,
    choice: Option<&FormalInformalChoice>,
) -> Language {
    match instance.dutch_language_variant {
        Language::Informal => select_language_using_informal_flag(source, true),
        Language::Formal => select_language_using_informal_flag(source, false),
        _ => select_language_for_choice(source, choice),
    }
}
