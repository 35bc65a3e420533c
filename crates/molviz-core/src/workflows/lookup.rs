use crate::engine::error::{LookupError, TranslationError};
use std::future::Future;
use tracing::{debug, warn};

/// Structure record returned by a compound directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedStructure {
    /// Display formula, e.g. `"C8H10N4O2"`.
    pub formula: String,
    /// Structure-file text (SDF/MOL V2000).
    pub text: String,
}

/// A chemistry database that maps names to identifiers and identifiers to
/// 3D structures.
pub trait CompoundDirectory {
    /// Resolves a compound name to the directory's identifier.
    ///
    /// Fails with [`LookupError::NotFound`] when the name is unknown.
    fn resolve_identifier(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<u64, LookupError>> + Send;

    fn fetch_structure(
        &self,
        identifier: u64,
    ) -> impl Future<Output = Result<FetchedStructure, LookupError>> + Send;
}

/// Machine translation between language codes such as `"he"` and `"en"`.
pub trait Translator {
    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedMolecule {
    pub name: &'static str,
    pub hebrew: &'static str,
    /// Display formula with subscript digits.
    pub formula: &'static str,
}

const fn suggestion(
    name: &'static str,
    hebrew: &'static str,
    formula: &'static str,
) -> SuggestedMolecule {
    SuggestedMolecule {
        name,
        hebrew,
        formula,
    }
}

pub const SUGGESTED_MOLECULES: [SuggestedMolecule; 7] = [
    suggestion("water", "מים", "H₂O"),
    suggestion("ammonia", "אמוניה", "NH₃"),
    suggestion("methane", "מתאן", "CH₄"),
    suggestion("ethylene", "אתילן", "C₂H₄"),
    suggestion("carbon dioxide", "פחמן דו-חמצני", "CO₂"),
    suggestion("caffeine", "קפאין", "C₈H₁₀N₄O₂"),
    suggestion("glucose", "גלוקוז", "C₆H₁₂O₆"),
];

/// True if `text` contains any character of the Hebrew Unicode block.
pub fn is_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// English name of a suggested molecule given its exact Hebrew name.
pub fn english_name_for(hebrew: &str) -> Option<&'static str> {
    SUGGESTED_MOLECULES
        .iter()
        .find(|molecule| molecule.hebrew == hebrew)
        .map(|molecule| molecule.name)
}

/// Translates a Hebrew name to English. Never fails: on a translation error
/// the suggestion list is consulted, and failing that the text is returned
/// unchanged.
pub async fn translate_with_fallback<T: Translator>(translator: &T, text: &str) -> String {
    match translator.translate(text, "he", "en").await {
        Ok(translated) if !translated.trim().is_empty() => {
            debug!(from = text, to = %translated, "Translated name.");
            translated.trim().to_string()
        }
        Ok(_) => fallback_name(text, "translation was empty"),
        Err(err) => fallback_name(text, &err.to_string()),
    }
}

fn fallback_name(text: &str, reason: &str) -> String {
    let name = english_name_for(text).unwrap_or(text);
    warn!(reason, fallback = name, "Translation unavailable; using local name.");
    name.to_string()
}
