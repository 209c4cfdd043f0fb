//! Localization data: key classification, loading, normalization, cross-locale
//! sorting and snapshot diffing.
//!
//! # Overview
//!
//! A run builds one [`LanguageSet`] from the configured locales:
//!
//! 1. [`loader`] reads `<language_folder>/<locale>.json` for every locale.
//! 2. [`normalize`] removes deprecated keys and builds composite entries using
//!    the locale's [`JoinStyle`].
//! 3. Supplement strings are merged into every non-reference locale.
//!
//! The set is then handed to [`sort::sort_locales`] together with the
//! categories of interest, which yields per-locale sequences aligned on the
//! reference locale's alphabetical order.

pub mod classifier;
pub mod diff;
pub mod loader;
pub mod normalize;
pub mod sort;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Settings;

pub use classifier::{Category, is_tracked, is_valid};
pub use loader::LoadError;
pub use normalize::Normalizer;
pub use sort::{SortError, SortedEntries, SortedLocales, sort_locales};

/// Key -> display string for one locale.
pub type LangMap = BTreeMap<String, String>;

/// How two display strings are joined into a composite entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStyle {
    /// Separate the parts with a single space (`Coast Smithing Template`).
    Spaced,
    /// Write the parts back to back (`卫兵锻造模板`).
    Concatenated,
}

impl JoinStyle {
    /// What: Join two display strings according to this style.
    ///
    /// Inputs:
    /// - `head`: Leading part (e.g. the trim pattern name).
    /// - `tail`: Trailing part (e.g. the template noun).
    ///
    /// Output:
    /// - Combined display string.
    #[must_use]
    pub fn join(self, head: &str, tail: &str) -> String {
        match self {
            Self::Spaced => format!("{head} {tail}"),
            Self::Concatenated => format!("{head}{tail}"),
        }
    }
}

/// One normalized locale.
#[derive(Debug, Clone)]
pub struct Locale {
    /// Locale code (file stem), e.g. `zh_cn`.
    pub code: String,
    /// Composite join style.
    pub join_style: JoinStyle,
    /// Normalized strings.
    pub strings: LangMap,
}

/// Every loaded locale, with the reference locale identified.
#[derive(Debug, Clone)]
pub struct LanguageSet {
    /// Index of the reference locale in `locales`.
    reference: usize,
    /// Locales in configured order.
    locales: Vec<Locale>,
}

impl LanguageSet {
    /// What: Assemble a set from already normalized locales.
    ///
    /// Inputs:
    /// - `reference`: Code of the reference locale.
    /// - `locales`: Locales in table-row order.
    ///
    /// Output:
    /// - `Some(LanguageSet)`, or `None` when `reference` is not among `locales`.
    #[must_use]
    pub fn new(reference: impl Into<String>, locales: Vec<Locale>) -> Option<Self> {
        let reference = reference.into();
        let index = locales.iter().position(|l| l.code == reference)?;
        Some(Self {
            reference: index,
            locales,
        })
    }

    /// Code of the reference locale.
    #[must_use]
    pub fn reference_code(&self) -> &str {
        &self.reference().code
    }

    /// The reference locale.
    #[must_use]
    pub fn reference(&self) -> &Locale {
        &self.locales[self.reference]
    }

    /// Locale by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// All locales in configured order.
    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Non-reference locales in configured order.
    pub fn others(&self) -> impl Iterator<Item = &Locale> {
        self.locales
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.reference)
            .map(|(_, l)| l)
    }
}

/// What: Load, normalize and supplement every configured locale.
///
/// Inputs:
/// - `settings`: Validated configuration.
///
/// Output:
/// - `LanguageSet` ready for sorting.
///
/// # Errors
/// - `LoadError` when a locale file or the supplement file is missing or malformed.
///
/// Details:
/// - Each raw mapping is normalized exactly once; the raw data is dropped afterwards.
/// - Supplements override normalized strings of non-reference locales only.
pub fn load_language_set(settings: &Settings) -> Result<LanguageSet, LoadError> {
    let dir = settings.language_dir();
    let supplements = loader::load_supplements(&settings.supplements_path())?;
    let reference = settings.language.reference.clone();

    let mut locales = Vec::with_capacity(settings.language.locales.len());
    for code in &settings.language.locales {
        let raw = loader::load_locale_file(code, &dir)?;
        let join_style = settings.join_style(code);
        let normalizer = Normalizer::new(join_style, settings.language.literals.get(code));
        let mut strings = normalizer.normalize(&raw);
        if *code != reference
            && let Some(extra) = supplements.get(code)
        {
            strings.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
            tracing::info!(locale = %code, count = extra.len(), "merged supplement strings");
        }
        tracing::info!(locale = %code, keys = strings.len(), "loaded locale");
        locales.push(Locale {
            code: code.clone(),
            join_style,
            strings,
        });
    }

    LanguageSet::new(reference.clone(), locales).ok_or(LoadError::MissingReference(reference))
}
