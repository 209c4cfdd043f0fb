//! Cross-locale sorting.
//!
//! The reference locale's entries are ordered by display string; every other
//! locale is then ordered by the position of each key in that reference order,
//! never by its own collation. Slide `n` therefore shows the same key in every
//! locale even when scripts collate differently.

use std::collections::{HashMap, HashSet};
use std::iter;

use serde::Serialize;
use thiserror::Error;

use crate::lang::{Category, LangMap, LanguageSet, is_valid, normalize};

/// Ordered `(key, display string)` pairs for one locale.
pub type SortedEntries = Vec<(String, String)>;

/// Alignment failures between the reference locale and another locale.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    /// A locale carries a classified key the reference locale does not have.
    #[error(
        "locale '{locale}' has key '{key}' that is missing from the reference locale; \
         key sets must match after normalization"
    )]
    UnknownKey {
        /// Locale carrying the extra key.
        locale: String,
        /// The extra key.
        key: String,
    },
    /// A locale lacks a classified key the reference locale has.
    #[error(
        "locale '{locale}' is missing key '{key}' present in the reference locale; \
         add it to the supplement file"
    )]
    MissingKey {
        /// Locale lacking the key.
        locale: String,
        /// The missing key.
        key: String,
    },
}

/// Aligned sequences for every locale.
#[derive(Debug, Clone, Serialize)]
pub struct SortedLocales {
    /// Code of the reference locale.
    reference: String,
    /// Sequences in configured locale order.
    locales: Vec<(String, SortedEntries)>,
}

impl SortedLocales {
    /// The reference locale's sequence.
    #[must_use]
    pub fn reference(&self) -> &SortedEntries {
        self.get(&self.reference).unwrap_or(&EMPTY)
    }

    /// Code of the reference locale.
    #[must_use]
    pub fn reference_code(&self) -> &str {
        &self.reference
    }

    /// Sequence of `locale`, if loaded.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&SortedEntries> {
        self.locales
            .iter()
            .find(|(code, _)| code == locale)
            .map(|(_, entries)| entries)
    }

    /// Every `(locale, sequence)` pair in configured order.
    #[must_use]
    pub fn locales(&self) -> &[(String, SortedEntries)] {
        &self.locales
    }

    /// Number of aligned entries (equal for every locale).
    #[must_use]
    pub fn len(&self) -> usize {
        self.reference().len()
    }

    /// Whether no entry survived classification.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// What: Keep only keys present in `keys` or built from them, preserving order.
    ///
    /// Inputs:
    /// - `keys`: Diff snapshot of newly added keys.
    ///
    /// Details:
    /// - A companion key in the snapshot (`upgrade.minecraft.netherite_upgrade`,
    ///   `trim_pattern.minecraft.<v>`) keeps the composite entries built from it.
    /// - Applied identically to every locale, so alignment is preserved.
    pub fn restrict_to(&mut self, keys: &LangMap) {
        let wanted: HashSet<String> = keys
            .keys()
            .flat_map(|key| iter::once(key.clone()).chain(normalize::composites_fed_by(key)))
            .collect();
        for (_, entries) in &mut self.locales {
            entries.retain(|(key, _)| wanted.contains(key));
        }
    }
}

/// Shared empty sequence.
static EMPTY: SortedEntries = Vec::new();

/// What: Filter every locale by `categories` and align on the reference order.
///
/// Inputs:
/// - `set`: Normalized locales.
/// - `categories`: Categories whose keys are kept.
///
/// Output:
/// - `SortedLocales` where every sequence has the same length and the same key
///   at every index.
///
/// # Errors
/// - `SortError::UnknownKey` when a non-reference locale has a classified key
///   absent from the reference order.
/// - `SortError::MissingKey` when a non-reference locale lacks a reference key.
///
/// Details:
/// - Reference ordering compares display strings by Unicode scalar value, ties
///   broken by key.
pub fn sort_locales(
    set: &LanguageSet,
    categories: &[Category],
) -> Result<SortedLocales, SortError> {
    let reference = set.reference();
    let mut reference_entries = classified(&reference.strings, categories);
    reference_entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let position: HashMap<&str, usize> = reference_entries
        .iter()
        .enumerate()
        .map(|(i, (key, _))| (key.as_str(), i))
        .collect();

    let mut locales = Vec::with_capacity(set.locales().len());
    for locale in set.locales() {
        if locale.code == reference.code {
            locales.push((locale.code.clone(), reference_entries.clone()));
            continue;
        }
        let mut entries = Vec::new();
        for (key, value) in classified(&locale.strings, categories) {
            let Some(&index) = position.get(key.as_str()) else {
                return Err(SortError::UnknownKey {
                    locale: locale.code.clone(),
                    key,
                });
            };
            entries.push((index, key, value));
        }
        if entries.len() != reference_entries.len() {
            let missing = reference_entries
                .iter()
                .find(|(key, _)| !locale.strings.contains_key(key))
                .map(|(key, _)| key.clone())
                .unwrap_or_default();
            return Err(SortError::MissingKey {
                locale: locale.code.clone(),
                key: missing,
            });
        }
        entries.sort_by_key(|(index, _, _)| *index);
        locales.push((
            locale.code.clone(),
            entries.into_iter().map(|(_, k, v)| (k, v)).collect(),
        ));
    }

    tracing::debug!(
        categories = ?categories,
        entries = reference_entries.len(),
        "sorted locales"
    );
    Ok(SortedLocales {
        reference: reference.code.clone(),
        locales,
    })
}

/// Entries of `strings` accepted by `categories`, in key order.
fn classified(strings: &LangMap, categories: &[Category]) -> SortedEntries {
    strings
        .iter()
        .filter(|(key, _)| is_valid(key, categories))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
