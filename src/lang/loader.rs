//! Locale file loading and parsing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::lang::LangMap;

/// Errors raised while reading localization JSON files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Locale code contains characters that cannot form a file stem.
    #[error(
        "invalid locale code '{0}': expected letters, digits, '_' or '-' (e.g. 'en_us', 'zh_cn')"
    )]
    InvalidLocale(String),
    /// A required file does not exist.
    #[error("language file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a flat JSON object of strings.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The reference locale is not part of the loaded set.
    #[error("reference locale '{0}' was not loaded")]
    MissingReference(String),
}

/// What: Load `<locale>.json` from the language folder.
///
/// Inputs:
/// - `locale`: Locale code (e.g., "`zh_cn`")
/// - `dir`: Language folder
///
/// Output:
/// - `Ok(LangMap)` with the raw, unnormalized strings
///
/// # Errors
/// - `LoadError::InvalidLocale` when the code is empty or malformed
/// - `LoadError::NotFound` when the file does not exist
/// - `LoadError::Io` / `LoadError::Parse` for unreadable or malformed files
pub fn load_locale_file(locale: &str, dir: &Path) -> Result<LangMap, LoadError> {
    if !is_valid_locale_format(locale) {
        return Err(LoadError::InvalidLocale(locale.to_string()));
    }
    load_json_map(&dir.join(format!("{locale}.json")))
}

/// What: Validate locale code format.
///
/// Inputs:
/// - `locale`: Locale code to validate
///
/// Output:
/// - `true` if the code can be used as a file stem, `false` otherwise
fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }

    locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !locale.starts_with(['-', '_'])
        && !locale.ends_with(['-', '_'])
}

/// What: Read a flat `key -> string` JSON object.
///
/// Inputs:
/// - `path`: JSON file
///
/// Output:
/// - `Ok(LangMap)` with every entry
///
/// # Errors
/// - `LoadError::NotFound` when the file does not exist
/// - `LoadError::Io` / `LoadError::Parse` for unreadable or malformed files
///
/// Details:
/// - Values must all be strings; nested objects are rejected as parse errors.
pub fn load_json_map(path: &Path) -> Result<LangMap, LoadError> {
    let contents = read_existing(path)?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// What: Read the supplement file (`locale -> key -> string`).
///
/// Inputs:
/// - `path`: Supplement file
///
/// Output:
/// - Supplements per locale; empty when the file does not exist
///
/// # Errors
/// - `LoadError::Io` / `LoadError::Parse` for unreadable or malformed files
pub fn load_supplements(path: &Path) -> Result<BTreeMap<String, LangMap>, LoadError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no supplement file");
        return Ok(BTreeMap::new());
    }
    let contents = read_existing(path)?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// What: Read an optional flat JSON object, treating a missing file as empty.
///
/// Inputs:
/// - `path`: JSON file
///
/// Output:
/// - Entries, or an empty map when the file does not exist
///
/// # Errors
/// - `LoadError::Io` / `LoadError::Parse` for unreadable or malformed files
pub fn load_optional_map(path: &Path) -> Result<LangMap, LoadError> {
    if path.exists() {
        load_json_map(path)
    } else {
        Ok(LangMap::new())
    }
}

/// Read a file to a string, mapping a missing file to `LoadError::NotFound`.
pub(crate) fn read_existing(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
