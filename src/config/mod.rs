//! Configuration file model, discovery and validation.
//!
//! The configuration is a TOML document with these sections:
//!
//! ```toml
//! [folder]
//! language_folder = "lang"
//! image_folder = "image"
//! log_folder = "log"
//! slide_folder = "slide"
//!
//! [language]
//! reference = "en_us"
//! locales = ["en_us", "zh_cn", "zh_hk", "zh_tw", "lzh"]
//!
//! [language.join_style]
//! en_us = "spaced"
//! zh_cn = "concatenated"
//!
//! [category]
//! ignore_enchantment = true
//!
//! [slide.font]
//! source = "Minecraft Seven"
//! ```
//!
//! Relative folders are resolved against the directory holding the file, so a
//! run does not depend on the current working directory once the file is found.

pub mod paths;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lang::JoinStyle;
use crate::lang::classifier::Category;

/// Errors raised while locating, reading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file exists at any candidate location.
    #[error(
        "configuration file not found; place {} next to the language folder \
         or pass --config (searched: {})",
        paths::CONFIG_FILE_NAME,
        format_paths(.searched)
    )]
    NotFound {
        /// Locations that were checked.
        searched: Vec<PathBuf>,
    },
    /// The file exists but could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Io {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the expected shape.
    #[error("failed to parse configuration {}: {source}", path.display())]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// The file parsed but its values are inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Render a list of paths for diagnostics.
fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fully loaded configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Folder layout.
    #[serde(default)]
    pub folder: FolderSettings,
    /// Locale list and composition rules.
    #[serde(default)]
    pub language: LanguageSettings,
    /// Per-category ignore flags.
    #[serde(default)]
    pub category: CategorySettings,
    /// Image download options.
    #[serde(default)]
    pub image: ImageSettings,
    /// Wiki API options.
    #[serde(default)]
    pub wiki: WikiSettings,
    /// Slide font table.
    #[serde(default)]
    pub slide: SlideSettings,
    /// Directory relative folders are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// `[folder]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FolderSettings {
    /// Folder with one `<locale>.json` file per locale.
    pub language_folder: PathBuf,
    /// Folder receiving downloaded images, one sub-folder per category.
    pub image_folder: PathBuf,
    /// Folder receiving run logs.
    pub log_folder: PathBuf,
    /// Folder holding one sub-folder per category deck.
    pub slide_folder: PathBuf,
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            language_folder: PathBuf::from("lang"),
            image_folder: PathBuf::from("image"),
            log_folder: PathBuf::from("log"),
            slide_folder: PathBuf::from("slide"),
        }
    }
}

/// `[language]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    /// Locale whose display strings define the canonical order.
    pub reference: String,
    /// Every locale to load, in table-row order after the reference.
    pub locales: Vec<String>,
    /// How composite strings are joined, per locale.
    pub join_style: BTreeMap<String, JoinStyle>,
    /// Fixed display strings for aggregate keys, per locale.
    pub literals: BTreeMap<String, BTreeMap<String, String>>,
    /// Hand-authored strings merged into non-reference locales.
    pub supplements: PathBuf,
    /// Snapshot of newly added keys written by `--diff`.
    pub diff_file: PathBuf,
    /// Advancement frame/icon data.
    pub advancements_data: PathBuf,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        let locales: Vec<String> = ["en_us", "zh_cn", "zh_hk", "zh_tw", "lzh"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let join_style = locales
            .iter()
            .map(|code| {
                let style = if code == "en_us" {
                    JoinStyle::Spaced
                } else {
                    JoinStyle::Concatenated
                };
                (code.clone(), style)
            })
            .collect();
        Self {
            reference: "en_us".to_string(),
            locales,
            join_style,
            literals: BTreeMap::new(),
            supplements: PathBuf::from("supplements.json"),
            diff_file: PathBuf::from("en_us_diff.json"),
            advancements_data: PathBuf::from("advancements_data.json"),
        }
    }
}

/// `[category]` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CategorySettings {
    /// Skip the block deck.
    pub ignore_block: bool,
    /// Skip the entity deck.
    pub ignore_entity: bool,
    /// Skip the item deck.
    pub ignore_item: bool,
    /// Skip the effect deck.
    pub ignore_effect: bool,
    /// Skip the enchantment deck.
    pub ignore_enchantment: bool,
    /// Skip the biome deck.
    pub ignore_biome: bool,
    /// Skip the advancement deck.
    pub ignore_advancement: bool,
}

impl CategorySettings {
    /// Whether `category` is switched off.
    #[must_use]
    pub const fn is_ignored(&self, category: Category) -> bool {
        match category {
            Category::Block => self.ignore_block,
            Category::Entity => self.ignore_entity,
            Category::Item => self.ignore_item,
            Category::Effect => self.ignore_effect,
            Category::Enchantment => self.ignore_enchantment,
            Category::Biome => self.ignore_biome,
            Category::Advancement => self.ignore_advancement,
        }
    }

    /// Categories that are not switched off, in declaration order.
    #[must_use]
    pub fn enabled(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| !self.is_ignored(*c))
            .collect()
    }
}

/// `[image]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Download again even when the image file already exists.
    pub ignore_saved_image: bool,
    /// Key -> wiki file name overrides, inside the image folder.
    pub mapping_file: PathBuf,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            ignore_saved_image: false,
            mapping_file: PathBuf::from("image_mapping.json"),
        }
    }
}

/// `[wiki]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    /// `MediaWiki` API endpoint.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Download attempts per image.
    pub max_retries: u32,
    /// Wait after a connection or TLS failure.
    pub handshake_backoff_secs: u64,
    /// Wait after a read timeout.
    pub timeout_backoff_secs: u64,
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            api_url: "https://minecraft.wiki/api.php".to_string(),
            timeout_secs: 60,
            max_retries: 3,
            handshake_backoff_secs: 15,
            timeout_backoff_secs: 5,
        }
    }
}

/// `[slide]` section: font name, size and weight per text field.
///
/// Field names are `source`, `translation_key`, and each non-reference locale code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    /// Font family per field.
    pub font: BTreeMap<String, String>,
    /// Font size in points per field.
    pub size: BTreeMap<String, f64>,
    /// Bold flag per field.
    pub bold: BTreeMap<String, bool>,
}

/// Resolved text styling for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font family, if configured.
    pub font: Option<String>,
    /// Size in points, if configured.
    pub size: Option<f64>,
    /// Bold flag; `false` when not configured.
    pub bold: bool,
}

impl SlideSettings {
    /// What: Look up the styling of a text field.
    ///
    /// Inputs:
    /// - `field`: `source`, `translation_key`, or a locale code.
    ///
    /// Output:
    /// - `TextStyle` with unset entries left as `None`/`false`.
    #[must_use]
    pub fn style(&self, field: &str) -> TextStyle {
        TextStyle {
            font: self.font.get(field).cloned(),
            size: self.size.get(field).copied(),
            bold: self.bold.get(field).copied().unwrap_or(false),
        }
    }
}

impl Settings {
    /// What: Locate, read, parse and validate the configuration file.
    ///
    /// Inputs:
    /// - `explicit`: Path given with `--config`, if any.
    ///
    /// Output:
    /// - Validated `Settings` with `base_dir` set to the file's directory.
    ///
    /// # Errors
    /// - `ConfigError::NotFound` when no candidate file exists
    /// - `ConfigError::Io` / `ConfigError::Parse` for unreadable or malformed files
    /// - `ConfigError::Invalid` when validation fails
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = paths::resolve_config_path(explicit) else {
            return Err(ConfigError::NotFound {
                searched: paths::config_candidates(explicit),
            });
        };
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        settings.base_dir = paths::base_dir_of(&path);
        settings.validate()?;
        Ok(settings)
    }

    /// What: Parse settings from TOML text without touching the filesystem.
    ///
    /// Inputs:
    /// - `contents`: TOML document.
    ///
    /// Output:
    /// - Unvalidated `Settings` with `base_dir` set to `.`.
    ///
    /// # Errors
    /// - Returns the TOML error when the document is malformed.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Self = toml::from_str(contents)?;
        settings.base_dir = PathBuf::from(".");
        Ok(settings)
    }

    /// What: Check cross-field consistency.
    ///
    /// Output:
    /// - `Ok(())` when the reference locale is listed and every locale has a join style.
    ///
    /// # Errors
    /// - `ConfigError::Invalid` describing the first problem found.
    ///
    /// Details:
    /// - A locale without a join style is rejected instead of defaulted, so adding
    ///   a locale forces a decision about how its composite strings are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lang = &self.language;
        if lang.locales.is_empty() {
            return Err(ConfigError::Invalid("language.locales is empty".to_string()));
        }
        if !lang.locales.contains(&lang.reference) {
            return Err(ConfigError::Invalid(format!(
                "reference locale '{}' is not listed in language.locales",
                lang.reference
            )));
        }
        let mut seen = std::collections::BTreeSet::new();
        for code in &lang.locales {
            if !seen.insert(code) {
                return Err(ConfigError::Invalid(format!(
                    "locale '{code}' is listed twice in language.locales"
                )));
            }
            if !lang.join_style.contains_key(code) {
                return Err(ConfigError::Invalid(format!(
                    "locale '{code}' has no entry in language.join_style"
                )));
            }
        }
        if self.wiki.max_retries == 0 {
            return Err(ConfigError::Invalid(
                "wiki.max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a configured folder against the configuration directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Folder with the per-locale JSON files.
    #[must_use]
    pub fn language_dir(&self) -> PathBuf {
        self.resolve(&self.folder.language_folder)
    }

    /// Folder receiving downloaded images.
    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.folder.image_folder)
    }

    /// Folder receiving run logs.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.folder.log_folder)
    }

    /// Folder holding the category decks.
    #[must_use]
    pub fn slide_dir(&self) -> PathBuf {
        self.resolve(&self.folder.slide_folder)
    }

    /// Supplement file inside the language folder.
    #[must_use]
    pub fn supplements_path(&self) -> PathBuf {
        self.language_dir().join(&self.language.supplements)
    }

    /// Advancement frame/icon data inside the language folder.
    #[must_use]
    pub fn advancements_data_path(&self) -> PathBuf {
        self.language_dir().join(&self.language.advancements_data)
    }

    /// Diff snapshot, relative to the configuration directory.
    #[must_use]
    pub fn diff_path(&self) -> PathBuf {
        self.resolve(&self.language.diff_file)
    }

    /// Image name-mapping file inside the image folder.
    #[must_use]
    pub fn image_mapping_path(&self) -> PathBuf {
        self.image_dir().join(&self.image.mapping_file)
    }

    /// Join style of `locale`, falling back to concatenation for unlisted codes.
    #[must_use]
    pub fn join_style(&self, locale: &str) -> JoinStyle {
        self.language
            .join_style
            .get(locale)
            .copied()
            .unwrap_or(JoinStyle::Concatenated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: An empty document yields the stock layout and passes validation.
    ///
    /// Inputs:
    /// - Empty TOML string.
    ///
    /// Output:
    /// - Default folders, `en_us` reference, five locales, validation succeeds.
    fn empty_document_uses_defaults() {
        let settings = Settings::from_toml_str("").expect("parse");
        assert_eq!(settings.folder.language_folder, PathBuf::from("lang"));
        assert_eq!(settings.language.reference, "en_us");
        assert_eq!(settings.language.locales.len(), 5);
        assert_eq!(settings.join_style("en_us"), JoinStyle::Spaced);
        assert_eq!(settings.join_style("zh_cn"), JoinStyle::Concatenated);
        assert!(settings.validate().is_ok());
    }

    #[test]
    /// What: Sections and nested tables parse into typed settings.
    ///
    /// Inputs:
    /// - Document with folder, category, wiki and slide sections.
    ///
    /// Output:
    /// - Values surface through the typed accessors.
    fn parses_sections() {
        let doc = r#"
            [folder]
            language_folder = "strings"

            [category]
            ignore_enchantment = true
            ignore_biome = true

            [wiki]
            max_retries = 5

            [slide.font]
            source = "Minecraft Seven"
            zh_cn = "Noto Sans SC"

            [slide.size]
            source = 40.0

            [slide.bold]
            zh_cn = true
        "#;
        let settings = Settings::from_toml_str(doc).expect("parse");
        assert_eq!(settings.language_dir(), PathBuf::from("./strings"));
        assert!(settings.category.is_ignored(Category::Enchantment));
        assert!(!settings.category.enabled().contains(&Category::Biome));
        assert_eq!(settings.wiki.max_retries, 5);
        let style = settings.slide.style("zh_cn");
        assert_eq!(style.font.as_deref(), Some("Noto Sans SC"));
        assert!(style.bold);
        assert_eq!(settings.slide.style("source").size, Some(40.0));
    }

    #[test]
    /// What: A locale without a join style is rejected.
    ///
    /// Inputs:
    /// - Locales list adding `ja_jp` while keeping the default join table.
    ///
    /// Output:
    /// - `ConfigError::Invalid` naming the locale.
    fn rejects_locale_without_join_style() {
        let doc = r#"
            [language]
            locales = ["en_us", "ja_jp"]
            [language.join_style]
            en_us = "spaced"
        "#;
        let settings = Settings::from_toml_str(doc).expect("parse");
        let err = settings.validate().expect_err("must fail");
        assert!(err.to_string().contains("ja_jp"));
    }

    #[test]
    /// What: The reference locale must be one of the loaded locales.
    ///
    /// Inputs:
    /// - `reference = "fr_fr"` with the default locale list.
    ///
    /// Output:
    /// - Validation error mentioning the reference.
    fn rejects_unlisted_reference() {
        let doc = r#"
            [language]
            reference = "fr_fr"
        "#;
        let settings = Settings::from_toml_str(doc).expect("parse");
        let err = settings.validate().expect_err("must fail");
        assert!(err.to_string().contains("fr_fr"));
    }

    #[test]
    /// What: Loading from a missing explicit path reports the searched location.
    ///
    /// Inputs:
    /// - Explicit path inside an empty temporary directory.
    ///
    /// Output:
    /// - `ConfigError::NotFound` listing that path.
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let err = Settings::load(Some(&path)).expect_err("must fail");
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    /// What: Folders resolve against the directory of the loaded file.
    ///
    /// Inputs:
    /// - `langslide.toml` written into a temporary directory.
    ///
    /// Output:
    /// - `language_dir` lives under that directory.
    fn load_sets_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("langslide.toml");
        fs::write(&path, "[folder]\nlanguage_folder = \"lang\"\n").expect("write");
        let settings = Settings::load(Some(&path)).expect("load");
        assert_eq!(settings.language_dir(), dir.path().join("lang"));
        assert_eq!(
            settings.image_mapping_path(),
            dir.path().join("image").join("image_mapping.json")
        );
    }
}
