//! Shared utilities for the command handlers.

use langslide::config::Settings;
use langslide::lang::{self, Category, LangMap, LanguageSet, SortedLocales, diff};

use crate::args::{Args, Result};

/// What: Determine the log level from the command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - The verbose flag overrides `--log-level`.
/// - `RUST_LOG`, when set, takes precedence over both (see `main`).
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Categories processed by this run.
///
/// Inputs:
/// - `args`: Parsed arguments (`--category`).
/// - `settings`: Configuration (`[category]` ignore flags).
///
/// Output:
/// - The `--category` list without duplicates when given, otherwise every
///   category not ignored by the configuration.
#[must_use]
pub fn selected_categories(args: &Args, settings: &Settings) -> Vec<Category> {
    if args.category.is_empty() {
        return settings.category.enabled();
    }
    let mut selected = Vec::with_capacity(args.category.len());
    for category in &args.category {
        if !selected.contains(category) {
            selected.push(*category);
        }
    }
    selected
}

/// Normalized locales plus the optional incremental key filter.
pub struct Prepared {
    /// Every configured locale, normalized and supplemented.
    pub set: LanguageSet,
    /// Keys of the diff snapshot, for incremental runs.
    pub new_keys: Option<LangMap>,
}

/// What: Load the language set and, for incremental runs, the diff snapshot.
///
/// Inputs:
/// - `settings`: Configuration.
/// - `only_new`: Whether `--only-new` was given.
///
/// Output:
/// - `Prepared` state shared by every category of the run.
///
/// # Errors
/// - Language files, supplements or the snapshot cannot be read.
pub fn prepare(settings: &Settings, only_new: bool) -> Result<Prepared> {
    let set = lang::load_language_set(settings)?;
    let new_keys = if only_new {
        let keys = diff::read_snapshot(&settings.diff_path())?;
        tracing::info!(keys = keys.len(), "restricting run to diff snapshot");
        Some(keys)
    } else {
        None
    };
    Ok(Prepared { set, new_keys })
}

/// What: Aligned locales of one category.
///
/// Inputs:
/// - `prepared`: Loaded state.
/// - `category`: Category to sort.
///
/// Output:
/// - `SortedLocales`, restricted to the snapshot keys for incremental runs.
///
/// # Errors
/// - `SortError` when a locale's keys do not match the reference locale.
pub fn sorted_category(prepared: &Prepared, category: Category) -> Result<SortedLocales> {
    let mut sorted = lang::sort_locales(&prepared.set, &[category])?;
    if let Some(keys) = &prepared.new_keys {
        sorted.restrict_to(keys);
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    /// What: Verbose wins over the explicit level.
    ///
    /// Inputs:
    /// - `--count --log-level warn`, then the same with `-v`.
    ///
    /// Output:
    /// - `warn`, then `debug`.
    fn log_level_resolution() {
        let args =
            Args::try_parse_from(["langslide", "--count", "--log-level", "warn"]).expect("parse");
        assert_eq!(determine_log_level(&args), "warn");
        let args = Args::try_parse_from(["langslide", "--count", "--log-level", "warn", "-v"])
            .expect("parse");
        assert_eq!(determine_log_level(&args), "debug");
    }

    #[test]
    /// What: `--category` overrides the ignore flags.
    ///
    /// Inputs:
    /// - Configuration ignoring enchantments; runs with and without `--category`.
    ///
    /// Output:
    /// - Enabled categories by default, the deduplicated explicit list otherwise.
    fn category_selection() {
        let settings =
            Settings::from_toml_str("[category]\nignore_enchantment = true\n").expect("parse");
        let args = Args::try_parse_from(["langslide", "--count"]).expect("parse");
        let selected = selected_categories(&args, &settings);
        assert_eq!(selected.len(), 6);
        assert!(!selected.contains(&Category::Enchantment));

        let args = Args::try_parse_from([
            "langslide",
            "--count",
            "--category",
            "enchantment,item,enchantment",
        ])
        .expect("parse");
        assert_eq!(
            selected_categories(&args, &settings),
            vec![Category::Enchantment, Category::Item]
        );
    }
}
