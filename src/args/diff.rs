//! `--diff`: record the keys added since a previous reference file.

use std::path::Path;

use langslide::config::Settings;
use langslide::lang::{diff, loader};

use crate::args::Result;

/// What: Compare an old reference file with the current one and write the snapshot.
///
/// Inputs:
/// - `settings`: Configuration (language folder, reference locale, snapshot path).
/// - `old`: Previous version of the reference language file.
///
/// Output:
/// - Writes the snapshot and prints how many keys it holds.
///
/// # Errors
/// - Either file cannot be read, or the snapshot cannot be written.
///
/// Details:
/// - Both sides are compared raw, so companion keys feeding composite entries
///   are captured alongside the category keys.
pub fn handle_diff(settings: &Settings, old: &Path) -> Result<()> {
    let reference = &settings.language.reference;
    tracing::info!(old = %old.display(), locale = %reference, "diff requested from CLI");
    let old_map = loader::load_json_map(old)?;
    let new_map = loader::load_locale_file(reference, &settings.language_dir())?;
    let added = diff::diff_keys(&old_map, &new_map);
    let path = settings.diff_path();
    diff::write_snapshot(&path, &added)?;
    tracing::info!(keys = added.len(), path = %path.display(), "diff snapshot written");
    println!("{} new keys written to {}", added.len(), path.display());
    Ok(())
}
