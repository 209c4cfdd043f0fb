//! `--export`: aligned strings of each deck as JSON.

use std::fs;
use std::path::Path;

use langslide::config::Settings;
use langslide::lang::{Category, SortedLocales};

use crate::args::{Result, utils};

/// File name of the exported sequences, next to the deck.
const EXPORT_FILE: &str = "sorted.json";

/// What: Write `<slide_folder>/<category>/sorted.json` for every selected deck.
///
/// Inputs:
/// - `settings`: Configuration.
/// - `categories`: Decks to export.
/// - `only_new`: Export only keys of the diff snapshot.
///
/// Output:
/// - Prints each written path.
///
/// # Errors
/// - Loading, sorting or writing fails.
pub fn handle_export(settings: &Settings, categories: &[Category], only_new: bool) -> Result<()> {
    let prepared = utils::prepare(settings, only_new)?;
    let slide_dir = settings.slide_dir();
    for &category in categories {
        let sorted = utils::sorted_category(&prepared, category)?;
        let path = slide_dir.join(category.folder()).join(EXPORT_FILE);
        write_sorted(&path, &sorted)?;
        tracing::info!(
            category = %category,
            entries = sorted.len(),
            path = %path.display(),
            "exported"
        );
        println!("{}", path.display());
    }
    Ok(())
}

/// Write one deck's sequences as pretty JSON.
fn write_sorted(path: &Path, sorted: &SortedLocales) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut json = serde_json::to_string_pretty(sorted)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
