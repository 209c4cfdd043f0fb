//! Wiki file names and local image paths for a display string.

use std::path::{Path, PathBuf};

use crate::lang::{Category, LangMap};

/// Local file name of an entry's image.
#[must_use]
pub fn image_file_name(value: &str) -> String {
    format!("{value}.png")
}

/// What: Local path of an entry's image.
///
/// Inputs:
/// - `image_dir`: Configured image folder.
/// - `category`: Category owning the entry.
/// - `value`: Reference display string.
///
/// Output:
/// - `<image_dir>/<category folder>/<value>.png`.
#[must_use]
pub fn image_path(image_dir: &Path, category: Category, value: &str) -> PathBuf {
    image_dir
        .join(category.folder())
        .join(image_file_name(value))
}

/// What: Wiki file names to query for one entry, most specific first.
///
/// Inputs:
/// - `category`: Category owning the entry.
/// - `key`: Localization key.
/// - `value`: Reference display string.
/// - `mapping`: Key -> wiki file name overrides.
///
/// Output:
/// - Distinct candidate file names in lookup order.
///
/// Details:
/// - Items use the wiki's inventory sprite (`<value>_(item).png`) first.
/// - Other categories use the mapping override, else `<value>.png`.
/// - Waxed copper variants reuse the unwaxed render (`Waxed Copper Block` -> `Copper Block.png`).
/// - The mapping override (else `<value>.png`) is always the last resort.
#[must_use]
pub fn candidate_file_names(
    category: Category,
    key: &str,
    value: &str,
    mapping: &LangMap,
) -> Vec<String> {
    let mapped = mapping
        .get(key)
        .cloned()
        .unwrap_or_else(|| image_file_name(value));
    let first = if let Some(unwaxed) = value.strip_prefix("Waxed ") {
        image_file_name(unwaxed)
    } else if category == Category::Item {
        format!("{value}_(item).png")
    } else {
        mapped.clone()
    };
    let mut candidates = vec![first];
    if !candidates.contains(&mapped) {
        candidates.push(mapped);
    }
    candidates
}
