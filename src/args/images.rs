//! `--images`: download reference images from the wiki.

use langslide::config::Settings;
use langslide::lang::{Category, loader};
use langslide::wiki::{self, FetchOptions, WikiClient};

use crate::args::{Result, utils};

/// What: Fetch the images of every selected image-bearing deck.
///
/// Inputs:
/// - `settings`: Configuration (image folder, mapping file, wiki options).
/// - `categories`: Selected decks; enchantment, biome and advancement decks have no images.
/// - `only_new`: Fetch only keys of the diff snapshot.
///
/// Output:
/// - Downloads images and prints the batch summary.
///
/// # Errors
/// - Loading fails or the HTTP client cannot be built. Individual download
///   failures are reported, not returned.
pub async fn handle_images(
    settings: &Settings,
    categories: &[Category],
    only_new: bool,
) -> Result<()> {
    let prepared = utils::prepare(settings, only_new)?;
    let mut targets = wiki::image_targets(&prepared.set, categories);
    if let Some(keys) = &prepared.new_keys {
        targets.retain(|t| keys.contains_key(&t.key));
    }
    let mapping = loader::load_optional_map(&settings.image_mapping_path())?;
    let client = WikiClient::new(&settings.wiki)?;
    let image_dir = settings.image_dir();
    tracing::info!(
        targets = targets.len(),
        dir = %image_dir.display(),
        "starting image batch"
    );

    let report = wiki::fetch_images(
        &client,
        &targets,
        FetchOptions {
            image_dir: &image_dir,
            ignore_saved_image: settings.image.ignore_saved_image,
            mapping: &mapping,
        },
    )
    .await;
    report.log_summary();
    println!(
        "saved {}, skipped {}, unresolved {}, failed {}",
        report.saved.len(),
        report.skipped.len(),
        report.unresolved.len(),
        report.failed.len()
    );
    for name in report.unresolved.iter().chain(&report.failed) {
        println!("  missing: {name}");
    }
    Ok(())
}
