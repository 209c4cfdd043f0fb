//! `--count`: slides each deck's template must be duplicated to.

use langslide::config::Settings;
use langslide::lang::Category;

use crate::args::{Result, utils};

/// What: Print the slide count of every selected deck.
///
/// Inputs:
/// - `settings`: Configuration.
/// - `categories`: Decks to count.
/// - `only_new`: Count only keys of the diff snapshot.
///
/// Output:
/// - One `<category>: <count>` line per deck on stdout.
///
/// # Errors
/// - Loading or sorting fails.
pub fn handle_count(settings: &Settings, categories: &[Category], only_new: bool) -> Result<()> {
    let prepared = utils::prepare(settings, only_new)?;
    for &category in categories {
        let sorted = utils::sorted_category(&prepared, category)?;
        tracing::info!(category = %category, slides = sorted.len(), "slide count");
        println!("{category}: {}", sorted.len());
    }
    Ok(())
}
