//! `--plan`: slide plan of each deck.

use langslide::config::Settings;
use langslide::lang::Category;
use langslide::slide;

use crate::args::{Result, utils};

/// What: Build and write the plan of every selected deck.
///
/// Inputs:
/// - `settings`: Configuration.
/// - `categories`: Decks to plan.
/// - `only_new`: Plan only keys of the diff snapshot.
///
/// Output:
/// - Writes `<slide_folder>/<category>/plan.json` and prints a line per deck.
///
/// # Errors
/// - Loading, sorting, advancement data or writing fails.
///
/// Details:
/// - Missing images do not fail the run; they are listed in the plan and logged.
pub fn handle_plan(settings: &Settings, categories: &[Category], only_new: bool) -> Result<()> {
    let prepared = utils::prepare(settings, only_new)?;
    let slide_dir = settings.slide_dir();
    for &category in categories {
        let sorted = utils::sorted_category(&prepared, category)?;
        let plan = slide::build_deck_plan(
            category,
            &sorted,
            &prepared.set.reference().strings,
            settings,
        )?;
        let path = slide::write_plan(&slide_dir, &plan)?;
        println!(
            "{category}: {} slides, {} missing images -> {}",
            plan.slide_count,
            plan.missing_images.len(),
            path.display()
        );
    }
    Ok(())
}
