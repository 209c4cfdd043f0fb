//! Command-line argument definition and dispatch.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use langslide::config::Settings;
use langslide::lang::Category;

use crate::args::{Result, count, diff, export, images, plan, utils};

/// langslide - Build localization reference decks from game language files
#[derive(Parser, Debug)]
#[command(name = "langslide")]
#[command(version)]
#[command(about = "Build localization reference decks from game language files", long_about = None)]
#[command(group(
    ArgGroup::new("command")
        .required(true)
        .args(["diff", "images", "count", "plan", "export"])
))]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Configuration file (default: ./langslide.toml, then ~/.config/langslide/langslide.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the keys added since OLD (a previous reference language file) to the diff snapshot
    #[arg(long, value_name = "OLD")]
    pub diff: Option<PathBuf>,

    /// Download reference images from the wiki
    #[arg(short = 'i', long)]
    pub images: bool,

    /// Print how many slides each deck needs
    #[arg(short = 'c', long)]
    pub count: bool,

    /// Write the slide plan of each deck
    #[arg(short = 'p', long)]
    pub plan: bool,

    /// Write the aligned strings of each deck as JSON
    #[arg(short = 'e', long)]
    pub export: bool,

    /// Only keep keys listed in the diff snapshot (use with --count, --plan, --export or --images)
    #[arg(long)]
    pub only_new: bool,

    /// Restrict the run to these categories (comma-separated), overriding the ignore flags
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<Category>,
}

/// What: Run the command selected on the command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded configuration.
///
/// Output:
/// - `Ok(())` when the command completed.
///
/// # Errors
/// - Propagates the command's error; the caller maps it to the exit code.
///
/// Details:
/// - Exactly one command flag is present; clap enforces the group.
pub async fn run(args: &Args, settings: &Settings) -> Result<()> {
    let categories = utils::selected_categories(args, settings);
    if let Some(old) = &args.diff {
        return diff::handle_diff(settings, old);
    }
    if args.images {
        return images::handle_images(settings, &categories, args.only_new).await;
    }
    if args.count {
        return count::handle_count(settings, &categories, args.only_new);
    }
    if args.plan {
        return plan::handle_plan(settings, &categories, args.only_new);
    }
    if args.export {
        return export::handle_export(settings, &categories, args.only_new);
    }
    Ok(())
}
