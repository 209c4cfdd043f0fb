//! Configuration file discovery.

use std::env;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in every candidate directory.
pub const CONFIG_FILE_NAME: &str = "langslide.toml";

/// What: List the locations searched for the configuration file, in priority order.
///
/// Inputs:
/// - `explicit`: Path passed on the command line, if any.
///
/// Output:
/// - Candidate file paths; the first existing one wins.
///
/// Details:
/// - An explicit path is the only candidate when given.
/// - Otherwise: `./langslide.toml`, `$XDG_CONFIG_HOME/langslide/langslide.toml`,
///   then `$HOME/.config/langslide/langslide.toml`.
#[must_use]
pub fn config_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME")
        && !xdg.trim().is_empty()
    {
        candidates.push(Path::new(&xdg).join("langslide").join(CONFIG_FILE_NAME));
    }
    if let Ok(home) = env::var("HOME") {
        candidates.push(
            Path::new(&home)
                .join(".config")
                .join("langslide")
                .join(CONFIG_FILE_NAME),
        );
    }
    candidates
}

/// Determine the configuration file path, searching [`config_candidates`] in order.
pub(crate) fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    config_candidates(explicit)
        .into_iter()
        .find(|p| p.is_file())
}

/// What: Directory relative folder settings are resolved against.
///
/// Inputs:
/// - `config_path`: Path of the loaded configuration file.
///
/// Output:
/// - Parent directory of the file, or `.` when it has none.
pub(crate) fn base_dir_of(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
