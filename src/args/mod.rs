//! Command-line argument parsing and command handlers.

pub mod count;
pub mod definition;
pub mod diff;
pub mod export;
pub mod images;
pub mod plan;
pub mod utils;

pub use definition::{Args, run};
pub use utils::determine_log_level;

/// Result type shared by the command handlers.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
