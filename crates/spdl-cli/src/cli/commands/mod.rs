//! CLI command handlers, one per file.

mod completions;
mod download;
mod import_har;
mod interactive;
mod normalize;

pub use completions::{run_completions, run_man};
pub use download::run_download;
pub use import_har::run_import_har;
pub use interactive::run_interactive;
pub use normalize::run_normalize;
