//! yt-dlp invocation.
//!
//! [`run_download`] normalizes the URL, checks the cookie jar, assembles the
//! engine arguments and supervises the child process. Everything the
//! engine reports is relayed as [`EngineEvent`]s over an mpsc channel so a
//! presentation layer (CLI today) can render progress on its own task.

mod args;
mod error;
mod run;

use std::path::PathBuf;

use crate::progress::ProgressStats;

pub use args::{EngineOptions, OUTPUT_MARKER};
pub use error::EngineError;
pub use run::{run_download, run_engine};

/// What the user asked to download.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    /// URL as entered; normalized before it reaches the engine.
    pub url: String,
    /// Netscape-format cookie jar, passed to yt-dlp verbatim.
    pub cookie_file: Option<PathBuf>,
    /// Custom output name; see [`crate::outtmpl::output_template`].
    pub custom_name: Option<String>,
    /// Overrides the configured output directory.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Message sent from the engine task to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Log { level: LogLevel, line: String },
    Progress(ProgressStats),
    /// Final file path reported by yt-dlp after merging/moving.
    Saved(PathBuf),
}

impl EngineEvent {
    pub(crate) fn info(line: impl Into<String>) -> Self {
        EngineEvent::Log {
            level: LogLevel::Info,
            line: line.into(),
        }
    }

    pub(crate) fn warn(line: impl Into<String>) -> Self {
        EngineEvent::Log {
            level: LogLevel::Warn,
            line: line.into(),
        }
    }
}

/// Result of a successful engine run.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// URL actually handed to yt-dlp.
    pub url: String,
    /// Saved file, when yt-dlp reported one.
    pub path: Option<PathBuf>,
}
