//! Engine error type.

use std::io;

use crate::cookies::CookieError;

/// Error from preparing or running the download engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No usable yt-dlp binary.
    #[error("yt-dlp not found (looked for {searched}); install it with `pip install yt-dlp` or set ytdlp_path in config.toml")]
    NotFound { searched: String },
    /// The process could not be started.
    #[error("failed to start yt-dlp: {0}")]
    Spawn(#[source] io::Error),
    /// Reading the process output or waiting on it failed.
    #[error("yt-dlp I/O: {0}")]
    Io(#[from] io::Error),
    /// yt-dlp exited unsuccessfully. `last_error` is its last `ERROR:` line.
    #[error("yt-dlp failed ({}): {}", exit_label(.code), .last_error.as_deref().unwrap_or("no error output"))]
    Failed {
        code: Option<i32>,
        last_error: Option<String>,
    },
    #[error(transparent)]
    Cookies(#[from] CookieError),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}
