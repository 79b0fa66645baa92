//! CLI for the spdl SharePoint / Stream downloader.

mod commands;
mod printer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdl_core::config;
use std::fmt;
use std::path::PathBuf;

use commands::{
    run_completions, run_download, run_import_har, run_interactive, run_man, run_normalize,
};

/// Top-level CLI for spdl.
#[derive(Debug, Parser)]
#[command(name = "spdl")]
#[command(about = "Download SharePoint / Microsoft Stream videos with yt-dlp", long_about = None)]
pub struct Cli {
    /// Log everything at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a video (videomanifest URL preferred; mediasegment URLs are rewritten).
    Download {
        /// SharePoint / Stream video URL.
        url: String,

        /// Netscape-format cookies.txt for an authenticated session.
        #[arg(long, short = 'c', value_name = "FILE")]
        cookies: Option<PathBuf>,

        /// Custom output name; without an extension the container picks it.
        #[arg(long, short = 'n', value_name = "NAME")]
        name: Option<String>,

        /// Directory to save into (default: config output_dir, else current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the manifest URL that would be handed to yt-dlp, without downloading.
    Normalize {
        /// URL to normalize.
        url: String,

        /// Print `{"url", "changed", "reason"}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Find the video request in a DevTools HAR export and download it.
    ImportHar {
        /// Path to the HAR file.
        path: PathBuf,

        /// Netscape-format cookies.txt for an authenticated session.
        #[arg(long, short = 'c', value_name = "FILE")]
        cookies: Option<PathBuf>,

        /// Custom output name; without an extension the container picks it.
        #[arg(long, short = 'n', value_name = "NAME")]
        name: Option<String>,

        /// Directory to save into (default: config output_dir, else current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Prompt for URL, cookies file and output name, then download.
    Interactive,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

/// Marker error: the user pressed Ctrl-C during a download.
#[derive(Debug)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted")
    }
}

impl std::error::Error for Interrupted {}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            CliCommand::Normalize { url, json } => run_normalize(&url, json),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man(),
            CliCommand::Download {
                url,
                cookies,
                name,
                output_dir,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let request = spdl_core::engine::DownloadRequest {
                    url,
                    cookie_file: cookies,
                    custom_name: name,
                    output_dir,
                };
                run_download(&cfg, request).await
            }
            CliCommand::ImportHar {
                path,
                cookies,
                name,
                output_dir,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let request = spdl_core::engine::DownloadRequest {
                    url: String::new(),
                    cookie_file: cookies,
                    custom_name: name,
                    output_dir,
                };
                run_import_har(&cfg, &path, request).await
            }
            CliCommand::Interactive => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_interactive(&cfg).await
            }
        }
    }
}

#[cfg(test)]
mod tests;
