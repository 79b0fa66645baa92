//! `spdl interactive` – prompt for the download parameters.

use anyhow::{bail, Result};
use spdl_core::config::SpdlConfig;
use spdl_core::engine::DownloadRequest;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use super::run_download;

pub async fn run_interactive(cfg: &SpdlConfig) -> Result<()> {
    let request = tokio::task::spawn_blocking(|| {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        prompt_request(&mut input, &mut out)
    })
    .await??;
    run_download(cfg, request).await
}

/// Reads URL, optional cookies file and optional output name.
pub(crate) fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<DownloadRequest> {
    writeln!(out, "=== SharePoint / Stream downloader (yt-dlp) ===")?;

    let url = loop {
        let Some(line) = ask(input, out, "Video URL: ")? else {
            bail!("no URL entered");
        };
        let url = strip_quotes(&line);
        if !url.is_empty() {
            break url.to_string();
        }
    };

    let use_cookies = ask(input, out, "Use cookies file? [y/N]: ")?
        .is_some_and(|a| a.trim().eq_ignore_ascii_case("y"));
    let cookie_file = if use_cookies {
        ask(
            input,
            out,
            "Enter path to cookies file (or leave blank to skip): ",
        )?
        .map(|p| strip_quotes(&p).to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
    } else {
        None
    };

    let custom_name = ask(
        input,
        out,
        "Custom output name (optional, no extension to auto-pick): ",
    )?
    .map(|n| n.trim().to_string())
    .filter(|n| !n.is_empty());

    Ok(DownloadRequest {
        url,
        cookie_file,
        custom_name,
        output_dir: None,
    })
}

/// Prints `prompt` and reads one line; `None` at end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Trims whitespace and one layer of surrounding quotes (paths pasted from a shell or explorer).
fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches('"').trim_matches('\'').trim()
}
