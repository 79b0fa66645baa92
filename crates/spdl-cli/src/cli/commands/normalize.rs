//! `spdl normalize <url>` – show the URL yt-dlp would receive.

use anyhow::Result;
use spdl_core::manifest;

/// Prints the normalized URL on stdout and the reason on stderr, so the
/// output can be piped straight into another tool.
pub fn run_normalize(url: &str, json: bool) -> Result<()> {
    let normalized = manifest::normalize(url.trim());
    if json {
        let report = serde_json::json!({
            "url": normalized.url,
            "changed": normalized.changed(),
            "reason": normalized.reason(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    eprintln!("[INFO] {}", normalized.reason());
    println!("{}", normalized.url);
    Ok(())
}
