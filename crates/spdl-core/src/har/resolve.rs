//! Pick the video request out of a HAR export.

use anyhow::{Context, Result};
use std::path::Path;
use url::Url;

use crate::manifest;

use super::parse::{HarEntry, HarLog};

/// Kind of transcoding-service request found in a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CaptureKind {
    /// A single segment fetch; needs rewriting.
    Segment,
    /// A `videomanifest` request.
    Manifest,
}

/// Video request extracted from a HAR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarCapture {
    pub url: String,
    pub kind: CaptureKind,
}

/// Finds the best video request in the HAR file at `path`.
///
/// Manifest requests win over segment requests; among equals the latest
/// entry wins, since an expired token is less likely there. Entries whose
/// response status is an HTTP error are skipped.
pub fn find_video_request(path: &Path) -> Result<HarCapture> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let entries = har.log.entries;
    if entries.is_empty() {
        anyhow::bail!("HAR file has no entries");
    }

    let best = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| response_ok(e))
        .filter_map(|(i, e)| capture_kind(&e.request.url).map(|k| (k, i)))
        .max();

    match best {
        Some((kind, i)) => {
            let url = entries[i].request.url.clone();
            tracing::debug!(?kind, entry = i, "picked video request from HAR");
            Ok(HarCapture { url, kind })
        }
        None => anyhow::bail!(
            "no videomanifest or mediasegment request in HAR ({} entries); \
             start playback with DevTools open before exporting",
            entries.len()
        ),
    }
}

fn response_ok(entry: &HarEntry) -> bool {
    match &entry.response {
        Some(r) => r.status == 0 || (200..400).contains(&r.status),
        None => true,
    }
}

fn capture_kind(raw: &str) -> Option<CaptureKind> {
    let url = Url::parse(raw).ok()?;
    if url.path().contains(manifest::MANIFEST_MARKER) {
        Some(CaptureKind::Manifest)
    } else if manifest::is_transform_service(&url) {
        Some(CaptureKind::Segment)
    } else {
        None
    }
}
