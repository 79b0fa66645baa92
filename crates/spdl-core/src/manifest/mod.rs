//! Manifest URL normalization.
//!
//! SharePoint / Stream playback goes through a transcoding service hosted
//! under `*.svc.ms`. Requests captured from the browser are often single
//! `mediasegment` fetches, which yt-dlp cannot turn into a complete video.
//! [`normalize`] rewrites those into a DASH index manifest request and trims
//! manifest URLs down to the parameters the service actually needs.
//!
//! Classification is evaluated in a fixed order:
//!
//! 1. transform-service request → rebuild a canonical manifest URL
//! 2. other URL on a `videomanifest` path → trim and enforce `format`/`part`
//! 3. anything else → pass through
//!
//! The function never fails; a parse error is reported as
//! [`Outcome::ParseFailed`] and the input is returned unchanged.

mod outcome;
mod query;

pub use outcome::{Normalized, Outcome};

use url::Url;

use query::{DOC_ID, FORMAT, FORMAT_DASH, PART, PART_INDEX, PROVIDER};

/// Host substring identifying the transcoding service.
const SERVICE_DOMAIN_MARKER: &str = ".svc.ms";
/// Path substring shared by every transcoding-service endpoint.
const TRANSFORM_MARKER: &str = "transform";
/// Path substring of a manifest request.
pub(crate) const MANIFEST_MARKER: &str = "videomanifest";
/// Path of a rebuilt manifest request.
const MANIFEST_PATH: &str = "/transform/videomanifest";

/// Normalizes a captured SharePoint / Stream video URL.
///
/// # Examples
///
/// - `https://x-mediap.svc.ms/transform/mediasegment?provider=spo&docid=D&segmentTime=4`
///   → `https://x-mediap.svc.ms/transform/videomanifest?provider=spo&docId=D&format=dash&part=index`
/// - `https://example.com/video.mp4` → unchanged
pub fn normalize(input: &str) -> Normalized {
    let parsed = match Url::parse(input) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(url = input, error = %e, "manifest cleanup skipped: unparseable URL");
            return Normalized::unchanged(input, Outcome::ParseFailed(e.to_string()));
        }
    };

    let pairs: query::Pairs = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let normalized = if is_transform_service(&parsed) {
        rebuild_manifest(input, &parsed, &pairs)
    } else if parsed.path().contains(MANIFEST_MARKER) {
        trim_manifest(input, &parsed, &pairs)
    } else {
        Normalized::unchanged(input, Outcome::Passthrough)
    };

    tracing::debug!(
        outcome = ?normalized.outcome,
        changed = normalized.changed(),
        "normalized video URL"
    );
    normalized
}

/// Host under the transcoding service and path under its transform endpoint.
pub(crate) fn is_transform_service(url: &Url) -> bool {
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    host.contains(SERVICE_DOMAIN_MARKER) && url.path().contains(TRANSFORM_MARKER)
}

fn rebuild_manifest(input: &str, parsed: &Url, pairs: &[(String, String)]) -> Normalized {
    let (provider, doc_id) = match (
        query::find_non_empty(pairs, PROVIDER),
        query::find_non_empty(pairs, DOC_ID),
    ) {
        (Some(p), Some(d)) => (p, d),
        _ => return Normalized::unchanged(input, Outcome::MissingIdentifiers),
    };

    let canonical = [
        (PROVIDER, provider),
        (DOC_ID, doc_id),
        (FORMAT, FORMAT_DASH),
        (PART, PART_INDEX),
    ];
    let mut out = parsed.clone();
    out.set_path(MANIFEST_PATH);
    out.set_fragment(None);
    out.query_pairs_mut().clear().extend_pairs(canonical);

    let url = out.to_string();
    let outcome = if url == input {
        Outcome::AlreadyUsable
    } else {
        Outcome::Converted
    };
    Normalized { url, outcome }
}

fn trim_manifest(input: &str, parsed: &Url, pairs: &[(String, String)]) -> Normalized {
    let mut keep = query::retain_canonical(pairs);
    let format_ok = query::find(&keep, FORMAT).is_some_and(|f| f.eq_ignore_ascii_case(FORMAT_DASH));
    if !format_ok {
        query::upsert(&mut keep, FORMAT, FORMAT_DASH);
    }
    if query::find(&keep, PART).is_none() {
        query::upsert(&mut keep, PART, PART_INDEX);
    }

    let mut out = parsed.clone();
    out.set_fragment(None);
    out.query_pairs_mut().clear().extend_pairs(&keep);

    let url = out.to_string();
    if url == input {
        Normalized::unchanged(input, Outcome::AlreadyUsable)
    } else {
        Normalized {
            url,
            outcome: Outcome::Trimmed,
        }
    }
}
