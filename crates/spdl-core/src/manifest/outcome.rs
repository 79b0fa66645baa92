//! Normalization outcomes and the result value handed to the engine glue.

use std::fmt;

/// Which normalization branch produced a [`Normalized`] value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Transform-service URL rebuilt into a DASH index manifest request.
    Converted,
    /// Transform-service URL without `provider`/`docId`; nothing can be rebuilt.
    MissingIdentifiers,
    /// Manifest URL whose query was trimmed or had `format`/`part` enforced.
    Trimmed,
    /// Manifest URL that needed no change.
    AlreadyUsable,
    /// Neither a transform nor a manifest URL.
    Passthrough,
    /// Input could not be parsed as an absolute URL.
    ParseFailed(String),
}

impl Outcome {
    /// True if the URL handed onward differs from the caller's input.
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Converted | Outcome::Trimmed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Converted => {
                write!(f, "Converted mediasegment URL to videomanifest (DASH index).")
            }
            Outcome::MissingIdentifiers => write!(
                f,
                "Missing provider/docId; cannot auto-build a manifest. \
                 Capture the videomanifest request via browser DevTools."
            ),
            Outcome::Trimmed => {
                write!(f, "Trimmed manifest params and enforced format=dash, part=index.")
            }
            Outcome::AlreadyUsable => write!(f, "URL already looks like a usable videomanifest."),
            Outcome::Passthrough => write!(f, "Not a transform/manifest URL; using as-is."),
            Outcome::ParseFailed(err) => write!(f, "Manifest cleanup skipped: {}", err),
        }
    }
}

/// Result of [`normalize`](super::normalize): the URL to use plus why.
///
/// Never aliases the caller's input; `url` is always an owned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub url: String,
    pub outcome: Outcome,
}

impl Normalized {
    pub(super) fn unchanged(input: &str, outcome: Outcome) -> Self {
        Self {
            url: input.to_string(),
            outcome,
        }
    }

    pub fn changed(&self) -> bool {
        self.outcome.changed()
    }

    /// Human-readable explanation, suitable for a log line.
    pub fn reason(&self) -> String {
        self.outcome.to_string()
    }

    /// The `(url, changed, reason)` triple.
    pub fn into_parts(self) -> (String, bool, String) {
        let changed = self.changed();
        let reason = self.reason();
        (self.url, changed, reason)
    }
}
