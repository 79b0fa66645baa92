//! Progress reporting for downloads (bytes done, speed, ETA).
//!
//! yt-dlp is asked to print one machine-readable line per progress update
//! (see [`PROGRESS_TEMPLATE`]); [`parse_progress_line`] turns those into
//! [`ProgressStats`] and the `format_*` helpers render them for humans.

/// Prefix of every progress line emitted by the engine.
pub const PROGRESS_MARKER: &str = "SPDL_PROGRESS|";

/// Value of yt-dlp `--progress-template`.
pub const PROGRESS_TEMPLATE: &str = "download:SPDL_PROGRESS|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.speed)s|%(progress.eta)s";

/// Width of the text progress bar in cells.
const BAR_CELLS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Finished,
    Other,
}

/// Snapshot of download progress for one engine run (CLI-friendly).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStats {
    pub status: ProgressStatus,
    /// Bytes written so far.
    pub downloaded_bytes: u64,
    /// Exact total if known, otherwise the engine's estimate.
    pub total_bytes: Option<u64>,
    /// Current rate in bytes per second.
    pub speed: Option<f64>,
    /// Estimated seconds remaining.
    pub eta_secs: Option<u64>,
}

impl ProgressStats {
    /// Percent complete in [0.0, 100.0]; 0 while the total is unknown.
    pub fn percent(&self) -> f64 {
        if self.status == ProgressStatus::Finished {
            return 100.0;
        }
        match self.total_bytes {
            Some(total) if total > 0 => {
                (self.downloaded_bytes as f64 / total as f64 * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }
}

/// Parses one `SPDL_PROGRESS|...` line. Returns `None` for any other line.
pub fn parse_progress_line(line: &str) -> Option<ProgressStats> {
    let rest = line.trim().strip_prefix(PROGRESS_MARKER)?;
    let fields: Vec<&str> = rest.split('|').collect();
    if fields.len() != 6 {
        tracing::trace!(line, "ignoring malformed progress line");
        return None;
    }

    let status = match fields[0] {
        "downloading" => ProgressStatus::Downloading,
        "finished" => ProgressStatus::Finished,
        _ => ProgressStatus::Other,
    };
    let total_bytes = number(fields[2]).or_else(|| number(fields[3]));

    Some(ProgressStats {
        status,
        downloaded_bytes: number(fields[1]).unwrap_or(0),
        total_bytes,
        speed: fields[4].parse::<f64>().ok().filter(|s| s.is_finite() && *s > 0.0),
        eta_secs: number(fields[5]),
    })
}

/// Non-negative integer field; yt-dlp prints `NA` for missing values and
/// sometimes floats for estimates.
fn number(field: &str) -> Option<u64> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}

/// `1.5 MB/s`-style rate with 1024-based units; empty when unknown.
pub fn format_speed(bytes_per_sec: Option<f64>) -> String {
    const UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];
    let mut value = match bytes_per_sec {
        Some(v) if v > 0.0 => v,
        _ => return String::new(),
    };
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// `1h 2m 3s`, `2m 3s` or `3s`; empty when unknown.
pub fn format_eta(secs: Option<u64>) -> String {
    let Some(total) = secs else {
        return String::new();
    };
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}

/// `[#####---------------]`, one cell per 5%.
pub fn render_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 5.0) as usize).min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}
