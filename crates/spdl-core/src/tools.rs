//! Locating the external engine (yt-dlp) and muxer (ffmpeg) binaries.

use std::path::{Path, PathBuf};

use crate::config::SpdlConfig;
use crate::engine::EngineError;

const YTDLP_BIN: &str = "yt-dlp";
const FFMPEG_BIN: &str = "ffmpeg";

/// Resolves a configured binary (absolute path or bare name) or falls back to
/// a PATH lookup of `default_name`.
fn resolve(configured: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    if let Some(path) = configured {
        match which::which(path) {
            Ok(found) => return Some(found),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "configured {} not usable, searching PATH",
                default_name
            ),
        }
    }
    which::which(default_name).ok()
}

/// The yt-dlp executable, or [`EngineError::NotFound`].
pub fn find_ytdlp(cfg: &SpdlConfig) -> Result<PathBuf, EngineError> {
    let found = resolve(cfg.ytdlp_path.as_deref(), YTDLP_BIN).ok_or_else(|| EngineError::NotFound {
        searched: cfg
            .ytdlp_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| YTDLP_BIN.to_string()),
    })?;
    tracing::debug!(path = %found.display(), "using yt-dlp");
    Ok(found)
}

/// The ffmpeg executable, if any.
pub fn find_ffmpeg(cfg: &SpdlConfig) -> Option<PathBuf> {
    resolve(cfg.ffmpeg_path.as_deref(), FFMPEG_BIN)
}

/// Directory holding ffmpeg, as yt-dlp's `--ffmpeg-location` expects.
pub fn ffmpeg_location(cfg: &SpdlConfig) -> Option<PathBuf> {
    let ffmpeg = find_ffmpeg(cfg)?;
    let dir = ffmpeg.parent()?.to_path_buf();
    tracing::debug!(dir = %dir.display(), "found ffmpeg");
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configured_ytdlp_reports_searched_path() {
        let cfg = SpdlConfig {
            ytdlp_path: Some(PathBuf::from("/nonexistent/spdl/yt-dlp-missing")),
            ..SpdlConfig::default()
        };
        // Only meaningful when yt-dlp is not also on PATH.
        if which::which(YTDLP_BIN).is_ok() {
            return;
        }
        let err = find_ytdlp(&cfg).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/spdl/yt-dlp-missing"));
    }

    #[cfg(unix)]
    #[test]
    fn configured_ffmpeg_location_is_its_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("ffmpeg");
        std::fs::write(&bin, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cfg = SpdlConfig {
            ffmpeg_path: Some(bin.clone()),
            ..SpdlConfig::default()
        };
        assert_eq!(find_ffmpeg(&cfg), Some(bin));
        assert_eq!(ffmpeg_location(&cfg).as_deref(), Some(dir.path()));
    }
}
