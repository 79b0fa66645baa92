use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Desktop browser user agent sent with every engine request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Global configuration loaded from `~/.config/spdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpdlConfig {
    /// Retries for the whole request (yt-dlp `--retries`).
    pub retries: u32,
    /// Retries per DASH fragment (yt-dlp `--fragment-retries`).
    pub fragment_retries: u32,
    /// Fragments fetched concurrently (yt-dlp `--concurrent-fragments`).
    pub concurrent_fragments: u32,
    /// Container used when audio and video are merged.
    pub merge_output_format: String,
    pub user_agent: String,
    /// Explicit yt-dlp binary; looked up on PATH when unset.
    pub ytdlp_path: Option<PathBuf>,
    /// Explicit ffmpeg binary; looked up on PATH when unset.
    pub ffmpeg_path: Option<PathBuf>,
    /// Directory downloads are written to (None = current directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for SpdlConfig {
    fn default() -> Self {
        Self {
            retries: 10,
            fragment_retries: 10,
            concurrent_fragments: 8,
            merge_output_format: "mp4".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ytdlp_path: None,
            ffmpeg_path: None,
            output_dir: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("spdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SpdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SpdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SpdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
