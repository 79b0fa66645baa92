//! Engine options and their yt-dlp command line.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::SpdlConfig;
use crate::outtmpl;
use crate::progress::PROGRESS_TEMPLATE;

use super::DownloadRequest;

/// Prefix of the line yt-dlp prints with the final file path.
pub const OUTPUT_MARKER: &str = "SPDL_OUTPUT|";

/// Everything yt-dlp is told for one download.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub url: String,
    pub output_template: PathBuf,
    pub merge_output_format: String,
    pub concurrent_fragments: u32,
    pub retries: u32,
    pub fragment_retries: u32,
    pub user_agent: String,
    /// Directory containing ffmpeg.
    pub ffmpeg_location: Option<PathBuf>,
    pub cookie_file: Option<PathBuf>,
}

impl EngineOptions {
    /// Options for `request`, with `url` being the already-normalized URL.
    pub fn new(
        cfg: &SpdlConfig,
        request: &DownloadRequest,
        url: String,
        ffmpeg_location: Option<PathBuf>,
    ) -> Self {
        let template = outtmpl::output_template(request.custom_name.as_deref());
        let output_dir = request.output_dir.as_deref().or(cfg.output_dir.as_deref());
        Self {
            url,
            output_template: outtmpl::template_in_dir(&template, output_dir),
            merge_output_format: cfg.merge_output_format.clone(),
            concurrent_fragments: cfg.concurrent_fragments,
            retries: cfg.retries,
            fragment_retries: cfg.fragment_retries,
            user_agent: cfg.user_agent.clone(),
            ffmpeg_location,
            cookie_file: request.cookie_file.clone(),
        }
    }

    /// Command-line arguments, URL last (after `--`).
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--newline".into(),
            "--progress".into(),
            "--progress-template".into(),
            PROGRESS_TEMPLATE.into(),
            "--print".into(),
            format!("after_move:{OUTPUT_MARKER}%(filepath)s").into(),
            "-o".into(),
            self.output_template.clone().into_os_string(),
            "--merge-output-format".into(),
            self.merge_output_format.clone().into(),
            "--concurrent-fragments".into(),
            self.concurrent_fragments.to_string().into(),
            "--retries".into(),
            self.retries.to_string().into(),
            "--fragment-retries".into(),
            self.fragment_retries.to_string().into(),
            "--add-headers".into(),
            format!("User-Agent:{}", self.user_agent).into(),
        ];
        if let Some(dir) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(dir.clone().into_os_string());
        }
        if let Some(cookies) = &self.cookie_file {
            args.push("--cookies".into());
            args.push(cookies.clone().into_os_string());
        }
        args.push("--".into());
        args.push(self.url.clone().into());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_after<'a>(args: &'a [OsString], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .and_then(|v| v.to_str())
    }

    fn request() -> DownloadRequest {
        DownloadRequest {
            url: "https://example.com/v".into(),
            ..DownloadRequest::default()
        }
    }

    #[test]
    fn defaults_follow_config() {
        let cfg = SpdlConfig::default();
        let opts = EngineOptions::new(&cfg, &request(), "https://example.com/v".into(), None);
        let args = opts.args();
        assert_eq!(value_after(&args, "--merge-output-format"), Some("mp4"));
        assert_eq!(value_after(&args, "--concurrent-fragments"), Some("8"));
        assert_eq!(value_after(&args, "--retries"), Some("10"));
        assert_eq!(value_after(&args, "--fragment-retries"), Some("10"));
        assert_eq!(value_after(&args, "-o"), Some(outtmpl::DEFAULT_TEMPLATE));
        assert_eq!(value_after(&args, "--progress-template"), Some(PROGRESS_TEMPLATE));
        assert!(value_after(&args, "--add-headers").unwrap().starts_with("User-Agent:Mozilla/5.0"));
        assert!(!args.iter().any(|a| a == "--cookies"));
        assert!(!args.iter().any(|a| a == "--ffmpeg-location"));
    }

    #[test]
    fn url_is_last_after_separator() {
        let cfg = SpdlConfig::default();
        let opts = EngineOptions::new(&cfg, &request(), "https://normalized.example/m".into(), None);
        let args = opts.args();
        let n = args.len();
        assert_eq!(args[n - 2], "--");
        assert_eq!(args[n - 1], "https://normalized.example/m");
    }

    #[test]
    fn cookies_ffmpeg_and_name_are_passed() {
        let cfg = SpdlConfig::default();
        let req = DownloadRequest {
            url: "https://example.com/v".into(),
            cookie_file: Some(PathBuf::from("/home/u/cookies.txt")),
            custom_name: Some("town hall".into()),
            output_dir: Some(PathBuf::from("/srv/out")),
        };
        let opts = EngineOptions::new(&cfg, &req, req.url.clone(), Some(PathBuf::from("/usr/bin")));
        let args = opts.args();
        assert_eq!(value_after(&args, "--cookies"), Some("/home/u/cookies.txt"));
        assert_eq!(value_after(&args, "--ffmpeg-location"), Some("/usr/bin"));
        assert_eq!(value_after(&args, "-o"), Some("/srv/out/town hall.%(ext)s"));
    }

    #[test]
    fn request_output_dir_overrides_config() {
        let cfg = SpdlConfig {
            output_dir: Some(PathBuf::from("/from/config")),
            ..SpdlConfig::default()
        };
        let opts = EngineOptions::new(&cfg, &request(), "u".into(), None);
        assert!(opts.output_template.starts_with("/from/config"));

        let req = DownloadRequest {
            output_dir: Some(PathBuf::from("/from/cli")),
            ..request()
        };
        let opts = EngineOptions::new(&cfg, &req, "u".into(), None);
        assert!(opts.output_template.starts_with("/from/cli"));
    }
}
