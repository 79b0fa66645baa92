//! `spdl import-har <path>` – download the video request found in a HAR file.

use anyhow::Result;
use spdl_core::config::SpdlConfig;
use spdl_core::engine::DownloadRequest;
use spdl_core::har::{self, CaptureKind};
use std::path::Path;

use super::run_download;

/// `request.url` is replaced by the request found in the HAR.
pub async fn run_import_har(cfg: &SpdlConfig, path: &Path, request: DownloadRequest) -> Result<()> {
    let capture = har::find_video_request(path)?;
    match capture.kind {
        CaptureKind::Manifest => println!("Found videomanifest request in {}", path.display()),
        CaptureKind::Segment => println!(
            "Found mediasegment request in {} (will try to rebuild the manifest)",
            path.display()
        ),
    }
    let request = DownloadRequest {
        url: capture.url,
        ..request
    };
    run_download(cfg, request).await
}
