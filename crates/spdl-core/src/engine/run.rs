//! Running yt-dlp and relaying its output.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::SpdlConfig;
use crate::logging::ENGINE_TARGET;
use crate::progress::{self, ProgressStatus};
use crate::{cookies, manifest, tools};

use super::args::OUTPUT_MARKER;
use super::{DownloadOutcome, DownloadRequest, EngineError, EngineEvent, EngineOptions, LogLevel};

/// Downloads `request` with yt-dlp, sending progress and log lines to `events`.
///
/// The URL is normalized first; the outcome is logged and reported as an
/// event. A dropped receiver does not stop the download.
pub async fn run_download(
    cfg: &SpdlConfig,
    request: DownloadRequest,
    events: mpsc::Sender<EngineEvent>,
) -> Result<DownloadOutcome, EngineError> {
    let ytdlp = tools::find_ytdlp(cfg)?;

    if let Some(path) = &request.cookie_file {
        let jar = cookies::check_cookie_file(path)?;
        emit(&events, EngineEvent::info(format!("Using cookies: {}", path.display()))).await;
        if !jar.looks_like_netscape() {
            emit(
                &events,
                EngineEvent::warn("Cookie file does not look like Netscape format."),
            )
            .await;
        }
    }

    let normalized = manifest::normalize(&request.url);
    tracing::info!(changed = normalized.changed(), "{}", normalized.reason());
    emit(&events, EngineEvent::info(normalized.reason())).await;
    if normalized.changed() {
        tracing::info!(url = %normalized.url, "using manifest");
        emit(&events, EngineEvent::info(format!("Using manifest: {}", normalized.url))).await;
    }

    let ffmpeg_location = tools::ffmpeg_location(cfg);
    if ffmpeg_location.is_none() {
        tracing::warn!("ffmpeg not found; separate audio/video streams cannot be merged");
        emit(
            &events,
            EngineEvent::warn("ffmpeg not found; audio and video may not be merged."),
        )
        .await;
    }

    let options = EngineOptions::new(cfg, &request, normalized.url, ffmpeg_location);
    run_engine(&ytdlp, &options, &events).await
}

/// Spawns `program` with `options` and relays its output until it exits.
pub async fn run_engine(
    program: &Path,
    options: &EngineOptions,
    events: &mpsc::Sender<EngineEvent>,
) -> Result<DownloadOutcome, EngineError> {
    tracing::debug!(program = %program.display(), args = ?options.args(), "spawning yt-dlp");
    let mut child = Command::new(program)
        .args(options.args())
        .env("PYTHONIOENCODING", "UTF-8")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(EngineError::Spawn)?;

    let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;

    let stderr_task = tokio::spawn(relay_stderr(stderr, events.clone()));
    let saved = relay_stdout(stdout, events).await?;
    let last_error = stderr_task.await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stderr relay task failed");
        None
    });

    let status = child.wait().await?;
    if !status.success() {
        tracing::error!(code = ?status.code(), last_error = ?last_error, "yt-dlp failed");
        return Err(EngineError::Failed {
            code: status.code(),
            last_error,
        });
    }

    if let Some(path) = &saved {
        emit(events, EngineEvent::Saved(path.clone())).await;
    }
    tracing::info!(saved = ?saved, "yt-dlp finished");
    Ok(DownloadOutcome {
        url: options.url.clone(),
        path: saved,
    })
}

/// Relays stdout; returns the last reported output path.
async fn relay_stdout<R>(
    stdout: R,
    events: &mpsc::Sender<EngineEvent>,
) -> Result<Option<PathBuf>, EngineError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stdout).lines();
    let mut saved = None;
    while let Some(line) = lines.next_line().await? {
        if let Some(path) = line.trim().strip_prefix(OUTPUT_MARKER) {
            tracing::debug!(target: ENGINE_TARGET, path, "output file");
            saved = Some(PathBuf::from(path));
            continue;
        }
        relay_line(&line, events).await;
    }
    Ok(saved)
}

/// Relays stderr; returns the last `ERROR:` line.
async fn relay_stderr<R>(stderr: R, events: mpsc::Sender<EngineEvent>) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stderr).lines();
    let mut last_error = None;
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if classify(&line) == LogLevel::Error {
                    last_error = Some(line.trim().to_string());
                }
                relay_line(&line, &events).await;
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "reading yt-dlp stderr failed");
                break;
            }
        }
    }
    last_error
}

async fn relay_line(line: &str, events: &mpsc::Sender<EngineEvent>) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    if let Some(stats) = progress::parse_progress_line(trimmed) {
        if stats.status == ProgressStatus::Finished {
            tracing::debug!(target: ENGINE_TARGET, "download finished, post-processing");
        }
        emit(events, EngineEvent::Progress(stats)).await;
        return;
    }

    let level = classify(trimmed);
    match level {
        LogLevel::Error => tracing::error!(target: ENGINE_TARGET, "{}", trimmed),
        LogLevel::Warn => tracing::warn!(target: ENGINE_TARGET, "{}", trimmed),
        LogLevel::Info => tracing::debug!(target: ENGINE_TARGET, "{}", trimmed),
    }
    emit(
        events,
        EngineEvent::Log {
            level,
            line: trimmed.to_string(),
        },
    )
    .await;
}

fn classify(line: &str) -> LogLevel {
    let line = line.trim_start();
    if line.starts_with("ERROR:") {
        LogLevel::Error
    } else if line.starts_with("WARNING:") {
        LogLevel::Warn
    } else {
        LogLevel::Info
    }
}

async fn emit(events: &mpsc::Sender<EngineEvent>, event: EngineEvent) {
    if events.send(event).await.is_err() {
        tracing::trace!("event receiver dropped");
    }
}

fn missing_pipe(name: &str) -> EngineError {
    EngineError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("yt-dlp {name} was not captured"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(classify("ERROR: [generic] Unable to download"), LogLevel::Error);
        assert_eq!(classify("WARNING: falling back"), LogLevel::Warn);
        assert_eq!(classify("[info] Downloading 1 format(s)"), LogLevel::Info);
    }

    #[tokio::test]
    async fn stdout_relay_picks_up_output_path_and_progress() {
        let out = b"[info] start\nSPDL_PROGRESS|downloading|1|2|NA|NA|NA\nSPDL_OUTPUT|/tmp/v.mp4\n";
        let (tx, mut rx) = mpsc::channel(16);
        let saved = relay_stdout(&out[..], &tx).await.unwrap();
        drop(tx);
        assert_eq!(saved, Some(PathBuf::from("/tmp/v.mp4")));

        let mut events = Vec::new();
        while let Some(ev) = rx.recv().await {
            events.push(ev);
        }
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], EngineEvent::Log { level: LogLevel::Info, line } if line == "[info] start"));
        assert!(matches!(&events[1], EngineEvent::Progress(p) if p.downloaded_bytes == 1));
    }

    #[tokio::test]
    async fn stderr_relay_keeps_last_error() {
        let err = b"WARNING: a\nERROR: first\nERROR: second\n";
        let (tx, mut rx) = mpsc::channel(16);
        let last = relay_stderr(&err[..], tx).await;
        assert_eq!(last.as_deref(), Some("ERROR: second"));

        let mut levels = Vec::new();
        while let Some(EngineEvent::Log { level, .. }) = rx.recv().await {
            levels.push(level);
        }
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error, LogLevel::Error]);
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_stop_relay() {
        let out = b"line one\nSPDL_OUTPUT|/x.mkv\n";
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let saved = relay_stdout(&out[..], &tx).await.unwrap();
        assert_eq!(saved, Some(PathBuf::from("/x.mkv")));
    }
}
