//! `spdl download <url>` – run yt-dlp and render its progress.

use anyhow::{Context, Result};
use spdl_core::config::SpdlConfig;
use spdl_core::engine::{self, DownloadRequest, EngineEvent};
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cli::printer::ProgressPrinter;
use crate::cli::Interrupted;

pub async fn run_download(cfg: &SpdlConfig, request: DownloadRequest) -> Result<()> {
    println!("URL: {}", request.url);

    let (events_tx, mut events_rx) = mpsc::channel::<EngineEvent>(64);
    let printer_handle = tokio::spawn(async move {
        let mut printer = ProgressPrinter::new();
        while let Some(event) = events_rx.recv().await {
            printer.handle(&event);
        }
        printer.finish();
    });

    let engine = engine::run_download(cfg, request, events_tx);
    let Some(outcome) = until_interrupted(engine, tokio::signal::ctrl_c(), printer_handle).await
    else {
        tracing::warn!("download interrupted by user");
        return Err(Interrupted.into());
    };

    let outcome = outcome.context("download failed")?;
    println!("[OK] Finished.");
    match outcome.path {
        Some(ref path) => println!("Saved: {}", path.display()),
        None => println!("File may be in the current directory."),
    }
    tracing::info!(url = %outcome.url, path = ?outcome.path, "download complete");
    Ok(())
}

/// Drives `engine` until it completes or `interrupt` fires, then waits for
/// the printer. `None` means interrupted.
///
/// The engine future owns the event sender, so dropping it (which also
/// kills the yt-dlp child) lets the printer drain and close its bar line.
async fn until_interrupted<F, I>(engine: F, interrupt: I, printer: JoinHandle<()>) -> Option<F::Output>
where
    F: Future,
    I: Future,
{
    let result = tokio::select! {
        res = engine => Some(res),
        _ = interrupt => None,
    };
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "progress printer task failed");
    }
    result
}
