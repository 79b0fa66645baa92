//! Terminal rendering of engine events.

use spdl_core::engine::{EngineEvent, LogLevel};
use spdl_core::progress::{self, ProgressStats};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Minimum time between two redraws of the progress bar.
const REDRAW_INTERVAL: Duration = Duration::from_millis(200);

/// Draws a single-line `\r` progress bar and interleaves log lines with it.
pub struct ProgressPrinter {
    bar_active: bool,
    last_draw: Option<Instant>,
}

impl ProgressPrinter {
    pub fn new() -> Self {
        Self {
            bar_active: false,
            last_draw: None,
        }
    }

    pub fn handle(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Progress(stats) => self.draw(stats),
            EngineEvent::Log { level, line } => {
                self.end_bar();
                match level {
                    LogLevel::Info => println!("{line}"),
                    LogLevel::Warn => println!("[WARN] {line}"),
                    LogLevel::Error => eprintln!("[ERROR] {line}"),
                }
            }
            EngineEvent::Saved(_) => self.end_bar(),
        }
    }

    /// Terminates a partially drawn bar line.
    pub fn finish(&mut self) {
        self.end_bar();
    }

    fn draw(&mut self, stats: &ProgressStats) {
        let pct = stats.percent();
        let now = Instant::now();
        let due = self
            .last_draw
            .map_or(true, |t| now.duration_since(t) >= REDRAW_INTERVAL);
        if !due && pct < 100.0 {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = write!(out, "\r{}", render_line(stats));
        let _ = out.flush();
        self.bar_active = true;
        self.last_draw = Some(now);
        if pct >= 100.0 {
            self.end_bar();
        }
    }

    fn end_bar(&mut self) {
        if self.bar_active {
            println!();
            self.bar_active = false;
        }
    }
}

/// `[##########----------]  50.0%  1.2 MB/s  ETA 10s`
pub fn render_line(stats: &ProgressStats) -> String {
    let pct = stats.percent();
    let mut line = format!("{} {:5.1}%", progress::render_bar(pct), pct);
    let speed = progress::format_speed(stats.speed);
    if !speed.is_empty() {
        line.push_str("  ");
        line.push_str(&speed);
    }
    let eta = progress::format_eta(stats.eta_secs);
    if !eta.is_empty() && pct < 100.0 {
        line.push_str("  ETA ");
        line.push_str(&eta);
    }
    line
}
