use std::io::{self, Write};
use std::sync::RwLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pingsweep_common::network::range::SweepRequest;

use crate::terminal::colors;

/// Bar currently on screen. Log lines are printed above it while it is set.
static ACTIVE: RwLock<Option<ProgressBar>> = RwLock::new(None);

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Spinner on stderr shown while a sweep runs. Cleared before results print.
pub fn start_sweep_spinner(request: &SweepRequest) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(
        format!("Pinging {} hosts of {}...", request.len(), request.prefix())
            .color(colors::TEXT_DEFAULT)
            .to_string(),
    );

    if let Ok(mut active) = ACTIVE.write() {
        *active = Some(pb.clone());
    }
    pb
}

/// Clears the spinner and sends log output straight to stderr again.
pub fn finish_sweep_spinner(pb: &ProgressBar) {
    if let Ok(mut active) = ACTIVE.write() {
        *active = None;
    }
    pb.finish_and_clear();
}

pub fn report_sweep_progress(pb: &ProgressBar, count: usize) {
    pb.set_message(
        format!(
            "Identified {} so far...",
            format!("{count} hosts").green().bold()
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
}

/// Log writer that keeps tracing output from tearing through the spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = ACTIVE.read().ok().and_then(|guard| guard.clone());

        match active {
            Some(pb) if !pb.is_hidden() && !pb.is_finished() => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
            }
            _ => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
