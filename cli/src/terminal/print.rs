use std::fmt::Display;
use std::io::{self, Write};

use colored::*;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use pingsweep_common::network::range::NetworkPrefix;
use pingsweep_core::sweep::SweepReport;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 33;

pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}

pub fn separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(TOTAL_WIDTH).color(colors::SEPARATOR))
}

/// Title line followed by a separator. Width is measured in terminal columns.
pub fn header<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let pad: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(title)) / 2;
    writeln!(out)?;
    writeln!(out, "{}{}", " ".repeat(pad), title.color(colors::PRIMARY).bold())?;
    separator(out)
}

pub fn menu<W: Write>(out: &mut W, menu: &[NetworkPrefix]) -> io::Result<()> {
    header(out, "疎通確認したい番号を選択してください")?;
    for (idx, prefix) in menu.iter().enumerate() {
        writeln!(
            out,
            " {} {} {}",
            idx.to_string().color(colors::ACCENT),
            ":".color(colors::SEPARATOR),
            prefix.to_string().color(colors::TEXT_DEFAULT)
        )?;
    }
    separator(out)?;
    write!(out, " 番号：")?;
    out.flush()
}

pub fn inline_error<W: Write, E: Display + ?Sized>(out: &mut W, err: &E) -> io::Result<()> {
    writeln!(out)?;
    write!(out, " {}", err.to_string().color(colors::ERROR).bold())?;
    out.flush()
}

pub fn error<W: Write, E: Display + ?Sized>(out: &mut W, err: &E) -> io::Result<()> {
    writeln!(out, " {}", format!("{err:#}").color(colors::ERROR).bold())
}

pub fn sweep_header<W: Write>(out: &mut W, prefix: &NetworkPrefix) -> io::Result<()> {
    header(out, "検出したIPv4アドレス")?;
    writeln!(out, " {}", prefix.to_string().color(colors::SEPARATOR))
}

pub fn results<W: Write>(out: &mut W, report: &SweepReport) -> io::Result<()> {
    if report.responded.is_empty() {
        writeln!(out, " {}", "応答なし".color(colors::ERROR))?;
    }

    for addr in &report.responded {
        writeln!(
            out,
            " 応答あり:  {}",
            addr.to_string().color(colors::IPV4_ADDR)
        )?;
    }

    separator(out)?;
    summary(out, report)?;
    writeln!(out)
}

fn summary<W: Write>(out: &mut W, report: &SweepReport) -> io::Result<()> {
    let active_hosts: ColoredString = format!("{}/{}", report.responded.len(), report.probed)
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64())
        .bold()
        .yellow();
    writeln!(out, " {active_hosts} hosts responded in {total_time}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
