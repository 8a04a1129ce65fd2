use std::io::{self, BufRead, Write};

use pingsweep_common::network::range::{self, NetworkPrefix, SweepRequest};
use thiserror::Error;
use tracing::debug;

use crate::terminal::print;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("※数字を選択してください")]
    NotANumber,

    #[error("※選択した数字は対象外です")]
    OutOfRange { index: usize, len: usize },

    #[error("Input Error: standard input was closed")]
    InputClosed,

    #[error("Input Error: {0}")]
    Io(#[from] io::Error),
}

/// Validates one line of operator input against a menu of `len` entries.
pub fn parse_selection(line: &str, len: usize) -> Result<usize, SelectionError> {
    let index: usize = line
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber)?;

    if index >= len {
        return Err(SelectionError::OutOfRange { index, len });
    }

    Ok(index)
}

/// Shows the menu until the operator enters a valid index.
///
/// Invalid input clears the screen, prints the reason and asks again.
pub fn choose<R: BufRead, W: Write>(
    menu: &[NetworkPrefix],
    input: &mut R,
    out: &mut W,
) -> Result<usize, SelectionError> {
    loop {
        print::menu(out, menu)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(SelectionError::InputClosed);
        }

        match parse_selection(&line, menu.len()) {
            Ok(index) => return Ok(index),
            Err(e) => {
                debug!("Rejected selection {:?}: {e:?}", line.trim());
                print::clear_screen(out)?;
                print::inline_error(out, &e)?;
            }
        }
    }
}

/// Asks for a menu entry and expands it into the addresses to sweep.
///
/// With nothing to choose from the menu is skipped and range construction
/// reports the empty menu.
pub fn choose_request<R: BufRead, W: Write>(
    menu: &[NetworkPrefix],
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<SweepRequest> {
    let index: usize = if menu.is_empty() {
        0
    } else {
        choose(menu, input, out)?
    };

    Ok(range::select(menu, index)?)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
