//! Progress reporting.
//!
//! The engine reports through a plain `FnMut(processed, total)` callback
//! and never touches a terminal itself. [`TerminalBar`] is the
//! presentation side: the fixed-width in-place bar the tool has always
//! drawn.

use std::fmt::Write as _;
use std::io::{self, Write};

/// Progress callback: `(bytes_processed, total_bytes)`, invoked after
/// every written chunk. `bytes_processed` never decreases and equals
/// `total_bytes` exactly when a transform completes.
pub type ProgressFn<'a> = dyn FnMut(u64, u64) + 'a;

/// Cell count of the rendered bar.
pub const BAR_WIDTH: usize = 50;

/// In-place terminal progress bar: `[=====>     ] 42.0%`.
///
/// Each update redraws over the previous one with a carriage return;
/// call [`TerminalBar::finish`] afterwards to move past the bar line.
#[derive(Debug, Default)]
pub struct TerminalBar {
    drawn: bool,
}

impl TerminalBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw the bar for `processed` out of `total` bytes.
    ///
    /// Terminal write errors are ignored; progress display is cosmetic
    /// and must never fail a transform.
    pub fn update(&mut self, processed: u64, total: u64) {
        self.drawn = true;
        let mut out = io::stdout();
        let _ = out.write_all(b"\r");
        let _ = out.write_all(render(processed, total).as_bytes());
        let _ = out.flush();
    }

    /// Terminate the bar line if one was drawn.
    pub fn finish(&mut self) {
        if self.drawn {
            let _ = writeln!(io::stdout());
            self.drawn = false;
        }
    }
}

/// Render one bar line, `[`, [`BAR_WIDTH`] cells, `]` and a percentage.
///
/// Filled cells are `=`, the leading edge is `>`, the rest are spaces.
/// At 100% the edge marker falls off the end and every cell is `=`.
fn render(processed: u64, total: u64) -> String {
    let ratio = if total == 0 {
        1.0
    } else {
        processed as f64 / total as f64
    };
    let filled = (BAR_WIDTH as f64 * ratio) as usize;

    let mut line = String::with_capacity(BAR_WIDTH + 16);
    line.push('[');
    for cell in 0..BAR_WIDTH {
        line.push(if cell < filled {
            '='
        } else if cell == filled {
            '>'
        } else {
            ' '
        });
    }
    let _ = write!(line, "] {:.1}%", ratio * 100.0);
    line
}
