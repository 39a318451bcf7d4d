//! Output stream with newline and delimiter bookkeeping
//!
//! Renderers write through an [`Emitter`], which styles text with the
//! configured [`Formatter`] and tracks just enough state to keep blocks on
//! their own lines and to avoid printing two delimiters back to back.

use std::io::Write;

use crate::format::color::{GRAY, RESET};
use crate::format::Formatter;

/// Width of the dashed delimiter between blocks
const DELIMITER_WIDTH: usize = 30;

/// Styled writer shared by every renderer
pub struct Emitter<W: Write> {
    out: W,
    formatter: Formatter,
    last_char: Option<char>,
    last_emission_was_delimiter: bool,
}

impl<W: Write> Emitter<W> {
    /// Wrap a sink
    pub const fn new(out: W, formatter: Formatter) -> Self {
        Self {
            out,
            formatter,
            last_char: None,
            last_emission_was_delimiter: false,
        }
    }

    /// Write `text` verbatim after resolving markers
    pub fn emit(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let styled = self.formatter.style(text);
        if styled.is_empty() {
            return;
        }
        if let Err(err) = self.out.write_all(styled.as_bytes()) {
            tracing::warn!(error = %err, "failed to write report output");
        }
        self.last_char = styled.chars().last();
        self.last_emission_was_delimiter = false;
    }

    /// Write `text` on its own line(s)
    ///
    /// A newline is inserted first when the previous emission left the cursor
    /// mid-line, and appended when `text` does not end with one.
    pub fn emit_block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.last_char.is_some_and(|c| c != '\n') {
            self.emit("\n");
        }
        self.emit(text);
        if self.last_char != Some('\n') {
            self.emit("\n");
        }
    }

    /// Write a gray dashed delimiter unless one was just written
    pub fn emit_delimiter(&mut self) {
        if self.last_emission_was_delimiter {
            return;
        }
        self.emit_block(&format!("{GRAY}{}{RESET}", "-".repeat(DELIMITER_WIDTH)));
        self.last_emission_was_delimiter = true;
    }

    /// Flush the sink
    pub fn flush(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(error = %err, "failed to flush report output");
        }
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
