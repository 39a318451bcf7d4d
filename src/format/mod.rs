//! Text formatting helpers shared by every renderer

pub mod color;
pub mod time;

pub use color::{cycle_join, ColorMode, Formatter};
pub use time::{elapsed_millis, entry_timestamp, go_duration};

/// Indent every non-empty line of `text` by two spaces per level.
///
/// Empty lines stay empty and line terminators are preserved.
#[must_use]
pub fn indent(level: usize, text: &str) -> String {
    if level == 0 {
        return text.to_string();
    }
    let pad = "  ".repeat(level);
    text.split_inclusive('\n')
        .map(|line| {
            if line == "\n" {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect()
}
