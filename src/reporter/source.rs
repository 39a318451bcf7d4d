//! Source snippets for highlighted stack frames

use std::collections::HashMap;
use std::fs;

/// Lines shown on each side of the call line
pub const SOURCE_SPAN: usize = 2;

/// A few lines of source around a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWindow {
    /// The lines, in file order
    pub lines: Vec<String>,
    /// Index of the call line within `lines`
    pub highlight: usize,
}

impl SourceWindow {
    /// Cut a window around one-based `line` out of `content`.
    ///
    /// Returns `None` when the line is outside the file.
    #[must_use]
    pub fn around(content: &str, line: u32, span: usize) -> Option<Self> {
        let line = usize::try_from(line).ok()?;
        let lines: Vec<&str> = content.split('\n').collect();
        if line == 0 || line > lines.len() {
            return None;
        }
        let start = (line - 1).saturating_sub(span);
        let end = (line + span).min(lines.len());
        Some(Self {
            lines: lines[start..end].iter().map(|l| (*l).to_string()).collect(),
            highlight: line - 1 - start,
        })
    }

    /// Remove the indentation shared by every non-empty line
    #[must_use]
    pub fn dedented(mut self) -> Self {
        let trim = self
            .lines
            .iter()
            .filter(|l| !l.is_empty())
            .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
            .min()
            .unwrap_or(0);
        if trim > 0 {
            for line in &mut self.lines {
                if line.len() > trim {
                    line.replace_range(..trim, "");
                }
            }
        }
        self
    }
}

/// Looks up the source around a stack frame
pub trait SourceLookup {
    /// Window around `line` of `filename`, if the source is available
    fn lookup(&self, filename: &str, line: u32) -> Option<SourceWindow>;
}

/// Reads source files from disk; unreadable files yield no snippet
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSourceLookup;

impl SourceLookup for FileSourceLookup {
    fn lookup(&self, filename: &str, line: u32) -> Option<SourceWindow> {
        match fs::read_to_string(filename) {
            Ok(content) => SourceWindow::around(&content, line, SOURCE_SPAN),
            Err(err) => {
                tracing::debug!(filename, error = %err, "source unavailable for stack frame");
                None
            }
        }
    }
}

/// Serves source from memory, keyed by file name
#[derive(Debug, Clone, Default)]
pub struct InMemorySources {
    files: HashMap<String, String>,
}

impl InMemorySources {
    /// Empty set of sources
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content of a file
    #[must_use]
    pub fn with_file(mut self, filename: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(filename.into(), content.into());
        self
    }
}

impl SourceLookup for InMemorySources {
    fn lookup(&self, filename: &str, line: u32) -> Option<SourceWindow> {
        let content = self.files.get(filename)?;
        SourceWindow::around(content, line, SOURCE_SPAN)
    }
}

/// Never finds any source
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSources;

impl SourceLookup for NoSources {
    fn lookup(&self, _filename: &str, _line: u32) -> Option<SourceWindow> {
        None
    }
}
