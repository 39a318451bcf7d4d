//! Source code locations attached to nodes, failures and entries

use std::fmt;

use serde::{Deserialize, Serialize};

/// A file/line pair plus the stack trace captured at that point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeLocation {
    /// Path of the source file
    pub file_name: String,
    /// One-based line number
    pub line_number: u32,
    /// Full stack trace text, listed by the "Full Stack Trace" block
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_stack_trace: String,
}

impl CodeLocation {
    /// Location without a stack trace
    #[must_use]
    pub fn new(file_name: impl Into<String>, line_number: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line_number,
            full_stack_trace: String::new(),
        }
    }

    /// Attach a stack trace
    #[must_use]
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.full_stack_trace = trace.into();
        self
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.line_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_file_colon_line() {
        let cl = CodeLocation::new("suite_test.go", 42).with_stack_trace("trace");
        assert_eq!(cl.to_string(), "suite_test.go:42");
        assert_eq!(cl.full_stack_trace, "trace");
    }

    #[test]
    fn test_deserialize_without_trace() {
        let cl: CodeLocation =
            serde_json::from_str(r#"{"file_name":"a.go","line_number":3}"#).unwrap();
        assert_eq!(cl, CodeLocation::new("a.go", 3));
    }
}
