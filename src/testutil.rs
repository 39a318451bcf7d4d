//! Shared test utilities
//!
//! Fixture builders and output helpers used across test modules. Only
//! compiled in test builds.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::ReporterConfig;
use crate::format::{ColorMode, Formatter};
use crate::reporter::DefaultReporter;
use crate::types::{
    CodeLocation, Container, Failure, FailureNodeContext, NodeType, ReportEntry,
    ReportEntryVisibility, SpecReport, SpecState,
};

/// The delimiter as emitted in passthrough mode
pub const DELIMITER: &str = "{{gray}}------------------------------{{/}}";

const LINES: [u32; 5] = [12, 37, 80, 103, 144];

/// Fixture location `n`: `cl{n}.go` with a two-line stack trace.
#[must_use]
pub fn cl(n: usize) -> CodeLocation {
    CodeLocation::new(format!("cl{n}.go"), LINES[n]).with_stack_trace(format!("full-trace\ncl-{n}"))
}

/// Container at fixture location `n` with the given labels
#[must_use]
pub fn container(text: &str, n: usize, labels: &[&str]) -> Container {
    Container {
        labels: labels.iter().map(ToString::to_string).collect(),
        ..Container::new(text, cl(n))
    }
}

/// Passing `It` spec at fixture location `n`
#[must_use]
pub fn spec(text: &str, n: usize) -> SpecReport {
    SpecReport {
        leaf_node_text: text.to_string(),
        leaf_node_location: cl(n),
        ..SpecReport::default()
    }
}

/// Suite-level node report at `cl0`
#[must_use]
pub fn suite_node(kind: NodeType, state: SpecState) -> SpecReport {
    SpecReport {
        leaf_node_type: kind,
        leaf_node_location: cl(0),
        state,
        ..SpecReport::default()
    }
}

/// Failure in a node at `cl3`, failing precisely at `cl4`
#[must_use]
pub fn failure(message: &str, context: FailureNodeContext, kind: NodeType) -> Failure {
    Failure {
        message: message.to_string(),
        location: cl(4),
        failure_node_context: context,
        failure_node_type: kind,
        failure_node_location: cl(3),
        ..Failure::default()
    }
}

/// Fixed instant used by entries and progress reports
#[must_use]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Report entry added at fixture location `n`, 250ms after [`start_time`]
#[must_use]
pub fn entry(
    name: &str,
    n: usize,
    visibility: ReportEntryVisibility,
    value: Option<&str>,
) -> ReportEntry {
    ReportEntry {
        name: name.to_string(),
        location: cl(n),
        time: start_time() + chrono::Duration::milliseconds(250),
        visibility,
        value: value.map(ToString::to_string),
    }
}

/// Reporter that keeps markers verbatim and reads no source files
#[must_use]
pub fn passthrough_reporter(conf: ReporterConfig) -> DefaultReporter<Vec<u8>> {
    DefaultReporter::with_formatter(conf, Vec::new(), Formatter::new(ColorMode::Passthrough))
        .with_source_lookup(crate::reporter::NoSources)
}

/// Run `f` against a fresh passthrough reporter and return what it wrote
pub fn render(conf: ReporterConfig, f: impl FnOnce(&mut DefaultReporter<Vec<u8>>)) -> String {
    let mut reporter = passthrough_reporter(conf);
    f(&mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

/// Join lines with `\n`
#[must_use]
pub fn lines(parts: &[&str]) -> String {
    parts.join("\n")
}
