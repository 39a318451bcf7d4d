//! Human-readable test reporter
//!
//! [`DefaultReporter`] turns lifecycle events into styled text. Each event is
//! rendered by its own module:
//!
//! - [`suite`]: suite banner and end-of-run summary
//! - [`spec`]: per-spec announcement and outcome
//! - [`progress`]: progress reports with goroutine dumps
//! - [`hierarchy`]: container hierarchy layout shared by the above

pub mod emitter;
pub mod hierarchy;
pub mod progress;
pub mod source;
pub mod spec;
pub mod suite;

use std::io::Write;

use crate::config::ReporterConfig;
use crate::format::Formatter;
use crate::types::{ProgressReport, SpecReport, SuiteReport};
use emitter::Emitter;
use source::{FileSourceLookup, SourceLookup};

pub use hierarchy::{Hierarchy, HierarchyMode};
pub use source::{InMemorySources, NoSources, SourceWindow};
pub use suite::SuiteCounts;

/// Glyph printed for a spec
#[cfg(not(windows))]
pub const SPEC_DENOTER: &str = "•";
/// Glyph printed for a spec that needed retries
#[cfg(not(windows))]
pub const RETRY_DENOTER: &str = "↺";
/// Glyph printed for a spec
#[cfg(windows)]
pub const SPEC_DENOTER: &str = "+";
/// Glyph printed for a spec that needed retries
#[cfg(windows)]
pub const RETRY_DENOTER: &str = "R";

/// Receives suite lifecycle events
pub trait Reporter {
    /// The suite is about to run
    fn suite_will_begin(&mut self, report: &SuiteReport);

    /// A spec is about to run
    fn will_run(&mut self, report: &SpecReport);

    /// A spec (or suite-level node) finished
    fn did_run(&mut self, report: &SpecReport);

    /// The suite finished
    fn suite_did_end(&mut self, report: &SuiteReport);

    /// A progress snapshot was requested
    fn emit_progress_report(&mut self, report: &ProgressReport);
}

/// Renders suite events as text on a writer
pub struct DefaultReporter<W: Write> {
    conf: ReporterConfig,
    out: Emitter<W>,
    sources: Box<dyn SourceLookup>,
}

impl<W: Write> DefaultReporter<W> {
    /// Reporter writing to `writer`, colored according to `conf.color`
    pub fn new(conf: ReporterConfig, writer: W) -> Self {
        let formatter = Formatter::for_color(conf.color);
        Self::with_formatter(conf, writer, formatter)
    }

    /// Reporter using an explicit formatter
    pub fn with_formatter(conf: ReporterConfig, writer: W, formatter: Formatter) -> Self {
        Self {
            conf,
            out: Emitter::new(writer, formatter),
            sources: Box::new(FileSourceLookup),
        }
    }

    /// Replace how source snippets for highlighted frames are found
    #[must_use]
    pub fn with_source_lookup(mut self, sources: impl SourceLookup + 'static) -> Self {
        self.sources = Box::new(sources);
        self
    }

    /// The active configuration
    pub const fn config(&self) -> &ReporterConfig {
        &self.conf
    }

    /// Flush and give back the writer
    pub fn into_inner(mut self) -> W {
        self.out.flush();
        self.out.into_inner()
    }
}

impl<W: Write> Reporter for DefaultReporter<W> {
    fn suite_will_begin(&mut self, report: &SuiteReport) {
        self.render_suite_will_begin(report);
        self.out.flush();
    }

    fn will_run(&mut self, report: &SpecReport) {
        self.render_will_run(report);
        self.out.flush();
    }

    fn did_run(&mut self, report: &SpecReport) {
        self.render_did_run(report);
        self.out.flush();
    }

    fn suite_did_end(&mut self, report: &SuiteReport) {
        self.render_suite_did_end(report);
        self.out.flush();
    }

    fn emit_progress_report(&mut self, report: &ProgressReport) {
        self.render_progress_report(report);
        self.out.flush();
    }
}
