//! spec-reporter - Human-readable reporting for BDD test runs
//!
//! Turns suite lifecycle events (suite start, spec start/finish, progress
//! snapshots, suite end) into styled terminal text under four verbosity
//! levels. Rendering is deterministic: the same configuration and report
//! always produce the same bytes.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod events;
pub mod format;
pub mod reporter;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::{ReporterConfig, ReporterFlags, Verbosity};
pub use events::{replay, EventLog, ReporterEvent};
pub use format::{ColorMode, Formatter};
pub use reporter::{DefaultReporter, Reporter, SuiteCounts};
pub use types::{
    CodeLocation, Container, Failure, FailureNodeContext, NodeType, ProgressReport, SpecReport,
    SpecState, SuiteReport,
};
