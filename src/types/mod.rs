//! Report data consumed by the renderers

pub mod location;
pub mod node;
pub mod progress;
pub mod report;

pub use location::CodeLocation;
pub use node::{NodeType, SpecState};
pub use progress::{FunctionCall, Goroutine, ProgressReport};
pub use report::{
    Container, Failure, FailureNodeContext, PreRunStats, ReportEntry, ReportEntryVisibility,
    SpecReport, SuiteReport,
};
