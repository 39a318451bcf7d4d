//! Suite and spec reports

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::CodeLocation;
use super::node::{NodeType, SpecState};
use super::progress::ProgressReport;
use crate::format::time::secs;

/// When a report entry is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportEntryVisibility {
    /// Always shown
    #[default]
    Always,
    /// Never shown by this reporter
    Never,
    /// Shown when the spec has a failure or verbosity is at least verbose
    FailureOrVerbose,
}

/// A named value attached to a spec while it ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportEntry {
    /// Entry name
    pub name: String,
    /// Where the entry was added
    pub location: CodeLocation,
    /// When the entry was added
    pub time: DateTime<Utc>,
    /// Visibility policy
    pub visibility: ReportEntryVisibility,
    /// Rendered value, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Where in the hierarchy a failure occurred
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureNodeContext {
    /// Outside any container, e.g. in a suite-level setup
    AtTopLevel,
    /// In a setup/teardown node attached to the container at `index`
    InContainer {
        /// Zero-based container index, outermost first
        index: usize,
    },
    /// In the spec itself
    #[default]
    IsLeafNode,
}

/// Details of why a spec did not pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Failure {
    /// Failure message
    pub message: String,
    /// Precise location of the failure
    pub location: CodeLocation,
    /// Panic value forwarded from a goroutine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_panic: Option<String>,
    /// Where the failing node sits in the hierarchy
    pub failure_node_context: FailureNodeContext,
    /// Kind of the failing node
    pub failure_node_type: NodeType,
    /// Location of the failing node
    pub failure_node_location: CodeLocation,
    /// Snapshot captured when the spec was interrupted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_report: Option<ProgressReport>,
}

impl Failure {
    /// Whether neither a message nor a location was recorded
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.message.is_empty() && self.location == CodeLocation::default()
    }
}

/// One ancestor container of a spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    /// Container text
    pub text: String,
    /// Container location
    pub location: CodeLocation,
    /// Labels declared on the container
    pub labels: Vec<String>,
}

impl Container {
    /// Container with no labels
    #[must_use]
    pub fn new(text: impl Into<String>, location: CodeLocation) -> Self {
        Self {
            text: text.into(),
            location,
            labels: Vec::new(),
        }
    }
}

/// Outcome of a single spec or suite-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecReport {
    /// Ancestors, outermost first
    pub containers: Vec<Container>,
    /// Kind of the leaf node
    pub leaf_node_type: NodeType,
    /// Leaf text
    pub leaf_node_text: String,
    /// Leaf location
    pub leaf_node_location: CodeLocation,
    /// Labels declared on the leaf
    pub leaf_node_labels: Vec<String>,

    /// Final state
    pub state: SpecState,
    /// Number of attempts it took (at least one)
    pub num_attempts: u32,
    /// Wall time of the spec
    #[serde(with = "secs")]
    pub run_time: Duration,
    /// Failure details, when the spec did not pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,

    /// Captured stdout/stderr
    pub captured_std_out_err: String,
    /// Output written to the framework's test writer
    pub captured_writer_output: String,
    /// Entries added while the spec ran
    pub report_entries: Vec<ReportEntry>,
}

impl Default for SpecReport {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            leaf_node_type: NodeType::It,
            leaf_node_text: String::new(),
            leaf_node_location: CodeLocation::default(),
            leaf_node_labels: Vec::new(),
            state: SpecState::Passed,
            num_attempts: 1,
            run_time: Duration::ZERO,
            failure: None,
            captured_std_out_err: String::new(),
            captured_writer_output: String::new(),
            report_entries: Vec::new(),
        }
    }
}

impl SpecReport {
    /// De-duplicated labels of every container followed by the leaf, first-seen order
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let all = self
            .containers
            .iter()
            .flat_map(|c| c.labels.iter())
            .chain(self.leaf_node_labels.iter());
        for label in all {
            if !labels.contains(label) {
                labels.push(label.clone());
            }
        }
        labels
    }

    /// Whether the leaf is a suite-level node rather than a spec
    #[must_use]
    pub const fn is_suite_level(&self) -> bool {
        self.leaf_node_type.is_suite_level()
    }

    /// The failure, unless absent or empty
    #[must_use]
    pub fn recorded_failure(&self) -> Option<&Failure> {
        self.failure.as_ref().filter(|f| !f.is_zero())
    }

    /// Failure message, or an empty string
    #[must_use]
    pub fn failure_message(&self) -> &str {
        self.recorded_failure().map_or("", |f| f.message.as_str())
    }

    /// Whether any entry has the given visibility
    #[must_use]
    pub fn has_entries_with(&self, visibility: ReportEntryVisibility) -> bool {
        self.report_entries
            .iter()
            .any(|entry| entry.visibility == visibility)
    }
}

/// Metadata and outcome of a whole suite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteReport {
    /// Suite description
    pub suite_description: String,
    /// Path of the suite
    pub suite_path: String,
    /// Suite-wide labels
    pub suite_labels: Vec<String>,
    /// Randomization seed
    pub random_seed: i64,
    /// Whether every spec, not only top-level containers, is shuffled
    pub randomize_all_specs: bool,
    /// Number of parallel processes
    pub parallel_total: u32,
    /// Spec counts known before the run
    pub pre_run_stats: PreRunStats,

    /// Whether the suite passed
    pub suite_succeeded: bool,
    /// Reasons for failure not attributable to a spec
    pub special_suite_failure_reasons: Vec<String>,
    /// Wall time of the suite
    #[serde(with = "secs")]
    pub run_time: Duration,
    /// Reports of every spec and suite-level node, in run order
    pub spec_reports: Vec<SpecReport>,
}

/// Spec counts known before the run starts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreRunStats {
    /// Every spec in the suite
    pub total_specs: usize,
    /// Specs selected to run
    pub specs_that_will_run: usize,
}
