//! Node kinds and spec states

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of node a spec, container or setup function is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Grouping node (`Describe`, `Context`, ...)
    Container,
    /// A spec
    #[default]
    It,
    /// Setup run before each spec
    BeforeEach,
    /// Setup run just before each spec body
    JustBeforeEach,
    /// Teardown run after each spec
    AfterEach,
    /// Teardown run just after each spec body
    JustAfterEach,
    /// Setup run once before an ordered container
    BeforeAll,
    /// Teardown run once after an ordered container
    AfterAll,
    /// Suite-wide setup
    BeforeSuite,
    /// Suite-wide setup coordinated across parallel processes
    SynchronizedBeforeSuite,
    /// Suite-wide teardown
    AfterSuite,
    /// Suite-wide teardown coordinated across parallel processes
    SynchronizedAfterSuite,
    /// Reporting hook run before each spec
    ReportBeforeEach,
    /// Reporting hook run after each spec
    ReportAfterEach,
    /// Reporting hook run after the suite
    ReportAfterSuite,
    /// Cleanup registered from a spec
    #[serde(rename = "DeferCleanup (Each)")]
    CleanupAfterEach,
    /// Cleanup registered from an ordered container
    #[serde(rename = "DeferCleanup (All)")]
    CleanupAfterAll,
    /// Cleanup registered from a suite-level node
    #[serde(rename = "DeferCleanup (Suite)")]
    CleanupAfterSuite,
}

impl NodeType {
    /// Whether this kind runs once for the whole suite rather than per spec
    #[must_use]
    pub const fn is_suite_level(self) -> bool {
        matches!(
            self,
            Self::BeforeSuite
                | Self::SynchronizedBeforeSuite
                | Self::AfterSuite
                | Self::SynchronizedAfterSuite
                | Self::ReportAfterSuite
                | Self::CleanupAfterSuite
        )
    }

    /// Whether this kind is one of the suite setup nodes
    #[must_use]
    pub const fn is_before_suite(self) -> bool {
        matches!(self, Self::BeforeSuite | Self::SynchronizedBeforeSuite)
    }

    /// Display name used in rendered output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::It => "It",
            Self::BeforeEach => "BeforeEach",
            Self::JustBeforeEach => "JustBeforeEach",
            Self::AfterEach => "AfterEach",
            Self::JustAfterEach => "JustAfterEach",
            Self::BeforeAll => "BeforeAll",
            Self::AfterAll => "AfterAll",
            Self::BeforeSuite => "BeforeSuite",
            Self::SynchronizedBeforeSuite => "SynchronizedBeforeSuite",
            Self::AfterSuite => "AfterSuite",
            Self::SynchronizedAfterSuite => "SynchronizedAfterSuite",
            Self::ReportBeforeEach => "ReportBeforeEach",
            Self::ReportAfterEach => "ReportAfterEach",
            Self::ReportAfterSuite => "ReportAfterSuite",
            Self::CleanupAfterEach => "DeferCleanup (Each)",
            Self::CleanupAfterAll => "DeferCleanup (All)",
            Self::CleanupAfterSuite => "DeferCleanup (Suite)",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final (or current) state of a spec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecState {
    /// Ran and passed
    #[default]
    Passed,
    /// An assertion failed
    Failed,
    /// The spec panicked
    Panicked,
    /// The run was interrupted while the spec was running
    Interrupted,
    /// The run was aborted
    Aborted,
    /// Skipped at runtime or by focus/filters
    Skipped,
    /// Marked pending
    Pending,
}

impl SpecState {
    /// Whether this state counts as a failure
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Panicked | Self::Interrupted | Self::Aborted
        )
    }
}
