//! Point-in-time snapshots of a running spec

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::CodeLocation;
use super::node::NodeType;
use crate::format::elapsed_millis;

/// One frame of a goroutine stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionCall {
    /// Fully qualified function name
    pub function: String,
    /// Source file of the frame
    pub filename: String,
    /// One-based line of the call
    pub line: u32,
    /// Whether this frame belongs to user code worth highlighting
    pub highlight: bool,
}

/// A goroutine captured in a progress report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goroutine {
    /// Goroutine id
    pub id: u64,
    /// Scheduler state, e.g. `running` or `chan receive`
    pub state: String,
    /// Whether this goroutine is the one running the spec
    pub is_spec_goroutine: bool,
    /// Frames, innermost first
    pub stack: Vec<FunctionCall>,
}

impl Goroutine {
    /// Whether any frame is highlighted
    #[must_use]
    pub fn has_highlights(&self) -> bool {
        self.stack.iter().any(|call| call.highlight)
    }
}

/// Snapshot of what a spec is doing at a given instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressReport {
    /// Process number of the reporting process (1-based)
    pub parallel_process: u32,
    /// Whether the suite runs across several processes
    pub running_in_parallel: bool,

    /// Container texts from the root down to the spec
    pub container_hierarchy_texts: Vec<String>,
    /// Text of the running spec
    pub leaf_node_text: String,
    /// Location of the running spec
    pub leaf_node_location: CodeLocation,
    /// When the spec started
    pub spec_start_time: DateTime<Utc>,

    /// Kind of node currently executing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_node_type: Option<NodeType>,
    /// Text of the node currently executing
    pub current_node_text: String,
    /// Location of the node currently executing
    pub current_node_location: CodeLocation,
    /// When the current node started
    pub current_node_start_time: DateTime<Utc>,

    /// Text of the current `By` step
    pub current_step_text: String,
    /// Location of the current step
    pub current_step_location: CodeLocation,
    /// When the current step started
    pub current_step_start_time: DateTime<Utc>,

    /// When the snapshot was captured
    pub time: DateTime<Utc>,
    /// Goroutines captured with the snapshot
    pub goroutines: Vec<Goroutine>,
}

impl ProgressReport {
    /// Spec runtime at capture time
    #[must_use]
    pub fn spec_runtime(&self) -> Duration {
        elapsed_millis(self.spec_start_time, self.time)
    }

    /// Current node runtime at capture time
    #[must_use]
    pub fn node_runtime(&self) -> Duration {
        elapsed_millis(self.current_node_start_time, self.time)
    }

    /// Current step runtime at capture time
    #[must_use]
    pub fn step_runtime(&self) -> Duration {
        elapsed_millis(self.current_step_start_time, self.time)
    }

    /// The goroutine running the spec, if captured
    #[must_use]
    pub fn spec_goroutine(&self) -> Option<&Goroutine> {
        self.goroutines.iter().find(|g| g.is_spec_goroutine)
    }

    /// Non-spec goroutines with at least one highlighted frame
    #[must_use]
    pub fn highlighted_goroutines(&self) -> Vec<&Goroutine> {
        self.goroutines
            .iter()
            .filter(|g| !g.is_spec_goroutine && g.has_highlights())
            .collect()
    }

    /// Non-spec goroutines without highlighted frames
    #[must_use]
    pub fn other_goroutines(&self) -> Vec<&Goroutine> {
        self.goroutines
            .iter()
            .filter(|g| !g.is_spec_goroutine && !g.has_highlights())
            .collect()
    }
}
