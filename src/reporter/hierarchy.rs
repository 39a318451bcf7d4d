//! Container hierarchy rendering
//!
//! A spec's ancestors and leaf are rendered either one node per line with
//! each node's location beneath it ([`HierarchyMode::Full`]), or collapsed onto
//! a single line followed by one location ([`HierarchyMode::Succinct`]). When
//! the spec failed, the failing node is renamed and highlighted.

use crate::format::color::{cycle_join, BOLD, CORAL, GRAY, RESET};
use crate::format::indent;
use crate::types::{CodeLocation, FailureNodeContext, SpecReport};

/// Layout of a rendered hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyMode {
    /// One node per line, indented by depth, each followed by its location
    Full,
    /// Every node on one line, followed by a single location
    Succinct,
}

#[derive(Debug, Clone)]
struct Node {
    text: String,
    location: CodeLocation,
    labels: Vec<String>,
}

/// The nodes of a spec, with failure annotations applied
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    highlight: Option<usize>,
    labels: Vec<String>,
    failure_location: Option<CodeLocation>,
}

impl Hierarchy {
    /// Build the hierarchy of `report`
    #[must_use]
    pub fn for_spec(report: &SpecReport) -> Self {
        let mut nodes: Vec<Node> = report
            .containers
            .iter()
            .map(|c| Node {
                text: c.text.clone(),
                location: c.location.clone(),
                labels: c.labels.clone(),
            })
            .collect();

        let leaf_text = if report.is_suite_level() {
            format!("[{}] {}", report.leaf_node_type, report.leaf_node_text)
        } else {
            report.leaf_node_text.clone()
        };
        nodes.push(Node {
            text: leaf_text,
            location: report.leaf_node_location.clone(),
            labels: report.leaf_node_labels.clone(),
        });

        let mut highlight = None;
        if let Some(failure) = report.recorded_failure() {
            let kind = failure.failure_node_type;
            let location = failure.failure_node_location.clone();
            let leaf = nodes.len() - 1;
            match failure.failure_node_context {
                FailureNodeContext::AtTopLevel => {
                    nodes.insert(
                        0,
                        Node {
                            text: format!("TOP-LEVEL [{kind}]"),
                            location,
                            labels: Vec::new(),
                        },
                    );
                    highlight = Some(0);
                }
                FailureNodeContext::InContainer { index } if index < nodes.len() => {
                    let node = &mut nodes[index];
                    node.text = format!("{} [{kind}]", node.text);
                    node.location = location;
                    highlight = Some(index);
                }
                FailureNodeContext::InContainer { index } => {
                    tracing::debug!(
                        index,
                        containers = leaf,
                        "failure container index out of range"
                    );
                    highlight = Some(leaf);
                }
                FailureNodeContext::IsLeafNode => {
                    let node = &mut nodes[leaf];
                    node.text = format!("[{kind}] {}", report.leaf_node_text);
                    node.location = location;
                    highlight = Some(leaf);
                }
            }
        }

        Self {
            nodes,
            highlight,
            labels: report.labels(),
            failure_location: report.recorded_failure().map(|f| f.location.clone()),
        }
    }

    /// Render the hierarchy.
    ///
    /// `highlight_color` is the marker applied to the failing node. With
    /// `precise_location`, succinct mode ends with the failure's own location
    /// instead of the last node's.
    #[must_use]
    pub fn render(
        &self,
        mode: HierarchyMode,
        highlight_color: &str,
        precise_location: bool,
    ) -> String {
        match mode {
            HierarchyMode::Full => self.render_full(highlight_color),
            HierarchyMode::Succinct => self.render_succinct(highlight_color, precise_location),
        }
    }

    fn node_text(&self, i: usize, highlight_color: &str) -> String {
        let text = &self.nodes[i].text;
        if self.highlight == Some(i) {
            format!("{highlight_color}{BOLD}{text}{RESET}")
        } else {
            text.clone()
        }
    }

    fn render_full(&self, highlight_color: &str) -> String {
        let mut out = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            out.push_str(&indent(i, &self.node_text(i, highlight_color)));
            out.push_str(&labels_suffix(&node.labels));
            out.push('\n');
            out.push_str(&indent(i, &format!("{GRAY}{}{RESET}", node.location)));
            out.push('\n');
        }
        out
    }

    fn render_succinct(&self, highlight_color: &str, precise_location: bool) -> String {
        let texts: Vec<String> = (0..self.nodes.len())
            .map(|i| self.node_text(i, highlight_color))
            .collect();
        let location = match (&self.failure_location, precise_location) {
            (Some(failure), true) => failure,
            _ => &self.nodes[self.nodes.len() - 1].location,
        };
        format!(
            "{}{}\n{GRAY}{location}{RESET}",
            cycle_join(&texts, " "),
            labels_suffix(&self.labels)
        )
    }
}

/// ` {{coral}}[a, b]{{/}}`, or nothing when there are no labels
#[must_use]
pub fn labels_suffix(labels: &[String]) -> String {
    if labels.is_empty() {
        String::new()
    } else {
        format!(" {CORAL}[{}]{RESET}", labels.join(", "))
    }
}
