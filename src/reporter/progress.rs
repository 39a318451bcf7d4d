//! Progress reports: where a running spec is, plus a goroutine dump

use std::io::Write;

use super::DefaultReporter;
use crate::format::color::{cycle_join, BOLD, CORAL, GRAY, ORANGE, RESET, UNDERLINE};
use crate::format::{go_duration, indent};
use crate::types::{FunctionCall, Goroutine, NodeType, ProgressReport};

impl<W: Write> DefaultReporter<W> {
    pub(super) fn render_progress_report(&mut self, report: &ProgressReport) {
        self.out.emit_delimiter();
        if report.running_in_parallel {
            self.out.emit(&format!(
                "{CORAL}Progress Report for Ginkgo Process #{BOLD}{}{RESET}\n",
                report.parallel_process
            ));
        }
        self.render_progress_report_body(0, report);
        self.out.emit_delimiter();
    }

    /// Render the body of a progress report starting at indentation `level`.
    ///
    /// Also used to embed the report of an interrupted spec.
    pub(super) fn render_progress_report_body(
        &mut self,
        mut level: usize,
        report: &ProgressReport,
    ) {
        if !report.leaf_node_text.is_empty() {
            let leaf = format!(
                "{BOLD}{ORANGE}{}{RESET} (Spec Runtime: {})\n",
                report.leaf_node_text,
                go_duration(report.spec_runtime())
            );
            if report.container_hierarchy_texts.is_empty() {
                self.out.emit(&indent(level, &leaf));
            } else {
                let containers = cycle_join(&report.container_hierarchy_texts, " ");
                self.out.emit(&indent(level, &format!("{containers} {leaf}")));
            }
            self.out.emit(&indent(
                level + 1,
                &format!("{GRAY}{}{RESET}\n", report.leaf_node_location),
            ));
            level += 1;
        }

        if let Some(kind) = report.current_node_type {
            let mut line = format!("In {BOLD}{ORANGE}[{kind}]{RESET}");
            if !report.current_node_text.is_empty() && kind != NodeType::It {
                line.push_str(&format!(" {BOLD}{ORANGE}{}{RESET}", report.current_node_text));
            }
            line.push_str(&format!(
                " (Node Runtime: {})\n",
                go_duration(report.node_runtime())
            ));
            self.out.emit(&indent(level, &line));
            self.out.emit(&indent(
                level + 1,
                &format!("{GRAY}{}{RESET}\n", report.current_node_location),
            ));
            level += 1;
        }

        if !report.current_step_text.is_empty() {
            self.out.emit(&indent(
                level,
                &format!(
                    "At {BOLD}{ORANGE}[By Step] {}{RESET} (Step Runtime: {})\n",
                    report.current_step_text,
                    go_duration(report.step_runtime())
                ),
            ));
            self.out.emit(&indent(
                level + 1,
                &format!("{GRAY}{}{RESET}\n", report.current_step_location),
            ));
            level += 1;
        }

        level = level.saturating_sub(1);

        if let Some(spec) = report.spec_goroutine() {
            self.out.emit("\n");
            self.out.emit(&indent(
                level,
                &format!("{BOLD}{UNDERLINE}Spec Goroutine{RESET}\n"),
            ));
            self.render_goroutines(level, &[spec]);
        }

        let highlighted = report.highlighted_goroutines();
        if !highlighted.is_empty() {
            self.out.emit("\n");
            self.out.emit(&indent(
                level,
                &format!("{BOLD}{UNDERLINE}Goroutines of Interest{RESET}\n"),
            ));
            self.render_goroutines(level, &highlighted);
        }

        let others = report.other_goroutines();
        if !others.is_empty() {
            self.out.emit("\n");
            self.out.emit(&indent(
                level,
                &format!("{GRAY}{BOLD}{UNDERLINE}Other Goroutines{RESET}\n"),
            ));
            self.render_goroutines(level, &others);
        }
    }

    fn render_goroutines(&mut self, level: usize, goroutines: &[&Goroutine]) {
        for (i, goroutine) in goroutines.iter().enumerate() {
            let color = if goroutine.has_highlights() { ORANGE } else { GRAY };
            self.out.emit(&indent(
                level,
                &format!("{color}goroutine {} [{}]{RESET}\n", goroutine.id, goroutine.state),
            ));
            for call in &goroutine.stack {
                if call.highlight {
                    self.out.emit(&indent(
                        level,
                        &format!("{color}{BOLD}> {}{RESET}\n", call.function),
                    ));
                    self.out.emit(&indent(
                        level + 2,
                        &format!("{color}{BOLD}{}:{}{RESET}\n", call.filename, call.line),
                    ));
                    self.render_source(level + 3, call);
                } else {
                    self.out
                        .emit(&indent(level + 1, &format!("{GRAY}{}{RESET}\n", call.function)));
                    self.out.emit(&indent(
                        level + 2,
                        &format!("{GRAY}{}:{}{RESET}\n", call.filename, call.line),
                    ));
                }
            }
            if i + 1 < goroutines.len() {
                self.out.emit("\n");
            }
        }
    }

    fn render_source(&mut self, level: usize, call: &FunctionCall) {
        let Some(window) = self.sources.lookup(&call.filename, call.line) else {
            return;
        };
        let window = window.dedented();
        for (i, line) in window.lines.iter().enumerate() {
            let rendered = if i == window.highlight {
                format!("{BOLD}{ORANGE}> {line}{RESET}\n")
            } else {
                format!("| {line}\n")
            };
            self.out.emit(&indent(level, &rendered));
        }
    }
}
