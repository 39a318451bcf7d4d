//! Per-spec rendering: announcement before a spec runs and its outcome after

use std::io::Write;

use super::hierarchy::{labels_suffix, Hierarchy, HierarchyMode};
use super::{DefaultReporter, RETRY_DENOTER, SPEC_DENOTER};
use crate::config::Verbosity;
use crate::format::color::{
    cycle_join, BOLD, CORAL, CYAN, GRAY, GREEN, MAGENTA, ORANGE, RED, RESET, YELLOW,
};
use crate::format::{entry_timestamp, indent};
use crate::types::{ReportEntryVisibility, SpecReport, SpecState};

/// What to print for a finished spec
struct Outcome {
    color: &'static str,
    header: String,
    stream: bool,
    include_runtime: bool,
    emit_writer_output: bool,
    succinct_location: bool,
}

impl<W: Write> DefaultReporter<W> {
    pub(super) fn render_will_run(&mut self, report: &SpecReport) {
        if self.conf.verbosity < Verbosity::Verbose
            || matches!(report.state, SpecState::Pending | SpecState::Skipped)
        {
            return;
        }

        self.out.emit_delimiter();
        let mut level = 0;
        if report.is_suite_level() {
            self.out.emit_block(&format!(
                "{BOLD}[{}] {}{RESET}",
                report.leaf_node_type, report.leaf_node_text
            ));
        } else {
            if !report.containers.is_empty() {
                let texts: Vec<&str> = report.containers.iter().map(|c| c.text.as_str()).collect();
                self.out.emit_block(&cycle_join(&texts, " "));
                level = 1;
            }
            let leaf = indent(level, &format!("{BOLD}{}{RESET}", report.leaf_node_text));
            self.out
                .emit_block(&format!("{leaf}{}", labels_suffix(&report.labels())));
        }
        self.out.emit_block(&indent(
            level,
            &format!("{GRAY}{}{RESET}", report.leaf_node_location),
        ));
    }

    pub(super) fn render_did_run(&mut self, report: &SpecReport) {
        let Some(outcome) = self.outcome(report) else {
            return;
        };

        if outcome.stream {
            self.out
                .emit(&format!("{}{}{RESET}", outcome.color, outcome.header));
            return;
        }

        self.out.emit_delimiter();
        let mut header = outcome.header;
        if outcome.include_runtime {
            header = format!("{header} [{:.3} seconds]", report.run_time.as_secs_f64());
        }
        self.out
            .emit_block(&format!("{}{header}{RESET}", outcome.color));

        let mode = if outcome.succinct_location {
            HierarchyMode::Succinct
        } else {
            HierarchyMode::Full
        };
        self.out
            .emit_block(&Hierarchy::for_spec(report).render(mode, outcome.color, false));

        if !report.captured_std_out_err.is_empty() {
            self.emit_captured("StdOut/StdErr Output", &report.captured_std_out_err);
        }
        if outcome.emit_writer_output {
            self.emit_captured("GinkgoWriter Output", &report.captured_writer_output);
        }
        if self.has_visible_entries(report) {
            self.emit_report_entries(report);
        }
        if let Some(failure) = report.recorded_failure() {
            let color = outcome.color;
            self.out.emit_block("\n");
            self.out
                .emit_block(&indent(1, &format!("{color}{}{RESET}", failure.message)));
            self.out.emit_block(&indent(
                1,
                &format!(
                    "{color}In {BOLD}[{}]{RESET}{color} at: {BOLD}{}{RESET}\n",
                    failure.failure_node_type, failure.location
                ),
            ));

            let forwarded_panic = failure.forwarded_panic.as_deref().filter(|p| !p.is_empty());
            if let Some(panic) = forwarded_panic {
                self.out.emit_block("\n");
                self.out
                    .emit_block(&indent(1, &format!("{color}{panic}{RESET}")));
            }
            if self.conf.full_trace || forwarded_panic.is_some() {
                self.out.emit_block("\n");
                self.out
                    .emit_block(&indent(1, &format!("{color}Full Stack Trace{RESET}")));
                self.out
                    .emit_block(&indent(2, &failure.location.full_stack_trace));
            }
            if let Some(progress) = &failure.progress_report {
                self.out.emit_block("\n");
                self.render_progress_report_body(1, progress);
            }
        }

        self.out.emit_delimiter();
    }

    /// Decide header, color and layout for a finished spec
    fn outcome(&self, report: &SpecReport) -> Option<Outcome> {
        let v = self.conf.verbosity;
        let has_std = !report.captured_std_out_err.is_empty();
        let has_writer_output = !report.captured_writer_output.is_empty();
        let has_entries = self.has_visible_entries(report);
        let denoter = if report.is_suite_level() {
            format!("[{}]", report.leaf_node_type)
        } else {
            SPEC_DENOTER.to_string()
        };

        let mut outcome = Outcome {
            color: GREEN,
            header: denoter.clone(),
            stream: false,
            include_runtime: true,
            emit_writer_output: has_writer_output,
            succinct_location: v == Verbosity::Succinct,
        };

        match report.state {
            SpecState::Passed => {
                outcome.succinct_location = v < Verbosity::Verbose;
                outcome.emit_writer_output = has_writer_output
                    && (self.conf.always_emit_writer_output || v >= Verbosity::Verbose);

                if report.is_suite_level() {
                    let forced = has_std || outcome.emit_writer_output || has_entries;
                    if v < Verbosity::Verbose && !forced {
                        return None;
                    }
                    outcome.header = format!("{denoter} PASSED");
                } else {
                    outcome.stream = true;
                    if report.num_attempts > 1 {
                        outcome.header = format!(
                            "{RETRY_DENOTER} [FLAKEY TEST - TOOK {} ATTEMPTS TO PASS]",
                            report.num_attempts
                        );
                        outcome.stream = false;
                    }
                    if report.run_time >= self.conf.slow_spec_threshold {
                        outcome.header.push_str(" [SLOW TEST]");
                        outcome.stream = false;
                    }
                }
                if has_std || outcome.emit_writer_output || has_entries {
                    outcome.stream = false;
                }
            }
            SpecState::Pending => {
                outcome.color = YELLOW;
                outcome.include_runtime = false;
                outcome.emit_writer_output = false;
                if v == Verbosity::Succinct {
                    outcome.header = "P".to_string();
                    outcome.stream = true;
                } else {
                    outcome.header = "P [PENDING]".to_string();
                    outcome.succinct_location = v < Verbosity::VeryVerbose;
                }
            }
            SpecState::Skipped => {
                outcome.color = CYAN;
                if !report.failure_message().is_empty() || v == Verbosity::VeryVerbose {
                    outcome.header = "S [SKIPPED]".to_string();
                } else {
                    outcome.header = "S".to_string();
                    outcome.stream = true;
                }
            }
            SpecState::Failed => {
                outcome.color = RED;
                outcome.header = format!("{denoter} [FAILED]");
            }
            SpecState::Panicked => {
                outcome.color = MAGENTA;
                outcome.header = format!("{denoter}! [PANICKED]");
            }
            SpecState::Interrupted => {
                outcome.color = ORANGE;
                outcome.header = format!("{denoter}! [INTERRUPTED]");
            }
            SpecState::Aborted => {
                outcome.color = CORAL;
                outcome.header = format!("{denoter}! [ABORTED]");
            }
        }

        Some(outcome)
    }

    /// Whether entries should be shown for this spec and configuration
    fn has_visible_entries(&self, report: &SpecReport) -> bool {
        report.has_entries_with(ReportEntryVisibility::Always)
            || (report.has_entries_with(ReportEntryVisibility::FailureOrVerbose)
                && self.failure_or_verbose(report))
    }

    fn failure_or_verbose(&self, report: &SpecReport) -> bool {
        report.recorded_failure().is_some() || self.conf.verbosity >= Verbosity::Verbose
    }

    fn emit_captured(&mut self, what: &str, text: &str) {
        self.out.emit_block("\n");
        self.out
            .emit_block(&indent(1, &format!("{GRAY}Begin Captured {what} >>{RESET}")));
        self.out.emit_block(&indent(2, text));
        self.out
            .emit_block(&indent(1, &format!("{GRAY}<< End Captured {what}{RESET}")));
    }

    fn emit_report_entries(&mut self, report: &SpecReport) {
        let failure_or_verbose = self.failure_or_verbose(report);
        self.out.emit_block("\n");
        self.out
            .emit_block(&indent(1, &format!("{GRAY}Begin Report Entries >>{RESET}")));
        let visible = report.report_entries.iter().filter(|entry| match entry.visibility {
            ReportEntryVisibility::Always => true,
            ReportEntryVisibility::FailureOrVerbose => failure_or_verbose,
            ReportEntryVisibility::Never => false,
        });
        for entry in visible {
            self.out.emit_block(&indent(
                2,
                &format!(
                    "{BOLD}{}{GRAY} - {} @ {}{RESET}",
                    entry.name,
                    entry.location,
                    entry_timestamp(&entry.time)
                ),
            ));
            if let Some(value) = entry.value.as_deref().filter(|v| !v.is_empty()) {
                self.out.emit_block(&indent(3, value));
            }
        }
        self.out
            .emit_block(&indent(1, &format!("{GRAY}<< End Report Entries{RESET}")));
    }
}
