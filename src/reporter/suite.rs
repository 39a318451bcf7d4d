//! Suite banner and end-of-run summary

use std::io::Write;

use super::hierarchy::{Hierarchy, HierarchyMode};
use super::DefaultReporter;
use crate::config::Verbosity;
use crate::format::color::{
    BOLD, CORAL, CYAN, GREEN, LIGHT_YELLOW, MAGENTA, ORANGE, RED, RESET, YELLOW,
};
use crate::format::{go_duration, indent};
use crate::types::{NodeType, SpecReport, SpecState, SuiteReport};

/// Tallies of a finished suite
///
/// Only `It` leaves count as specs; every other leaf kind is a suite node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteCounts {
    /// Specs that passed on the first attempt
    pub passed: usize,
    /// Specs that passed after retries
    pub flaked: usize,
    /// Specs in a failure state
    pub failed: usize,
    /// Pending specs
    pub pending: usize,
    /// Skipped specs
    pub skipped: usize,
    /// Reports of non-spec nodes
    pub suite_nodes: usize,
}

impl SuiteCounts {
    /// Count the reports of a suite
    #[must_use]
    pub fn tally(reports: &[SpecReport]) -> Self {
        let mut counts = Self::default();
        for report in reports {
            if report.leaf_node_type != NodeType::It {
                counts.suite_nodes += 1;
                continue;
            }
            match report.state {
                SpecState::Passed if report.num_attempts > 1 => counts.flaked += 1,
                SpecState::Passed => counts.passed += 1,
                SpecState::Pending => counts.pending += 1,
                SpecState::Skipped => counts.skipped += 1,
                SpecState::Failed
                | SpecState::Panicked
                | SpecState::Interrupted
                | SpecState::Aborted => counts.failed += 1,
            }
        }
        counts
    }

    /// Specs that actually ran
    #[must_use]
    pub const fn ran(&self) -> usize {
        self.passed + self.flaked + self.failed
    }
}

/// Tag and color used in the failure digest
const fn failure_tag(state: SpecState) -> (&'static str, &'static str) {
    match state {
        SpecState::Panicked => (MAGENTA, "[PANICKED!]"),
        SpecState::Interrupted => (ORANGE, "[INTERRUPTED]"),
        SpecState::Aborted => (CORAL, "[ABORTED]"),
        _ => (RED, "[FAIL]"),
    }
}

impl<W: Write> DefaultReporter<W> {
    pub(super) fn render_suite_will_begin(&mut self, report: &SuiteReport) {
        let joined = report.suite_labels.join(", ");
        let labels = (!report.suite_labels.is_empty()).then(|| format!("[{joined}]"));

        if self.conf.verbosity == Verbosity::Succinct {
            self.out.emit(&format!(
                "[{}] {BOLD}{}{RESET} ",
                report.random_seed, report.suite_description
            ));
            if let Some(labels) = &labels {
                self.out.emit(&format!("{CORAL}{labels}{RESET} "));
            }
            self.out.emit(&format!(
                "- {}/{} specs ",
                report.pre_run_stats.specs_that_will_run, report.pre_run_stats.total_specs
            ));
            if report.parallel_total > 1 {
                self.out
                    .emit(&format!("- {} procs ", report.parallel_total));
            }
            return;
        }

        let banner = format!(
            "Running Suite: {} - {}",
            report.suite_description, report.suite_path
        );
        self.out.emit_block(&banner);
        let mut width = banner.chars().count();
        if let Some(labels) = &labels {
            self.out.emit_block(&format!("{CORAL}{labels}{RESET} "));
            width = width.max(joined.chars().count() + 2);
        }
        self.out.emit_block(&"=".repeat(width));

        let mut seed = format!("Random Seed: {BOLD}{}{RESET}", report.random_seed);
        if report.randomize_all_specs {
            seed.push_str(" - will randomize all specs");
        }
        self.out.emit_block(&seed);
        self.out.emit("\n");

        self.out.emit_block(&format!(
            "Will run {BOLD}{}{RESET} of {BOLD}{}{RESET} specs",
            report.pre_run_stats.specs_that_will_run, report.pre_run_stats.total_specs
        ));
        if report.parallel_total > 1 {
            self.out.emit_block(&format!(
                "Running in parallel across {BOLD}{}{RESET} processes",
                report.parallel_total
            ));
        }
    }

    pub(super) fn render_suite_did_end(&mut self, report: &SuiteReport) {
        let failures: Vec<&SpecReport> = report
            .spec_reports
            .iter()
            .filter(|r| r.state.is_failure())
            .collect();

        if !failures.is_empty() {
            self.out.emit_block("\n\n");
            let noun = if failures.len() == 1 { "Failure" } else { "Failures" };
            self.out.emit_block(&format!(
                "{RED}{BOLD}Summarizing {} {noun}:{RESET}",
                failures.len()
            ));
            for failure in failures {
                let (color, tag) = failure_tag(failure.state);
                let location =
                    Hierarchy::for_spec(failure).render(HierarchyMode::Succinct, color, true);
                self.out
                    .emit_block(&indent(1, &format!("{color}{tag}{RESET} {location}")));
            }
        }

        if self.conf.verbosity == Verbosity::Succinct && report.suite_succeeded {
            self.out.emit(&format!(
                " {GREEN}SUCCESS!{RESET} {} ",
                go_duration(report.run_time)
            ));
            return;
        }

        let counts = SuiteCounts::tally(&report.spec_reports);
        self.out.emit_block("\n");
        let color = if report.suite_succeeded {
            format!("{GREEN}{BOLD}")
        } else {
            format!("{RED}{BOLD}")
        };
        self.out.emit_block(&format!(
            "{color}Ran {} of {} Specs in {:.3} seconds{RESET}",
            counts.ran(),
            report.pre_run_stats.total_specs,
            report.run_time.as_secs_f64()
        ));

        let status = if report.suite_succeeded { "SUCCESS!" } else { "FAIL!" };
        match report.special_suite_failure_reasons.as_slice() {
            [] => self.out.emit(&format!("{color}{status}{RESET} -- ")),
            [reason] => self
                .out
                .emit(&format!("{color}{status} - {reason}{RESET} -- ")),
            reasons => self.out.emit_block(&format!(
                "{color}{status} - {}{RESET}\n",
                reasons.join(", ")
            )),
        }

        let setup_failed = report
            .spec_reports
            .iter()
            .any(|r| r.leaf_node_type.is_before_suite() && r.state.is_failure());
        if counts.ran() == 0 && counts.pending == 0 && counts.skipped == 0 && setup_failed {
            self.out.emit(&format!(
                "{CYAN}{BOLD}A BeforeSuite node failed so all tests were skipped.{RESET}\n"
            ));
            return;
        }

        let mut breakdown = format!(
            "{GREEN}{BOLD}{} Passed{RESET} | {RED}{BOLD}{} Failed{RESET} | ",
            counts.passed + counts.flaked,
            counts.failed
        );
        if counts.flaked > 0 {
            breakdown.push_str(&format!(
                "{LIGHT_YELLOW}{BOLD}{} Flaked{RESET} | ",
                counts.flaked
            ));
        }
        breakdown.push_str(&format!(
            "{YELLOW}{BOLD}{} Pending{RESET} | {CYAN}{BOLD}{} Skipped{RESET}\n",
            counts.pending, counts.skipped
        ));
        self.out.emit(&breakdown);
    }
}
