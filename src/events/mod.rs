//! Recorded suite lifecycle events
//!
//! A run can be captured as a sequence of [`ReporterEvent`]s and replayed into
//! any [`Reporter`] later.

pub mod jsonl;

use serde::{Deserialize, Serialize};

use crate::reporter::Reporter;
use crate::types::{ProgressReport, SpecReport, SuiteReport};

pub use jsonl::EventLog;

/// One lifecycle event with its payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReporterEvent {
    /// The suite is about to run
    SuiteWillBegin(SuiteReport),
    /// A spec is about to run
    WillRun(SpecReport),
    /// A spec finished
    DidRun(SpecReport),
    /// The suite finished
    SuiteDidEnd(SuiteReport),
    /// A progress snapshot
    ProgressReport(ProgressReport),
}

impl ReporterEvent {
    /// Deliver this event to `reporter`
    pub fn dispatch(&self, reporter: &mut impl Reporter) {
        match self {
            Self::SuiteWillBegin(report) => reporter.suite_will_begin(report),
            Self::WillRun(report) => reporter.will_run(report),
            Self::DidRun(report) => reporter.did_run(report),
            Self::SuiteDidEnd(report) => reporter.suite_did_end(report),
            Self::ProgressReport(report) => reporter.emit_progress_report(report),
        }
    }
}

/// Replay `events` in order.
///
/// Returns the success flag of the last `SuiteDidEnd` event, if any.
pub fn replay(events: &[ReporterEvent], reporter: &mut impl Reporter) -> Option<bool> {
    let mut succeeded = None;
    for event in events {
        tracing::trace!(?event, "replaying event");
        if let ReporterEvent::SuiteDidEnd(report) = event {
            succeeded = Some(report.suite_succeeded);
        }
        event.dispatch(reporter);
    }
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spec;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Reporter for Recorder {
        fn suite_will_begin(&mut self, report: &SuiteReport) {
            self.calls.push(format!("begin:{}", report.suite_description));
        }
        fn will_run(&mut self, report: &SpecReport) {
            self.calls.push(format!("will:{}", report.leaf_node_text));
        }
        fn did_run(&mut self, report: &SpecReport) {
            self.calls.push(format!("did:{}", report.leaf_node_text));
        }
        fn suite_did_end(&mut self, report: &SuiteReport) {
            self.calls.push(format!("end:{}", report.suite_succeeded));
        }
        fn emit_progress_report(&mut self, report: &ProgressReport) {
            self.calls.push(format!("progress:{}", report.leaf_node_text));
        }
    }

    #[test]
    fn test_replay_dispatches_in_order() {
        let events = vec![
            ReporterEvent::SuiteWillBegin(SuiteReport {
                suite_description: "S".into(),
                ..SuiteReport::default()
            }),
            ReporterEvent::WillRun(spec("a", 0)),
            ReporterEvent::ProgressReport(ProgressReport {
                leaf_node_text: "a".into(),
                ..ProgressReport::default()
            }),
            ReporterEvent::DidRun(spec("a", 0)),
            ReporterEvent::SuiteDidEnd(SuiteReport::default()),
        ];
        let mut recorder = Recorder::default();

        let succeeded = replay(&events, &mut recorder);

        assert_eq!(succeeded, Some(false));
        assert_eq!(
            recorder.calls,
            vec!["begin:S", "will:a", "progress:a", "did:a", "end:false"]
        );
    }

    #[test]
    fn test_replay_without_end_event() {
        let mut recorder = Recorder::default();
        assert_eq!(replay(&[ReporterEvent::DidRun(spec("a", 0))], &mut recorder), None);
    }

    #[test]
    fn test_event_tagging() {
        let json = serde_json::to_string(&ReporterEvent::ProgressReport(ProgressReport::default()))
            .unwrap();
        assert!(json.starts_with(r#"{"event":"progress_report""#));
    }
}
