#![allow(missing_docs)]

use std::process::Command;
use std::time::Duration;

use tempfile::TempDir;

use spec_reporter::events::{replay, EventLog, ReporterEvent};
use spec_reporter::reporter::{DefaultReporter, NoSources, Reporter};
use spec_reporter::types::{PreRunStats, ReportEntry, ReportEntryVisibility};
use spec_reporter::{
    CodeLocation, ColorMode, Container, Failure, FailureNodeContext, Formatter, NodeType,
    ReporterConfig, SpecReport, SpecState, SuiteReport, Verbosity,
};

const DELIMITER: &str = "{{gray}}------------------------------{{/}}";

fn location(file: &str, line: u32) -> CodeLocation {
    CodeLocation::new(file, line).with_stack_trace(format!("trace for {file}:{line}"))
}

fn suite(succeeded: bool, spec_reports: Vec<SpecReport>) -> SuiteReport {
    SuiteReport {
        suite_description: "Calculator Suite".into(),
        suite_path: "/src/calculator".into(),
        random_seed: 1_700_000_000,
        parallel_total: 1,
        pre_run_stats: PreRunStats {
            total_specs: 3,
            specs_that_will_run: 3,
        },
        suite_succeeded: succeeded,
        run_time: Duration::from_millis(2500),
        spec_reports,
        ..SuiteReport::default()
    }
}

fn passing(text: &str, line: u32) -> SpecReport {
    SpecReport {
        containers: vec![Container::new("Calculator", location("calc_test.go", 10))],
        leaf_node_text: text.into(),
        leaf_node_location: location("calc_test.go", line),
        run_time: Duration::from_millis(10),
        ..SpecReport::default()
    }
}

fn failing() -> SpecReport {
    SpecReport {
        state: SpecState::Failed,
        failure: Some(Failure {
            message: "Expected 4 to equal 5".into(),
            location: location("calc_test.go", 31),
            failure_node_context: FailureNodeContext::IsLeafNode,
            failure_node_type: NodeType::It,
            failure_node_location: location("calc_test.go", 30),
            ..Failure::default()
        }),
        captured_writer_output: "adding 2 and 2\n".into(),
        report_entries: vec![ReportEntry {
            name: "operands".into(),
            location: location("calc_test.go", 32),
            time: chrono::DateTime::parse_from_rfc3339("2026-03-04T05:06:07.800Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
            visibility: ReportEntryVisibility::FailureOrVerbose,
            value: Some("2, 2".into()),
        }],
        ..passing("adds", 30)
    }
}

fn lifecycle(specs: &[SpecReport], end: &SuiteReport) -> Vec<ReporterEvent> {
    let mut events = vec![ReporterEvent::SuiteWillBegin(end.clone())];
    for spec in specs {
        events.push(ReporterEvent::WillRun(spec.clone()));
        events.push(ReporterEvent::DidRun(spec.clone()));
    }
    events.push(ReporterEvent::SuiteDidEnd(end.clone()));
    events
}

fn render(verbosity: Verbosity, events: &[ReporterEvent]) -> String {
    let mut reporter = DefaultReporter::with_formatter(
        ReporterConfig::with_verbosity(verbosity),
        Vec::new(),
        Formatter::new(ColorMode::Passthrough),
    )
    .with_source_lookup(NoSources);
    replay(events, &mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn test_failing_run_at_normal_verbosity() {
    let specs = vec![passing("subtracts", 20), failing(), passing("multiplies", 40)];
    let end = suite(false, specs.clone());

    let out = render(Verbosity::Normal, &lifecycle(&specs, &end));

    let expected = [
        "Running Suite: Calculator Suite - /src/calculator",
        "=================================================",
        "Random Seed: {{bold}}1700000000{{/}}",
        "",
        "Will run {{bold}}3{{/}} of {{bold}}3{{/}} specs",
        "{{green}}•{{/}}",
        DELIMITER,
        "{{red}}• [FAILED] [0.010 seconds]{{/}}",
        "Calculator",
        "{{gray}}calc_test.go:10{{/}}",
        "  {{red}}{{bold}}[It] adds{{/}}",
        "  {{gray}}calc_test.go:30{{/}}",
        "",
        "  {{gray}}Begin Captured GinkgoWriter Output >>{{/}}",
        "    adding 2 and 2",
        "  {{gray}}<< End Captured GinkgoWriter Output{{/}}",
        "",
        "  {{gray}}Begin Report Entries >>{{/}}",
        "    {{bold}}operands{{gray}} - calc_test.go:32 @ 03/04/26 05:06:07.8{{/}}",
        "      2, 2",
        "  {{gray}}<< End Report Entries{{/}}",
        "",
        "  {{red}}Expected 4 to equal 5{{/}}",
        "  {{red}}In {{bold}}[It]{{/}}{{red}} at: {{bold}}calc_test.go:31{{/}}",
        DELIMITER,
        "{{green}}•{{/}}",
        "",
        "",
        "{{red}}{{bold}}Summarizing 1 Failure:{{/}}",
        "  {{red}}[FAIL]{{/}} {{/}}Calculator {{gray}}{{red}}{{bold}}[It] adds{{/}}{{/}}",
        "  {{gray}}calc_test.go:31{{/}}",
        "",
        "{{red}}{{bold}}Ran 3 of 3 Specs in 2.500 seconds{{/}}",
        "{{red}}{{bold}}FAIL!{{/}} -- {{green}}{{bold}}2 Passed{{/}} | {{red}}{{bold}}1 Failed{{/}} | {{yellow}}{{bold}}0 Pending{{/}} | {{cyan}}{{bold}}0 Skipped{{/}}",
        "",
    ]
    .join("\n");
    assert_eq!(out, expected);
    assert_eq!(out.matches("Summarizing").count(), 1);
}

#[test]
fn test_succinct_passing_run_fits_on_one_line() {
    let specs = vec![passing("subtracts", 20), passing("multiplies", 40)];
    let end = suite(true, specs.clone());

    let out = render(Verbosity::Succinct, &lifecycle(&specs, &end));

    assert_eq!(
        out,
        "[1700000000] {{bold}}Calculator Suite{{/}} - 3/3 specs \
         {{green}}•{{/}}{{green}}•{{/}} {{green}}SUCCESS!{{/}} 2.5s "
    );
}

#[test]
fn test_verbose_run_announces_each_spec() {
    let specs = vec![passing("subtracts", 20)];
    let end = suite(true, specs.clone());

    let out = render(Verbosity::Verbose, &lifecycle(&specs, &end));

    assert!(out.contains(&format!(
        "Will run {{{{bold}}}}3{{{{/}}}} of {{{{bold}}}}3{{{{/}}}} specs\n{DELIMITER}\n\
         {{{{/}}}}Calculator{{{{/}}}}\n  {{{{bold}}}}subtracts{{{{/}}}}\n  {{{{gray}}}}calc_test.go:20{{{{/}}}}\n\
         {{{{green}}}}•{{{{/}}}}\n"
    )));
}

#[test]
fn test_rendering_twice_is_identical() {
    let specs = vec![failing()];
    let events = lifecycle(&specs, &suite(false, specs.clone()));
    assert_eq!(render(Verbosity::Normal, &events), render(Verbosity::Normal, &events));
}

#[test]
fn test_event_log_roundtrip_then_replay() {
    let temp_dir = TempDir::new().unwrap();
    let log = EventLog::new(temp_dir.path().join("events.jsonl"));
    let specs = vec![passing("subtracts", 20), failing()];
    let events = lifecycle(&specs, &suite(false, specs.clone()));
    for event in &events {
        log.append(event).unwrap();
    }

    let loaded = log.read_all().unwrap();
    assert_eq!(loaded, events);
    assert_eq!(render(Verbosity::Normal, &loaded), render(Verbosity::Normal, &events));
}

#[test]
fn test_reporter_trait_object_usage() {
    fn drive(reporter: &mut impl Reporter, report: &SpecReport) {
        reporter.did_run(report);
    }

    let mut reporter = DefaultReporter::with_formatter(
        ReporterConfig::with_verbosity(Verbosity::Normal),
        Vec::new(),
        Formatter::new(ColorMode::Plain),
    );
    drive(&mut reporter, &passing("subtracts", 20));
    assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "•");
}

#[test]
fn test_binary_renders_plain_output_and_mirrors_suite_status() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.jsonl");
    let log = EventLog::new(&path);
    let specs = vec![passing("subtracts", 20), failing()];
    for event in lifecycle(&specs, &suite(false, specs.clone())) {
        log.append(&event).unwrap();
    }

    let output = Command::new(env!("CARGO_BIN_EXE_spec-reporter"))
        .arg(&path)
        .arg("--no-color")
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!output.status.success());
    assert!(stdout.starts_with("Running Suite: Calculator Suite - /src/calculator\n"));
    assert!(stdout.contains("• [FAILED] [0.010 seconds]\n"));
    assert!(stdout.contains("Summarizing 1 Failure:\n  [FAIL] Calculator [It] adds\n  calc_test.go:31\n"));
    assert!(stdout.ends_with("FAIL! -- 1 Passed | 1 Failed | 0 Pending | 0 Skipped\n"));
    assert!(!stdout.contains("{{"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_binary_rejects_conflicting_verbosity() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.jsonl");
    std::fs::write(&path, "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_spec-reporter"))
        .arg(&path)
        .args(["--succinct", "--very-verbose"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Conflicting verbosity flags"), "stderr: {stderr}");
}
