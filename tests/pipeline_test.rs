use std::fs;
use std::path::Path;

use joblog_monitor::core::config::MonitorConfig;
use joblog_monitor::core::error::{MonitorError, ParseErrorReason};
use joblog_monitor::core::job::JobStatus;
use joblog_monitor::core::matcher::AnomalyKind;
use joblog_monitor::core::parser::read_rows;
use joblog_monitor::core::{analyze, run, RunPaths};

const SAMPLE: &str = "\
00:00:00,nightly backup,START,J1
00:00:00,index rebuild,START,J2
00:04:59,nightly backup,END,J1
00:10:00,index rebuild,END,J2
";

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("jobs.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn paths(dir: &Path, input: std::path::PathBuf) -> RunPaths {
    RunPaths {
        input,
        report: dir.join("out/report.csv"),
        anomalies: Some(dir.join("out/anomalies.csv")),
    }
}

#[test]
fn classifies_the_reference_example() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), SAMPLE);
    let paths = paths(dir.path(), input);

    let summary = run(&paths, &MonitorConfig::default()).unwrap();

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.error, 1);
    assert!(summary.is_clean());

    let report = fs::read_to_string(&paths.report).unwrap();
    assert_eq!(
        report,
        "job_id,job_name,start_timestamp,end_timestamp,runtime_seconds,status\n\
         J1,nightly backup,00:00:00,00:04:59,299,OK\n\
         J2,index rebuild,00:00:00,00:10:00,600,ERROR\n"
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "00:00:00,a,START,J1\n00:00:01,b,START,J2\n00:06:00.5,a,END,J1\nbad,row\n00:00:02,c,START,J3\n",
    );
    let config = MonitorConfig::default();

    let first = RunPaths {
        input: input.clone(),
        report: dir.path().join("first.csv"),
        anomalies: Some(dir.path().join("first_anomalies.csv")),
    };
    let second = RunPaths {
        input,
        report: dir.path().join("second.csv"),
        anomalies: Some(dir.path().join("second_anomalies.csv")),
    };
    run(&first, &config).unwrap();
    run(&second, &config).unwrap();

    assert_eq!(
        fs::read(&first.report).unwrap(),
        fs::read(&second.report).unwrap()
    );
    assert_eq!(
        fs::read(first.anomalies.as_ref().unwrap()).unwrap(),
        fs::read(second.anomalies.as_ref().unwrap()).unwrap()
    );
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "00:00:00,a,START,J1\n99:99:99,a,END,J1\n00:01:00,a,FINISH,J1\n00:02:00,a,END,J1\n",
    );
    let paths = paths(dir.path(), input);

    let summary = run(&paths, &MonitorConfig::default()).unwrap();

    assert_eq!(summary.parse_errors, 2);
    assert_eq!(summary.jobs, 1);
    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("J1,a,00:00:00,00:02:00,120,OK"));
}

#[test]
fn anomalies_are_written_alongside_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "00:00:00,a,START,J1\n00:01:00,a,START,J1\n00:02:00,x,END,J9\n00:03:00,a,END,J1\n00:04:00,b,START,J2\n",
    );
    let paths = paths(dir.path(), input);

    let summary = run(&paths, &MonitorConfig::default()).unwrap();
    assert_eq!(summary.anomalies, 3);

    let anomalies = fs::read_to_string(paths.anomalies.as_ref().unwrap()).unwrap();
    assert_eq!(
        anomalies,
        "job_id,anomaly,lines,timestamps\n\
         J1,DuplicateStart,1;2,00:00:00;00:01:00\n\
         J9,UnmatchedEnd,3,00:02:00\n\
         J2,UnmatchedStart,5,00:04:00\n"
    );

    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("J1,a,00:00:00,00:03:00,180,OK"));
}

#[test]
fn flagged_only_reproduces_the_short_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), SAMPLE);
    let paths = paths(dir.path(), input);
    let config = MonitorConfig {
        include_ok: false,
        ..MonitorConfig::default()
    };

    let summary = run(&paths, &config).unwrap();
    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.reported, 1);

    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(!report.contains("J1"));
    assert!(report.contains("J2"));
}

#[test]
fn inverted_thresholds_fail_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), SAMPLE);
    let paths = paths(dir.path(), input);
    let config = MonitorConfig {
        warning_threshold_seconds: 600.0,
        error_threshold_seconds: 300.0,
        ..MonitorConfig::default()
    };

    let err = run(&paths, &config).unwrap_err();
    assert!(matches!(err, MonitorError::InvalidConfig { .. }));
    assert!(!paths.report.exists());
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths(dir.path(), dir.path().join("nope.csv"));

    let err = run(&paths, &MonitorConfig::default()).unwrap_err();
    assert!(matches!(err, MonitorError::ReadInput { .. }));
    assert!(!paths.report.exists());
}

#[test]
fn header_row_and_full_datetimes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "timestamp,job,event,pid\n\
         2024-03-01T23:58:00.125,rollup,START,7\n\
         2024-03-02T00:03:00.25,rollup,END,7\n",
    );
    let paths = paths(dir.path(), input);
    let config = MonitorConfig {
        has_header: true,
        ..MonitorConfig::default()
    };

    run(&paths, &config).unwrap();

    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(report.ends_with("7,rollup,2024-03-01T23:58:00.125,2024-03-02T00:03:00.25,300.125,WARNING\n"));
}

#[test]
fn analyze_reports_negative_runtime_without_dropping_the_job() {
    let rows = read_rows("23:59:00,late,START,J1\n00:01:00,late,END,J1\n".as_bytes(), false).unwrap();
    let analysis = analyze(&rows, &MonitorConfig::default());

    assert_eq!(analysis.jobs.len(), 1);
    assert_eq!(analysis.jobs[0].status, Some(JobStatus::Ok));
    assert_eq!(analysis.anomalies.len(), 1);
    assert_eq!(analysis.anomalies[0].kind, AnomalyKind::NegativeRuntime);
    assert_eq!(analysis.report.rows()[0].runtime_seconds, "-86280");
}

#[test]
fn analyze_runtime_matches_timestamp_difference() {
    let rows = read_rows(
        "00:00:00.1,a,START,A\n00:00:00.35,a,END,A\n01:00:00,b,START,B\n03:30:15,b,END,B\n".as_bytes(),
        false,
    )
    .unwrap();
    let analysis = analyze(&rows, &MonitorConfig::default());

    for job in &analysis.jobs {
        assert_eq!(job.runtime, job.end.instant() - job.start.instant());
    }
    assert_eq!(analysis.report.rows()[0].runtime_seconds, "0.25");
    assert_eq!(analysis.report.rows()[1].runtime_seconds, "9015");
    assert_eq!(analysis.report.rows()[1].status, JobStatus::Error);
}

#[test]
fn analyze_collects_parse_errors_in_order() {
    let rows = read_rows("oops,a,START,J1\n00:00:00,a,START,\n".as_bytes(), false).unwrap();
    let analysis = analyze(&rows, &MonitorConfig::default());

    let reasons: Vec<_> = analysis.parse_errors.iter().map(|e| e.reason.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            ParseErrorReason::InvalidTimestamp("oops".to_string()),
            ParseErrorReason::EmptyJobId,
        ]
    );
    assert!(analysis.jobs.is_empty());
}

#[test]
fn stray_quote_does_not_swallow_later_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "00:00:00,\"nightly,START,J1\n\
         00:00:00,index,START,J2\n\
         \n\
         00:10:00,index,END,J2\n\
         00:01:00,vacuum,START,J3\n\
         00:08:00,vacuum,END,J3\n\
         oops\n",
    );
    let paths = paths(dir.path(), input);

    let summary = run(&paths, &MonitorConfig::default()).unwrap();
    assert_eq!(summary.rows, 6);
    assert_eq!(summary.jobs, 2);
    assert_eq!(summary.error, 1);
    assert_eq!(summary.warning, 1);
    assert!(!summary.is_clean());

    let report = fs::read_to_string(&paths.report).unwrap();
    assert!(report.contains("J2,index,00:00:00,00:10:00,600,ERROR"));
    assert!(report.contains("J3,vacuum,00:01:00,00:08:00,420,WARNING"));

    let anomalies = fs::read_to_string(paths.anomalies.as_ref().unwrap()).unwrap();
    assert!(anomalies.contains("J1,UnmatchedStart,1,00:00:00"));
}

#[test]
fn parse_errors_point_at_physical_lines() {
    let rows = read_rows("x,y,z,w\n\n\n# note\n".as_bytes(), false).unwrap();
    let analysis = analyze(&rows, &MonitorConfig::default());

    let lines: Vec<u64> = analysis.parse_errors.iter().map(|e| e.row_index).collect();
    assert_eq!(lines, vec![1, 4]);
}
