/// End-to-end tests: run the `benchlog` binary on logs and check the report
/// and exit status.
mod common;

use common::{PAPER_LOG, run, run_err, run_ok, write_log};

const PAPER_ORDER: &str = "--order=JQ,Rumble,Rhyme (ours)";

#[test]
fn stdin_text_report() {
    let out = run_ok(&["-", PAPER_ORDER], PAPER_LOG.as_bytes());
    assert!(out.contains("Mean (ms)"), "{out}");
    let q1 = out
        .lines()
        .skip_while(|l| !l.starts_with("Mean"))
        .find(|l| l.starts_with("Q1"))
        .unwrap();
    let cells: Vec<&str> = q1.split_whitespace().collect();
    assert_eq!(cells, ["Q1", "4100.0", "2100.0", "1000.0"]);
}

#[test]
fn file_argument_markdown_in_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "bench.log", PAPER_LOG);
    let out = run_ok(
        &[
            log.to_str().unwrap(),
            PAPER_ORDER,
            "--format",
            "markdown",
            "--unit",
            "s",
        ],
        b"",
    );
    assert!(out.starts_with("# Benchmark Results"), "{out}");
    assert!(out.contains("| Query | JQ | Rumble | Rhyme (ours) |"), "{out}");
    assert!(
        out.contains("| Q1 | 4.100 ± 0.100 | 2.100 ± 0.100 | 1.000 ± 0.000 |"),
        "{out}"
    );
    assert!(
        out.contains("| Q2 | 1.000 ± 0.100 | 3.000 ± 0.000 | 0.250 ± 0.000 |"),
        "{out}"
    );
}

#[test]
fn json_report_for_chart_renderer() {
    let out = run_ok(&["-", PAPER_ORDER, "--format", "json"], PAPER_LOG.as_bytes());
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["systems"], serde_json::json!(["JQ", "Rumble", "Rhyme (ours)"]));
    assert_eq!(v["mean"]["rows"]["Q2"], serde_json::json!([1000.0, 3000.0, 250.0]));
    assert_eq!(v["stddev"]["rows"]["Q1"], serde_json::json!([100.0, 100.0, 0.0]));
    let records = v["records"].as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["system"], "JQ");
    assert_eq!(records[0]["query"], "Q1");
    assert_eq!(records[0]["mean"], 4100.0);
}

#[test]
fn baseline_speedups() {
    let out = run_ok(
        &["-", PAPER_ORDER, "--format", "markdown", "--baseline", "JQ"],
        PAPER_LOG.as_bytes(),
    );
    assert!(out.contains("Rhyme (ours) vs JQ"), "{out}");
    assert!(out.contains("### Summary (times faster than JQ)"), "{out}");
}

#[test]
fn output_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("report.md");
    let stdout = run_ok(
        &["-", "--format", "markdown", "-o", target.to_str().unwrap()],
        PAPER_LOG.as_bytes(),
    );
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("### Runs"), "{written}");
}

#[test]
fn glob_over_split_logs() {
    let dir = tempfile::tempdir().unwrap();
    write_log(dir.path(), "a.log", "Running case=jq query=q1\n[ExecTime] 10\n");
    write_log(dir.path(), "b.log", "Running case=ours query=q1\n[ExecTime] 5\n");
    let pattern = dir.path().join("*.log");
    let out = run_ok(&[pattern.to_str().unwrap(), "--format", "json"], b"");
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["systems"], serde_json::json!(["JQ", "Rhyme (ours)"]));
}

#[test]
fn raw_labels_and_custom_mappings() {
    let out = run_ok(
        &[
            "-",
            "--raw-labels",
            "--system-label",
            "ours=Rhyme",
            "--query-label",
            "q1=Query 1",
            "--order",
            "jq,Rhyme",
            "--format",
            "json",
        ],
        b"Running case=ours query=q1\n[ExecTime] 5\nRunning case=jq query=q1\n[ExecTime] 10\n",
    );
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["systems"], serde_json::json!(["jq", "Rhyme"]));
    assert_eq!(v["queries"], serde_json::json!(["Query 1"]));
}

#[test]
fn order_from_environment() {
    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_benchlog"))
        .args(["-", "--format", "json"])
        .env("BENCHLOG_ORDER", "Rhyme (ours),JQ")
        .env_remove("RUST_LOG")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .unwrap();
    {
        use std::io::Write;
        child
            .stdin
            .take()
            .unwrap()
            .write_all(PAPER_LOG.as_bytes())
            .unwrap();
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["systems"], serde_json::json!(["Rhyme (ours)", "JQ"]));
}

// ---------------------------------------------------------------------------
// Failures: non-zero exit, invariant and identifiers on stderr
// ---------------------------------------------------------------------------

#[test]
fn duplicate_run_key_fails() {
    let err = run_err(
        &["-"],
        b"Running case=ours query=q1\nLoad Time: 10ms\nQuery Time: 20ms\nRunning case=ours query=q1\n",
    );
    assert!(err.contains("duplicate run key"), "{err}");
    assert!(err.contains("case=ours query=q1"), "{err}");
    assert!(err.contains("-:4"), "{err}");
}

#[test]
fn timing_before_marker_fails() {
    let err = run_err(&["-"], b"[ExecTime] 5\n");
    assert!(err.contains("malformed log at -:1"), "{err}");
    assert!(err.contains("[ExecTime] 5"), "{err}");
}

#[test]
fn length_mismatch_fails() {
    let err = run_err(
        &["-"],
        b"Running case=ours query=q3\nLoad Time: 10ms\nLoad Time: 11ms\nQuery Time: 20ms\n",
    );
    assert!(err.contains("length mismatch"), "{err}");
    assert!(err.contains("case=ours query=q3"), "{err}");
}

#[test]
fn empty_run_fails() {
    let err = run_err(&["-"], b"Running case=jq query=q2\nno timings here\n");
    assert!(err.contains("empty run case=jq query=q2"), "{err}");
}

#[test]
fn overflowing_trial_fails() {
    let err = run_err(
        &["-"],
        b"Running case=ours query=q4\nLoad Time: 18446744073709551615ms\nQuery Time: 1ms\n",
    );
    assert!(err.contains("trial total overflows"), "{err}");
    assert!(err.contains("case=ours query=q4"), "{err}");
}

#[test]
fn label_collision_fails() {
    let err = run_err(
        &[
            "-",
            "--raw-labels",
            "--system-label",
            "ours=R",
            "--system-label",
            "rhyme=R",
        ],
        b"Running case=ours query=q1\n[ExecTime] 5\nRunning case=rhyme query=q1\n[ExecTime] 6\n",
    );
    assert!(err.contains("label collision"), "{err}");
    assert!(err.contains("system=\"R\" query=\"q1\""), "{err}");
}

#[test]
fn log_without_markers_fails() {
    let err = run_err(&["-"], b"nothing here\n");
    assert!(err.contains("no benchmark runs found in -"), "{err}");
}

#[test]
fn unknown_system_fails() {
    let err = run_err(&["-", "--order", "JQ,Rumble,jaq"], PAPER_LOG.as_bytes());
    assert!(err.contains("unknown system \"jaq\""), "{err}");
}

#[test]
fn unknown_baseline_fails() {
    let err = run_err(&["-", "--baseline", "gojq"], PAPER_LOG.as_bytes());
    assert!(err.contains("unknown system \"gojq\""), "{err}");
}

#[test]
fn missing_file_fails() {
    let err = run_err(&["/nonexistent/bench.log"], b"");
    assert!(err.contains("/nonexistent/bench.log"), "{err}");
}

#[test]
fn no_arguments_is_a_usage_error() {
    let output = run(&[], b"");
    assert_eq!(output.status.code(), Some(2));
}
