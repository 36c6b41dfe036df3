/// Shared helpers for the end-to-end tests: run the `benchlog` binary and
/// write throwaway log files.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// A three-system, three-query log in the same shape the benchmark scripts
/// capture: markers, interleaved samples, and result chatter in between.
pub const PAPER_LOG: &str = "\
Running case=jq query=q1
{\"key1\": \"A\", \"total\": 5012}
[ExecTime] 4000
[ExecTime] 4200
Running case=rumble query=q1
Elapsed time: 2000 ms
Elapsed time: 2200 ms
Running case=ours query=q1
Load Time: 600ms
Query Time: 400ms
Load Time: 600ms
Query Time: 400ms
Running case=jq query=q2
[ExecTime] 900
[ExecTime] 1100
Running case=rumble query=q2
Elapsed time: 3000 ms
Elapsed time: 3000 ms
Running case=ours query=q2
Load Time: 100ms
Query Time: 150ms
Load Time: 100ms
Query Time: 150ms
";

/// Run benchlog with the given args and stdin bytes. Environment overrides
/// are cleared so results don't depend on the caller's shell.
pub fn run(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_benchlog"))
        .args(args)
        .env_remove("BENCHLOG_ORDER")
        .env_remove("BENCHLOG_UNIT")
        .env_remove("BENCHLOG_FORMAT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn benchlog");
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().expect("failed to wait on benchlog")
}

/// Run benchlog and require success; returns stdout.
pub fn run_ok(args: &[&str], input: &[u8]) -> String {
    let output = run(args, input);
    assert!(
        output.status.success(),
        "benchlog exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("benchlog output was not valid UTF-8")
}

/// Run benchlog and require failure; returns stderr.
pub fn run_err(args: &[&str], input: &[u8]) -> String {
    let output = run(args, input);
    assert!(
        !output.status.success(),
        "benchlog unexpectedly succeeded: stdout={}",
        String::from_utf8_lossy(&output.stdout)
    );
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn write_log(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
