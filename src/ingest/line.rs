//! Line classifier for benchmark logs.
//!
//! The benchmarked binaries print a handful of fixed line shapes. Each raw
//! line maps to exactly one [`LineKind`]; anything unrecognised is
//! [`LineKind::Ignored`] rather than an error, since the logs also carry the
//! binaries' own chatter (query results, warnings, progress).

const MARKER: &str = "Running case=";
const LOAD_TIME: &str = "Load Time:";
const QUERY_TIME: &str = "Query Time:";
const EXEC_TIME: &str = "[ExecTime]";
const ELAPSED_TIME: &str = "Elapsed time:";

/// Whether a sample may need pairing with a duration from the same trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    Load,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Running case=<system> query=<query>`
    Marker { system: &'a str, query: &'a str },
    /// `Load Time: <n>ms`
    LoadTime(u64),
    /// `Query Time: <n>ms`
    QueryTime(u64),
    /// `[ExecTime] <n>`
    ExecTime(u64),
    /// `Elapsed time: <n> ms`
    ElapsedTime(u64),
    Ignored,
}

impl LineKind<'_> {
    /// The timing sample carried by this line, if any.
    pub fn sample(&self) -> Option<(SampleKind, u64)> {
        match *self {
            LineKind::LoadTime(ms) => Some((SampleKind::Load, ms)),
            LineKind::QueryTime(ms) | LineKind::ExecTime(ms) | LineKind::ElapsedTime(ms) => {
                Some((SampleKind::Duration, ms))
            }
            LineKind::Marker { .. } | LineKind::Ignored => None,
        }
    }
}

/// Classify one raw log line.
///
/// Prefixes are matched at column 0. Trailing whitespace (including a `\r`
/// left over from CRLF logs) is ignored. A line that starts with a known
/// prefix but carries no usable value is an error: it was meant to be a
/// sample, and dropping it would skew the trial pairing.
pub fn classify(line: &str) -> Result<LineKind<'_>, &'static str> {
    let line = line.trim_end();

    if let Some(rest) = line.strip_prefix(MARKER) {
        return parse_marker(rest);
    }
    if let Some(rest) = line.strip_prefix(LOAD_TIME) {
        return millis_before_unit(rest).map(LineKind::LoadTime);
    }
    if let Some(rest) = line.strip_prefix(QUERY_TIME) {
        return millis_before_unit(rest).map(LineKind::QueryTime);
    }
    if let Some(rest) = line.strip_prefix(EXEC_TIME) {
        return parse_millis(rest).map(LineKind::ExecTime);
    }
    if let Some(rest) = line.strip_prefix(ELAPSED_TIME) {
        return millis_before_unit(rest).map(LineKind::ElapsedTime);
    }
    Ok(LineKind::Ignored)
}

fn parse_marker(rest: &str) -> Result<LineKind<'_>, &'static str> {
    let (system, rest) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if system.is_empty() {
        return Err("run marker has an empty `case=` value");
    }
    if system.contains('=') {
        return Err("run marker `case=` value contains `=`");
    }
    let Some(rest) = rest.trim_start().strip_prefix("query=") else {
        return Err("run marker is missing `query=`");
    };
    let query = rest.split_whitespace().next().unwrap_or("");
    if query.is_empty() {
        return Err("run marker has an empty `query=` value");
    }
    Ok(LineKind::Marker { system, query })
}

/// `" 651ms"`, `" 15018 ms"`, `" 12ms (cold)"` → milliseconds.
fn millis_before_unit(rest: &str) -> Result<u64, &'static str> {
    let Some((value, _)) = rest.split_once("ms") else {
        return Err("timing line is missing its `ms` unit");
    };
    parse_millis(value)
}

fn parse_millis(value: &str) -> Result<u64, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("timing line has no value");
    }
    value
        .parse()
        .map_err(|_| "timing value is not a non-negative integer")
}
