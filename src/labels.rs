//! Raw → display label mapping.
//!
//! The benchmarked binaries log short case names (`ours`, `jq`); charts and
//! tables want the names used in the paper. Unmapped labels pass through.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    systems: HashMap<String, String>,
    queries: HashMap<String, String>,
}

impl Labels {
    /// No renaming at all.
    pub fn identity() -> Self {
        Self::default()
    }

    /// The names used by the published JSON benchmark plots.
    pub fn builtin() -> Self {
        let mut labels = Self::default();
        for (raw, display) in [("jq", "JQ"), ("rumble", "Rumble"), ("ours", "Rhyme (ours)")] {
            labels = labels.with_system(raw, display);
        }
        for (raw, display) in [("q1", "Q1"), ("q2", "Q2"), ("q3", "Q3")] {
            labels = labels.with_query(raw, display);
        }
        labels
    }

    pub fn with_system(mut self, raw: impl Into<String>, display: impl Into<String>) -> Self {
        self.systems.insert(raw.into(), display.into());
        self
    }

    pub fn with_query(mut self, raw: impl Into<String>, display: impl Into<String>) -> Self {
        self.queries.insert(raw.into(), display.into());
        self
    }

    pub fn system<'a>(&'a self, raw: &'a str) -> &'a str {
        self.systems.get(raw).map_or(raw, String::as_str)
    }

    pub fn query<'a>(&'a self, raw: &'a str) -> &'a str {
        self.queries.get(raw).map_or(raw, String::as_str)
    }
}

/// Parse a `RAW=DISPLAY` pair as given on the command line.
pub fn parse_mapping(s: &str) -> Result<(String, String), String> {
    let (raw, display) = s
        .split_once('=')
        .ok_or_else(|| format!("expected RAW=DISPLAY, got {s:?}"))?;
    let (raw, display) = (raw.trim(), display.trim());
    if raw.is_empty() || display.is_empty() {
        return Err(format!("expected RAW=DISPLAY with both sides non-empty, got {s:?}"));
    }
    Ok((raw.to_string(), display.to_string()))
}
