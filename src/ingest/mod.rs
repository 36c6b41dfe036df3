//! Log ingestion: classified lines folded into committed runs.
//!
//! [`Ingestor`] is the fold accumulator. Each [`Ingestor::step`] consumes it
//! and hands back the next state, so there is no partially-updated run state
//! outside the value itself. The open run is committed when the next marker
//! arrives and again at the end of every source ([`Ingestor::feed`]).

pub mod line;

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use line::{LineKind, SampleKind, classify};

/// Identity of a run: the benchmarked system and the query it ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RunKey {
    pub system: String,
    pub query: String,
}

impl RunKey {
    pub fn new(system: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            query: query.into(),
        }
    }
}

/// All samples recorded between one marker and the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub key: RunKey,
    /// `Load Time` samples, in trial order.
    pub load: Vec<u64>,
    /// `Query Time` / `[ExecTime]` / `Elapsed time` samples, in trial order.
    pub duration: Vec<u64>,
    pub source_name: String,
    pub line_no: usize,
    /// Interleaving of the two sample streams as it appeared in the log.
    order: Vec<SampleKind>,
}

/// One timing sample, attributed to its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event<'a> {
    pub system: &'a str,
    pub query: &'a str,
    pub millis: u64,
    pub kind: SampleKind,
}

impl Run {
    fn open(system: &str, query: &str, source_name: &str, line_no: usize) -> Self {
        Self {
            key: RunKey::new(system, query),
            load: Vec::new(),
            duration: Vec::new(),
            source_name: source_name.to_string(),
            line_no,
            order: Vec::new(),
        }
    }

    fn record(mut self, kind: SampleKind, millis: u64) -> Self {
        match kind {
            SampleKind::Load => self.load.push(millis),
            SampleKind::Duration => self.duration.push(millis),
        }
        self.order.push(kind);
        self
    }

    /// The run's samples as flat events, in log order.
    pub fn events(&self) -> impl Iterator<Item = Event<'_>> + '_ {
        let mut load = self.load.iter();
        let mut duration = self.duration.iter();
        self.order.iter().filter_map(move |&kind| {
            let millis = match kind {
                SampleKind::Load => load.next(),
                SampleKind::Duration => duration.next(),
            }?;
            Some(Event {
                system: &self.key.system,
                query: &self.key.query,
                millis: *millis,
                kind,
            })
        })
    }
}

/// Fold state over the lines of one or more logs.
#[derive(Debug, Default)]
pub struct Ingestor {
    committed: Vec<Run>,
    open: Option<Run>,
    seen: HashSet<RunKey>,
}

impl Ingestor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the fold by one raw line.
    pub fn step(mut self, source_name: &str, line_no: usize, raw: &str) -> Result<Self> {
        let malformed = |reason| Error::MalformedLog {
            source_name: source_name.to_string(),
            line_no,
            line: raw.to_string(),
            reason,
        };
        let kind = classify(raw).map_err(malformed)?;

        match kind {
            LineKind::Marker { system, query } => {
                let key = RunKey::new(system, query);
                if self.seen.contains(&key) {
                    return Err(Error::DuplicateRunKey {
                        system: key.system,
                        query: key.query,
                        source_name: source_name.to_string(),
                        line_no,
                    });
                }
                tracing::trace!(system, query, line_no, "run marker");
                self.seen.insert(key);
                let next = Run::open(system, query, source_name, line_no);
                Ok(self.commit_open().with_open(next))
            }
            LineKind::Ignored => Ok(self),
            timing => {
                let Some((sample_kind, millis)) = timing.sample() else {
                    return Ok(self);
                };
                let Some(run) = self.open.take() else {
                    return Err(malformed("timing line before any `Running case=` marker"));
                };
                Ok(self.with_open(run.record(sample_kind, millis)))
            }
        }
    }

    /// Fold every line of `text`, then flush the open run.
    ///
    /// Runs never span sources: the end of `text` commits whatever was
    /// accumulated, exactly like a clean end of input.
    pub fn feed(self, source_name: &str, text: &str) -> Result<Self> {
        let state = text
            .lines()
            .enumerate()
            .try_fold(self, |state, (i, line)| state.step(source_name, i + 1, line))?;
        tracing::debug!(
            source = source_name,
            runs = state.committed.len() + usize::from(state.open.is_some()),
            "ingested log"
        );
        Ok(state.commit_open())
    }

    /// Committed runs in the order their markers appeared.
    pub fn finish(self) -> Vec<Run> {
        self.commit_open().committed
    }

    fn commit_open(mut self) -> Self {
        if let Some(run) = self.open.take() {
            self.committed.push(run);
        }
        self
    }

    fn with_open(mut self, run: Run) -> Self {
        self.open = Some(run);
        self
    }
}

/// Ingest a single in-memory log.
pub fn parse_log(source_name: &str, text: &str) -> Result<Vec<Run>> {
    Ok(Ingestor::new().feed(source_name, text)?.finish())
}
