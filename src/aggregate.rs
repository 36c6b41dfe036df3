//! Per-run statistics.
//!
//! Standard deviation is the population form (divisor `n`), the same as
//! numpy's default, so a single-trial run has a stddev of 0 rather than NaN.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ingest::Run;

/// Summary of one run. All times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    pub system: String,
    pub query: String,
    pub trials: usize,
    pub mean: f64,
    pub stddev: f64,
    pub median: f64,
    pub min: u64,
    pub max: u64,
}

/// Per-trial totals for a run.
///
/// With load samples present, trial `i` is `load[i] + duration[i]`; the two
/// sequences must be the same length. Without them the durations are the
/// totals.
pub fn trial_totals(run: &Run) -> Result<Vec<u64>> {
    if run.load.is_empty() {
        return Ok(run.duration.clone());
    }
    if run.load.len() != run.duration.len() {
        return Err(Error::LengthMismatch {
            system: run.key.system.clone(),
            query: run.key.query.clone(),
            load: run.load.len(),
            duration: run.duration.len(),
        });
    }
    run.load
        .iter()
        .zip(&run.duration)
        .enumerate()
        .map(|(trial, (load, query))| {
            load.checked_add(*query).ok_or_else(|| Error::TrialOverflow {
                system: run.key.system.clone(),
                query: run.key.query.clone(),
                trial,
            })
        })
        .collect()
}

/// Summarise one run.
pub fn summarize(run: &Run) -> Result<AggregateRecord> {
    let totals = trial_totals(run)?;
    if totals.is_empty() {
        return Err(Error::EmptyRun {
            system: run.key.system.clone(),
            query: run.key.query.clone(),
        });
    }

    let n = totals.len() as f64;
    let mean = totals.iter().map(|&t| t as f64).sum::<f64>() / n;
    let variance = totals
        .iter()
        .map(|&t| {
            let d = t as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    let mut sorted = totals;
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    };

    Ok(AggregateRecord {
        system: run.key.system.clone(),
        query: run.key.query.clone(),
        trials: sorted.len(),
        mean,
        stddev: variance.sqrt(),
        median,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    })
}

/// One record per run, in run order.
pub fn aggregate(runs: &[Run]) -> Result<Vec<AggregateRecord>> {
    runs.iter().map(summarize).collect()
}
