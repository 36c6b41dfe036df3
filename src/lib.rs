pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod input;
pub mod labels;
pub mod pivot;
pub mod report;

pub use error::{Error, Result};

use ingest::Ingestor;
use input::LogSource;
use labels::Labels;
use pivot::{Pivot, SystemOrder};

/// Ingest every source in order, aggregate the runs, and pivot the results.
///
/// Sources share one key space: a `(system, query)` pair may appear in only
/// one of them. Inputs without a single run marker are an error rather than an
/// empty report.
pub fn summarize(sources: &[LogSource], order: &SystemOrder, labels: &Labels) -> Result<Pivot> {
    let runs = sources
        .iter()
        .try_fold(Ingestor::new(), |state, src| state.feed(&src.name, &src.text))?
        .finish();
    tracing::debug!(runs = runs.len(), "ingestion complete");
    if runs.is_empty() {
        return Err(Error::NoRuns {
            sources: sources.iter().map(|s| s.name.clone()).collect(),
        });
    }
    let records = aggregate::aggregate(&runs)?;
    pivot::pivot(&records, order, labels)
}
