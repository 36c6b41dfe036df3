//! Rendering of pivoted results: aligned text, markdown, or JSON.
//!
//! Tables are stored in milliseconds; the unit is applied here, to mean and
//! stddev alike. Flat records keep their raw millisecond values.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use crate::aggregate::AggregateRecord;
use crate::error::Error;
use crate::pivot::{Pivot, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
pub enum Unit {
    #[default]
    #[value(name = "ms")]
    #[serde(rename = "ms")]
    Millis,
    #[value(name = "s")]
    #[serde(rename = "s")]
    Seconds,
}

impl Unit {
    fn from_millis(self, ms: f64) -> f64 {
        match self {
            Unit::Millis => ms,
            Unit::Seconds => ms / 1000.0,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Unit::Millis => "ms",
            Unit::Seconds => "s",
        }
    }

    fn format(self, value: f64) -> String {
        match self {
            Unit::Millis => format!("{value:.1}"),
            Unit::Seconds => format!("{value:.3}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub unit: Unit,
    /// Add "vs <baseline>" speedup columns and a geometric-mean summary.
    pub baseline: Option<String>,
    /// Log sources, listed in the markdown header.
    pub sources: Vec<String>,
    pub generated_at: Option<jiff::Timestamp>,
}

/// How many times faster one system is than the baseline, per query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speedup {
    pub system: String,
    /// Aligned with the table's query rows.
    pub per_query: Vec<Option<f64>>,
    pub geomean: Option<f64>,
}

/// `baseline_mean / system_mean` for every non-baseline column.
pub fn speedups(mean: &Table, baseline: &str) -> crate::Result<Vec<Speedup>> {
    let Some(base_col) = mean.systems().iter().position(|s| s == baseline) else {
        return Err(Error::UnknownSystem {
            system: baseline.to_string(),
            available: mean.systems().to_vec(),
        });
    };
    Ok(mean
        .systems()
        .iter()
        .enumerate()
        .filter(|&(col, _)| col != base_col)
        .map(|(col, system)| {
            let pairs: Vec<Option<(f64, f64)>> = mean
                .rows()
                .map(|(_, cells)| match (cells[base_col], cells[col]) {
                    (Some(base), Some(t)) if base > 0.0 && t > 0.0 => Some((base, t)),
                    _ => None,
                })
                .collect();
            let valid: Vec<(f64, f64)> = pairs.iter().flatten().copied().collect();
            Speedup {
                system: system.clone(),
                per_query: pairs.iter().map(|p| p.map(|(b, t)| b / t)).collect(),
                geomean: geomean_ratio(&valid),
            }
        })
        .collect())
}

/// Geometric mean of baseline_time/tool_time ratios.
fn geomean_ratio(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }
    let sum_log: f64 = pairs.iter().map(|(base, t)| (base / t).ln()).sum();
    Some((sum_log / pairs.len() as f64).exp())
}

fn format_speedup(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.1}x")).unwrap_or_else(|| "-".to_string())
}

pub fn render(pivot: &Pivot, format: Format, opts: &ReportOptions) -> Result<String> {
    let speedups = match &opts.baseline {
        Some(baseline) => Some(speedups(&pivot.mean, baseline)?),
        None => None,
    };
    match format {
        Format::Text => render_text(pivot, speedups.as_deref(), opts),
        Format::Markdown => render_markdown(pivot, speedups.as_deref(), opts),
        Format::Json => render_json(pivot, speedups.as_deref(), opts),
    }
}

// --- Text ---

/// Columns padded to their widest cell; the first column is left-aligned.
fn aligned(header: &[String], rows: &[Vec<String>]) -> Result<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        let mut line = String::new();
        for (i, (cell, &w)) in row.iter().zip(&widths).enumerate() {
            if i == 0 {
                write!(line, "{cell:<w$}")?;
            } else {
                write!(line, "  {cell:>w$}")?;
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(out)
}

fn table_rows(table: &Table, unit: Unit) -> Vec<Vec<String>> {
    table
        .rows()
        .map(|(query, cells)| {
            std::iter::once(query.to_string())
                .chain(cells.iter().map(|c| match c {
                    Some(v) => unit.format(unit.from_millis(*v)),
                    None => "-".to_string(),
                }))
                .collect()
        })
        .collect()
}

fn record_rows(records: &[AggregateRecord], unit: Unit) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.system.clone(),
                r.query.clone(),
                r.trials.to_string(),
                unit.format(unit.from_millis(r.mean)),
                unit.format(unit.from_millis(r.stddev)),
            ]
        })
        .collect()
}

fn render_text(pivot: &Pivot, speedups: Option<&[Speedup]>, opts: &ReportOptions) -> Result<String> {
    let unit = opts.unit;
    let mut out = String::new();

    let header: Vec<String> = ["system", "query", "trials", "mean", "std"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    writeln!(out, "Runs ({})", unit.suffix())?;
    out.push_str(&aligned(&header, &record_rows(&pivot.records, unit))?);

    for (title, table) in [("Mean", &pivot.mean), ("Stddev", &pivot.stddev)] {
        let header: Vec<String> = std::iter::once("query".to_string())
            .chain(table.systems().iter().cloned())
            .collect();
        writeln!(out)?;
        writeln!(out, "{title} ({})", unit.suffix())?;
        out.push_str(&aligned(&header, &table_rows(table, unit))?);
    }

    if let (Some(speedups), Some(baseline)) = (speedups, &opts.baseline) {
        let header: Vec<String> = std::iter::once("query".to_string())
            .chain(speedups.iter().map(|s| s.system.clone()))
            .collect();
        let mut rows: Vec<Vec<String>> = pivot
            .mean
            .queries()
            .enumerate()
            .map(|(i, query)| {
                std::iter::once(query.to_string())
                    .chain(speedups.iter().map(|s| format_speedup(s.per_query[i])))
                    .collect()
            })
            .collect();
        rows.push(
            std::iter::once("geomean".to_string())
                .chain(speedups.iter().map(|s| format_speedup(s.geomean)))
                .collect(),
        );
        writeln!(out)?;
        writeln!(out, "Speedup vs {baseline}")?;
        out.push_str(&aligned(&header, &rows)?);
    }

    Ok(out)
}

// --- Markdown ---

fn render_markdown(
    pivot: &Pivot,
    speedups: Option<&[Speedup]>,
    opts: &ReportOptions,
) -> Result<String> {
    let unit = opts.unit;
    let mut md = String::new();
    writeln!(md, "# Benchmark Results")?;
    writeln!(md)?;
    if let Some(ts) = opts.generated_at {
        writeln!(md, "> Generated: {} by `benchlog`.", ts.strftime("%Y-%m-%dT%H:%M:%SZ"))?;
    }
    if !opts.sources.is_empty() {
        let sources: Vec<String> = opts.sources.iter().map(|s| format!("`{s}`")).collect();
        writeln!(md, "> Sources: {}", sources.join(", "))?;
    }
    writeln!(md)?;
    writeln!(
        md,
        "Mean ± population standard deviation over all trials, in {}.",
        unit.suffix()
    )?;
    writeln!(md)?;

    let speedups = speedups.unwrap_or_default();
    let mut header = String::from("| Query |");
    let mut separator = String::from("|-------|");
    for system in pivot.mean.systems() {
        write!(header, " {system} |")?;
        write!(separator, "------:|")?;
    }
    if let Some(baseline) = &opts.baseline {
        for s in speedups {
            write!(header, " {} vs {baseline} |", s.system)?;
            write!(separator, "------:|")?;
        }
    }
    writeln!(md, "{header}")?;
    writeln!(md, "{separator}")?;

    for (i, ((query, means), (_, stds))) in pivot.mean.rows().zip(pivot.stddev.rows()).enumerate() {
        let mut row = format!("| {query} |");
        for (mean, std) in means.iter().zip(stds) {
            match (mean, std) {
                (Some(m), Some(s)) => write!(
                    row,
                    " {} ± {} |",
                    unit.format(unit.from_millis(*m)),
                    unit.format(unit.from_millis(*s))
                )?,
                _ => row.push_str(" - |"),
            }
        }
        for s in speedups {
            write!(row, " {} |", format_speedup(s.per_query[i]))?;
        }
        writeln!(md, "{row}")?;
    }

    if let Some(baseline) = &opts.baseline {
        writeln!(md)?;
        writeln!(md, "### Summary (times faster than {baseline})")?;
        writeln!(md)?;
        let mut sum_header = String::from("|");
        let mut sum_sep = String::from("|");
        let mut sum_row = String::from("|");
        for s in speedups {
            write!(sum_header, " {} |", s.system)?;
            write!(sum_sep, "------|")?;
            write!(sum_row, " {} |", format_speedup(s.geomean))?;
        }
        writeln!(md, "{sum_header}")?;
        writeln!(md, "{sum_sep}")?;
        writeln!(md, "{sum_row}")?;
        writeln!(md)?;
        writeln!(md, "Geometric mean of per-query speedups (mean time). Higher is better.")?;
    }

    writeln!(md)?;
    writeln!(md, "### Runs")?;
    writeln!(md)?;
    writeln!(md, "| System | Query | Trials | Mean | Std | Median | Min | Max |")?;
    writeln!(md, "|--------|-------|-------:|-----:|----:|-------:|----:|----:|")?;
    for r in &pivot.records {
        writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            r.system,
            r.query,
            r.trials,
            unit.format(unit.from_millis(r.mean)),
            unit.format(unit.from_millis(r.stddev)),
            unit.format(unit.from_millis(r.median)),
            unit.format(unit.from_millis(r.min as f64)),
            unit.format(unit.from_millis(r.max as f64)),
        )?;
    }

    Ok(md)
}

// --- JSON ---

#[derive(Serialize)]
struct JsonReport<'a> {
    unit: Unit,
    systems: &'a [String],
    queries: Vec<&'a str>,
    mean: Table,
    stddev: Table,
    #[serde(skip_serializing_if = "Option::is_none")]
    baseline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speedups: Option<&'a [Speedup]>,
    /// Always milliseconds, whatever `unit` says.
    #[serde(rename = "records")]
    records_ms: &'a [AggregateRecord],
}

fn render_json(pivot: &Pivot, speedups: Option<&[Speedup]>, opts: &ReportOptions) -> Result<String> {
    let unit = opts.unit;
    let report = JsonReport {
        unit,
        systems: pivot.systems(),
        queries: pivot.mean.queries().collect(),
        mean: pivot.mean.map(|v| unit.from_millis(v)),
        stddev: pivot.stddev.map(|v| unit.from_millis(v)),
        baseline: opts.baseline.as_deref(),
        speedups,
        records_ms: &pivot.records,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}
