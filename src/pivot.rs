//! Query × system comparison tables.
//!
//! Rows are display query labels, sorted; columns are display system labels
//! in the requested order. A cell is `None` when that system never ran that
//! query. Both tables of a [`Pivot`] share exactly the same shape.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::aggregate::AggregateRecord;
use crate::error::{Error, Result};
use crate::labels::Labels;

/// Which systems become columns, and in what order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemOrder {
    /// Every system, in the order it first appears in the records.
    FirstSeen,
    /// Exactly these display labels. Each one must exist in the data.
    Explicit(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    systems: Vec<String>,
    rows: BTreeMap<String, Vec<Option<f64>>>,
}

impl Table {
    fn new(systems: Vec<String>) -> Self {
        Self {
            systems,
            rows: BTreeMap::new(),
        }
    }

    fn set(&mut self, query: &str, column: usize, value: f64) {
        let width = self.systems.len();
        self.rows
            .entry(query.to_string())
            .or_insert_with(|| vec![None; width])[column] = Some(value);
    }

    pub fn systems(&self) -> &[String] {
        &self.systems
    }

    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.rows.iter().map(|(q, cells)| (q.as_str(), cells.as_slice()))
    }

    pub fn row(&self, query: &str) -> Option<&[Option<f64>]> {
        self.rows.get(query).map(Vec::as_slice)
    }

    pub fn get(&self, query: &str, system: &str) -> Option<f64> {
        let column = self.systems.iter().position(|s| s == system)?;
        self.rows.get(query)?[column]
    }

    /// Number of query rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply `f` to every present cell.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Table {
        Table {
            systems: self.systems.clone(),
            rows: self
                .rows
                .iter()
                .map(|(q, cells)| (q.clone(), cells.iter().map(|c| c.map(&f)).collect()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pivot {
    pub mean: Table,
    pub stddev: Table,
    /// Every input record under its display labels, including systems that
    /// were left out of the tables.
    pub records: Vec<AggregateRecord>,
}

impl Pivot {
    pub fn systems(&self) -> &[String] {
        self.mean.systems()
    }
}

/// Relabel `records` and reshape them into mean and stddev tables.
pub fn pivot(records: &[AggregateRecord], order: &SystemOrder, labels: &Labels) -> Result<Pivot> {
    let records: Vec<AggregateRecord> = records
        .iter()
        .map(|r| AggregateRecord {
            system: labels.system(&r.system).to_string(),
            query: labels.query(&r.query).to_string(),
            ..r.clone()
        })
        .collect();

    let mut keys = HashSet::new();
    for r in &records {
        if !keys.insert((r.system.as_str(), r.query.as_str())) {
            return Err(Error::LabelCollision {
                system: r.system.clone(),
                query: r.query.clone(),
            });
        }
    }

    let mut present: Vec<String> = Vec::new();
    for r in &records {
        if !present.contains(&r.system) {
            present.push(r.system.clone());
        }
    }

    let columns = match order {
        SystemOrder::FirstSeen => present.clone(),
        SystemOrder::Explicit(requested) => {
            let mut columns: Vec<String> = Vec::with_capacity(requested.len());
            for system in requested {
                if columns.contains(system) {
                    return Err(Error::DuplicateSystem {
                        system: system.clone(),
                    });
                }
                if !present.contains(system) {
                    return Err(Error::UnknownSystem {
                        system: system.clone(),
                        available: present.clone(),
                    });
                }
                columns.push(system.clone());
            }
            columns
        }
    };

    for system in present.iter().filter(|s| !columns.contains(*s)) {
        tracing::info!(system = system.as_str(), "system not in display order, leaving it out");
    }

    let mut mean = Table::new(columns.clone());
    let mut stddev = Table::new(columns);
    for r in &records {
        let Some(column) = mean.systems.iter().position(|s| *s == r.system) else {
            continue;
        };
        mean.set(&r.query, column, r.mean);
        stddev.set(&r.query, column, r.stddev);
    }

    Ok(Pivot {
        mean,
        stddev,
        records,
    })
}
