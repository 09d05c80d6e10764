//! Alignment of several series on their timestamps.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::reading::TimeSeries;

/// Outer join of a group's series: one column per metric, one row per
/// timestamp seen in any series, rows in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    columns: Vec<String>,
    rows: BTreeMap<NaiveDateTime, Vec<Option<f64>>>,
}

impl CombinedTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Joins the series in the given order; that order becomes column order.
    pub fn outer_join(series: Vec<TimeSeries>) -> Self {
        let width = series.len();
        let mut table = Self::new(series.iter().map(|s| s.label.clone()).collect());

        for (column, s) in series.into_iter().enumerate() {
            for (timestamp, value) in s.points {
                table.set(timestamp, column, width, value);
            }
        }

        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDateTime, &[Option<f64>])> {
        self.rows.iter().map(|(ts, values)| (ts, values.as_slice()))
    }

    /// Inserts a full row, replacing any existing row at `timestamp`.
    pub fn insert_row(&mut self, timestamp: NaiveDateTime, values: Vec<Option<f64>>) {
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.insert(timestamp, values);
    }

    pub fn value(&self, timestamp: &NaiveDateTime, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(timestamp).and_then(|row| row[idx])
    }

    fn set(&mut self, timestamp: NaiveDateTime, column: usize, width: usize, value: f64) {
        self.rows.entry(timestamp).or_insert_with(|| vec![None; width])[column] = Some(value);
    }
}

// -- Tests -------------------------------------------------------------------
