//! Parsing of a single Cave-Link response into a labelled time series.
//!
//! A response body looks like
//!
//! ```text
//! Station 106 Motiers<br>Gruppe 1 Wert 101<br>18/10/2026 06:00,1.243<br>18/10/2026 05:00,1.241<br>
//! ```
//!
//! Two preamble lines, then `timestamp,value` rows with day-first timestamps.

mod timestamp;

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::{CaveLinkError, Result};

pub use timestamp::parse_day_first;

const LINE_BREAK_MARKER: &str = "<br>";
const PREAMBLE_LINES: usize = 2;

/// One metric's readings, in the order the service returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub label: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parses a raw response body. Any malformed row fails the whole series.
pub fn parse(raw: &str, label: &str) -> Result<TimeSeries> {
    let error = |line: usize, message: String| CaveLinkError::Parse {
        label: label.to_string(),
        line,
        message,
    };

    let normalised = raw.replace(LINE_BREAK_MARKER, "\n");
    let lines: Vec<(usize, &str)> = normalised
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    if lines.len() < PREAMBLE_LINES {
        return Err(error(
            lines.len() + 1,
            format!(
                "expected {} preamble lines, found {}",
                PREAMBLE_LINES,
                lines.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(lines.len() - PREAMBLE_LINES);

    for &(line_no, line) in &lines[PREAMBLE_LINES..] {
        let fields: Vec<&str> = line.split(',').collect();
        let [time_field, value_field] = fields.as_slice() else {
            return Err(error(
                line_no,
                format!("expected 2 fields, found {} in `{}`", fields.len(), line),
            ));
        };

        let timestamp = parse_day_first(time_field)
            .ok_or_else(|| error(line_no, format!("invalid timestamp `{}`", time_field.trim())))?;
        let value = value_field
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| error(line_no, format!("invalid value `{}`", value_field.trim())))?;

        if !seen.insert(timestamp) {
            return Err(error(line_no, format!("duplicate timestamp {}", timestamp)));
        }

        points.push((timestamp, value));
    }

    Ok(TimeSeries {
        label: label.to_string(),
        points,
    })
}

// -- Tests ----------------------------------------------------------------------------
