//! Save a combined table to CSV, and read one back.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    error::{CaveLinkError, Result},
    table::CombinedTable,
};

pub const INDEX_COLUMN: &str = "Zeit";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn save_table(table: &CombinedTable, file_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(file_path)?;

    let mut header = vec![INDEX_COLUMN];
    header.extend(table.columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for (timestamp, values) in table.rows() {
        let mut record = Vec::with_capacity(values.len() + 1);
        record.push(timestamp.format(TIMESTAMP_FORMAT).to_string());
        record.extend(
            values
                .iter()
                .map(|v| v.map_or(String::new(), |v| v.to_string())),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    info!(path = %file_path.display(), rows = table.len(), "CSV written");

    Ok(())
}

pub fn load_table(file_path: &Path) -> Result<CombinedTable> {
    let mut reader = csv::Reader::from_path(file_path)?;
    let origin = file_path.display().to_string();
    let invalid = |line: usize, message: String| CaveLinkError::Parse {
        label: origin.clone(),
        line,
        message,
    };

    let header = reader.headers()?.clone();
    if header.get(0) != Some(INDEX_COLUMN) {
        return Err(invalid(1, format!("first column must be `{}`", INDEX_COLUMN)));
    }
    let columns: Vec<String> = header.iter().skip(1).map(str::to_string).collect();
    let mut table = CombinedTable::new(columns);

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = idx + 2;

        let timestamp = NaiveDateTime::parse_from_str(&record[0], TIMESTAMP_FORMAT)
            .map_err(|e| invalid(line, format!("invalid timestamp `{}`: {}", &record[0], e)))?;
        let values = record
            .iter()
            .skip(1)
            .map(|field| match field.trim() {
                "" => Ok(None),
                v => v
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| invalid(line, format!("invalid value `{}`", v))),
            })
            .collect::<Result<Vec<_>>>()?;

        table.insert_row(timestamp, values);
    }

    Ok(table)
}

// -- Tests -------------------------------------------------------------------
