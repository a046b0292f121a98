// CSV decoding into a RecordSet

use crate::data::RecordSet;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::io::Read;

/// Read CSV with a header row. Every cell is kept as a string value.
pub fn read_csv<R: Read>(reader: R) -> Result<RecordSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV row {}", idx + 1))?;
        rows.push(
            record
                .iter()
                .map(|cell| Value::String(cell.to_string()))
                .collect::<Vec<_>>(),
        );
    }

    if rows.is_empty() {
        bail!("CSV must contain at least one data row");
    }

    RecordSet::from_rows(headers, rows)
}
