// Spreadsheet decoding (.xlsx / .xls) into a RecordSet

use crate::data::RecordSet;
use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde_json::Value;
use std::path::Path;

/// Read the first worksheet; its first row is the header row.
pub fn read_first_sheet(path: &Path) -> Result<RecordSet> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to read Excel file '{}'", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook '{}' has no worksheets", path.display()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read worksheet '{}'", sheet_name))?;

    range_to_records(&range)
}

/// Convert a cell range to records using its first row as headers
pub fn range_to_records(range: &Range<Data>) -> Result<RecordSet> {
    let mut rows = range.rows();

    let header_row = match rows.next() {
        Some(row) => row,
        None => bail!("Worksheet is empty"),
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::Empty => format!("Column{}", idx + 1),
            other => other.to_string(),
        })
        .collect();

    let body: Vec<Vec<Value>> = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    RecordSet::from_rows(headers, body)
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Value::from(*f),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Empty | Data::Error(_) => Value::Null,
        other => Value::String(other.to_string()),
    }
}
