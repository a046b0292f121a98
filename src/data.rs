use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One row of a record set, keyed by column name in column order.
pub type Record = Map<String, Value>;

static NULL: Value = Value::Null;

/// Ordered, non-empty sequence of uniform records.
///
/// Column order comes from the first record's key order. Column 0 is the
/// category/label column by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    /// Create a RecordSet from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            bail!("Input data array is empty");
        }

        // Extract headers from the first object
        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;
        let columns: Vec<String> = first_obj.keys().cloned().collect();
        if columns.is_empty() {
            bail!("Input records have no columns");
        }

        let mut records = Vec::with_capacity(array.len());
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            for (key, val) in obj {
                if matches!(val, Value::Array(_) | Value::Object(_)) {
                    bail!("Unsupported value type for field '{}'", key);
                }
            }
            records.push(obj.clone());
        }

        Ok(Self { columns, records })
    }

    /// Build records from a header row and string cells.
    ///
    /// Short rows are padded with nulls; cells beyond the header are dropped.
    /// A repeated header name gets a numeric suffix so every column stays addressable.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if headers.is_empty() {
            bail!("Input data has no columns");
        }
        if rows.is_empty() {
            bail!("Input data must contain at least one data row");
        }

        let mut seen: Vec<String> = Vec::with_capacity(headers.len());
        for header in headers {
            let mut name = header.clone();
            let mut n = 2;
            while seen.contains(&name) {
                name = format!("{}_{}", header, n);
                n += 1;
            }
            seen.push(name);
        }
        let headers = seen;

        let records = rows
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                headers
                    .iter()
                    .map(|h| (h.clone(), cells.next().unwrap_or(Value::Null)))
                    .collect::<Record>()
            })
            .collect();

        Ok(Self {
            columns: headers,
            records,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> &Record {
        // non-empty by construction
        &self.records[0]
    }

    /// Cell lookup that treats a missing key as null.
    pub fn cell<'a>(record: &'a Record, column: &str) -> &'a Value {
        record.get(column).unwrap_or(&NULL)
    }

    /// Column `index` read down every record; all nulls if the column does not exist.
    pub fn column_values(&self, index: usize) -> Vec<Value> {
        match self.column(index) {
            Some(col) => self
                .records
                .iter()
                .map(|r| Self::cell(r, col).clone())
                .collect(),
            None => vec![Value::Null; self.records.len()],
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.records.iter().cloned().map(Value::Object).collect())
    }
}

/// Input formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Excel,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xls" => Ok(InputFormat::Excel),
            "json" => Ok(InputFormat::Json),
            _ => bail!(
                "Unsupported file '{}': only Excel, CSV and JSON files are supported",
                path.display()
            ),
        }
    }
}

/// Load a record set from a file, picking the decoder by extension
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let format = InputFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading records");

    let records = match format {
        InputFormat::Csv => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            crate::csv_reader::read_csv(file)?
        }
        InputFormat::Excel => crate::sheet_reader::read_first_sheet(path)?,
        InputFormat::Json => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON in '{}'", path.display()))?;
            RecordSet::from_json(&value)?
        }
    };

    info!(
        rows = records.len(),
        columns = records.columns().len(),
        "loaded {}",
        path.display()
    );
    Ok(records)
}

/// Load a record set from a stream (stdin), sniffing JSON vs CSV
pub fn load_records_from_reader<R: Read>(mut reader: R) -> Result<RecordSet> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read input")?;

    let looks_like_json = text
        .trim_start()
        .starts_with(|c: char| c == '[' || c == '{');

    if looks_like_json {
        let value: Value = serde_json::from_str(&text).context("Failed to parse JSON input")?;
        RecordSet::from_json(&value)
    } else {
        crate::csv_reader::read_csv(text.as_bytes())
    }
}
