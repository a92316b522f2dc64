//! CSV isolate export to normalized `IsolateRecord` sets.

use std::io;
use std::path::Path;

use amr_core::{normalize_rows, DashboardConfig, DashboardError, IsolateRecord, RawRow};
use tracing::{debug, info};

/// Header plus untyped rows of a CSV document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }
}

/// Parse CSV text with a header line into raw rows.
///
/// Cells are trimmed and short rows are accepted; missing trailing cells are
/// simply absent from the row.
pub fn read_raw_table<R: io::Read>(reader: R) -> Result<RawTable, DashboardError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(parse_error)?.clone();

    let rows = csv_reader
        .records()
        .map(|record| {
            let record = record.map_err(parse_error)?;
            Ok(headers.iter().zip(record.iter()).collect::<RawRow>())
        })
        .collect::<Result<Vec<RawRow>, DashboardError>>()?;

    debug!(columns = headers.len(), rows = rows.len(), "parsed csv");
    Ok(RawTable {
        headers: headers.iter().map(str::to_string).collect(),
        rows,
    })
}

/// Load and normalize a dataset from any reader.
///
/// Fails with `MissingData` when the header lacks the patient id column, since
/// every row would otherwise be dropped silently.
pub fn load_records<R: io::Read>(
    reader: R,
    config: &DashboardConfig,
) -> Result<Vec<IsolateRecord>, DashboardError> {
    let table = read_raw_table(reader)?;

    let patient_column = &config.columns.patient_id;
    if !table.has_column(patient_column) {
        return Err(DashboardError::MissingData(format!(
            "column {patient_column} not found in CSV header"
        )));
    }

    Ok(normalize_rows(&table.rows, config))
}

/// Load and normalize a dataset from CSV text.
pub fn load_records_str(
    csv_text: &str,
    config: &DashboardConfig,
) -> Result<Vec<IsolateRecord>, DashboardError> {
    load_records(csv_text.as_bytes(), config)
}

/// Load and normalize a dataset from a CSV file on disk.
pub fn load_records_path(
    path: impl AsRef<Path>,
    config: &DashboardConfig,
) -> Result<Vec<IsolateRecord>, DashboardError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let records = load_records(io::BufReader::new(file), config)?;
    info!(path = %path.display(), records = records.len(), "loaded isolate csv");
    Ok(records)
}

fn parse_error(err: csv::Error) -> DashboardError {
    DashboardError::Parse(err.to_string())
}
