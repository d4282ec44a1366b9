use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Dataset;

/// Failures at the loading boundary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file has no header line")]
    MissingHeader,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a housing table from a comma-separated file.
///
/// Layout:
/// * first line: column names, split on `,` (no quoting)
/// * every other line: one float per column
///
/// Empty or unparseable fields become `NaN`. Short rows are padded with
/// `NaN` and long rows truncated so that every row matches the header.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_table(reader)
}

/// Parse a table from any reader; used for in-memory sources.
pub fn load_reader<R: std::io::Read>(source: R) -> Result<Dataset, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(source);
    read_table(reader)
}

fn read_table<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset, LoadError> {
    let column_names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if column_names.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }
    let width = column_names.len();

    let mut rows = Vec::new();
    let mut unparsed = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut row: Vec<f64> = record
            .iter()
            .map(|field| {
                parse_field(field).unwrap_or_else(|| {
                    unparsed += 1;
                    f64::NAN
                })
            })
            .collect();

        if row.len() != width {
            log::warn!(
                "CSV row {row_no}: expected {width} fields, found {}",
                row.len()
            );
            row.resize(width, f64::NAN);
        }
        rows.push(row);
    }

    if unparsed > 0 {
        log::warn!("{unparsed} empty or non-numeric fields loaded as NaN");
    }

    Ok(Dataset::new(rows, column_names))
}

fn parse_field(field: &str) -> Option<f64> {
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok()
}
