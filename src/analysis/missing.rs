use std::fmt;

use crate::data::model::Dataset;

/// Number of missing (NaN) cells in each column.
pub fn count_missing_per_column(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.width())
        .map(|i| dataset.column(i).filter(|v| v.is_nan()).count())
        .collect()
}

/// Replace every missing cell with `0.0`, in place.
///
/// Destructive: nothing records which cells were altered. Statistics computed
/// before the call are stale afterwards.
pub fn clean_missing(dataset: &mut Dataset) -> &mut Dataset {
    let mut replaced = 0usize;
    for cell in dataset.rows.iter_mut().flatten() {
        if cell.is_nan() {
            *cell = 0.0;
            replaced += 1;
        }
    }
    log::info!("replaced {replaced} missing values with 0");
    dataset
}

/// Per-column missing counts paired with the column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReport {
    pub entries: Vec<(String, usize)>,
}

impl MissingReport {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing value counts per column:")?;
        for (name, n) in &self.entries {
            writeln!(f, "Column '{name}': {n} missing values")?;
        }
        Ok(())
    }
}

/// Audit the table; columns without a header name are labelled by position.
pub fn missing_report(dataset: &Dataset) -> MissingReport {
    let entries = count_missing_per_column(dataset)
        .into_iter()
        .enumerate()
        .map(|(i, n)| {
            let name = dataset
                .column_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("#{i}"));
            (name, n)
        })
        .collect();
    MissingReport { entries }
}
