use std::collections::BTreeMap;
use std::fmt;

use super::error::AnalysisError;
use crate::data::model::{ColumnRole, Dataset};

// ---------------------------------------------------------------------------
// Reductions over one column
// ---------------------------------------------------------------------------
//
// All reductions propagate NaN: a single missing cell yields a NaN statistic
// unless the table was cleaned first.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Largest value, or NaN if any value is NaN. `None` for an empty slice.
pub fn max(values: &[f64]) -> Option<f64> {
    reduce(values, f64::max)
}

/// Smallest value, or NaN if any value is NaN. `None` for an empty slice.
pub fn min(values: &[f64]) -> Option<f64> {
    reduce(values, f64::min)
}

fn reduce(values: &[f64], op: fn(f64, f64) -> f64) -> Option<f64> {
    let (&first, rest) = values.split_first()?;
    if values.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }
    Some(rest.iter().copied().fold(first, op))
}

/// Middle value; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|v| v.is_nan()) {
        return Some(f64::NAN);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent integer after truncating each value toward zero.
///
/// Ties go to the smallest integer. Undefined (NaN) when the column holds a
/// negative value or a missing cell.
pub fn mode(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|&v| v < 0.0 || v.is_nan()) {
        return Some(f64::NAN);
    }
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v.trunc() as u64).or_default() += 1;
    }
    // Ascending scan, strict comparison: the first maximal bin wins.
    let mut best: Option<(u64, usize)> = None;
    for (&bin, &count) in &counts {
        match best {
            Some((_, c)) if count <= c => {}
            _ => best = Some((bin, count)),
        }
    }
    best.map(|(bin, _)| bin as f64)
}

// ---------------------------------------------------------------------------
// Column statistics report
// ---------------------------------------------------------------------------

/// The four summary statistics of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub mean: f64,
    pub max: f64,
    pub median: f64,
    pub mode: f64,
}

/// Summary statistics for every column, in column order.
///
/// The `Display` impl is the statistical summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub columns: Vec<ColumnStats>,
}

impl StatsReport {
    pub fn means(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.mean).collect()
    }

    pub fn maxes(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.max).collect()
    }

    pub fn medians(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.median).collect()
    }

    pub fn modes(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.mode).collect()
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistical summary:")?;
        for c in &self.columns {
            writeln!(
                f,
                "Column '{}': Mean={}, Max={}, Median={}, Mode={}",
                c.name, c.mean, c.max, c.median, c.mode
            )?;
        }
        Ok(())
    }
}

/// Compute mean, max, median and mode for every column.
///
/// `column_names` must label every column; a shorter list is a caller bug and
/// fails before anything is computed.
pub fn compute_column_stats(
    dataset: &Dataset,
    column_names: &[String],
) -> Result<StatsReport, AnalysisError> {
    let width = dataset.width();
    if column_names.len() < width {
        return Err(AnalysisError::MisalignedColumns {
            names: column_names.len(),
            columns: width,
        });
    }
    if dataset.is_empty() {
        return Err(AnalysisError::empty("column statistics"));
    }

    let columns = (0..width)
        .map(|i| {
            let values: Vec<f64> = dataset.column(i).collect();
            ColumnStats {
                name: column_names[i].clone(),
                mean: mean(&values).unwrap_or(f64::NAN),
                max: max(&values).unwrap_or(f64::NAN),
                median: median(&values).unwrap_or(f64::NAN),
                mode: mode(&values).unwrap_or(f64::NAN),
            }
        })
        .collect();

    Ok(StatsReport { columns })
}

// ---------------------------------------------------------------------------
// Single-column scalar extractors
// ---------------------------------------------------------------------------

/// Mean of one column over all rows.
pub fn mean_of_column(dataset: &Dataset, index: usize) -> Result<f64, AnalysisError> {
    let width = dataset.width();
    if index >= width && !dataset.is_empty() {
        return Err(AnalysisError::ColumnOutOfRange { index, width });
    }
    let values: Vec<f64> = dataset.column(index).collect();
    let m = mean(&values).ok_or_else(|| AnalysisError::empty(format!("mean of column {index}")))?;
    log::debug!("mean of column {index} = {m}");
    Ok(m)
}

/// Mean of the median-income column.
pub fn income_mean(dataset: &Dataset) -> Result<f64, AnalysisError> {
    mean_of_column(dataset, ColumnRole::MedianIncome.index())
}

/// Smallest value of a column, NaN-propagating.
pub fn column_min(dataset: &Dataset, role: ColumnRole) -> Result<f64, AnalysisError> {
    let values: Vec<f64> = dataset.role(role).collect();
    min(&values).ok_or_else(|| AnalysisError::empty(format!("minimum of {role}")))
}

/// Largest value of a column, NaN-propagating.
pub fn column_max(dataset: &Dataset, role: ColumnRole) -> Result<f64, AnalysisError> {
    let values: Vec<f64> = dataset.role(role).collect();
    max(&values).ok_or_else(|| AnalysisError::empty(format!("maximum of {role}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{i}")).collect()
    }

    #[test]
    fn median_of_even_length_averages_middle() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
    }

    #[test]
    fn reductions_propagate_nan() {
        let v = [1.0, f64::NAN, 3.0];
        assert!(mean(&v).unwrap().is_nan());
        assert!(max(&v).unwrap().is_nan());
        assert!(min(&v).unwrap().is_nan());
        assert!(median(&v).unwrap().is_nan());
    }

    #[test]
    fn empty_reductions_are_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn mode_tie_goes_to_smallest() {
        assert_eq!(mode(&[2.0, 2.0, 3.0, 3.0, 1.0]), Some(2.0));
    }

    #[test]
    fn mode_truncates_values() {
        assert_eq!(mode(&[1.9, 1.2, 2.5]), Some(1.0));
    }

    #[test]
    fn mode_undefined_for_negative_column() {
        assert!(mode(&[-122.2, -121.0, 5.0]).unwrap().is_nan());
    }

    #[test]
    fn stats_report_covers_every_column() {
        let ds = Dataset::new(
            vec![vec![1.0, -1.0], vec![3.0, -2.0], vec![3.0, -3.0]],
            names(2),
        );
        let report = compute_column_stats(&ds, &ds.column_names).unwrap();
        assert_eq!(report.means(), vec![7.0 / 3.0, -2.0]);
        assert_eq!(report.maxes(), vec![3.0, -1.0]);
        assert_eq!(report.medians(), vec![3.0, -2.0]);
        assert_eq!(report.modes()[0], 3.0);
        assert!(report.modes()[1].is_nan());

        let text = report.to_string();
        assert!(text.contains("Column 'c0': Mean="));
        assert!(text.find("'c0'").unwrap() < text.find("'c1'").unwrap());
    }

    #[test]
    fn short_name_list_fails_fast() {
        let ds = Dataset::new(vec![vec![1.0, 2.0, 3.0]], names(3));
        let err = compute_column_stats(&ds, &names(2)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MisalignedColumns {
                names: 2,
                columns: 3
            }
        );
    }

    #[test]
    fn mean_of_empty_table_fails() {
        let ds = Dataset::new(Vec::new(), names(9));
        assert!(matches!(
            income_mean(&ds),
            Err(AnalysisError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn mean_of_column_rejects_bad_index() {
        let ds = Dataset::new(vec![vec![1.0, 2.0]], names(2));
        assert_eq!(
            mean_of_column(&ds, 5),
            Err(AnalysisError::ColumnOutOfRange { index: 5, width: 2 })
        );
        assert_eq!(mean_of_column(&ds, 1), Ok(2.0));
    }
}
