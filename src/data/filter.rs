use std::fmt;

use super::model::{ColumnRole, Dataset};

// ---------------------------------------------------------------------------
// Row predicate on a single role
// ---------------------------------------------------------------------------

/// A comparison of one column against a constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// `row[role] > threshold` (strict).
    GreaterThan(ColumnRole, f64),
    /// `row[role] == value`, exact floating-point equality. `NaN` matches `NaN`
    /// so grouped rows never fall out of every group.
    Equals(ColumnRole, f64),
}

impl Predicate {
    pub fn matches(&self, row: &[f64]) -> bool {
        match *self {
            Predicate::GreaterThan(role, n) => cell(row, role) > n,
            Predicate::Equals(role, v) => same_value(cell(row, role), v),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::GreaterThan(role, n) => write!(f, "{role} > {n}"),
            Predicate::Equals(role, v) => write!(f, "{role} == {v}"),
        }
    }
}

fn cell(row: &[f64], role: ColumnRole) -> f64 {
    row.get(role.index()).copied().unwrap_or(f64::NAN)
}

/// Equality used for grouping: `==`, except that `NaN` equals `NaN`.
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Return indices of rows that satisfy the predicate.
pub fn filtered_indices(dataset: &Dataset, predicate: &Predicate) -> Vec<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| predicate.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// Values of `value` over the rows selected by `predicate`.
pub fn select_values(dataset: &Dataset, predicate: &Predicate, value: ColumnRole) -> Vec<f64> {
    dataset
        .rows
        .iter()
        .filter(|row| predicate.matches(row))
        .map(|row| cell(row, value))
        .collect()
}
