use std::fmt;

// ---------------------------------------------------------------------------
// ColumnRole – semantic meaning of a fixed column position
// ---------------------------------------------------------------------------

/// The known roles of the nine housing columns, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRole {
    Longitude,
    Latitude,
    HousingMedianAge,
    TotalRooms,
    TotalBedrooms,
    Population,
    Households,
    MedianIncome,
    MedianHouseValue,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 9] = [
        ColumnRole::Longitude,
        ColumnRole::Latitude,
        ColumnRole::HousingMedianAge,
        ColumnRole::TotalRooms,
        ColumnRole::TotalBedrooms,
        ColumnRole::Population,
        ColumnRole::Households,
        ColumnRole::MedianIncome,
        ColumnRole::MedianHouseValue,
    ];

    /// Zero-based column position in the source file.
    pub fn index(self) -> usize {
        match self {
            ColumnRole::Longitude => 0,
            ColumnRole::Latitude => 1,
            ColumnRole::HousingMedianAge => 2,
            ColumnRole::TotalRooms => 3,
            ColumnRole::TotalBedrooms => 4,
            ColumnRole::Population => 5,
            ColumnRole::Households => 6,
            ColumnRole::MedianIncome => 7,
            ColumnRole::MedianHouseValue => 8,
        }
    }

    /// Human readable label used in charts and console output.
    pub fn label(self) -> &'static str {
        match self {
            ColumnRole::Longitude => "Longitude",
            ColumnRole::Latitude => "Latitude",
            ColumnRole::HousingMedianAge => "Housing median age",
            ColumnRole::TotalRooms => "Total rooms",
            ColumnRole::TotalBedrooms => "Total bedrooms",
            ColumnRole::Population => "Population",
            ColumnRole::Households => "Households",
            ColumnRole::MedianIncome => "Median income",
            ColumnRole::MedianHouseValue => "Median house value",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Row-major numeric table plus the header names, parallel by position.
///
/// Missing cells are stored as `NaN`. The loader guarantees every row has
/// exactly `column_names.len()` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Vec<f64>>,
    pub column_names: Vec<String>,
}

/// Shape summary printed by the "basic information" menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfo {
    pub rows: usize,
    pub columns: usize,
    pub size: usize,
    pub ndim: usize,
    pub item_size: usize,
    pub dtype: &'static str,
}

impl fmt::Display for BasicInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape: ({}, {})", self.rows, self.columns)?;
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "Number of dimensions: {}", self.ndim)?;
        writeln!(f, "Item size: {}", self.item_size)?;
        write!(f, "Data type: {}", self.dtype)
    }
}

impl Dataset {
    pub fn new(rows: Vec<Vec<f64>>, column_names: Vec<String>) -> Self {
        Dataset { rows, column_names }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, taken from the widest row so a table built by hand
    /// with a short header is still measured by its data.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(self.column_names.len())
    }

    /// Iterate over one column. Cells missing from a short row read as `NaN`.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).copied().unwrap_or(f64::NAN))
    }

    pub fn role(&self, role: ColumnRole) -> impl Iterator<Item = f64> + '_ {
        self.column(role.index())
    }

    /// Header name for a role, falling back to its built-in label.
    pub fn name_of(&self, role: ColumnRole) -> &str {
        self.column_names
            .get(role.index())
            .map(String::as_str)
            .unwrap_or(role.label())
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn preview(&self, n: usize) -> &[Vec<f64>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn basic_info(&self) -> BasicInfo {
        let rows = self.len();
        let columns = self.width();
        BasicInfo {
            rows,
            columns,
            size: rows * columns,
            ndim: 2,
            item_size: std::mem::size_of::<f64>(),
            dtype: "float64",
        }
    }
}

/// Format a row the way the console preview shows it.
pub fn format_row(row: &[f64]) -> String {
    let cells: Vec<String> = row.iter().map(|v| format_value(*v)).collect();
    format!("[{}]", cells.join(", "))
}

/// Format a single value; missing cells print as `nan`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![vec![1.0, 2.0], vec![3.0, f64::NAN], vec![5.0, 6.0]],
            vec!["a".into(), "b".into()],
        )
    }

    #[test]
    fn role_indices_are_positional() {
        for (i, role) in ColumnRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn column_reads_by_position() {
        let ds = sample();
        let col: Vec<f64> = ds.column(0).collect();
        assert_eq!(col, vec![1.0, 3.0, 5.0]);
        assert!(ds.column(1).nth(1).unwrap().is_nan());
    }

    #[test]
    fn preview_is_capped_by_row_count() {
        let ds = sample();
        assert_eq!(ds.preview(10).len(), 3);
        assert_eq!(ds.preview(2).len(), 2);
    }

    #[test]
    fn basic_info_describes_shape() {
        let info = sample().basic_info();
        assert_eq!((info.rows, info.columns, info.size), (3, 2, 6));
        assert_eq!(info.item_size, 8);
        assert_eq!(info.dtype, "float64");
    }

    #[test]
    fn name_of_falls_back_to_label() {
        let ds = sample();
        assert_eq!(ds.name_of(ColumnRole::Longitude), "a");
        assert_eq!(ds.name_of(ColumnRole::MedianIncome), "Median income");
    }

    #[test]
    fn format_row_marks_missing() {
        assert_eq!(format_row(&[1.5, f64::NAN]), "[1.5, nan]");
    }
}
