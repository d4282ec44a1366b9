use thiserror::Error;

/// Error type for the statistics and aggregate engine.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// An aggregate was requested over zero rows, either because the table is
    /// empty or because no row passed the filter.
    #[error("no rows to aggregate: {context}")]
    EmptyDataset { context: String },

    /// Fewer column names than columns; the report cannot label every column.
    #[error("{names} column names for {columns} columns")]
    MisalignedColumns { names: usize, columns: usize },

    #[error("column {index} out of range for {width} columns")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error("No dataset loaded")]
    NoDataset,
}

impl AnalysisError {
    pub fn empty(context: impl Into<String>) -> Self {
        AnalysisError::EmptyDataset {
            context: context.into(),
        }
    }
}
