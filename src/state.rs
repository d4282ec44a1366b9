use std::path::{Path, PathBuf};

use crate::analysis::missing::{clean_missing, missing_report, MissingReport};
use crate::analysis::AnalysisError;
use crate::data::loader::load_file;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything the menu works on, independent of console I/O.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset (None if the file could not be loaded).
    pub dataset: Option<Dataset>,

    /// Where the dataset was read from.
    pub source: PathBuf,

    /// Whether missing values have been replaced with zero.
    pub cleaned: bool,

    /// Load failure message, shown once at startup.
    pub status_message: Option<String>,
}

impl Session {
    /// Load `path`; a failure leaves the session without a dataset.
    pub fn open(path: &Path) -> Self {
        let mut session = Session {
            source: path.to_path_buf(),
            ..Default::default()
        };
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                session.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                session.status_message = Some(format!("Error: {e}"));
            }
        }
        session
    }

    /// Ingest a newly loaded dataset.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = Some(dataset);
        self.cleaned = false;
        self.status_message = None;
    }

    pub fn dataset(&self) -> Result<&Dataset, AnalysisError> {
        self.dataset.as_ref().ok_or(AnalysisError::NoDataset)
    }

    /// Audit missing values, then replace them with zero.
    ///
    /// The returned report describes the table before cleanup.
    pub fn clean(&mut self) -> Result<MissingReport, AnalysisError> {
        let dataset = self.dataset.as_mut().ok_or(AnalysisError::NoDataset)?;
        let report = missing_report(dataset);
        clean_missing(dataset);
        self.cleaned = true;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_leaves_no_dataset() {
        let session = Session::open(Path::new("/no/such/housing.csv"));
        assert!(session.dataset.is_none());
        assert!(session.status_message.is_some());
        assert_eq!(session.dataset().unwrap_err(), AnalysisError::NoDataset);
    }

    #[test]
    fn clean_reports_then_zeroes() {
        let mut session = Session::default();
        session.set_dataset(Dataset::new(
            vec![vec![f64::NAN, 1.0]],
            vec!["a".into(), "b".into()],
        ));
        let report = session.clean().unwrap();
        assert_eq!(report.total(), 1);
        assert!(session.cleaned);
        assert_eq!(session.dataset().unwrap().rows, vec![vec![0.0, 1.0]]);
    }

    #[test]
    fn clean_without_dataset_fails() {
        let mut session = Session::default();
        assert_eq!(session.clean().unwrap_err(), AnalysisError::NoDataset);
    }
}
