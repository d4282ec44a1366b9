/// Statistics and aggregate engine.
///
/// Every function is a pure computation over a borrowed [`Dataset`], except
/// [`missing::clean_missing`], which rewrites missing cells in place.
///
/// [`Dataset`]: crate::data::model::Dataset

pub mod aggregate;
pub mod error;
pub mod group;
pub mod missing;
pub mod stats;

pub use error::AnalysisError;
