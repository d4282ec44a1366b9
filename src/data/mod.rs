/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   housing.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (NaN for missing cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Vec<f64>> rows, header names, ColumnRole accessors
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply row predicates → selected rows / values
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
