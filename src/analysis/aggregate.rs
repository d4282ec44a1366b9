use super::error::AnalysisError;
use super::stats::mean;
use crate::data::filter::{filtered_indices, select_values, Predicate};
use crate::data::model::{ColumnRole, Dataset};

/// Population above which an area counts as high density.
pub const HIGH_DENSITY_POPULATION: f64 = 1000.0;

/// Threshold of the rooms-per-household query.
pub const ROOMS_THRESHOLD: f64 = 3.0;

// ---------------------------------------------------------------------------
// Generic filtered mean
// ---------------------------------------------------------------------------

/// Mean of `value` over the rows where `key > threshold`.
///
/// An empty selection is an error rather than a NaN.
pub fn mean_where_greater(
    dataset: &Dataset,
    key: ColumnRole,
    threshold: f64,
    value: ColumnRole,
) -> Result<f64, AnalysisError> {
    let predicate = Predicate::GreaterThan(key, threshold);
    let selected = select_values(dataset, &predicate, value);
    let Some(m) = mean(&selected) else {
        log::warn!("no rows match {predicate}");
        return Err(AnalysisError::empty(format!("no rows with {predicate}")));
    };
    log::debug!(
        "mean of {value} over {} rows with {predicate} = {m}",
        selected.len()
    );
    Ok(m)
}

// ---------------------------------------------------------------------------
// Named queries
// ---------------------------------------------------------------------------

/// Average population in areas with more than `n` bedrooms.
pub fn avg_population_bedrooms_gt_n(dataset: &Dataset, n: f64) -> Result<f64, AnalysisError> {
    mean_where_greater(dataset, ColumnRole::TotalBedrooms, n, ColumnRole::Population)
}

/// Average house value in areas with more than `n` bedrooms.
pub fn avg_house_value_bedrooms_gt_n(dataset: &Dataset, n: f64) -> Result<f64, AnalysisError> {
    mean_where_greater(
        dataset,
        ColumnRole::TotalBedrooms,
        n,
        ColumnRole::MedianHouseValue,
    )
}

/// Average income in areas with more than `n` bedrooms.
pub fn avg_income_bedrooms_gt_n(dataset: &Dataset, n: f64) -> Result<f64, AnalysisError> {
    mean_where_greater(dataset, ColumnRole::TotalBedrooms, n, ColumnRole::MedianIncome)
}

/// Average income where the rooms count exceeds three.
///
/// The historical query reads the bedrooms column (position 4) as its rooms
/// measure; that addressing is kept so results stay comparable.
pub fn avg_income_rooms_gt_3(dataset: &Dataset) -> Result<f64, AnalysisError> {
    mean_where_greater(
        dataset,
        ColumnRole::TotalBedrooms,
        ROOMS_THRESHOLD,
        ColumnRole::MedianIncome,
    )
}

/// Average population over high-density areas (population > 1000).
pub fn avg_population_high_density(dataset: &Dataset) -> Result<f64, AnalysisError> {
    mean_where_greater(
        dataset,
        ColumnRole::Population,
        HIGH_DENSITY_POPULATION,
        ColumnRole::Population,
    )
}

/// Average house value over high-density areas (population > 1000).
pub fn avg_house_value_high_density(dataset: &Dataset) -> Result<f64, AnalysisError> {
    mean_where_greater(
        dataset,
        ColumnRole::Population,
        HIGH_DENSITY_POPULATION,
        ColumnRole::MedianHouseValue,
    )
}

/// `(income, population)` pairs for rows with income above `threshold`.
pub fn income_population_points(
    dataset: &Dataset,
    threshold: f64,
) -> Result<Vec<[f64; 2]>, AnalysisError> {
    let predicate = Predicate::GreaterThan(ColumnRole::MedianIncome, threshold);
    let income = ColumnRole::MedianIncome.index();
    let population = ColumnRole::Population.index();
    let points: Vec<[f64; 2]> = filtered_indices(dataset, &predicate)
        .into_iter()
        .map(|r| {
            let row = &dataset.rows[r];
            let cell = |i: usize| row.get(i).copied().unwrap_or(f64::NAN);
            [cell(income), cell(population)]
        })
        .collect();
    if points.is_empty() {
        return Err(AnalysisError::empty(format!("no rows with {predicate}")));
    }
    Ok(points)
}
