use super::error::AnalysisError;
use super::stats::mean;
use crate::data::filter::{same_value, select_values, Predicate};
use crate::data::model::{ColumnRole, Dataset};

/// Distinct group values with the mean of another column per group.
///
/// The three vectors are parallel and ordered by ascending group value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedAverages {
    pub groups: Vec<f64>,
    pub averages: Vec<f64>,
    pub counts: Vec<usize>,
}

impl GroupedAverages {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `(group, average)` pairs, ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.groups
            .iter()
            .zip(&self.averages)
            .map(|(&g, &a)| [g, a])
            .collect()
    }
}

/// Group rows by the exact value of `group` and average `value` per group.
///
/// Grouping uses floating-point equality without tolerance, so values that
/// differ only by representation noise form separate groups.
///
/// Missing group values depart from plain `==`: every NaN key, whatever its
/// sign bit, matches every other NaN key, so those rows form one trailing NaN
/// group with a real average instead of an empty group per row.
pub fn average_value_by_group(
    dataset: &Dataset,
    group: ColumnRole,
    value: ColumnRole,
) -> Result<GroupedAverages, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::empty(format!("{value} grouped by {group}")));
    }

    // One positive NaN for every missing key, so it sorts last and dedups.
    let canonical_nan = f64::NAN.copysign(1.0);
    let mut groups: Vec<f64> = dataset
        .role(group)
        .map(|k| if k.is_nan() { canonical_nan } else { k })
        .collect();
    groups.sort_by(f64::total_cmp);
    groups.dedup_by(|a, b| same_value(*a, *b));

    let mut averages = Vec::with_capacity(groups.len());
    let mut counts = Vec::with_capacity(groups.len());
    for &g in &groups {
        let selected = select_values(dataset, &Predicate::Equals(group, g), value);
        averages.push(mean(&selected).unwrap_or(f64::NAN));
        counts.push(selected.len());
    }

    log::debug!("{} distinct {group} groups", groups.len());
    Ok(GroupedAverages {
        groups,
        averages,
        counts,
    })
}

/// Average median income per distinct total-bedrooms value.
pub fn average_income_by_bedrooms(dataset: &Dataset) -> Result<GroupedAverages, AnalysisError> {
    average_value_by_group(dataset, ColumnRole::TotalBedrooms, ColumnRole::MedianIncome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(f64, f64)]) -> Dataset {
        let rows = pairs
            .iter()
            .map(|&(bedrooms, income)| {
                vec![0.0, 0.0, 0.0, 0.0, bedrooms, 0.0, 0.0, income, 0.0]
            })
            .collect();
        Dataset::new(rows, Vec::new())
    }

    #[test]
    fn groups_are_sorted_and_distinct() {
        let ds = rows(&[(5.0, 8.0), (3.0, 5.0), (5.0, 4.0), (1.0, 1.0)]);
        let g = average_income_by_bedrooms(&ds).unwrap();
        assert_eq!(g.groups, vec![1.0, 3.0, 5.0]);
        assert_eq!(g.averages, vec![1.0, 5.0, 6.0]);
        assert_eq!(g.counts.iter().sum::<usize>(), ds.len());
    }

    #[test]
    fn nearly_equal_values_stay_separate() {
        let ds = rows(&[(0.1 + 0.2, 1.0), (0.3, 3.0)]);
        let g = average_income_by_bedrooms(&ds).unwrap();
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn missing_group_values_form_last_group() {
        let ds = rows(&[(f64::NAN, 2.0), (2.0, 4.0), (f64::NAN, 6.0)]);
        let g = average_income_by_bedrooms(&ds).unwrap();
        assert_eq!(g.groups.len(), 2);
        assert!(g.groups[1].is_nan());
        assert_eq!(g.averages, vec![4.0, 4.0]);
        assert_eq!(g.counts, vec![1, 2]);
    }

    #[test]
    fn nan_sign_does_not_split_the_nan_group() {
        let ds = rows(&[(-f64::NAN, 100.0), (2.0, 4.0), (f64::NAN, 6.0)]);
        let g = average_income_by_bedrooms(&ds).unwrap();
        assert_eq!(g.groups.len(), 2);
        assert_eq!(g.groups[0], 2.0);
        assert!(g.groups[1].is_nan());
        assert_eq!(g.averages, vec![4.0, 53.0]);
        assert_eq!(g.counts, vec![1, 2]);
    }

    #[test]
    fn signed_zeros_share_a_group() {
        let ds = rows(&[(-0.0, 2.0), (0.0, 4.0)]);
        let g = average_income_by_bedrooms(&ds).unwrap();
        assert_eq!(g.counts, vec![2]);
    }

    #[test]
    fn empty_table_is_an_error() {
        let ds = rows(&[]);
        assert!(average_income_by_bedrooms(&ds).is_err());
    }
}
