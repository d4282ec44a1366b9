use std::fmt;

use crate::analysis::aggregate::{
    avg_house_value_bedrooms_gt_n, avg_population_bedrooms_gt_n, avg_population_high_density,
    income_population_points,
};
use crate::analysis::group::average_income_by_bedrooms;
use crate::analysis::stats::{column_max, column_min, income_mean, mean, median};
use crate::analysis::AnalysisError;
use crate::data::model::{format_value, ColumnRole, Dataset};

/// Bins per histogram in the frequency figure.
pub const HISTOGRAM_BINS: usize = 30;

/// Lower bound for the top of the house-value axis.
const HOUSE_VALUE_AXIS_FLOOR: f64 = 400_000.0;

/// Columns shown in the minimum / maximum panels.
const EXTREMA_ROLES: [ColumnRole; 4] = [
    ColumnRole::TotalRooms,
    ColumnRole::Population,
    ColumnRole::Households,
    ColumnRole::MedianIncome,
];

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// One histogram bin, `[start, end)`; the last bin of a histogram is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar { labels: Vec<String>, values: Vec<f64> },
    Scatter { points: Vec<[f64; 2]> },
    Histogram { bins: Vec<Bin> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    /// Keep the y axis at least this tall.
    pub y_max: Option<f64>,
}

impl Chart {
    pub fn bar(title: impl Into<String>, y_label: impl Into<String>, bars: Vec<(String, f64)>) -> Self {
        let (labels, values) = bars.into_iter().unzip();
        Chart {
            title: title.into(),
            x_label: String::new(),
            y_label: y_label.into(),
            kind: ChartKind::Bar { labels, values },
            y_max: None,
        }
    }

    pub fn scatter(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: Vec<[f64; 2]>,
    ) -> Self {
        Chart {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            kind: ChartKind::Scatter { points },
            y_max: None,
        }
    }

    pub fn histogram(column: &str, values: &[f64]) -> Self {
        Chart {
            title: format!("Histogram of {column}"),
            x_label: column.to_string(),
            y_label: "Frequency".to_string(),
            kind: ChartKind::Histogram {
                bins: histogram(values, HISTOGRAM_BINS),
            },
            y_max: None,
        }
    }

    pub fn with_y_max(mut self, y_max: f64) -> Self {
        self.y_max = Some(y_max);
        self
    }
}

/// A window's worth of charts laid out in a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub charts: Vec<Chart>,
    /// Charts per grid row.
    pub columns: usize,
}

impl Figure {
    pub fn single(chart: Chart) -> Self {
        Figure {
            title: chart.title.clone(),
            charts: vec![chart],
            columns: 1,
        }
    }

    pub fn grid(title: impl Into<String>, charts: Vec<Chart>, columns: usize) -> Self {
        Figure {
            title: title.into(),
            charts,
            columns: columns.max(1),
        }
    }
}

// -- Console rendering --

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        match &self.kind {
            ChartKind::Bar { labels, values } => {
                for (label, value) in labels.iter().zip(values) {
                    writeln!(f, "  {label}: {}", format_value(*value))?;
                }
            }
            ChartKind::Scatter { points } => {
                writeln!(f, "  {} points ({} vs {})", points.len(), self.y_label, self.x_label)?;
                for [x, y] in points.iter().take(10) {
                    writeln!(f, "  ({}, {})", format_value(*x), format_value(*y))?;
                }
                if points.len() > 10 {
                    writeln!(f, "  ...")?;
                }
            }
            ChartKind::Histogram { bins } => {
                for bin in bins {
                    writeln!(f, "  [{}, {}): {}", bin.start, bin.end, bin.count)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        for chart in &self.charts {
            write!(f, "{chart}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins spanning the finite values' range.
///
/// Missing values are skipped. A constant column is centred in a unit-wide
/// range so its values still land in a bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let slot = (((v - lo) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Figures offered by the visualization menu
// ---------------------------------------------------------------------------

pub fn income_mean_figure(dataset: &Dataset) -> Result<Figure, AnalysisError> {
    let value = income_mean(dataset)?;
    Ok(Figure::single(Chart::bar(
        "Income Mean",
        "Income",
        vec![("Income Mean".to_string(), value)],
    )))
}

pub fn population_bedrooms_figure(dataset: &Dataset, n: f64) -> Result<Figure, AnalysisError> {
    let value = avg_population_bedrooms_gt_n(dataset, n)?;
    Ok(Figure::single(Chart::bar(
        format!("Average Population in Areas with Bedrooms > {n}"),
        "Population",
        vec![(format!("Avg Pop. in Bedrooms > {n}"), value)],
    )))
}

pub fn house_value_bedrooms_figure(dataset: &Dataset, n: f64) -> Result<Figure, AnalysisError> {
    let value = avg_house_value_bedrooms_gt_n(dataset, n)?;
    let chart = Chart::bar(
        format!("Average House Value in Areas with Bedrooms > {n}"),
        "Avg House Value",
        vec![(format!("Avg House Value in Bedrooms > {n}"), value)],
    )
    .with_y_max((value * 1.2).max(HOUSE_VALUE_AXIS_FLOOR));
    Ok(Figure::single(chart))
}

pub fn income_density_figure(dataset: &Dataset) -> Result<Figure, AnalysisError> {
    let income = income_mean(dataset)?;
    let population = avg_population_high_density(dataset)?;
    Ok(Figure::single(Chart::bar(
        "Income Mean and Avg Pop. in High Density Households",
        "Values",
        vec![
            ("Income Mean".to_string(), income),
            ("Avg Pop. in High Density Households".to_string(), population),
        ],
    )))
}

/// One histogram per column, three to a row.
pub fn frequency_figure(dataset: &Dataset) -> Result<Figure, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::empty("frequency histograms"));
    }
    let charts = (0..dataset.width())
        .map(|i| {
            let name = dataset
                .column_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("#{i}"));
            let values: Vec<f64> = dataset.column(i).collect();
            Chart::histogram(&name, &values)
        })
        .collect();
    Ok(Figure::grid("Frequencies", charts, 3))
}

pub fn income_vs_bedrooms_figure(dataset: &Dataset) -> Result<Figure, AnalysisError> {
    let grouped = average_income_by_bedrooms(dataset)?;
    Ok(Figure::single(Chart::scatter(
        "Average Income vs. Total Bedrooms",
        "Total Bedrooms",
        "Average Income",
        grouped.points(),
    )))
}

/// Minimum, maximum, median and mean panels.
///
/// Extrema cover rooms, population, households and income; median and mean
/// cover every column except the last two.
pub fn statistics_figure(dataset: &Dataset) -> Result<Figure, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::empty("statistics panels"));
    }

    let mut minima = Vec::with_capacity(EXTREMA_ROLES.len());
    let mut maxima = Vec::with_capacity(EXTREMA_ROLES.len());
    for role in EXTREMA_ROLES {
        let label = dataset.name_of(role).to_string();
        minima.push((label.clone(), column_min(dataset, role)?));
        maxima.push((label, column_max(dataset, role)?));
    }

    let leading = dataset.width().saturating_sub(2);
    let mut medians = Vec::with_capacity(leading);
    let mut means = Vec::with_capacity(leading);
    for i in 0..leading {
        let label = dataset
            .column_names
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("#{i}"));
        let values: Vec<f64> = dataset.column(i).collect();
        medians.push((label.clone(), median(&values).unwrap_or(f64::NAN)));
        means.push((label, mean(&values).unwrap_or(f64::NAN)));
    }

    Ok(Figure::grid(
        "Statistical Operations",
        vec![
            Chart::bar("Minimum Values", "Value", minima),
            Chart::bar("Maximum Values", "Value", maxima),
            Chart::bar("Median Values", "Value", medians),
            Chart::bar("Mean Values", "Value", means),
        ],
        1,
    ))
}

pub fn income_population_figure(dataset: &Dataset, threshold: f64) -> Result<Figure, AnalysisError> {
    let points = income_population_points(dataset, threshold)?;
    Ok(Figure::single(Chart::scatter(
        format!("Income vs Population for Areas with Income > {threshold}"),
        "Income per Household",
        "Population",
        points,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing() -> Dataset {
        Dataset::new(
            vec![
                vec![-122.0, 37.0, 41.0, 880.0, 129.0, 322.0, 126.0, 8.3, 452600.0],
                vec![-122.2, 37.8, 21.0, 7099.0, 1106.0, 2401.0, 1138.0, 8.3, 358500.0],
                vec![-122.3, 37.9, 52.0, 1467.0, 190.0, 496.0, 177.0, 7.2, 352100.0],
            ],
            [
                "longitude",
                "latitude",
                "housing_median_age",
                "total_rooms",
                "total_bedrooms",
                "population",
                "households",
                "median_income",
                "median_house_value",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }

    #[test]
    fn histogram_counts_every_value() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 10.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].end, 10.0);
    }

    #[test]
    fn histogram_of_constant_values() {
        let bins = histogram(&[4.0, 4.0], 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].start, 3.5);
        assert_eq!(bins[1].count, 2);
    }

    #[test]
    fn histogram_skips_missing() {
        let bins = histogram(&[f64::NAN, 1.0, 2.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(histogram(&[f64::NAN], 2).is_empty());
    }

    #[test]
    fn frequency_figure_has_chart_per_column() {
        let fig = frequency_figure(&housing()).unwrap();
        assert_eq!(fig.charts.len(), 9);
        assert_eq!(fig.columns, 3);
        assert_eq!(fig.charts[7].title, "Histogram of median_income");
    }

    #[test]
    fn statistics_figure_panels() {
        let fig = statistics_figure(&housing()).unwrap();
        assert_eq!(fig.charts.len(), 4);
        let ChartKind::Bar { labels, values } = &fig.charts[0].kind else {
            panic!("expected bars");
        };
        assert_eq!(labels[0], "total_rooms");
        assert_eq!(values[0], 880.0);
        let ChartKind::Bar { labels, .. } = &fig.charts[3].kind else {
            panic!("expected bars");
        };
        assert_eq!(labels.len(), 7);
    }

    #[test]
    fn house_value_axis_has_floor() {
        let fig = house_value_bedrooms_figure(&housing(), 1000.0).unwrap();
        assert_eq!(fig.charts[0].y_max, Some(358_500.0 * 1.2));

        let mut cheap = housing();
        for row in &mut cheap.rows {
            row[8] = 100_000.0;
        }
        let fig = house_value_bedrooms_figure(&cheap, 0.0).unwrap();
        assert_eq!(fig.charts[0].y_max, Some(400_000.0));
    }

    #[test]
    fn income_vs_bedrooms_uses_groups() {
        let fig = income_vs_bedrooms_figure(&housing()).unwrap();
        let ChartKind::Scatter { points } = &fig.charts[0].kind else {
            panic!("expected scatter");
        };
        assert_eq!(points[0], [129.0, 8.3]);
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn text_rendering_lists_bars() {
        let fig = income_mean_figure(&housing()).unwrap();
        let text = fig.to_string();
        assert!(text.contains("== Income Mean =="));
        assert!(text.contains("Income Mean: "));
    }
}
