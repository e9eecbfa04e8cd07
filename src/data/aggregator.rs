//! Year-Range Aggregator Module
//! Truncates observation dates to years and reduces them to per-year means.

use polars::prelude::*;
use thiserror::Error;

use super::loader::{DATE_COL, TEMPERATURE_COL, UNCERTAINTY_COL};

const YEAR_COL: &str = "year";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Series misaligned: {temperatures} temperature years vs {uncertainties} uncertainty years")]
    MisalignedSeries {
        temperatures: usize,
        uncertainties: usize,
    },
}

/// Inclusive year range selected for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of years covered; zero when the range is inverted.
    pub fn span(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start + 1) as usize
        }
    }
}

/// Per-year means, ascending by year.
///
/// Years without any observation in range are absent from the series; a year
/// whose observations are all null carries a NAN mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualSeries {
    pub years: Vec<i32>,
    pub means: Vec<f64>,
}

impl AnnualSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.means.iter().copied())
    }
}

/// Index-aligned annual temperature and uncertainty series for one range.
#[derive(Debug, Clone)]
pub struct AnnualReport {
    pub range: YearRange,
    pub temperature: AnnualSeries,
    pub uncertainty: AnnualSeries,
}

/// Group-by-year mean reduction over a date-filtered observation table.
pub struct YearAggregator;

impl YearAggregator {
    /// Mean of `column` per observation year within `range`, ascending by year.
    ///
    /// Missing-value policy: null values are excluded from a year's mean; a
    /// year whose in-range values are all null stays in the output with a NAN
    /// mean. An inverted range selects nothing and yields an empty series.
    pub fn annual_mean(
        df: &DataFrame,
        column: &str,
        range: YearRange,
    ) -> Result<AnnualSeries, AggregateError> {
        let grouped = df
            .clone()
            .lazy()
            .select([col(DATE_COL).dt().year().alias(YEAR_COL), col(column)])
            .filter(
                col(YEAR_COL)
                    .gt_eq(lit(range.start))
                    .and(col(YEAR_COL).lt_eq(lit(range.end))),
            )
            .group_by([col(YEAR_COL)])
            .agg([col(column).mean()])
            .sort([YEAR_COL], Default::default())
            .collect()?;

        let years = grouped.column(YEAR_COL)?.i32()?;
        let means = grouped.column(column)?.f64()?;

        let mut series = AnnualSeries {
            years: Vec::with_capacity(years.len()),
            means: Vec::with_capacity(years.len()),
        };
        for (year, mean) in years.into_iter().zip(means) {
            if let Some(year) = year {
                series.years.push(year);
                series.means.push(mean.unwrap_or(f64::NAN));
            }
        }

        log::debug!(
            "aggregated {} years of '{}' in [{}, {}]",
            series.len(),
            column,
            range.start,
            range.end
        );
        Ok(series)
    }

    /// Temperature and uncertainty series for `range`, computed in parallel
    /// and checked for year alignment before being combined.
    pub fn annual_report(df: &DataFrame, range: YearRange) -> Result<AnnualReport, AggregateError> {
        let (temperature, uncertainty) = rayon::join(
            || Self::annual_mean(df, TEMPERATURE_COL, range),
            || Self::annual_mean(df, UNCERTAINTY_COL, range),
        );
        let temperature = temperature?;
        let uncertainty = uncertainty?;

        if temperature.years != uncertainty.years {
            return Err(AggregateError::MisalignedSeries {
                temperatures: temperature.len(),
                uncertainties: uncertainty.len(),
            });
        }

        Ok(AnnualReport {
            range,
            temperature,
            uncertainty,
        })
    }

    /// Min and max observation year over the whole table, `None` when empty.
    pub fn year_bounds(df: &DataFrame) -> Result<Option<YearRange>, AggregateError> {
        let bounds = df
            .clone()
            .lazy()
            .select([
                col(DATE_COL).dt().year().min().alias("min"),
                col(DATE_COL).dt().year().max().alias("max"),
            ])
            .collect()?;

        let min = bounds.column("min")?.i32()?.get(0);
        let max = bounds.column("max")?.i32()?.get(0);
        Ok(match (min, max) {
            (Some(start), Some(end)) => Some(YearRange::new(start, end)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::df;
    use polars::prelude::DataFrame;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(rows: &[(NaiveDate, Option<f64>, Option<f64>)]) -> DataFrame {
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.0).collect();
        let temps: Vec<Option<f64>> = rows.iter().map(|r| r.1).collect();
        let uncs: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
        df!(
            DATE_COL => dates,
            TEMPERATURE_COL => temps,
            UNCERTAINTY_COL => uncs,
        )
        .unwrap()
    }

    #[test]
    fn one_observation_per_year() {
        let df = table(&[
            (date(2000, 6, 1), Some(10.0), Some(1.0)),
            (date(2001, 6, 1), Some(12.0), Some(1.0)),
            (date(2002, 6, 1), Some(14.0), Some(1.0)),
        ]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2000, 2002)).unwrap();

        assert_eq!(series.years, vec![2000, 2001, 2002]);
        assert_eq!(series.means, vec![10.0, 12.0, 14.0]);
    }

    #[test]
    fn same_year_observations_are_averaged() {
        let df = table(&[
            (date(2000, 1, 1), Some(10.0), Some(0.5)),
            (date(2000, 7, 15), Some(20.0), Some(1.5)),
        ]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2000, 2000)).unwrap();

        assert_eq!(series.years, vec![2000]);
        assert_eq!(series.means, vec![15.0]);
    }

    #[test]
    fn missing_year_leaves_a_gap() {
        let df = table(&[
            (date(2000, 6, 1), Some(10.0), Some(1.0)),
            (date(2002, 6, 1), Some(14.0), Some(1.0)),
        ]);

        let range = YearRange::new(2000, 2002);
        let series = YearAggregator::annual_mean(&df, TEMPERATURE_COL, range).unwrap();

        assert_eq!(series.years, vec![2000, 2002]);
        assert!(series.len() <= range.span());
    }

    #[test]
    fn rows_outside_range_are_ignored() {
        let df = table(&[
            (date(1950, 6, 1), Some(-5.0), Some(1.0)),
            (date(2000, 6, 1), Some(10.0), Some(1.0)),
            (date(2050, 6, 1), Some(30.0), Some(1.0)),
        ]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2000, 2010)).unwrap();

        assert_eq!(series.years, vec![2000]);
        assert_eq!(series.means, vec![10.0]);
    }

    #[test]
    fn inverted_range_yields_empty_series() {
        let df = table(&[(date(2000, 6, 1), Some(10.0), Some(1.0))]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2002, 2000)).unwrap();

        assert!(series.is_empty());
        assert_eq!(YearRange::new(2002, 2000).span(), 0);
    }

    #[test]
    fn empty_table_yields_empty_series() {
        let df = table(&[]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(1900, 2000)).unwrap();

        assert!(series.is_empty());
    }

    #[test]
    fn null_values_are_excluded_from_the_mean() {
        let df = table(&[
            (date(2000, 1, 1), Some(10.0), Some(1.0)),
            (date(2000, 6, 1), None, Some(1.0)),
            (date(2000, 12, 1), Some(20.0), Some(1.0)),
        ]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2000, 2000)).unwrap();

        assert_eq!(series.means, vec![15.0]);
    }

    #[test]
    fn all_null_year_keeps_its_slot_with_nan() {
        let df = table(&[
            (date(2000, 1, 1), None, Some(1.0)),
            (date(2001, 1, 1), Some(5.0), Some(1.0)),
        ]);

        let series =
            YearAggregator::annual_mean(&df, TEMPERATURE_COL, YearRange::new(2000, 2001)).unwrap();

        assert_eq!(series.years, vec![2000, 2001]);
        assert!(series.means[0].is_nan());
        assert_eq!(series.means[1], 5.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let df = table(&[
            (date(2000, 3, 1), Some(10.0), Some(1.0)),
            (date(2001, 9, 1), Some(12.0), Some(2.0)),
        ]);
        let range = YearRange::new(2000, 2001);

        let first = YearAggregator::annual_mean(&df, TEMPERATURE_COL, range).unwrap();
        let second = YearAggregator::annual_mean(&df, TEMPERATURE_COL, range).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn report_series_cover_identical_years() {
        let df = table(&[
            (date(2000, 6, 1), Some(10.0), Some(1.0)),
            (date(2001, 6, 1), Some(12.0), Some(2.0)),
            (date(2003, 6, 1), Some(13.0), Some(0.5)),
        ]);

        let report = YearAggregator::annual_report(&df, YearRange::new(2000, 2003)).unwrap();

        assert_eq!(report.temperature.years, report.uncertainty.years);
        assert_eq!(report.temperature.years, vec![2000, 2001, 2003]);
        assert_eq!(report.uncertainty.means, vec![1.0, 2.0, 0.5]);
    }

    #[test]
    fn year_bounds_span_the_table() {
        let df = table(&[
            (date(1850, 1, 1), Some(7.0), Some(3.0)),
            (date(2013, 9, 1), Some(9.0), Some(0.2)),
        ]);

        let bounds = YearAggregator::year_bounds(&df).unwrap();
        assert_eq!(bounds, Some(YearRange::new(1850, 2013)));

        let empty = table(&[]);
        assert_eq!(YearAggregator::year_bounds(&empty).unwrap(), None);
    }
}
