//! Statistics Calculator Module
//! Descriptive statistics for the numeric columns of the cleaned match frame.

use crate::data::DataCleaner;
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;

/// Summary of a single numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles descriptive statistics over frames.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize `values` under the name `column`.
    pub fn compute_descriptive_stats(column: &str, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::empty(column);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        ColumnSummary {
            column: column.to_string(),
            count: n,
            mean: Statistics::mean(values),
            // Sample standard deviation; statrs yields NaN for a single value.
            std: if n > 1 {
                Statistics::std_dev(values)
            } else {
                f64::NAN
            },
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Non-null values of a column as `f64`.
    pub fn column_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Describe every numeric column of `df`.
    pub fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
        DataCleaner::numeric_columns(df)
            .iter()
            .map(|column| {
                let values = Self::column_values(df, column)?;
                Ok(Self::compute_descriptive_stats(column, &values))
            })
            .collect()
    }
}

/// Column summaries laid out as a describe() table.
pub struct DescribeTable<'a>(pub &'a [ColumnSummary]);

impl fmt::Display for DescribeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}", "")?;
        for summary in self.0 {
            write!(f, "{:>14}", summary.column)?;
        }
        writeln!(f)?;

        let rows: [(&str, fn(&ColumnSummary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.p25),
            ("50%", |s| s.median),
            ("75%", |s| s.p75),
            ("max", |s| s.max),
        ];
        for (label, value) in rows {
            write!(f, "{:<8}", label)?;
            for summary in self.0 {
                write!(f, "{:>14.3}", value(summary))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_descriptive_stats() {
        let stats = StatsCalculator::compute_descriptive_stats("won_by", &[10.0, 75.0, 30.0, 5.0]);

        assert_eq!(stats.count, 4);
        assert!(close(stats.mean, 30.0));
        assert!(close(stats.min, 5.0));
        assert!(close(stats.max, 75.0));
        assert!(close(stats.median, 20.0));
        // NumPy: np.percentile([5, 10, 30, 75], 25) == 8.75
        assert!(close(stats.p25, 8.75));
        assert!(close(stats.p75, 41.25));
        assert!(close(stats.std, (3050.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_empty_and_single_value() {
        let empty = StatsCalculator::compute_descriptive_stats("x", &[]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());

        let single = StatsCalculator::compute_descriptive_stats("x", &[7.0]);
        assert_eq!(single.count, 1);
        assert!(close(single.median, 7.0));
        assert!(single.std.is_nan());
    }

    #[test]
    fn test_describe_skips_text_and_nulls() {
        let df = df!(
            "team_name" => ["MI", "CSK", "RCB"],
            "won_by" => [Some(10i64), None, Some(30)],
        )
        .unwrap();

        let summaries = StatsCalculator::describe(&df).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].column, "won_by");
        assert_eq!(summaries[0].count, 2);
        assert!(close(summaries[0].mean, 20.0));

        let table = DescribeTable(&summaries).to_string();
        assert!(table.contains("won_by"));
        assert!(table.contains("count"));
    }
}
