//! Data Cleaner Module
//! Projects away unused columns and canonicalizes identifier columns.

use crate::data::columns::{self, *};
use crate::model::ids::{canonical_identifier, parse_identifier};
use polars::prelude::*;

/// Columns with no analytical use, or identifying individuals.
pub const DROPPED_COLUMNS: [&str; 5] = [
    IS_DUCKWORTH_LEWIS,
    FIRST_UMPIRE_ID,
    SECOND_UMPIRE_ID,
    MAN_OF_THE_MATCH_ID,
    MATCH_DATE,
];

/// Columns holding identifiers. They are stored as canonical text so they
/// never take part in numeric summaries.
pub const IDENTIFIER_COLUMNS: [&str; 6] = [
    MATCH_ID,
    TEAM_ID,
    OPPONENT_TEAM_ID,
    TOSS_WINNER_ID,
    SEASON_ID,
    MATCH_WINNER_ID,
];

/// Columns holding measurements. Missing markers such as `NULL`, and values
/// that are not whole non-negative numbers, become nulls so the column is
/// numeric.
pub const MEASURE_COLUMNS: [&str; 1] = [WON_BY];

/// Handles column projection and identifier normalization.
pub struct DataCleaner;

impl DataCleaner {
    /// Drop [`DROPPED_COLUMNS`], rewrite [`IDENTIFIER_COLUMNS`] as canonical
    /// strings and [`MEASURE_COLUMNS`] as integers.
    ///
    /// Never fails: a column polars refuses to rewrite is left as it was and
    /// a warning is logged. Cleaning an already clean frame returns it
    /// unchanged.
    pub fn clean(mut df: DataFrame) -> DataFrame {
        for name in DROPPED_COLUMNS {
            if !columns::has_column(&df, name) {
                continue;
            }
            if let Err(err) = df.drop_in_place(name) {
                tracing::warn!(column = name, "Could not drop column: {}", err);
            }
        }

        for name in IDENTIFIER_COLUMNS {
            if !columns::has_column(&df, name) {
                continue;
            }
            if let Err(err) = Self::canonicalize_identifiers(&mut df, name) {
                tracing::warn!(column = name, "Could not canonicalize identifiers: {}", err);
            }
        }

        for name in MEASURE_COLUMNS {
            if !columns::has_column(&df, name) {
                continue;
            }
            if let Err(err) = Self::coerce_measure(&mut df, name) {
                tracing::warn!(column = name, "Could not coerce column to numbers: {}", err);
            }
        }

        df
    }

    fn coerce_measure(df: &mut DataFrame, name: &str) -> PolarsResult<()> {
        let mut rejected = 0usize;
        let values: Vec<Option<i64>> = columns::text_values(df, name)?
            .iter()
            .map(|text| {
                let text = text.as_deref()?;
                let value = parse_identifier(text).map(i64::from);
                if value.is_none() {
                    rejected += 1;
                }
                value
            })
            .collect();

        if rejected > 0 {
            tracing::warn!(
                column = name,
                rejected,
                "Values that are not whole non-negative numbers were set to null"
            );
        }

        df.with_column(Column::new(name.into(), values))?;
        Ok(())
    }

    fn canonicalize_identifiers(df: &mut DataFrame, name: &str) -> PolarsResult<()> {
        let values: Vec<Option<String>> = columns::text_values(df, name)?
            .into_iter()
            .map(|text| text.map(|t| canonical_identifier(&t)))
            .collect();

        df.with_column(Column::new(name.into(), values))?;
        Ok(())
    }

    /// Names of the columns holding numeric data.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined_frame() -> DataFrame {
        df!(
            "match_id" => [335987i64, 335988],
            "match_date" => ["18-Apr-08", "19-Apr-08"],
            "team_id" => [1i64, 3],
            "opponent_team_id" => [2i64, 4],
            "toss_winner_id" => [2i64, 3],
            "season_id" => [1i64, 1],
            "match_winner_id" => [Some(1.0f64), None],
            "is_duckworth_lewis" => [0i64, 0],
            "first_umpire_id" => [470i64, 471],
            "second_umpire_id" => [477i64, 487],
            "man_of_the_match_id" => [2i64, 19],
            "won_by" => [140i64, 33],
            "team_name" => ["Kolkata Knight Riders", "Chennai Super Kings"],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_drops_sensitive_columns() {
        let cleaned = DataCleaner::clean(joined_frame());

        for name in DROPPED_COLUMNS {
            assert!(!columns::has_column(&cleaned, name), "{name} still present");
        }
        assert_eq!(cleaned.width(), 8);
        assert_eq!(cleaned.height(), 2);
    }

    #[test]
    fn test_clean_turns_identifiers_into_text() {
        let cleaned = DataCleaner::clean(joined_frame());

        for name in IDENTIFIER_COLUMNS {
            assert_eq!(cleaned.column(name).unwrap().dtype(), &DataType::String);
        }
        assert_eq!(
            columns::text_values(&cleaned, MATCH_WINNER_ID).unwrap(),
            vec![Some("1".to_string()), None]
        );
        assert_eq!(DataCleaner::numeric_columns(&cleaned), vec!["won_by".to_string()]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = DataCleaner::clean(joined_frame());
        let twice = DataCleaner::clean(once.clone());

        assert!(once.equals_missing(&twice));
        assert_eq!(once.get_column_names(), twice.get_column_names());
    }

    #[test]
    fn test_clean_makes_margins_numeric() {
        let df = df!("won_by" => ["140", "NULL", "9"]).unwrap();
        let cleaned = DataCleaner::clean(df);

        assert_eq!(cleaned.column(WON_BY).unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            columns::text_values(&cleaned, WON_BY).unwrap(),
            vec![Some("140".to_string()), None, Some("9".to_string())]
        );
        assert!(DataCleaner::clean(cleaned.clone()).equals_missing(&cleaned));
    }

    #[test]
    fn test_clean_nulls_fractional_and_negative_margins() {
        let df = df!("won_by" => ["7.5", "-3", "12.0", "NA"]).unwrap();
        let cleaned = DataCleaner::clean(df);

        assert_eq!(
            columns::text_values(&cleaned, WON_BY).unwrap(),
            vec![None, None, Some("12".to_string()), None]
        );

        let numeric = df!("won_by" => [Some(-4i64), Some(20), None]).unwrap();
        assert_eq!(
            columns::text_values(&DataCleaner::clean(numeric), WON_BY).unwrap(),
            vec![None, Some("20".to_string()), None]
        );
    }

    #[test]
    fn test_clean_tolerates_missing_columns() {
        let df = df!("city_name" => ["Mumbai"], "won_by" => [1i64]).unwrap();
        let cleaned = DataCleaner::clean(df.clone());
        assert!(cleaned.equals_missing(&df));
    }
}
