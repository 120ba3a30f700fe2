//! CSV Data Loader Module
//! Reads the team and match tables using Polars and normalizes their headers.

use crate::data::columns::{self, REQUIRED_MATCH_COLUMNS, REQUIRED_TEAM_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TEAM_FILE: &str = "Team.csv";
pub const DEFAULT_MATCH_FILE: &str = "Match.csv";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to parse CSV {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Failed to read CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} line {line}: {found} fields, header has {expected}", .path.display())]
    FieldCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("{} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Both source tables, headers already in canonical form.
#[derive(Debug, Clone)]
pub struct RawTables {
    pub teams: DataFrame,
    pub matches: DataFrame,
}

/// Handles CSV file loading with Polars.
pub struct DatasetLoader {
    data_dir: PathBuf,
    team_file: String,
    match_file: String,
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            team_file: DEFAULT_TEAM_FILE.to_string(),
            match_file: DEFAULT_MATCH_FILE.to_string(),
        }
    }

    pub fn with_file_names(mut self, team_file: &str, match_file: &str) -> Self {
        self.team_file = team_file.to_string();
        self.match_file = match_file.to_string();
        self
    }

    pub fn team_path(&self) -> PathBuf {
        self.data_dir.join(&self.team_file)
    }

    pub fn match_path(&self) -> PathBuf {
        self.data_dir.join(&self.match_file)
    }

    /// Load both tables. Either file missing or malformed aborts the load.
    pub fn load(&self) -> Result<RawTables, LoaderError> {
        let team_path = self.team_path();
        let match_path = self.match_path();

        // Check both up front so a missing match file is not masked by a
        // parse error in the team file.
        for path in [&team_path, &match_path] {
            if !path.is_file() {
                return Err(LoaderError::MissingFile(path.clone()));
            }
        }

        let teams = Self::load_csv(&team_path, &REQUIRED_TEAM_COLUMNS)?;
        let matches = Self::load_csv(&match_path, &REQUIRED_MATCH_COLUMNS)?;

        tracing::info!(
            teams = teams.height(),
            matches = matches.height(),
            "Loaded dataset from {}",
            self.data_dir.display()
        );

        Ok(RawTables { teams, matches })
    }

    /// Load a single CSV file and check that `required` columns are present.
    /// Every record must have as many fields as the header.
    pub fn load_csv(path: &Path, required: &[&'static str]) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::MissingFile(path.to_path_buf()));
        }
        Self::check_field_counts(path)?;

        let path_str = path.to_string_lossy().to_string();
        let mut df = LazyCsvReader::new(&path_str)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        columns::normalize_headers(&mut df).map_err(|source| LoaderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(column) = required
            .iter()
            .copied()
            .find(|name| !columns::has_column(&df, name))
        {
            return Err(LoaderError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }

        tracing::debug!(
            rows = df.height(),
            columns = df.width(),
            schema = ?df.schema(),
            "Read {}",
            path.display()
        );

        Ok(df)
    }

    /// Every record must be as wide as the header; polars would pad a short
    /// one with nulls.
    fn check_field_counts(path: &Path) -> Result<(), LoaderError> {
        let csv_error = |source: csv::Error| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(csv_error)?;
        let expected = reader.headers().map_err(csv_error)?.len();

        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            if record.len() != expected {
                return Err(LoaderError::FieldCount {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, |pos| pos.line()),
                    expected,
                    found: record.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    #[test]
    fn test_load_normalizes_headers() {
        let tables = DatasetLoader::new(fixtures().join("ipl")).load().unwrap();

        assert!(columns::has_column(&tables.teams, "team_id"));
        assert!(columns::has_column(&tables.teams, "short_code"));
        assert!(columns::has_column(&tables.matches, "team_id"));
        assert!(columns::has_column(&tables.matches, "is_duckworth_lewis"));
        assert_eq!(tables.teams.height(), 5);
        assert_eq!(tables.matches.height(), 12);
    }

    #[test]
    fn test_missing_file() {
        let loader = DatasetLoader::new(fixtures().join("does-not-exist"));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(path) if path.ends_with("Team.csv")));
    }

    #[test]
    fn test_missing_match_file_with_custom_names() {
        let loader =
            DatasetLoader::new(fixtures().join("ipl")).with_file_names("Team.csv", "Ball.csv");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(path) if path.ends_with("Ball.csv")));
    }

    #[test]
    fn test_short_record_is_rejected() {
        let err = DatasetLoader::new(fixtures().join("short_row"))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::FieldCount { line: 4, expected: 19, found: 14, .. }
        ));
    }

    #[test]
    fn test_long_record_is_rejected() {
        let err = DatasetLoader::new(fixtures().join("long_row"))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::FieldCount { line: 3, expected: 19, found: 20, .. }
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let err = DatasetLoader::new(fixtures().join("missing_column"))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingColumn { column: "match_winner_id", .. }
        ));
    }
}
