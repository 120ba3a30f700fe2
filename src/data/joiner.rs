//! Team Joiner Module
//! Attaches team names to match rows with an inner-equality join on the team key.

use crate::data::columns::{self, SHORT_CODE, TEAM_NAME};
use crate::model::ids::parse_identifier;
use clap::ValueEnum;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Join key '{key}' is missing from the {table} table")]
    MissingKey { key: String, table: &'static str },
    #[error("Team id {team_id} appears more than once in the team table")]
    DuplicateTeamKey { team_id: String },
    #[error("{count} match rows reference unknown team ids: {}", .team_ids.join(", "))]
    UnmatchedTeams { count: usize, team_ids: Vec<String> },
}

/// What happens to match rows whose team id has no row in the team table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Drop the rows; they are still counted in the report.
    Drop,
    /// Drop the rows and log each unknown team id.
    #[default]
    Warn,
    /// Fail the join.
    Reject,
}

/// Completeness summary of a join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub matched: usize,
    pub dropped: usize,
    pub unmatched_team_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub frame: DataFrame,
    pub report: JoinReport,
}

/// Join `matches` with `teams` on `key`.
///
/// Both key columns are rewritten to canonical `Int64` values first, so an
/// integer-typed key on one side joins with a string-typed key on the other.
/// A team id repeated in `teams` is an error, so no match row is duplicated.
pub fn join(
    matches: &DataFrame,
    teams: &DataFrame,
    key: &str,
    policy: UnmatchedPolicy,
) -> Result<JoinOutcome, JoinError> {
    for (df, table) in [(matches, "match"), (teams, "team")] {
        if !columns::has_column(df, key) {
            return Err(JoinError::MissingKey {
                key: key.to_string(),
                table,
            });
        }
    }

    let left = with_canonical_key(matches, key)?;

    let mut team_columns = vec![key, TEAM_NAME];
    if columns::has_column(teams, SHORT_CODE) {
        team_columns.push(SHORT_CODE);
    }
    let right = with_canonical_key(&teams.select(team_columns)?, key)?;

    // Each match row must find at most one team row.
    let mut seen = HashSet::new();
    if let Some(team_id) = columns::text_values(&right, key)?
        .into_iter()
        .flatten()
        .find(|id| !seen.insert(id.clone()))
    {
        return Err(JoinError::DuplicateTeamKey { team_id });
    }

    let joined = left
        .lazy()
        .join(
            right.lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    let keys = columns::text_values(&joined, key)?;
    let names = columns::text_values(&joined, TEAM_NAME)?;

    let mut unmatched_team_ids: Vec<String> = Vec::new();
    let mut dropped = 0;
    for (row, name) in names.iter().enumerate() {
        if name.is_some() {
            continue;
        }
        dropped += 1;
        let id = keys[row]
            .clone()
            .unwrap_or_else(|| "<invalid>".to_string());
        if !unmatched_team_ids.contains(&id) {
            unmatched_team_ids.push(id);
        }
    }

    match policy {
        UnmatchedPolicy::Reject if dropped > 0 => {
            return Err(JoinError::UnmatchedTeams {
                count: dropped,
                team_ids: unmatched_team_ids,
            });
        }
        UnmatchedPolicy::Warn => {
            for id in &unmatched_team_ids {
                tracing::warn!(team_id = %id, "Match rows reference an unknown team; dropped");
            }
        }
        _ => {}
    }

    let frame = joined
        .lazy()
        .filter(col(TEAM_NAME).is_not_null())
        .collect()?;

    let report = JoinReport {
        matched: frame.height(),
        dropped,
        unmatched_team_ids,
    };
    tracing::info!(
        matched = report.matched,
        dropped = report.dropped,
        "Joined match rows with team names"
    );

    Ok(JoinOutcome { frame, report })
}

/// Copy of `df` with `key` rewritten as canonical `Int64` identifiers.
/// Cells that are not valid identifiers become null and never match.
fn with_canonical_key(df: &DataFrame, key: &str) -> PolarsResult<DataFrame> {
    let ids: Vec<Option<i64>> = columns::text_values(df, key)?
        .iter()
        .map(|text| text.as_deref().and_then(parse_identifier).map(i64::from))
        .collect();

    let mut out = df.clone();
    out.with_column(Column::new(key.into(), ids))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> DataFrame {
        df!(
            "team_id" => [1i64, 2],
            "team_name" => ["MI", "CSK"],
            "short_code" => ["MI", "CSK"],
        )
        .unwrap()
    }

    fn matches() -> DataFrame {
        df!(
            "match_id" => [101i64, 101, 102],
            "team_id" => ["1", "2.0", "9"],
            "opponent_team_id" => [2i64, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_join_normalizes_key_types() {
        let outcome = join(&matches(), &teams(), "team_id", UnmatchedPolicy::Drop).unwrap();

        assert_eq!(outcome.frame.height(), 2);
        assert_eq!(outcome.frame.column("team_id").unwrap().dtype(), &DataType::Int64);
        let mut names = columns::text_values(&outcome.frame, TEAM_NAME).unwrap();
        names.sort();
        assert_eq!(names, vec![Some("CSK".to_string()), Some("MI".to_string())]);
    }

    #[test]
    fn test_join_reports_dropped_rows() {
        let outcome = join(&matches(), &teams(), "team_id", UnmatchedPolicy::Warn).unwrap();

        assert_eq!(
            outcome.report,
            JoinReport {
                matched: 2,
                dropped: 1,
                unmatched_team_ids: vec!["9".to_string()],
            }
        );
    }

    #[test]
    fn test_join_reject_policy_fails() {
        let err = join(&matches(), &teams(), "team_id", UnmatchedPolicy::Reject).unwrap_err();
        assert!(matches!(err, JoinError::UnmatchedTeams { count: 1, .. }));
    }

    #[test]
    fn test_join_reject_policy_passes_complete_data() {
        let complete = df!(
            "match_id" => [101i64],
            "team_id" => [2i64],
        )
        .unwrap();

        let outcome = join(&complete, &teams(), "team_id", UnmatchedPolicy::Reject).unwrap();
        assert_eq!(outcome.report.dropped, 0);
        assert_eq!(outcome.frame.height(), 1);
    }

    #[test]
    fn test_join_rejects_repeated_team_id() {
        let repeated = df!(
            "team_id" => ["1", "2", "1.0"],
            "team_name" => ["MI", "CSK", "Mumbai"],
        )
        .unwrap();

        let err = join(&matches(), &repeated, "team_id", UnmatchedPolicy::Drop).unwrap_err();
        assert!(matches!(err, JoinError::DuplicateTeamKey { team_id } if team_id == "1"));
    }

    #[test]
    fn test_join_missing_key() {
        let no_key = df!("match_id" => [1i64]).unwrap();
        let err = join(&no_key, &teams(), "team_id", UnmatchedPolicy::Drop).unwrap_err();
        assert!(matches!(err, JoinError::MissingKey { table: "match", .. }));
    }
}
