//! Typed match rows.

use crate::data::columns::{self, *};
use crate::model::ids::{parse_identifier, MatchId, SeasonId, TeamId};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// How a match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinType {
    ByRuns,
    ByWickets,
    Tie,
    NoResult,
}

impl WinType {
    pub fn label(self) -> &'static str {
        match self {
            WinType::ByRuns => "by runs",
            WinType::ByWickets => "by wickets",
            WinType::Tie => "Tie",
            WinType::NoResult => "No Result",
        }
    }
}

impl FromStr for WinType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "byruns" | "runs" => Ok(WinType::ByRuns),
            "bywickets" | "wickets" => Ok(WinType::ByWickets),
            "tie" | "tied" => Ok(WinType::Tie),
            "noresult" => Ok(WinType::NoResult),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for WinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One team's perspective of a played match, joined with its team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedMatch {
    pub match_id: MatchId,
    pub team_id: TeamId,
    pub opponent_team_id: TeamId,
    pub toss_winner_id: Option<TeamId>,
    pub match_winner_id: Option<TeamId>,
    pub season_id: SeasonId,
    pub city_name: Option<String>,
    pub win_type: WinType,
    pub won_by: Option<u32>,
    pub team_name: String,
    pub short_code: Option<String>,
}

/// Column cursor over a cleaned frame.
struct Cells {
    values: Vec<Option<String>>,
    column: &'static str,
}

impl Cells {
    fn read(df: &DataFrame, column: &'static str) -> Result<Self, RecordError> {
        Ok(Self {
            values: columns::text_values(df, column)?,
            column,
        })
    }

    fn optional(df: &DataFrame, column: &'static str) -> Result<Self, RecordError> {
        if columns::has_column(df, column) {
            Self::read(df, column)
        } else {
            Ok(Self {
                values: vec![None; df.height()],
                column,
            })
        }
    }

    fn text(&self, row: usize) -> Option<String> {
        self.values.get(row).cloned().flatten()
    }

    fn parsed<T: FromStr>(&self, row: usize) -> Result<Option<T>, RecordError> {
        match self.values.get(row).and_then(|v| v.as_deref()) {
            None => Ok(None),
            Some(text) => text.parse::<T>().map(Some).map_err(|_| RecordError::InvalidValue {
                row,
                column: self.column,
                value: text.to_string(),
            }),
        }
    }

    /// A whole non-negative number; `"12.0"` is accepted, `"7.5"` and `"-3"`
    /// are not.
    fn count(&self, row: usize) -> Result<Option<u32>, RecordError> {
        match self.values.get(row).and_then(|v| v.as_deref()) {
            None => Ok(None),
            Some(text) => parse_identifier(text)
                .map(Some)
                .ok_or_else(|| RecordError::InvalidValue {
                    row,
                    column: self.column,
                    value: text.to_string(),
                }),
        }
    }

    fn required<T: FromStr>(&self, row: usize) -> Result<T, RecordError> {
        self.parsed(row)?.ok_or(RecordError::MissingValue {
            row,
            column: self.column,
        })
    }
}

impl EnrichedMatch {
    /// Convert a joined and cleaned frame into typed rows, ordered by
    /// `(match_id, team_id)`.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<Self>, RecordError> {
        let match_ids = Cells::read(df, MATCH_ID)?;
        let team_ids = Cells::read(df, TEAM_ID)?;
        let opponents = Cells::read(df, OPPONENT_TEAM_ID)?;
        let toss_winners = Cells::read(df, TOSS_WINNER_ID)?;
        let match_winners = Cells::read(df, MATCH_WINNER_ID)?;
        let seasons = Cells::read(df, SEASON_ID)?;
        let cities = Cells::read(df, CITY_NAME)?;
        let win_types = Cells::read(df, WIN_TYPE)?;
        let margins = Cells::read(df, WON_BY)?;
        let team_names = Cells::read(df, TEAM_NAME)?;
        let short_codes = Cells::optional(df, SHORT_CODE)?;

        let mut rows = (0..df.height())
            .map(|row| {
                Ok(EnrichedMatch {
                    match_id: match_ids.required(row)?,
                    team_id: team_ids.required(row)?,
                    opponent_team_id: opponents.required(row)?,
                    toss_winner_id: toss_winners.parsed(row)?,
                    match_winner_id: match_winners.parsed(row)?,
                    season_id: seasons.required(row)?,
                    city_name: cities.text(row),
                    win_type: win_types.required(row)?,
                    won_by: margins.count(row)?,
                    team_name: team_names.text(row).ok_or(RecordError::MissingValue {
                        row,
                        column: TEAM_NAME,
                    })?,
                    short_code: short_codes.text(row),
                })
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        rows.sort_by_key(|m| (m.match_id, m.team_id));
        Ok(rows)
    }
}

/// Outcome of a match from one row's perspective.
///
/// No-result and tied matches are a distinct variant, never a placeholder
/// team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "team", rename_all = "snake_case")]
pub enum WinnerOutcome {
    OwnTeam(String),
    Opponent(String),
    NoResultOrTie,
}

impl WinnerOutcome {
    pub fn winner_name(&self) -> Option<&str> {
        match self {
            WinnerOutcome::OwnTeam(name) | WinnerOutcome::Opponent(name) => Some(name),
            WinnerOutcome::NoResultOrTie => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMatch {
    #[serde(flatten)]
    pub row: EnrichedMatch,
    pub outcome: WinnerOutcome,
}

impl ResolvedMatch {
    pub fn winner_team_name(&self) -> Option<&str> {
        self.outcome.winner_name()
    }
}
