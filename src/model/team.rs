//! Team reference table, keyed by `TeamId`.

use crate::data::columns::{self, SHORT_CODE, TEAM_ID, TEAM_NAME};
use crate::model::ids::TeamId;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Team id {0} appears more than once in the team table")]
    DuplicateTeamId(TeamId),
    #[error("Row {row}: invalid value {value:?} in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub team_id: TeamId,
    pub team_name: String,
    pub short_code: Option<String>,
}

/// Team rows stored in an arena with an explicit id index.
///
/// Lookups always go through the index; row order in the source file
/// carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct TeamTable {
    teams: Vec<Team>,
    index: HashMap<TeamId, usize>,
}

impl TeamTable {
    pub fn new(teams: Vec<Team>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(teams.len());
        for (position, team) in teams.iter().enumerate() {
            if index.insert(team.team_id, position).is_some() {
                return Err(TableError::DuplicateTeamId(team.team_id));
            }
        }
        Ok(Self { teams, index })
    }

    /// Build the table from a header-normalized team frame.
    pub fn from_frame(df: &DataFrame) -> Result<Self, TableError> {
        let ids = columns::text_values(df, TEAM_ID)?;
        let names = columns::text_values(df, TEAM_NAME)?;
        let codes = if columns::has_column(df, SHORT_CODE) {
            columns::text_values(df, SHORT_CODE)?
        } else {
            vec![None; df.height()]
        };

        let teams = ids
            .into_iter()
            .zip(names)
            .zip(codes)
            .enumerate()
            .map(|(row, ((id, name), short_code))| {
                let team_id = id
                    .as_deref()
                    .and_then(|text| text.parse::<TeamId>().ok())
                    .ok_or_else(|| TableError::InvalidValue {
                        row,
                        column: TEAM_ID,
                        value: id.clone(),
                    })?;
                let team_name = name.ok_or(TableError::InvalidValue {
                    row,
                    column: TEAM_NAME,
                    value: None,
                })?;
                Ok(Team {
                    team_id,
                    team_name,
                    short_code,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Self::new(teams)
    }

    pub fn get(&self, team_id: TeamId) -> Option<&Team> {
        self.index.get(&team_id).map(|&position| &self.teams[position])
    }

    pub fn name_of(&self, team_id: TeamId) -> Option<&str> {
        self.get(team_id).map(|team| team.team_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
