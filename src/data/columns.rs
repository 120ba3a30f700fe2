//! Column Naming Module
//! Canonical column names, header normalization and cell text extraction.

use polars::prelude::*;

pub const TEAM_ID: &str = "team_id";
pub const TEAM_NAME: &str = "team_name";
pub const SHORT_CODE: &str = "short_code";

pub const MATCH_ID: &str = "match_id";
pub const OPPONENT_TEAM_ID: &str = "opponent_team_id";
pub const TOSS_WINNER_ID: &str = "toss_winner_id";
pub const MATCH_WINNER_ID: &str = "match_winner_id";
pub const SEASON_ID: &str = "season_id";
pub const CITY_NAME: &str = "city_name";
pub const WIN_TYPE: &str = "win_type";
pub const WON_BY: &str = "won_by";

pub const MATCH_DATE: &str = "match_date";
pub const IS_DUCKWORTH_LEWIS: &str = "is_duckworth_lewis";
pub const FIRST_UMPIRE_ID: &str = "first_umpire_id";
pub const SECOND_UMPIRE_ID: &str = "second_umpire_id";
pub const MAN_OF_THE_MATCH_ID: &str = "man_of_the_match_id";

pub const REQUIRED_TEAM_COLUMNS: [&str; 2] = [TEAM_ID, TEAM_NAME];

pub const REQUIRED_MATCH_COLUMNS: [&str; 9] = [
    MATCH_ID,
    TEAM_ID,
    OPPONENT_TEAM_ID,
    TOSS_WINNER_ID,
    MATCH_WINNER_ID,
    SEASON_ID,
    CITY_NAME,
    WIN_TYPE,
    WON_BY,
];

/// Cell values that stand for "no value" in exported CSVs.
const MISSING_MARKERS: [&str; 5] = ["", "NULL", "NA", "NAN", "NONE"];

/// Map a raw CSV header onto its canonical snake_case name.
///
/// The match table keys its team as `Team_Name_Id` while the team table uses
/// `Team_Id`; both fold into `team_id` so the join key never depends on a
/// manual rename.
pub fn canonical_name(raw: &str) -> String {
    let snake: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '.' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    match snake.as_str() {
        "team_name_id" | "teamid" => TEAM_ID.to_string(),
        "team_short_code" => SHORT_CODE.to_string(),
        "is_duckworthlewis" => IS_DUCKWORTH_LEWIS.to_string(),
        _ => snake,
    }
}

/// Rename every column of `df` to its canonical name.
pub fn normalize_headers(df: &mut DataFrame) -> PolarsResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for name in names {
        let canonical = canonical_name(&name);
        if canonical != name {
            df.rename(&name, canonical.as_str().into())?;
        }
    }
    Ok(())
}

/// Whether `df` has a column called `name`.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Text of a single cell, or `None` when the cell is null or a missing marker.
pub fn cell_text(value: &AnyValue) -> Option<String> {
    if value.is_null() {
        return None;
    }

    let rendered = value.to_string();
    let text = rendered.trim_matches('"').trim();
    if MISSING_MARKERS.contains(&text.to_ascii_uppercase().as_str()) {
        None
    } else {
        Some(text.to_string())
    }
}

/// All cells of column `name` as text.
pub fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    (0..df.height())
        .map(|i| column.get(i).map(|value| cell_text(&value)))
        .collect()
}
