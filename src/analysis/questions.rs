//! The five fixed questions asked of the dataset.

use crate::analysis::aggregator::{Aggregator, Extreme};
use crate::data::JoinReport;
use crate::model::{ResolvedMatch, WinType};
use serde::Serialize;
use std::fmt;

/// Margin below which a win batting first counts as a close match.
pub const DEFAULT_CLOSE_MARGIN: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargestMargin {
    pub team: String,
    pub runs: u32,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub rows: usize,
    pub join: JoinReport,
    pub unresolved_rows: usize,
    pub close_margin: u32,
    /// Q1: biggest win by runs.
    pub largest_margin: Option<LargestMargin>,
    /// Q2
    pub tied: usize,
    pub no_result: usize,
    /// Q3
    pub tie_probability: Option<f64>,
    pub no_result_probability: Option<f64>,
    /// Q4
    pub close_match_probability: Option<f64>,
    /// Q5
    pub win_batting_first_probability: Option<f64>,
    pub win_batting_second_probability: Option<f64>,
}

fn is(win_type: WinType) -> impl Fn(&ResolvedMatch) -> bool {
    move |row: &ResolvedMatch| row.row.win_type == win_type
}

fn any(_: &ResolvedMatch) -> bool {
    true
}

/// Answer the five questions over the rows behind `agg`.
pub fn answer_questions(
    agg: &Aggregator<'_>,
    close_margin: u32,
    join: JoinReport,
    unresolved_rows: usize,
) -> InsightReport {
    let largest_margin = agg
        .extremum(
            |row| row.row.won_by.filter(|_| row.row.win_type == WinType::ByRuns),
            Extreme::Max,
        )
        .into_iter()
        .find_map(|row| {
            Some(LargestMargin {
                team: row.winner_team_name()?.to_string(),
                runs: row.row.won_by?,
                city: row.row.city_name.clone(),
            })
        });

    let is_close = move |row: &ResolvedMatch| row.row.won_by.is_some_and(|runs| runs < close_margin);

    InsightReport {
        rows: agg.len(),
        join,
        unresolved_rows,
        close_margin,
        largest_margin,
        tied: agg.count_by(is(WinType::Tie)),
        no_result: agg.count_by(is(WinType::NoResult)),
        tie_probability: agg.ratio(is(WinType::Tie), any).ok(),
        no_result_probability: agg.ratio(is(WinType::NoResult), any).ok(),
        close_match_probability: agg.ratio(is_close, is(WinType::ByRuns)).ok(),
        win_batting_first_probability: agg.ratio(is(WinType::ByRuns), any).ok(),
        win_batting_second_probability: agg.ratio(is(WinType::ByWickets), any).ok(),
    }
}

struct Probability(Option<f64>);

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{:.4} ({:.1}%)", p, p * 100.0),
            None => f.write_str("undefined (no matching matches)"),
        }
    }
}

impl fmt::Display for InsightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Q1: Which team won a match by the most runs?")?;
        match &self.largest_margin {
            Some(m) => {
                writeln!(f, "    {} is the team to win a match by the most runs", m.team)?;
                writeln!(f, "    They won the match by {} runs", m.runs)?;
                writeln!(
                    f,
                    "    Match was played in {}",
                    m.city.as_deref().unwrap_or("an unknown city")
                )?;
            }
            None => writeln!(f, "    No match was won by runs")?,
        }

        writeln!(f, "Q2: How many matches were tied or had no result?")?;
        writeln!(f, "    Tied matches: {}", self.tied)?;
        writeln!(f, "    Matches with no result: {}", self.no_result)?;

        writeln!(f, "Q3: What is the probability of a tie or no result?")?;
        writeln!(f, "    Tie: {}", Probability(self.tie_probability))?;
        writeln!(f, "    No result: {}", Probability(self.no_result_probability))?;

        writeln!(
            f,
            "Q4: What is the probability of a close match (won by fewer than {} runs) when batting first?",
            self.close_margin
        )?;
        writeln!(f, "    {}", Probability(self.close_match_probability))?;

        writeln!(f, "Q5: What is the probability of winning batting first and batting second?")?;
        writeln!(f, "    Batting first: {}", Probability(self.win_batting_first_probability))?;
        writeln!(f, "    Batting second: {}", Probability(self.win_batting_second_probability))?;

        write!(
            f,
            "({} rows analysed, {} dropped at join, {} unresolved)",
            self.rows, self.join.dropped, self.unresolved_rows
        )
    }
}
