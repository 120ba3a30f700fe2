//! Chart Catalog
//! What each chart shows, independent of how it is drawn.

use crate::analysis::{Aggregator, Dimension};
use crate::model::{ResolvedMatch, WinType};

/// A chart ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar {
        file_stem: String,
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<(String, usize)>,
    },
    Pie {
        file_stem: String,
        title: String,
        slices: Vec<(String, usize)>,
    },
}

impl ChartSpec {
    pub fn file_stem(&self) -> &str {
        match self {
            ChartSpec::Bar { file_stem, .. } | ChartSpec::Pie { file_stem, .. } => file_stem,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar { title, .. } | ChartSpec::Pie { title, .. } => title,
        }
    }

    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Bar { bars, .. } => bars.iter().all(|(_, n)| *n == 0),
            ChartSpec::Pie { slices, .. } => slices.iter().all(|(_, n)| *n == 0),
        }
    }
}

fn bar(
    agg: &Aggregator<'_>,
    dimension: Dimension,
    file_stem: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> ChartSpec {
    ChartSpec::Bar {
        file_stem: file_stem.to_string(),
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        bars: agg.value_counts(dimension).entries,
    }
}

/// The five charts of the match analysis.
pub fn standard_charts(agg: &Aggregator<'_>, close_margin: u32) -> Vec<ChartSpec> {
    let by_runs = |row: &ResolvedMatch| row.row.win_type == WinType::ByRuns;
    let by_wickets = |row: &ResolvedMatch| row.row.win_type == WinType::ByWickets;

    let wide_margin =
        agg.count_by(|row| by_runs(row) && row.row.won_by.is_some_and(|r| r >= close_margin));
    let close_win =
        agg.count_by(|row| by_runs(row) && row.row.won_by.is_some_and(|r| r < close_margin));

    vec![
        bar(
            agg,
            Dimension::City,
            "matches_per_city",
            "IPL matches hosted in various cities",
            "City",
            "Number of matches hosted",
        ),
        bar(
            agg,
            Dimension::TeamName,
            "matches_per_team",
            "Number of matches played by IPL teams",
            "Team",
            "Number of matches",
        ),
        ChartSpec::Pie {
            file_stem: "batting_first_vs_second".to_string(),
            title: "Matches won - batting first vs batting second".to_string(),
            slices: vec![
                ("Batting first".to_string(), agg.count_by(by_runs)),
                ("Batting second".to_string(), agg.count_by(by_wickets)),
            ],
        },
        bar(
            agg,
            Dimension::Winner,
            "wins_per_team",
            "Number of matches won by IPL teams",
            "Team",
            "Number of matches",
        ),
        ChartSpec::Pie {
            file_stem: "margin_of_victory".to_string(),
            title: format!("Matches won by {close_margin}+ runs vs by fewer than {close_margin} runs"),
            slices: vec![
                (format!("Won by {close_margin} runs or more"), wide_margin),
                (format!("Won by fewer than {close_margin} runs"), close_win),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnrichedMatch, MatchId, SeasonId, TeamId, WinnerOutcome};

    fn resolved(team: &str, win_type: WinType, won_by: u32) -> ResolvedMatch {
        ResolvedMatch {
            row: EnrichedMatch {
                match_id: MatchId::new(1),
                team_id: TeamId::new(1),
                opponent_team_id: TeamId::new(2),
                toss_winner_id: None,
                match_winner_id: None,
                season_id: SeasonId::new(1),
                city_name: Some("Mumbai".to_string()),
                win_type,
                won_by: Some(won_by),
                team_name: team.to_string(),
                short_code: None,
            },
            outcome: WinnerOutcome::OwnTeam(team.to_string()),
        }
    }

    #[test]
    fn test_standard_charts() {
        let rows = vec![
            resolved("MI", WinType::ByRuns, 40),
            resolved("MI", WinType::ByRuns, 4),
            resolved("CSK", WinType::ByWickets, 7),
        ];
        let charts = standard_charts(&Aggregator::new(&rows), 10);

        let stems: Vec<&str> = charts.iter().map(ChartSpec::file_stem).collect();
        assert_eq!(
            stems,
            vec![
                "matches_per_city",
                "matches_per_team",
                "batting_first_vs_second",
                "wins_per_team",
                "margin_of_victory",
            ]
        );

        match &charts[2] {
            ChartSpec::Pie { slices, .. } => {
                assert_eq!(slices[0].1, 2);
                assert_eq!(slices[1].1, 1);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
        match &charts[4] {
            ChartSpec::Pie { slices, .. } => {
                assert_eq!(slices[0].1, 1);
                assert_eq!(slices[1].1, 1);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
        match &charts[3] {
            ChartSpec::Bar { bars, .. } => {
                assert_eq!(bars, &vec![("MI".to_string(), 2), ("CSK".to_string(), 1)]);
            }
            other => panic!("expected a bar chart, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_charts() {
        let charts = standard_charts(&Aggregator::new(&[]), 10);
        assert!(charts.iter().all(ChartSpec::is_empty));
    }
}
