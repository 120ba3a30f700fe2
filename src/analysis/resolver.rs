//! Winner Resolver
//! Derives the winning team of each row from its three team identifiers.

use crate::model::{EnrichedMatch, MatchId, ResolvedMatch, TeamId, TeamTable, WinnerOutcome};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Team and opponent share the winner id: the row is corrupt.
    #[error("Match {match_id}: team and opponent both carry winner id {winner}")]
    AmbiguousWinner { match_id: MatchId, winner: TeamId },
    #[error("Match {match_id}: winning opponent {opponent} is not in the team table")]
    UnknownOpponent { match_id: MatchId, opponent: TeamId },
}

/// Resolved rows plus the rows that could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub rows: Vec<ResolvedMatch>,
    pub issues: Vec<ResolveError>,
}

/// Work out who won the match described by `row`.
///
/// The opponent's name comes from a keyed lookup in `teams`.
pub fn resolve_winner(row: &EnrichedMatch, teams: &TeamTable) -> Result<WinnerOutcome, ResolveError> {
    let Some(winner) = row.match_winner_id else {
        return Ok(WinnerOutcome::NoResultOrTie);
    };

    match (row.team_id == winner, row.opponent_team_id == winner) {
        (true, true) => Err(ResolveError::AmbiguousWinner {
            match_id: row.match_id,
            winner,
        }),
        (true, false) => Ok(WinnerOutcome::OwnTeam(row.team_name.clone())),
        (false, true) => teams
            .name_of(winner)
            .map(|name| WinnerOutcome::Opponent(name.to_string()))
            .ok_or(ResolveError::UnknownOpponent {
                match_id: row.match_id,
                opponent: winner,
            }),
        (false, false) => Ok(WinnerOutcome::NoResultOrTie),
    }
}

/// Resolve every row. Rows that fail are left out of `rows` and recorded in
/// `issues` so the analysis can go on with the rest.
pub fn resolve_all(rows: Vec<EnrichedMatch>, teams: &TeamTable) -> Resolution {
    let mut resolution = Resolution::default();

    for row in rows {
        match resolve_winner(&row, teams) {
            Ok(outcome) => resolution.rows.push(ResolvedMatch { row, outcome }),
            Err(issue) => {
                tracing::warn!("{}", issue);
                resolution.issues.push(issue);
            }
        }
    }

    tracing::info!(
        resolved = resolution.rows.len(),
        issues = resolution.issues.len(),
        "Resolved match winners"
    );
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SeasonId, Team, WinType};

    fn teams() -> TeamTable {
        TeamTable::new(vec![
            Team {
                team_id: TeamId::new(1),
                team_name: "MI".to_string(),
                short_code: Some("MI".to_string()),
            },
            Team {
                team_id: TeamId::new(2),
                team_name: "CSK".to_string(),
                short_code: Some("CSK".to_string()),
            },
        ])
        .unwrap()
    }

    fn row(team: u32, opponent: u32, winner: Option<u32>, win_type: WinType) -> EnrichedMatch {
        EnrichedMatch {
            match_id: MatchId::new(101),
            team_id: TeamId::new(team),
            opponent_team_id: TeamId::new(opponent),
            toss_winner_id: None,
            match_winner_id: winner.map(TeamId::new),
            season_id: SeasonId::new(1),
            city_name: Some("Mumbai".to_string()),
            win_type,
            won_by: Some(5),
            team_name: if team == 1 { "MI" } else { "CSK" }.to_string(),
            short_code: None,
        }
    }

    #[test]
    fn test_opponent_winner_is_looked_up_by_key() {
        let outcome = resolve_winner(&row(1, 2, Some(2), WinType::ByWickets), &teams()).unwrap();
        assert_eq!(outcome, WinnerOutcome::Opponent("CSK".to_string()));
    }

    #[test]
    fn test_own_team_winner() {
        let outcome = resolve_winner(&row(2, 1, Some(2), WinType::ByRuns), &teams()).unwrap();
        assert_eq!(outcome, WinnerOutcome::OwnTeam("CSK".to_string()));
    }

    #[test]
    fn test_foreign_winner_id_is_no_result_or_tie() {
        let outcome = resolve_winner(&row(1, 2, Some(9), WinType::Tie), &teams()).unwrap();
        assert_eq!(outcome, WinnerOutcome::NoResultOrTie);
    }

    #[test]
    fn test_missing_winner_is_no_result_or_tie() {
        let outcome = resolve_winner(&row(1, 2, None, WinType::NoResult), &teams()).unwrap();
        assert_eq!(outcome, WinnerOutcome::NoResultOrTie);
    }

    #[test]
    fn test_branches_are_exclusive_and_exhaustive() {
        let teams = teams();
        for winner in [None, Some(1), Some(2), Some(3)] {
            for (team, opponent) in [(1, 2), (2, 1)] {
                let r = row(team, opponent, winner, WinType::ByRuns);
                let outcome = resolve_winner(&r, &teams).unwrap();
                let own = matches!(outcome, WinnerOutcome::OwnTeam(_));
                let opp = matches!(outcome, WinnerOutcome::Opponent(_));
                let none = matches!(outcome, WinnerOutcome::NoResultOrTie);
                assert_eq!([own, opp, none].iter().filter(|b| **b).count(), 1);
                assert_eq!(own, winner == Some(team));
                assert_eq!(opp, winner == Some(opponent));
                assert_eq!(outcome.winner_name().is_some(), own || opp);
            }
        }
    }

    #[test]
    fn test_corrupt_rows_become_issues() {
        let rows = vec![
            row(1, 1, Some(1), WinType::ByRuns),
            row(1, 5, Some(5), WinType::ByRuns),
            row(1, 2, Some(1), WinType::ByRuns),
        ];

        let resolution = resolve_all(rows, &teams());
        assert_eq!(resolution.rows.len(), 1);
        assert_eq!(
            resolution.issues,
            vec![
                ResolveError::AmbiguousWinner {
                    match_id: MatchId::new(101),
                    winner: TeamId::new(1),
                },
                ResolveError::UnknownOpponent {
                    match_id: MatchId::new(101),
                    opponent: TeamId::new(5),
                },
            ]
        );
    }
}
