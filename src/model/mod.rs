//! Model module - typed identifiers, teams and match rows

pub mod ids;
mod record;
mod team;

pub use ids::{MatchId, SeasonId, TeamId};
pub use record::{EnrichedMatch, RecordError, ResolvedMatch, WinType, WinnerOutcome};
pub use team::{TableError, Team, TeamTable};
