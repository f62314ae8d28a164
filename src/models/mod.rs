//! Data structures for club competitions: teams, matches, brackets, competition records.

mod bracket;
mod competition;
mod game;
mod team;

pub use bracket::{Bracket, BracketError, Round};
pub use competition::{Competition, CompetitionError, CompetitionId};
pub use game::{Match, MatchId, Side};
pub use team::{Team, TeamId};
