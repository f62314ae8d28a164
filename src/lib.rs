//! Club competition manager: library with models, bracket engine, roster import and exports.

pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod roster;

pub use logic::{
    assign_team, clear_winner, compute_layout, generate_bracket, set_scores, set_winner, Connector,
    Layout, LayoutDims, LayoutNode, Point,
};
pub use models::{
    Bracket, BracketError, Competition, CompetitionError, CompetitionId, Match, MatchId, Side,
    Team, TeamId,
};
