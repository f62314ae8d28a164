//! Match (bracket node) and Side (home/away slot).

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Identifier for a match, unique within a bracket.
pub type MatchId = i64;

/// Which slot of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Slot in the parent match fed by the match with this number (odd -> home, even -> away).
    pub fn feeding(match_number: u32) -> Self {
        if match_number % 2 == 1 {
            Side::Home
        } else {
            Side::Away
        }
    }

    pub fn other(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// A single bracket game with a home and an away slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1 is the first round.
    pub round_number: u32,
    /// Position within the round, top to bottom, starting at 1.
    pub match_number: u32,
    /// None while the slot waits for a prior winner or a manual assignment.
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    /// Display only.
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// None if not yet decided.
    pub winner_team_id: Option<TeamId>,
}

impl Match {
    pub fn new(id: MatchId, round_number: u32, match_number: u32) -> Self {
        Self {
            id,
            round_number,
            match_number,
            home_team_id: None,
            away_team_id: None,
            home_score: None,
            away_score: None,
            winner_team_id: None,
        }
    }

    pub fn slot(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::Home => self.home_team_id,
            Side::Away => self.away_team_id,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Option<TeamId> {
        match side {
            Side::Home => &mut self.home_team_id,
            Side::Away => &mut self.away_team_id,
        }
    }

    /// Side holding `team_id`, if any.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.home_team_id == Some(team_id) {
            Some(Side::Home)
        } else if self.away_team_id == Some(team_id) {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner_team_id.is_some()
    }

    /// A first-round match decided without an opponent.
    pub fn is_bye(&self) -> bool {
        self.round_number == 1
            && self.is_decided()
            && (self.home_team_id.is_none() || self.away_team_id.is_none())
    }

    /// The team that lost, once both slots are filled and a winner is set.
    pub fn loser_team_id(&self) -> Option<TeamId> {
        let winner = self.winner_team_id?;
        let side = self.side_of(winner)?;
        self.slot(side.other())
    }
}
