//! Bracket: flat arena of matches for one competition, plus BracketError.
//!
//! Matches never point at each other. The parent of `(round, match_number)` is
//! `(round + 1, ceil(match_number / 2))`, and odd match numbers feed the parent's
//! home slot while even ones feed the away slot.

use crate::models::game::{Match, MatchId, Side};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by bracket operations. A failed operation leaves the bracket unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    /// Fewer than 4 teams supplied to the draw.
    #[error("Need at least 4 teams to generate a bracket (got {found})")]
    InsufficientTeams { found: usize },
    /// The same team id was supplied twice to the draw.
    #[error("Team {0} appears more than once")]
    DuplicateTeam(TeamId),
    #[error("Match {0} not found")]
    UnknownMatch(MatchId),
    /// The requested winner is in neither slot of the match.
    #[error("Team {team_id} is not playing in match {match_id}")]
    InvalidSlotTeam { match_id: MatchId, team_id: TeamId },
    /// A winner was requested while a slot is still empty.
    #[error("Match {0} needs both teams before a winner can be set")]
    InvalidMatchState(MatchId),
    /// Assignment into a match that already has a result.
    #[error("Match {0} is decided; clear the winner before changing its teams")]
    LockedMatchMutation(MatchId),
}

/// One tier of the elimination tree (borrowed view over the arena).
#[derive(Clone, Copy, Debug)]
pub struct Round<'a> {
    pub round_number: u32,
    pub matches: &'a [Match],
}

/// Single-elimination bracket. Matches are stored ordered by round, then match number.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub round_count: u32,
    pub matches: Vec<Match>,
}

impl Bracket {
    /// Empty bracket skeleton with `first_round_matches` matches in round 1 and
    /// half as many (rounded up) in each following round down to the final.
    pub fn with_shape(first_round_matches: u32) -> Self {
        let mut matches = Vec::new();
        let mut round_number = 1;
        let mut in_round = first_round_matches.max(1);
        let mut next_id: MatchId = 1;
        loop {
            for match_number in 1..=in_round {
                matches.push(Match::new(next_id, round_number, match_number));
                next_id += 1;
            }
            if in_round == 1 {
                break;
            }
            in_round = in_round.div_ceil(2);
            round_number += 1;
        }
        Self {
            round_count: round_number,
            matches,
        }
    }

    /// Matches of one round, in match-number order. Empty for unknown rounds.
    pub fn round(&self, round_number: u32) -> &[Match] {
        let start = self
            .matches
            .partition_point(|m| m.round_number < round_number);
        let end = self
            .matches
            .partition_point(|m| m.round_number <= round_number);
        &self.matches[start..end]
    }

    pub fn rounds(&self) -> impl Iterator<Item = Round<'_>> {
        (1..=self.round_count).map(move |round_number| Round {
            round_number,
            matches: self.round(round_number),
        })
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn index_of(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    /// Arena index of the match at `(round_number, match_number)`.
    pub fn index_at(&self, round_number: u32, match_number: u32) -> Option<usize> {
        self.matches
            .iter()
            .position(|m| m.round_number == round_number && m.match_number == match_number)
    }

    pub fn is_final(&self, m: &Match) -> bool {
        m.round_number == self.round_count
    }

    /// Arena index of the parent match and the slot the match at `idx` feeds.
    pub fn parent_index(&self, idx: usize) -> Option<(usize, Side)> {
        let m = &self.matches[idx];
        if self.is_final(m) {
            return None;
        }
        let parent = self.index_at(m.round_number + 1, m.match_number.div_ceil(2))?;
        Some((parent, Side::feeding(m.match_number)))
    }

    /// Arena index of the match feeding `side` of the match at `idx`, if it has one.
    pub fn child_index(&self, idx: usize, side: Side) -> Option<usize> {
        let m = &self.matches[idx];
        if m.round_number == 1 {
            return None;
        }
        let child_number = match side {
            Side::Home => m.match_number * 2 - 1,
            Side::Away => m.match_number * 2,
        };
        self.index_at(m.round_number - 1, child_number)
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.round(self.round_count).first()
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<TeamId> {
        self.final_match().and_then(|m| m.winner_team_id)
    }

    /// Slots `(match index, side)` holding `team_id` in matches without a result.
    pub fn unresolved_slots_of(&self, team_id: TeamId) -> Vec<(usize, Side)> {
        let mut slots = Vec::new();
        for (idx, m) in self.matches.iter().enumerate() {
            if m.is_decided() {
                continue;
            }
            for side in [Side::Home, Side::Away] {
                if m.slot(side) == Some(team_id) {
                    slots.push((idx, side));
                }
            }
        }
        slots
    }

    /// Display name of a round counted back from the final.
    pub fn round_label(&self, round_number: u32) -> String {
        match self.round_count.saturating_sub(round_number) {
            0 => "Final".to_string(),
            1 => "Semi-finals".to_string(),
            2 => "Quarter-finals".to_string(),
            _ => format!("Round {}", round_number),
        }
    }
}
