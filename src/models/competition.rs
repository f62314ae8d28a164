//! Competition: team registry plus the bracket generated from it.

use crate::logic;
use crate::models::bracket::{Bracket, BracketError};
use crate::models::game::{MatchId, Side};
use crate::models::team::{name_key, Team, TeamId};
use crate::roster::{RosterEntry, RosterError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a competition.
pub type CompetitionId = Uuid;

/// Errors from competition operations (registry, versioning, bracket).
#[derive(Debug, Error)]
pub enum CompetitionError {
    #[error(transparent)]
    Bracket(#[from] BracketError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// Team names are unique, case-insensitive.
    #[error("A team named '{0}' already exists")]
    DuplicateTeamName(String),
    #[error("Team name must not be empty")]
    EmptyTeamName,
    #[error("Team {0} not found")]
    TeamNotFound(TeamId),
    /// Registry changes are refused while a bracket exists.
    #[error("The bracket has already been generated; reset it to edit teams")]
    BracketLocked,
    #[error("No bracket has been generated yet")]
    NoBracket,
    /// Optimistic concurrency: the caller edited a stale copy.
    #[error("Competition was modified (expected version {expected}, current {current})")]
    VersionConflict { expected: u64, current: u64 },
}

/// One competition: registered teams, the current bracket, and a version counter
/// bumped on every successful change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub teams: Vec<Team>,
    next_team_id: TeamId,
    bracket: Option<Bracket>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
            next_team_id: 1,
            bracket: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    /// Team names by id (for rendering and exports).
    pub fn team_names(&self) -> HashMap<TeamId, String> {
        self.teams
            .iter()
            .map(|t| (t.team_id, t.team_name.clone()))
            .collect()
    }

    /// Refuse the change if the caller's version is stale. `None` skips the check.
    pub fn check_version(&self, expected: Option<u64>) -> Result<(), CompetitionError> {
        match expected {
            Some(expected) if expected != self.version => Err(CompetitionError::VersionConflict {
                expected,
                current: self.version,
            }),
            _ => Ok(()),
        }
    }

    /// Register a team. Names must be unique (case-insensitive); only before the draw.
    pub fn add_team(
        &mut self,
        name: impl Into<String>,
        seed: Option<u32>,
    ) -> Result<TeamId, CompetitionError> {
        if self.bracket.is_some() {
            return Err(CompetitionError::BracketLocked);
        }
        let team_id = self.push_team(name.into(), seed)?;
        self.touch();
        Ok(team_id)
    }

    /// Register every roster entry, or none of them if one is invalid.
    pub fn import_teams(&mut self, entries: Vec<RosterEntry>) -> Result<Vec<TeamId>, CompetitionError> {
        if self.bracket.is_some() {
            return Err(CompetitionError::BracketLocked);
        }
        let snapshot = (self.teams.clone(), self.next_team_id);
        let mut ids = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.push_team(entry.team_name, entry.seed) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    (self.teams, self.next_team_id) = snapshot;
                    return Err(e);
                }
            }
        }
        self.touch();
        Ok(ids)
    }

    /// Remove a team by id (only before the draw).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), CompetitionError> {
        if self.bracket.is_some() {
            return Err(CompetitionError::BracketLocked);
        }
        let idx = self
            .teams
            .iter()
            .position(|t| t.team_id == team_id)
            .ok_or(CompetitionError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        self.touch();
        Ok(())
    }

    /// Draw a new bracket from the registered teams, replacing any previous one.
    pub fn generate_bracket(&mut self) -> Result<&Bracket, CompetitionError> {
        let bracket = logic::generate_bracket(&self.teams)?;
        self.touch();
        Ok(self.bracket.insert(bracket))
    }

    /// Drop the bracket so the registry can be edited again.
    pub fn reset_bracket(&mut self) -> Result<(), CompetitionError> {
        if self.bracket.take().is_none() {
            return Err(CompetitionError::NoBracket);
        }
        self.touch();
        Ok(())
    }

    /// Assign a registered team to a slot, or clear it with `None`.
    pub fn assign_team(
        &mut self,
        match_id: MatchId,
        side: Side,
        team_id: Option<TeamId>,
    ) -> Result<(), CompetitionError> {
        if let Some(team_id) = team_id {
            self.team(team_id)
                .ok_or(CompetitionError::TeamNotFound(team_id))?;
        }
        self.mutate_bracket(|b| logic::assign_team(b, match_id, side, team_id))
    }

    pub fn set_winner(&mut self, match_id: MatchId, team_id: TeamId) -> Result<(), CompetitionError> {
        self.mutate_bracket(|b| logic::set_winner(b, match_id, team_id))
    }

    pub fn clear_winner(&mut self, match_id: MatchId) -> Result<(), CompetitionError> {
        self.mutate_bracket(|b| logic::clear_winner(b, match_id))
    }

    pub fn set_scores(
        &mut self,
        match_id: MatchId,
        home_score: Option<u32>,
        away_score: Option<u32>,
    ) -> Result<(), CompetitionError> {
        self.mutate_bracket(|b| logic::set_scores(b, match_id, home_score, away_score))
    }

    fn mutate_bracket(
        &mut self,
        op: impl FnOnce(&mut Bracket) -> Result<(), BracketError>,
    ) -> Result<(), CompetitionError> {
        let bracket = self.bracket.as_mut().ok_or(CompetitionError::NoBracket)?;
        op(bracket)?;
        self.touch();
        Ok(())
    }

    fn push_team(&mut self, name: String, seed: Option<u32>) -> Result<TeamId, CompetitionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompetitionError::EmptyTeamName);
        }
        let key = name_key(name);
        if self.teams.iter().any(|t| t.name_key() == key) {
            return Err(CompetitionError::DuplicateTeamName(name.to_string()));
        }
        let team_id = self.next_team_id;
        self.next_team_id += 1;
        self.teams.push(Team::new(team_id, name, seed));
        Ok(team_id)
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}
