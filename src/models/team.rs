//! Team data structure (registered entrant of a competition).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Unique identifier for a team (used in slots and lookups).
pub type TeamId = i64;

/// A team registered for a competition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub team_name: String,
    /// Ranking order; 1 is the strongest. Unseeded teams are placed after all seeded ones.
    pub seed: Option<u32>,
}

impl Team {
    pub fn new(team_id: TeamId, team_name: impl Into<String>, seed: Option<u32>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            seed,
        }
    }

    /// Case-folded name; two teams with the same key count as the same name.
    pub fn name_key(&self) -> String {
        name_key(&self.team_name)
    }

    /// Draw order: seed ascending with unseeded last, then name (case-insensitive), then id.
    pub fn draw_order(&self, other: &Team) -> Ordering {
        let by_seed = match (self.seed, other.seed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_seed
            .then_with(|| self.name_key().cmp(&other.name_key()))
            .then_with(|| self.team_id.cmp(&other.team_id))
    }
}

/// Case-folding used for team name comparisons.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}
