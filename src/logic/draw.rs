//! Draw: seed registered teams into the first round of a fresh bracket.

use crate::logic::propagation::advance_winner;
use crate::models::{Bracket, BracketError, Team};
use std::collections::HashSet;

/// Smallest number of teams a bracket is generated for.
pub const MIN_TEAMS: usize = 4;

/// Build a bracket from registered teams (any order).
///
/// 1. Sort by seed (unseeded last), then name, then id.
/// 2. Pad to the next power of two; missing opponents are byes for the top seeds.
/// 3. Pair seeds in standard order (1 v last, 2 v second-last, folded so the top seeds meet last).
/// 4. Advance bye teams straight into round 2.
pub fn generate_bracket(teams: &[Team]) -> Result<Bracket, BracketError> {
    if teams.len() < MIN_TEAMS {
        return Err(BracketError::InsufficientTeams { found: teams.len() });
    }
    let mut seen = HashSet::new();
    for t in teams {
        if !seen.insert(t.team_id) {
            return Err(BracketError::DuplicateTeam(t.team_id));
        }
    }

    let mut ordered: Vec<&Team> = teams.iter().collect();
    ordered.sort_by(|a, b| a.draw_order(b));

    let bracket_size = ordered.len().next_power_of_two();
    let mut bracket = Bracket::with_shape((bracket_size / 2) as u32);

    let positions = seeding_positions(bracket_size);
    let mut byes = Vec::new();
    for (i, pair) in positions.chunks_exact(2).enumerate() {
        let home = ordered.get(pair[0] - 1).map(|t| t.team_id);
        let away = ordered.get(pair[1] - 1).map(|t| t.team_id);
        let m = &mut bracket.matches[i];
        m.home_team_id = home;
        m.away_team_id = away;
        if let (Some(team_id), None) = (home, away) {
            m.winner_team_id = Some(team_id);
            byes.push(i);
        }
    }
    for idx in byes {
        advance_winner(&mut bracket, idx);
    }
    Ok(bracket)
}

/// Seed numbers (1-based) in first-round slot order for a power-of-two bracket.
///
/// Each doubling replaces seed `s` with the pair `s, size + 1 - s`:
/// `[1, 2]` -> `[1, 4, 2, 3]` -> `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn seeding_positions(bracket_size: usize) -> Vec<usize> {
    let mut order = vec![1];
    let mut size = 1;
    while size < bracket_size {
        size *= 2;
        order = order.iter().flat_map(|&s| [s, size + 1 - s]).collect();
    }
    order
}
