//! Shared fixtures for integration tests.

#![allow(dead_code)]

use club_bracket_web::{Bracket, Match, Side, Team, TeamId};

/// Teams 1..=n with seed equal to id.
pub fn seeded_teams(n: usize) -> Vec<Team> {
    (1..=n as i64)
        .map(|i| Team::new(i, format!("Team {i}"), Some(i as u32)))
        .collect()
}

pub fn match_at(bracket: &Bracket, round: u32, number: u32) -> &Match {
    bracket
        .matches
        .iter()
        .find(|m| m.round_number == round && m.match_number == number)
        .unwrap()
}

/// Every (match id, side) holding `team_id` in a match without a winner.
pub fn open_slots(bracket: &Bracket, team_id: TeamId) -> Vec<(i64, Side)> {
    let mut slots = Vec::new();
    for m in bracket.matches.iter().filter(|m| m.winner_team_id.is_none()) {
        if m.home_team_id == Some(team_id) {
            slots.push((m.id, Side::Home));
        }
        if m.away_team_id == Some(team_id) {
            slots.push((m.id, Side::Away));
        }
    }
    slots
}
