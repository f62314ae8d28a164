//! Results: record winners and advance them into the next round.

use crate::logic::assignment::{place_team, retract_winner, withdraw_from_parent};
use crate::models::{Bracket, BracketError, MatchId, TeamId};

/// Set the winner of a match and advance it into the parent match.
///
/// Odd match numbers feed the parent's home slot, even ones the away slot. Setting
/// the same winner again leaves the bracket untouched, even if later rounds were
/// edited by hand since. Setting a different winner withdraws the old one from
/// every later round it reached before advancing the new one.
pub fn set_winner(
    bracket: &mut Bracket,
    match_id: MatchId,
    winner_team_id: TeamId,
) -> Result<(), BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::UnknownMatch(match_id))?;
    let m = &bracket.matches[idx];
    if m.side_of(winner_team_id).is_none() {
        return Err(BracketError::InvalidSlotTeam {
            match_id,
            team_id: winner_team_id,
        });
    }
    if m.winner_team_id == Some(winner_team_id) {
        return Ok(());
    }
    if m.home_team_id.is_none() || m.away_team_id.is_none() {
        return Err(BracketError::InvalidMatchState(match_id));
    }

    if let Some(previous) = bracket.matches[idx].winner_team_id.replace(winner_team_id) {
        withdraw_from_parent(bracket, idx, previous);
    }
    advance_winner(bracket, idx);
    Ok(())
}

/// Withdraw the result of a match, pulling its winner back out of later rounds.
pub fn clear_winner(bracket: &mut Bracket, match_id: MatchId) -> Result<(), BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::UnknownMatch(match_id))?;
    retract_winner(bracket, idx);
    Ok(())
}

/// Record display scores for a match. Scores never decide the winner.
pub fn set_scores(
    bracket: &mut Bracket,
    match_id: MatchId,
    home_score: Option<u32>,
    away_score: Option<u32>,
) -> Result<(), BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::UnknownMatch(match_id))?;
    let m = &mut bracket.matches[idx];
    m.home_score = home_score;
    m.away_score = away_score;
    Ok(())
}

/// Place the winner of the match at `idx` into its parent slot. No-op for the final
/// or an undecided match.
pub(crate) fn advance_winner(bracket: &mut Bracket, idx: usize) {
    let Some(winner) = bracket.matches[idx].winner_team_id else {
        return;
    };
    if let Some((parent, side)) = bracket.parent_index(idx) {
        place_team(bracket, parent, side, winner);
    }
}
