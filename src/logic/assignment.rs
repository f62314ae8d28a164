//! Slot assignment: put teams into (or take them out of) match slots.
//!
//! A team may sit in at most one slot of an undecided match. Assigning a team
//! somewhere new clears the slot it held before.

use crate::models::{Bracket, BracketError, MatchId, Side, TeamId};

/// Assign `team_id` to one slot of a match, or clear the slot with `None`.
///
/// Clearing a filled slot is always allowed; if the match was decided its result
/// is withdrawn and retracted from later rounds. Clearing an empty slot is a no-op.
/// Filling a slot of a decided match fails with `LockedMatchMutation`.
/// Re-assigning the team already in the slot is a no-op.
pub fn assign_team(
    bracket: &mut Bracket,
    match_id: MatchId,
    side: Side,
    team_id: Option<TeamId>,
) -> Result<(), BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::UnknownMatch(match_id))?;
    match team_id {
        None => {
            if bracket.matches[idx].slot(side).is_some() {
                clear_slot(bracket, idx, side);
            }
            Ok(())
        }
        Some(team_id) => {
            let m = &bracket.matches[idx];
            if m.slot(side) == Some(team_id) {
                return Ok(());
            }
            if m.is_decided() {
                return Err(BracketError::LockedMatchMutation(match_id));
            }
            place_team(bracket, idx, side, team_id);
            Ok(())
        }
    }
}

/// Empty a slot. A decided match loses its result, which is retracted downstream.
pub(crate) fn clear_slot(bracket: &mut Bracket, idx: usize, side: Side) {
    *bracket.matches[idx].slot_mut(side) = None;
    retract_winner(bracket, idx);
}

/// Remove the result of the match at `idx` and pull the winner back out of the
/// parent slot it was advanced into. Cascades through every later round.
///
/// The reopened match gives up any team that was moved into another open slot
/// while this match was decided.
pub(crate) fn retract_winner(bracket: &mut Bracket, idx: usize) {
    let Some(winner) = bracket.matches[idx].winner_team_id.take() else {
        return;
    };
    withdraw_from_parent(bracket, idx, winner);
    for side in [Side::Home, Side::Away] {
        if let Some(team_id) = bracket.matches[idx].slot(side) {
            if bracket.unresolved_slots_of(team_id).len() > 1 {
                *bracket.matches[idx].slot_mut(side) = None;
            }
        }
    }
}

/// Clear the parent slot the match at `idx` fed, if it still holds `winner`.
pub(crate) fn withdraw_from_parent(bracket: &mut Bracket, idx: usize, winner: TeamId) {
    if let Some((parent, side)) = bracket.parent_index(idx) {
        if bracket.matches[parent].slot(side) == Some(winner) {
            clear_slot(bracket, parent, side);
        }
    }
}

/// Put a team into a slot with move semantics.
///
/// The team leaves any other undecided slot first. If the target match already
/// has a result it is withdrawn, since one of its participants changes.
pub(crate) fn place_team(bracket: &mut Bracket, idx: usize, side: Side, team_id: TeamId) {
    if bracket.matches[idx].slot(side) == Some(team_id) {
        return;
    }
    retract_winner(bracket, idx);
    for (other_idx, other_side) in bracket.unresolved_slots_of(team_id) {
        *bracket.matches[other_idx].slot_mut(other_side) = None;
    }
    *bracket.matches[idx].slot_mut(side) = Some(team_id);
}
