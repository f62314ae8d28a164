//! Integration tests for winners: validation, advancement, overwrites.

mod common;

use club_bracket_web::{
    assign_team, clear_winner, generate_bracket, set_scores, set_winner, BracketError, Side,
};
use common::{match_at, open_slots, seeded_teams};

#[test]
fn four_team_scenario_produces_final_1v2() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    let m2 = match_at(&b, 1, 2).id;
    set_winner(&mut b, m1, 1).unwrap();
    set_winner(&mut b, m2, 2).unwrap();

    let f = match_at(&b, 2, 1);
    let f_id = f.id;
    assert_eq!((f.home_team_id, f.away_team_id), (Some(1), Some(2)));

    set_winner(&mut b, f_id, 2).unwrap();
    assert_eq!(b.champion(), Some(2));
}

#[test]
fn propagation_is_independent_of_call_order() {
    let mut a = generate_bracket(&seeded_teams(4)).unwrap();
    let mut b = a.clone();
    let m1 = match_at(&a, 1, 1).id;
    let m2 = match_at(&a, 1, 2).id;

    set_winner(&mut a, m1, 4).unwrap();
    set_winner(&mut a, m2, 3).unwrap();
    set_winner(&mut b, m2, 3).unwrap();
    set_winner(&mut b, m1, 4).unwrap();

    assert_eq!(a, b);
    let f = match_at(&a, 2, 1);
    assert_eq!((f.home_team_id, f.away_team_id), (Some(4), Some(3)));
}

#[test]
fn setting_the_same_winner_twice_is_idempotent() {
    let mut b = generate_bracket(&seeded_teams(8)).unwrap();
    let m3 = match_at(&b, 1, 3).id;
    set_winner(&mut b, m3, 2).unwrap();
    let once = b.clone();
    set_winner(&mut b, m3, 2).unwrap();
    assert_eq!(b, once);
}

#[test]
fn winner_must_be_in_the_match() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let before = b.clone();
    let m1 = match_at(&b, 1, 1).id;
    assert_eq!(
        set_winner(&mut b, m1, 2),
        Err(BracketError::InvalidSlotTeam {
            match_id: m1,
            team_id: 2
        })
    );
    assert_eq!(b, before);
}

#[test]
fn winner_needs_both_slots_filled() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    let fin = match_at(&b, 2, 1).id;
    set_winner(&mut b, m1, 1).unwrap();
    let before = b.clone();

    assert_eq!(set_winner(&mut b, fin, 1), Err(BracketError::InvalidMatchState(fin)));
    assert_eq!(b, before);
}

#[test]
fn unknown_match_is_rejected() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    assert_eq!(set_winner(&mut b, 99, 1), Err(BracketError::UnknownMatch(99)));
    assert_eq!(clear_winner(&mut b, 99), Err(BracketError::UnknownMatch(99)));
}

#[test]
fn replacing_a_winner_overwrites_the_parent_slot() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    set_winner(&mut b, m1, 1).unwrap();
    set_winner(&mut b, m1, 4).unwrap();

    assert_eq!(b.get(m1).unwrap().winner_team_id, Some(4));
    assert_eq!(match_at(&b, 2, 1).home_team_id, Some(4));
    assert!(open_slots(&b, 1).is_empty());
}

#[test]
fn replacing_a_winner_invalidates_later_results() {
    let mut b = generate_bracket(&seeded_teams(8)).unwrap();
    // Quarter-finals: 1v8, 4v5, 2v7, 3v6
    let qf: Vec<_> = (1..=4).map(|n| match_at(&b, 1, n).id).collect();
    for (id, w) in qf.iter().zip([1, 4, 2, 3]) {
        set_winner(&mut b, *id, w).unwrap();
    }
    let sf1 = match_at(&b, 2, 1).id;
    let sf2 = match_at(&b, 2, 2).id;
    let fin = match_at(&b, 3, 1).id;
    set_winner(&mut b, sf1, 1).unwrap();
    set_winner(&mut b, sf2, 2).unwrap();
    set_winner(&mut b, fin, 1).unwrap();
    assert_eq!(b.champion(), Some(1));

    // Team 8 now wins the first quarter-final instead of 1.
    set_winner(&mut b, qf[0], 8).unwrap();

    let s = b.get(sf1).unwrap();
    assert_eq!((s.home_team_id, s.away_team_id, s.winner_team_id), (Some(8), Some(4), None));
    let f = b.get(fin).unwrap();
    assert_eq!((f.home_team_id, f.away_team_id, f.winner_team_id), (None, Some(2), None));
    assert_eq!(b.champion(), None);
}

#[test]
fn clearing_a_winner_retracts_it_downstream() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    set_winner(&mut b, m1, 1).unwrap();
    clear_winner(&mut b, m1).unwrap();

    assert_eq!(b.get(m1).unwrap().winner_team_id, None);
    assert_eq!(match_at(&b, 2, 1).home_team_id, None);
    assert_eq!(b, generate_bracket(&seeded_teams(4)).unwrap());
}

#[test]
fn bye_winner_can_be_confirmed_again() {
    let mut b = generate_bracket(&seeded_teams(5)).unwrap();
    let before = b.clone();
    let bye = match_at(&b, 1, 1).id;
    set_winner(&mut b, bye, 1).unwrap();
    assert_eq!(b, before);
}

#[test]
fn bye_team_moved_by_hand_is_pulled_from_round_two() {
    let mut b = generate_bracket(&seeded_teams(5)).unwrap();
    let r2m2 = match_at(&b, 2, 2).id;
    let r2m1 = match_at(&b, 2, 1).id;
    // Seed 1 arrived in round 2 match 1 via its bye; place it in match 2 instead.
    assign_team(&mut b, r2m2, Side::Home, Some(1)).unwrap();
    assert_eq!(b.get(r2m1).unwrap().home_team_id, None);
    assert_eq!(open_slots(&b, 1), vec![(r2m2, Side::Home)]);
}

#[test]
fn scores_are_display_only() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    set_scores(&mut b, m1, Some(3), Some(5)).unwrap();
    let m = b.get(m1).unwrap();
    assert_eq!((m.home_score, m.away_score), (Some(3), Some(5)));
    assert_eq!(m.winner_team_id, None);
}

#[test]
fn loser_is_the_other_slot() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m2 = match_at(&b, 1, 2).id;
    set_winner(&mut b, m2, 3).unwrap();
    assert_eq!(b.get(m2).unwrap().loser_team_id(), Some(2));
}

#[test]
fn confirming_a_winner_keeps_later_hand_edits() {
    let mut b = generate_bracket(&seeded_teams(4)).unwrap();
    let m1 = match_at(&b, 1, 1).id;
    let m2 = match_at(&b, 1, 2).id;
    let fin = match_at(&b, 2, 1).id;
    set_winner(&mut b, m1, 1).unwrap();
    set_winner(&mut b, m2, 2).unwrap();
    // Operator overrides the final's home slot and decides the final.
    assign_team(&mut b, fin, Side::Home, Some(4)).unwrap();
    set_winner(&mut b, fin, 4).unwrap();
    let before = b.clone();

    set_winner(&mut b, m1, 1).unwrap();

    assert_eq!(b, before);
    assert_eq!(b.champion(), Some(4));
}
