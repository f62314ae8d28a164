//! Integration tests for bracket geometry.

mod common;

use club_bracket_web::{compute_layout, generate_bracket, set_winner, LayoutDims, Point, Side};
use common::{match_at, seeded_teams};

fn dims() -> LayoutDims {
    LayoutDims {
        match_width: 100.0,
        match_height: 40.0,
        round_gap_x: 50.0,
        match_gap_y: 20.0,
    }
}

#[test]
fn four_team_layout_positions() {
    let b = generate_bracket(&seeded_teams(4)).unwrap();
    let layout = compute_layout(&b, &dims());

    assert_eq!(layout.nodes.len(), 3);
    let m1 = layout.node(match_at(&b, 1, 1).id).unwrap();
    let m2 = layout.node(match_at(&b, 1, 2).id).unwrap();
    let f = layout.node(match_at(&b, 2, 1).id).unwrap();

    assert_eq!((m1.x, m1.y), (0.0, 0.0));
    assert_eq!((m2.x, m2.y), (0.0, 60.0));
    // Final centered between 20 and 80.
    assert_eq!((f.x, f.y), (150.0, 30.0));
    assert_eq!(f.center_y(), 50.0);

    assert_eq!(layout.width, 350.0);
    assert_eq!(layout.height, 140.0);
}

#[test]
fn connectors_run_orthogonally_into_parent_slots() {
    let b = generate_bracket(&seeded_teams(4)).unwrap();
    let layout = compute_layout(&b, &dims());
    assert_eq!(layout.connectors.len(), 2);

    let home = &layout.connectors[0];
    assert_eq!(home.side, Side::Home);
    assert_eq!(
        home.points,
        vec![
            Point::new(100.0, 20.0),
            Point::new(125.0, 20.0),
            Point::new(125.0, 40.0),
            Point::new(150.0, 40.0),
        ]
    );

    let away = &layout.connectors[1];
    assert_eq!(away.side, Side::Away);
    assert_eq!(away.points[2], Point::new(125.0, 60.0));
    assert_eq!(away.points[3], Point::new(150.0, 60.0));
}

#[test]
fn one_connector_per_non_final_match() {
    for n in [4, 5, 8, 13, 32] {
        let b = generate_bracket(&seeded_teams(n)).unwrap();
        let layout = compute_layout(&b, &LayoutDims::default());
        assert_eq!(layout.nodes.len(), b.matches.len());
        assert_eq!(layout.connectors.len(), b.matches.len() - 1);
        for c in &layout.connectors {
            assert_eq!(c.points.len(), 4);
            assert_eq!(c.points[0].y, c.points[1].y);
            assert_eq!(c.points[1].x, c.points[2].x);
            assert_eq!(c.points[2].y, c.points[3].y);
        }
    }
}

#[test]
fn parents_are_centered_between_children() {
    let b = generate_bracket(&seeded_teams(16)).unwrap();
    let layout = compute_layout(&b, &dims());
    for r in 2..=b.round_count {
        for m in b.round(r) {
            let parent = layout.node(m.id).unwrap();
            let a = layout.node(match_at(&b, r - 1, m.match_number * 2 - 1).id).unwrap();
            let c = layout.node(match_at(&b, r - 1, m.match_number * 2).id).unwrap();
            assert_eq!(parent.center_y(), (a.center_y() + c.center_y()) / 2.0);
        }
    }
}

#[test]
fn layout_is_deterministic_and_ignores_results() {
    let mut b = generate_bracket(&seeded_teams(6)).unwrap();
    let first = compute_layout(&b, &dims());
    assert_eq!(compute_layout(&b, &dims()), first);

    let m = match_at(&b, 1, 2).id;
    set_winner(&mut b, m, 4).unwrap();
    assert_eq!(compute_layout(&b, &dims()), first);
}
