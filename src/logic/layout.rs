//! Bracket geometry: node rectangles and orthogonal connectors for rendering.
//!
//! Pure function of the bracket shape; no rendering library involved. Rounds run
//! left to right. First-round nodes are stacked with a fixed gap and every later
//! node is centered between the two nodes feeding it.

use crate::models::{Bracket, MatchId, Side};
use serde::{Deserialize, Serialize};

/// Size of a match node and the gaps between nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDims {
    pub match_width: f64,
    pub match_height: f64,
    /// Horizontal gap between two rounds.
    pub round_gap_x: f64,
    /// Vertical gap between first-round matches.
    pub match_gap_y: f64,
}

impl Default for LayoutDims {
    fn default() -> Self {
        Self {
            match_width: 220.0,
            match_height: 64.0,
            round_gap_x: 64.0,
            match_gap_y: 24.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle for one match (top-left corner + size).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub match_id: MatchId,
    pub round_number: u32,
    pub match_number: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutNode {
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Vertical position where a connector enters `side`: home in the upper half, away in the lower.
    pub fn slot_y(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.y + self.height / 4.0,
            Side::Away => self.y + self.height * 3.0 / 4.0,
        }
    }
}

/// Right-angle path from a match to the slot of its parent it feeds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from_match_id: MatchId,
    pub to_match_id: MatchId,
    pub side: Side,
    /// Child right-center, turn at mid-gap, turn at slot height, parent left edge.
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// In bracket arena order (round, then match number).
    pub nodes: Vec<LayoutNode>,
    pub connectors: Vec<Connector>,
}

impl Layout {
    pub fn node(&self, match_id: MatchId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.match_id == match_id)
    }
}

/// Compute node positions and connector paths for the current bracket.
pub fn compute_layout(bracket: &Bracket, dims: &LayoutDims) -> Layout {
    let step_x = dims.match_width + dims.round_gap_x;
    let step_y = dims.match_height + dims.match_gap_y;

    // Node centers, indexed like bracket.matches.
    let mut centers: Vec<f64> = Vec::with_capacity(bracket.matches.len());
    for (idx, m) in bracket.matches.iter().enumerate() {
        let home = bracket.child_index(idx, Side::Home).map(|c| centers[c]);
        let away = bracket.child_index(idx, Side::Away).map(|c| centers[c]);
        let center = match (home, away) {
            (Some(a), Some(b)) => (a + b) / 2.0,
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => (m.match_number - 1) as f64 * step_y + dims.match_height / 2.0,
        };
        centers.push(center);
    }

    let nodes: Vec<LayoutNode> = bracket
        .matches
        .iter()
        .zip(&centers)
        .map(|(m, center)| LayoutNode {
            match_id: m.id,
            round_number: m.round_number,
            match_number: m.match_number,
            x: (m.round_number - 1) as f64 * step_x,
            y: center - dims.match_height / 2.0,
            width: dims.match_width,
            height: dims.match_height,
        })
        .collect();

    let mut connectors = Vec::new();
    for (idx, child) in nodes.iter().enumerate() {
        let Some((parent_idx, side)) = bracket.parent_index(idx) else {
            continue;
        };
        let parent = &nodes[parent_idx];
        let start = Point::new(child.right(), child.center_y());
        let mid_x = child.right() + dims.round_gap_x / 2.0;
        let slot_y = parent.slot_y(side);
        connectors.push(Connector {
            from_match_id: child.match_id,
            to_match_id: parent.match_id,
            side,
            points: vec![
                start,
                Point::new(mid_x, start.y),
                Point::new(mid_x, slot_y),
                Point::new(parent.x, slot_y),
            ],
        });
    }

    let max_right = nodes.iter().map(|n| n.right()).fold(0.0, f64::max);
    let max_bottom = nodes.iter().map(|n| n.y + n.height).fold(0.0, f64::max);
    Layout {
        width: max_right + dims.match_width,
        height: max_bottom + dims.match_height,
        nodes,
        connectors,
    }
}
