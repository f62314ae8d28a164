//! Bracket engine: draw, slot assignment, winner propagation, layout.

mod assignment;
mod draw;
mod layout;
mod propagation;

pub use assignment::assign_team;
pub use draw::{generate_bracket, seeding_positions, MIN_TEAMS};
pub use layout::{compute_layout, Connector, Layout, LayoutDims, LayoutNode, Point};
pub use propagation::{clear_winner, set_scores, set_winner};
