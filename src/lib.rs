//! **hedgemaze** generates perfect hedge mazes and keeps a first person walker out of their walls.
//!
//! - `generators::recursive_backtracker` builds the wall/open `grid::Grid` of a maze.
//! - `collision::MovementResolver` corrects each requested move so the walker's circle never
//!   overlaps a wall cell, sliding along walls where it can.
//! - `movement::Walker` turns key presses and mouse movement into those requested moves.
//!
//! Rendering, assets and input devices belong to the host; `world` and `renderers` give it the
//! wall placements and a plan view to draw from.

pub mod cells;
pub mod collision;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod movement;
pub mod pathing;
pub mod renderers;
pub mod units;
pub mod world;
mod utils;

pub use crate::collision::{MovementResolver, PlanarPosition, Position};
pub use crate::generators::{recursive_backtracker, RandomSource};
pub use crate::grid::Grid;
