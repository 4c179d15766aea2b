use error_chain::bail;
use std::f32::consts::PI;

use crate::errors::*;
use crate::units::{Height, Width};

/// Startup constants shared by maze generation, wall placement and the walker.
///
/// The defaults: a 10 x 10 room maze of hedges 5 units wide and 8 high, a player
/// 0.8 units in radius moving 1 unit per key press, starting outside the entrance facing into the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub maze_width: usize,
    pub maze_height: usize,
    /// Wall width; also the distance between neighbouring cell centres.
    pub cell_spacing: f32,
    pub wall_height: f32,
    pub player_radius: f32,
    pub speed: f32,
    /// Radians of turn per pixel of horizontal mouse movement.
    pub mouse_sensitivity: f32,
    pub start_position: [f32; 3],
    pub start_yaw: f32,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            maze_width: 10,
            maze_height: 10,
            cell_spacing: 5.0,
            wall_height: 8.0,
            player_radius: 0.8,
            speed: 1.0,
            mouse_sensitivity: 0.001,
            start_position: [4.0, 3.0, -20.0],
            start_yaw: PI,
        }
    }
}

impl MazeConfig {
    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (Width(self.maze_width), Height(self.maze_height))
    }

    pub fn validate(&self) -> Result<()> {
        if self.maze_width == 0 || self.maze_height == 0 {
            bail!(ErrorKind::InvalidDimension(self.maze_width, self.maze_height));
        }
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.cell_spacing) || !positive(self.wall_height) {
            bail!(ErrorKind::InvalidConfiguration(
                format!("cell spacing {} and wall height {} must be positive",
                        self.cell_spacing, self.wall_height)));
        }
        if !positive(self.player_radius) || self.player_radius >= self.cell_spacing {
            bail!(ErrorKind::InvalidConfiguration(
                format!("player radius {} must be positive and smaller than the cell spacing {}",
                        self.player_radius, self.cell_spacing)));
        }
        if !positive(self.speed) {
            bail!(ErrorKind::InvalidConfiguration(format!("speed {} must be positive", self.speed)));
        }
        if !self.mouse_sensitivity.is_finite() {
            bail!(ErrorKind::InvalidConfiguration("mouse sensitivity must be finite".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MazeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dimensions(), (Width(10), Height(10)));
    }

    #[test]
    fn zero_sized_maze_is_an_invalid_dimension() {
        let config = MazeConfig { maze_height: 0, ..MazeConfig::default() };
        match config.validate() {
            Err(Error(ErrorKind::InvalidDimension(10, 0), _)) => {}
            other => panic!("expected invalid dimension, got {:?}", other),
        }
    }

    #[test]
    fn oversized_player_is_rejected() {
        let config = MazeConfig { player_radius: 5.0, ..MazeConfig::default() };
        assert!(config.validate().is_err());
        let config = MazeConfig { speed: 0.0, ..MazeConfig::default() };
        assert!(config.validate().is_err());
        let config = MazeConfig { cell_spacing: ::std::f32::INFINITY, ..MazeConfig::default() };
        assert!(config.validate().is_err());
    }
}
