use log::debug;

use crate::collision::MovementResolver;
use crate::config::MazeConfig;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveCommand {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl MoveCommand {
    /// Maps a keyboard event code (`KeyW`, `KeyA`, `KeyS`, `KeyD`) to a command.
    /// Anything else is not a movement key.
    pub fn from_key_code(code: &str) -> Option<MoveCommand> {
        match code {
            "KeyW" => Some(MoveCommand::Forward),
            "KeyS" => Some(MoveCommand::Backward),
            "KeyA" => Some(MoveCommand::StrafeLeft),
            "KeyD" => Some(MoveCommand::StrafeRight),
            _ => None,
        }
    }

    pub fn from_char(key: char) -> Option<MoveCommand> {
        match key.to_ascii_lowercase() {
            'w' => Some(MoveCommand::Forward),
            's' => Some(MoveCommand::Backward),
            'a' => Some(MoveCommand::StrafeLeft),
            'd' => Some(MoveCommand::StrafeRight),
            _ => None,
        }
    }
}

/// A first person viewpoint walking the maze: a camera position plus a yaw about the up axis.
///
/// At yaw 0 the walker faces world -z; positive yaw turns it to face -x.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    position: [f32; 3],
    yaw: f32,
    speed: f32,
    mouse_sensitivity: f32,
}

impl Walker {
    pub fn new(position: [f32; 3], yaw: f32, speed: f32, mouse_sensitivity: f32) -> Walker {
        Walker {
            position,
            yaw,
            speed,
            mouse_sensitivity,
        }
    }

    pub fn from_config(config: &MazeConfig) -> Walker {
        Walker::new(config.start_position,
                    config.start_yaw,
                    config.speed,
                    config.mouse_sensitivity)
    }

    #[inline]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Unit facing direction on the ground plane, `(x, z)`.
    #[inline]
    pub fn facing(&self) -> (f32, f32) {
        (-self.yaw.sin(), -self.yaw.cos())
    }

    /// Unit direction to the walker's left on the ground plane: up crossed with facing.
    #[inline]
    pub fn left(&self) -> (f32, f32) {
        let (fx, fz) = self.facing();
        (fz, -fx)
    }

    /// Turn by a horizontal mouse movement in pixels. Moving right turns right.
    pub fn turn(&mut self, movement_x: f32) {
        self.yaw -= movement_x * self.mouse_sensitivity;
    }

    /// Where one unresolved step of `command` would take the walker.
    pub fn desired_position(&self, command: MoveCommand) -> [f32; 3] {
        let (dx, dz) = match command {
            MoveCommand::Forward => self.facing(),
            MoveCommand::Backward => {
                let (fx, fz) = self.facing();
                (-fx, -fz)
            }
            MoveCommand::StrafeLeft => self.left(),
            MoveCommand::StrafeRight => {
                let (lx, lz) = self.left();
                (-lx, -lz)
            }
        };
        let [x, y, z] = self.position;
        [x + dx * self.speed, y, z + dz * self.speed]
    }

    /// Take one step, corrected so the walker never walks into a wall. Returns the new position.
    pub fn step(&mut self, command: MoveCommand, resolver: &MovementResolver) -> [f32; 3] {
        let desired = self.desired_position(command);
        self.position = resolver.resolve(self.position, desired);
        if self.position != desired {
            debug!("{:?} step corrected from {:?} to {:?}", command, desired, self.position);
        }
        self.position
    }

    /// Rotation about the up axis for a top down player marker pointing the way the walker faces.
    pub fn marker_heading(&self) -> f32 {
        let (fx, fz) = self.facing();
        (-fx).atan2(-fz)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::{recursive_backtracker, seeded_rng};
    use crate::grid::Grid;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1.0e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn key_codes() {
        assert_eq!(MoveCommand::from_key_code("KeyW"), Some(MoveCommand::Forward));
        assert_eq!(MoveCommand::from_key_code("KeyS"), Some(MoveCommand::Backward));
        assert_eq!(MoveCommand::from_key_code("KeyA"), Some(MoveCommand::StrafeLeft));
        assert_eq!(MoveCommand::from_key_code("KeyD"), Some(MoveCommand::StrafeRight));
        assert_eq!(MoveCommand::from_key_code("Space"), None);
        assert_eq!(MoveCommand::from_char('W'), Some(MoveCommand::Forward));
        assert_eq!(MoveCommand::from_char('q'), None);
    }

    #[test]
    fn facing_follows_yaw() {
        let walker = Walker::new([0.0, 0.0, 0.0], 0.0, 1.0, 0.001);
        assert_eq!(walker.facing(), (-0.0, -1.0));

        let walker = Walker::new([0.0, 0.0, 0.0], PI, 1.0, 0.001);
        let (fx, fz) = walker.facing();
        assert!(close(fx, 0.0) && close(fz, 1.0));
        let (lx, lz) = walker.left();
        assert!(close(lx, 1.0) && close(lz, 0.0));
    }

    #[test]
    fn commands_move_relative_to_facing() {
        let walker = Walker::new([0.0, 3.0, 0.0], FRAC_PI_2, 2.0, 0.001);
        // Facing -x, so left is +z.
        let forward = walker.desired_position(MoveCommand::Forward);
        let backward = walker.desired_position(MoveCommand::Backward);
        let left = walker.desired_position(MoveCommand::StrafeLeft);
        let right = walker.desired_position(MoveCommand::StrafeRight);
        assert!(close(forward[0], -2.0) && close(forward[2], 0.0));
        assert!(close(backward[0], 2.0) && close(backward[2], 0.0));
        assert!(close(left[0], 0.0) && close(left[2], 2.0));
        assert!(close(right[0], 0.0) && close(right[2], -2.0));
        assert_eq!(forward[1], 3.0);
    }

    #[test]
    fn mouse_turning_scales_by_sensitivity() {
        let mut walker = Walker::new([0.0, 0.0, 0.0], PI, 1.0, 0.001);
        walker.turn(1000.0);
        assert!(close(walker.yaw(), PI - 1.0));
        walker.turn(-500.0);
        assert!(close(walker.yaw(), PI - 0.5));
    }

    #[test]
    fn marker_heading_matches_yaw() {
        for &yaw in &[0.0, 0.5, -1.0, 2.0] {
            let walker = Walker::new([0.0, 0.0, 0.0], yaw, 1.0, 0.001);
            assert!(close(walker.marker_heading(), yaw));
        }
    }

    #[test]
    fn walks_in_through_the_entrance() {
        let config = MazeConfig::default();
        let (width, height) = config.dimensions();
        let mut grid = recursive_backtracker(width, height, &mut seeded_rng(11)).unwrap();
        grid.carve_entrance_and_exit().unwrap();
        let resolver = MovementResolver::new(&grid, config.cell_spacing, config.player_radius)
            .unwrap();

        let mut walker = Walker::from_config(&config);
        for _ in 0..25 {
            walker.step(MoveCommand::Forward, &resolver);
        }
        let [x, y, z] = walker.position();
        assert!(close(x, 4.0));
        assert_eq!(y, 3.0);
        assert!(close(z, 5.0));
    }

    #[test]
    fn walls_stop_the_walker() {
        let grid = Grid::parse("###\n#.#\n###").unwrap();
        let resolver = MovementResolver::new(&grid, 5.0, 0.8).unwrap();
        let mut walker = Walker::new([5.0, 3.0, 5.0], PI, 1.0, 0.001);

        for _ in 0..10 {
            walker.step(MoveCommand::Forward, &resolver);
        }
        let [x, _, z] = walker.position();
        assert!(close(x, 5.0));
        // The room is open up to z = 7.5, less the player's radius.
        assert!(z <= 6.7 && z > 5.0);
        assert!(!resolver.collides(&walker.position()));
    }
}
