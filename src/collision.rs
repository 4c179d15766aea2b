use error_chain::bail;
use itertools::iproduct;
use log::trace;
use std::cmp;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::world::world_to_grid;

/// The ground plane components of a host position or vector type.
///
/// Only `x` and `z` take part in collision; any other component (e.g. the camera height) is carried
/// through untouched by `with_x`/`with_z`.
pub trait PlanarPosition: Copy {
    fn x(&self) -> f32;
    fn z(&self) -> f32;
    fn with_x(self, x: f32) -> Self;
    fn with_z(self, z: f32) -> Self;
}

/// A point on the ground plane in world units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, z: f32) -> Position {
        Position { x, z }
    }
}

impl PlanarPosition for Position {
    #[inline]
    fn x(&self) -> f32 {
        self.x
    }
    #[inline]
    fn z(&self) -> f32 {
        self.z
    }
    #[inline]
    fn with_x(self, x: f32) -> Self {
        Position { x, ..self }
    }
    #[inline]
    fn with_z(self, z: f32) -> Self {
        Position { z, ..self }
    }
}

/// `[x, y, z]` with `y` up, as handed over by 3D maths and scene graph code.
impl PlanarPosition for [f32; 3] {
    #[inline]
    fn x(&self) -> f32 {
        self[0]
    }
    #[inline]
    fn z(&self) -> f32 {
        self[2]
    }
    #[inline]
    fn with_x(mut self, x: f32) -> Self {
        self[0] = x;
        self
    }
    #[inline]
    fn with_z(mut self, z: f32) -> Self {
        self[2] = z;
        self
    }
}

/// Keeps a circular player of `radius` out of the wall cells of a grid.
///
/// Wall cell `(i, j)` is solid over the square `cell_spacing` wide centred on `(i * s, j * s)`.
/// A query only tests the wall cells within `ceil(radius / cell_spacing) + 1` cells of the
/// position's own cell, so its cost does not depend on the grid size. Cells outside the grid
/// are open space.
///
/// The resolver holds no mutable state: `resolve` is a pure function of its arguments and the
/// borrowed grid, and may be shared between threads.
#[derive(Debug, Clone, Copy)]
pub struct MovementResolver<'a> {
    grid: &'a Grid,
    cell_spacing: f32,
    radius: f32,
    search_radius: i64,
}

impl<'a> MovementResolver<'a> {
    pub fn new(grid: &'a Grid, cell_spacing: f32, radius: f32) -> Result<MovementResolver<'a>> {
        if grid.is_empty() {
            bail!(ErrorKind::InvalidConfiguration(
                format!("grid {}x{} has a zero length dimension", grid.columns().0, grid.rows().0)));
        }
        if !(cell_spacing.is_finite() && cell_spacing > 0.0) {
            bail!(ErrorKind::InvalidConfiguration(
                format!("cell spacing {} must be positive", cell_spacing)));
        }
        if !(radius.is_finite() && radius > 0.0) {
            bail!(ErrorKind::InvalidConfiguration(format!("radius {} must be positive", radius)));
        }
        if radius >= cell_spacing {
            bail!(ErrorKind::InvalidConfiguration(
                format!("radius {} must be smaller than the cell spacing {}", radius, cell_spacing)));
        }

        Ok(MovementResolver {
            grid,
            cell_spacing,
            radius,
            search_radius: (radius / cell_spacing).ceil() as i64 + 1,
        })
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    #[inline]
    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Does a circle of the player's radius at `position` overlap any wall cell's square?
    /// Touching a wall exactly is not a collision.
    pub fn collides<P: PlanarPosition>(&self, position: &P) -> bool {
        let (px, pz) = (position.x(), position.z());
        let (grid_x, grid_z) = world_to_grid(px, pz, self.cell_spacing);

        let last_column = self.grid.columns().0 as i64 - 1;
        let last_row = self.grid.rows().0 as i64 - 1;
        // Far away positions saturate to the i64 limits, so the window bounds must not overflow.
        let xs = cmp::max(grid_x.saturating_sub(self.search_radius), 0)..=
                 cmp::min(grid_x.saturating_add(self.search_radius), last_column);
        let zs = cmp::max(grid_z.saturating_sub(self.search_radius), 0)..=
                 cmp::min(grid_z.saturating_add(self.search_radius), last_row);

        let half_side = self.cell_spacing / 2.0;
        let radius_squared = self.radius * self.radius;

        iproduct!(xs, zs).any(|(i, j)| {
            if !self.grid.is_wall(GridCoordinate::new(i as u32, j as u32)) {
                return false;
            }

            let (centre_x, centre_z) = (i as f32 * self.cell_spacing, j as f32 * self.cell_spacing);
            let closest_x = px.max(centre_x - half_side).min(centre_x + half_side);
            let closest_z = pz.max(centre_z - half_side).min(centre_z + half_side);
            let (dx, dz) = (px - closest_x, pz - closest_z);

            dx * dx + dz * dz < radius_squared
        })
    }

    /// Where the player ends up when trying to move from `current` to `desired`.
    ///
    /// An unobstructed `desired` is returned as is. Otherwise the move is tried along x alone,
    /// then along z alone, which slides the player along the blocking wall. If both are blocked
    /// the player stays at `current`. `current` is assumed to be collision free already.
    pub fn resolve<P: PlanarPosition>(&self, current: P, desired: P) -> P {
        if !self.collides(&desired) {
            return desired;
        }

        let along_x = current.with_x(desired.x());
        if !self.collides(&along_x) {
            trace!("sliding along x to ({}, {})", along_x.x(), along_x.z());
            return along_x;
        }

        let along_z = current.with_z(desired.z());
        if !self.collides(&along_z) {
            trace!("sliding along z to ({}, {})", along_z.x(), along_z.z());
            return along_z;
        }

        trace!("movement to ({}, {}) blocked", desired.x(), desired.z());
        current
    }
}

/// One shot form of `MovementResolver::resolve` that validates the configuration on every call.
pub fn resolve<P: PlanarPosition>(grid: &Grid,
                                  cell_spacing: f32,
                                  radius: f32,
                                  current: P,
                                  desired: P)
                                  -> Result<P> {
    let resolver = MovementResolver::new(grid, cell_spacing, radius)?;
    Ok(resolver.resolve(current, desired))
}
