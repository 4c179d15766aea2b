//! Mapping between grid cells and world space.
//!
//! Cell `(i, j)` is centred on world `(i * spacing, j * spacing)` on the ground plane, with the grid's
//! y axis running along world z and world y pointing up.

use crate::cells::GridCoordinate;
use crate::generators::RandomSource;
use crate::grid::Grid;

/// Height above the ground of the entrance and exit markers.
pub const MARKER_HEIGHT: f32 = 0.5;

/// On average one wall cell in this many carries a fairy light.
pub const FAIRY_LIGHT_ONE_IN: usize = 10;

const FAIRY_LIGHT_HEIGHT_FRACTION: f32 = 0.8;

/// The grid cell index a world position falls in: `floor(coord / spacing)` on each axis.
/// Positions left of or above the grid give negative indices.
#[inline]
pub fn world_to_grid(x: f32, z: f32, cell_spacing: f32) -> (i64, i64) {
    ((x / cell_spacing).floor() as i64, (z / cell_spacing).floor() as i64)
}

/// World `[x, y, z]` of a cell's centre, raised to `height`.
#[inline]
pub fn cell_centre(coord: GridCoordinate, cell_spacing: f32, height: f32) -> [f32; 3] {
    [coord.x as f32 * cell_spacing, height, coord.y as f32 * cell_spacing]
}

/// One placement per wall cell, at half the wall height so a box of `wall_height` sits on the ground.
/// This is what a host instances its hedge geometry from.
pub fn wall_placements(grid: &Grid, cell_spacing: f32, wall_height: f32) -> Vec<[f32; 3]> {
    grid.iter_walls()
        .map(|coord| cell_centre(coord, cell_spacing, wall_height / 2.0))
        .collect()
}

/// Decorative light positions on a random selection of wall cells, near the top of the hedge.
/// Each wall cell is lit independently with probability `1 / FAIRY_LIGHT_ONE_IN`.
pub fn fairy_light_placements<R: RandomSource>(grid: &Grid,
                                               cell_spacing: f32,
                                               wall_height: f32,
                                               rng: &mut R)
                                               -> Vec<[f32; 3]> {
    let height = wall_height * FAIRY_LIGHT_HEIGHT_FRACTION;
    grid.iter_walls()
        .filter(|_| rng.choose_index(FAIRY_LIGHT_ONE_IN) == 0)
        .map(|coord| cell_centre(coord, cell_spacing, height))
        .collect()
}

/// Ground marker positions for the entrance and exit connectors, `(entrance, exit)`.
pub fn entrance_exit_markers(grid: &Grid, cell_spacing: f32) -> ([f32; 3], [f32; 3]) {
    (cell_centre(grid.entrance(), cell_spacing, MARKER_HEIGHT),
     cell_centre(grid.exit(), cell_spacing, MARKER_HEIGHT))
}

/// Is a world position over the grid's footprint?
pub fn is_over_grid(grid: &Grid, x: f32, z: f32, cell_spacing: f32) -> bool {
    // Cells are centred on their index, so the footprint starts half a cell before zero.
    let half = cell_spacing / 2.0;
    let (grid_x, grid_z) = world_to_grid(x + half, z + half, cell_spacing);
    grid_x >= 0 && grid_z >= 0 && (grid_x as usize) < grid.columns().0 &&
    (grid_z as usize) < grid.rows().0
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::{recursive_backtracker, seeded_rng, ScriptedSource};
    use crate::units::{ColumnsCount, Height, RowsCount, Width};

    #[test]
    fn world_to_grid_floors() {
        assert_eq!(world_to_grid(0.0, 0.0, 5.0), (0, 0));
        assert_eq!(world_to_grid(4.99, 5.0, 5.0), (0, 1));
        assert_eq!(world_to_grid(-0.1, 12.4, 5.0), (-1, 2));
        assert_eq!(world_to_grid(-20.0, 3.0, 5.0), (-4, 0));
    }

    #[test]
    fn wall_placements_one_per_wall() {
        let grid = Grid::parse("###\n#.#\n###").unwrap();
        let placements = wall_placements(&grid, 5.0, 8.0);
        assert_eq!(placements.len(), 8);
        assert_eq!(placements[0], [0.0, 4.0, 0.0]);
        assert!(!placements.contains(&[5.0, 4.0, 5.0]));
        assert!(placements.contains(&[10.0, 4.0, 10.0]));
    }

    #[test]
    fn fairy_lights_follow_the_draws() {
        let grid = Grid::parse("###\n#.#\n###").unwrap();
        let height = 8.0 * FAIRY_LIGHT_HEIGHT_FRACTION;

        let all = fairy_light_placements(&grid, 5.0, 8.0, &mut ScriptedSource::new(vec![0]));
        assert_eq!(all.len(), 8);
        assert!(all.iter().all(|light| light[1] == height));
        assert!(!all.contains(&[5.0, height, 5.0]));

        let none = fairy_light_placements(&grid, 5.0, 8.0, &mut ScriptedSource::new(vec![1]));
        assert!(none.is_empty());

        // Every other wall cell in row major order.
        let alternate = fairy_light_placements(&grid, 5.0, 8.0, &mut ScriptedSource::new(vec![0, 7]));
        assert_eq!(alternate, vec![[0.0, height, 0.0],
                                   [10.0, height, 0.0],
                                   [10.0, height, 5.0],
                                   [5.0, height, 10.0]]);
    }

    #[test]
    fn fairy_lights_are_a_sparse_subset_of_walls() {
        let grid = recursive_backtracker(Width(10), Height(10), &mut seeded_rng(4)).unwrap();
        let walls = wall_placements(&grid, 5.0, 8.0);
        let lights = fairy_light_placements(&grid, 5.0, 8.0, &mut seeded_rng(5));
        assert!(lights.len() < walls.len() / 4);
        assert!(lights.iter().all(|&[x, _, z]| walls.iter().any(|wall| wall[0] == x && wall[2] == z)));
    }

    #[test]
    fn markers_sit_on_entrance_and_exit() {
        // 10 x 10 rooms is a 21 x 21 grid; the exit is at (19, 20).
        let grid = Grid::walled(ColumnsCount(21), RowsCount(21));
        let (entrance, exit) = entrance_exit_markers(&grid, 5.0);
        assert_eq!(entrance, [5.0, 0.5, 0.0]);
        assert_eq!(exit, [95.0, 0.5, 100.0]);
    }

    #[test]
    fn footprint_includes_half_cell_border() {
        let grid = Grid::walled(ColumnsCount(3), RowsCount(3));
        assert!(is_over_grid(&grid, -2.4, -2.4, 5.0));
        assert!(is_over_grid(&grid, 12.4, 12.4, 5.0));
        assert!(!is_over_grid(&grid, -2.6, 5.0, 5.0));
        assert!(!is_over_grid(&grid, 5.0, 12.6, 5.0));
        assert!(!is_over_grid(&grid, 4.0, -20.0, 5.0));
    }
}
