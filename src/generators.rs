use bit_set::BitSet;
use error_chain::bail;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CellState, RoomCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

/// A source of uniformly random choices. Generation only ever needs to pick one of up to
/// four candidate neighbours, so this is the whole capability a generator depends on.
pub trait RandomSource {
    /// A uniformly distributed index in `0..bound`. `bound` is never zero.
    fn choose_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn choose_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out. Each draw is taken modulo the bound.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<usize>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(draws: Vec<usize>) -> ScriptedSource {
        ScriptedSource { draws, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn choose_index(&mut self, bound: usize) -> usize {
        if self.draws.is_empty() {
            return 0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw % bound
    }
}

/// A fast, reproducible random number generator for maze generation.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Generate a perfect maze of `width x height` rooms with the recursive backtracker algorithm,
/// a randomised depth first search run iteratively with an explicit stack.
///
/// The walk starts at room `(0, 0)`. While the room on top of the stack has unvisited neighbours
/// one is picked at random, the connector to it is opened and it becomes the new top of the stack.
/// A room with no unvisited neighbours is popped (backtracking). Every room is entered exactly once,
/// so the open passages form a spanning tree over the rooms: fully connected, no cycles and exactly
/// `width * height - 1` connectors opened.
///
/// The result has odd dimensions `(2 * width + 1) x (2 * height + 1)`; `(even, even)` cells are
/// always wall and `(odd, odd)` room cells are always open.
pub fn recursive_backtracker<R>(width: Width, height: Height, rng: &mut R) -> Result<Grid>
    where R: RandomSource
{
    let (Width(w), Height(h)) = (width, height);
    if w == 0 || h == 0 {
        bail!(ErrorKind::InvalidDimension(w, h));
    }

    let mut grid = Grid::walled(width.as_columns(), height.as_rows());
    for y in 0..h {
        for x in 0..w {
            let room_cell = RoomCoordinate::new(x as u32, y as u32).as_grid_coordinate();
            grid.set_cell_state(room_cell, CellState::Open)
                .chain_err(|| "room cell outside generated grid")?;
        }
    }

    let visited_index = |room: RoomCoordinate| room.y as usize * w + room.x as usize;
    let mut visited = BitSet::with_capacity(w * h);
    let start = RoomCoordinate::new(0, 0);
    visited.insert(visited_index(start));
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        let unvisited = current.neighbours(width, height)
                               .into_iter()
                               .filter(|&(room, _)| !visited.contains(visited_index(room)))
                               .collect::<Vec<_>>();

        if unvisited.is_empty() {
            stack.pop();
        } else {
            let (next, direction) = unvisited[rng.choose_index(unvisited.len())];
            grid.set_cell_state(current.connector(direction), CellState::Open)
                .chain_err(|| "connector outside generated grid")?;
            visited.insert(visited_index(next));
            stack.push(next);
        }
    }

    debug!("generated {}x{} maze, {} open cells of {}", w, h, grid.open_count(), grid.size());
    Ok(grid)
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::{CellKind, GridCoordinate};
    use crate::pathing;
    use crate::units::{ColumnsCount, RowsCount};

    fn open_connectors_count(grid: &Grid) -> usize {
        grid.iter_open().filter(|coord| coord.kind() == CellKind::Connector).count()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut rng = seeded_rng(1);
        for &(w, h) in &[(0, 0), (0, 3), (3, 0)] {
            match recursive_backtracker(Width(w), Height(h), &mut rng) {
                Err(Error(ErrorKind::InvalidDimension(ew, eh), _)) => {
                    assert_eq!((ew, eh), (w, h));
                }
                other => panic!("expected invalid dimension, got {:?}", other),
            }
        }
    }

    #[test]
    fn single_room_maze() {
        let g = recursive_backtracker(Width(1), Height(1), &mut seeded_rng(7)).unwrap();
        assert_eq!(g.columns(), ColumnsCount(3));
        assert_eq!(g.rows(), RowsCount(3));
        assert_eq!(g.open_count(), 1);
        assert!(g.is_open(GridCoordinate::new(1, 1)));
    }

    #[test]
    fn two_room_maze_opens_the_only_connector() {
        for seed in 0..10 {
            let g = recursive_backtracker(Width(2), Height(1), &mut seeded_rng(seed)).unwrap();
            assert_eq!(g.columns(), ColumnsCount(5));
            assert_eq!(g.rows(), RowsCount(3));
            assert!(g.is_open(GridCoordinate::new(1, 1)));
            assert!(g.is_open(GridCoordinate::new(3, 1)));
            assert!(g.is_open(GridCoordinate::new(2, 1)));
            assert_eq!(g.open_count(), 3);
        }
    }

    #[test]
    fn scripted_draws_carve_a_known_maze() {
        // Always taking the first available neighbour (left, right, up, down order) from (0, 0)
        // runs right along the top row then snakes back along the bottom one.
        let g = recursive_backtracker(Width(3), Height(2), &mut ScriptedSource::new(vec![0]))
            .unwrap();
        let expected = Grid::parse("
            #######
            #.....#
            #####.#
            #.....#
            #######
        ").unwrap();
        assert_eq!(g, expected);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = recursive_backtracker(Width(12), Height(9), &mut seeded_rng(42)).unwrap();
        let b = recursive_backtracker(Width(12), Height(9), &mut seeded_rng(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), format!("{}", b));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = recursive_backtracker(Width(10), Height(10), &mut seeded_rng(1)).unwrap();
        let b = recursive_backtracker(Width(10), Height(10), &mut seeded_rng(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn scripted_source_cycles_modulo_bound() {
        let mut source = ScriptedSource::new(vec![5, 1]);
        assert_eq!(source.choose_index(4), 1);
        assert_eq!(source.choose_index(4), 1);
        assert_eq!(source.choose_index(3), 2);
        assert_eq!(ScriptedSource::new(vec![]).choose_index(4), 0);
    }

    #[test]
    fn spanning_tree_property() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let g = match recursive_backtracker(Width(w), Height(h), &mut seeded_rng(seed)) {
                Ok(g) => g,
                Err(_) => return TestResult::failed(),
            };
            TestResult::from_bool(open_connectors_count(&g) == w * h - 1 &&
                                  pathing::is_perfect_maze(&g))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }

    #[test]
    fn pillar_and_room_invariants() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let g = recursive_backtracker(Width(w), Height(h), &mut seeded_rng(seed))
                .expect("valid dimensions");
            g.columns().0 % 2 == 1 && g.rows().0 % 2 == 1 &&
            g.iter().all(|coord| match coord.kind() {
                CellKind::Pillar => g.is_wall(coord),
                CellKind::Room => g.is_open(coord),
                CellKind::Connector => true,
            })
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn boundary_connectors_stay_closed() {
        let g = recursive_backtracker(Width(8), Height(5), &mut seeded_rng(3)).unwrap();
        let (ColumnsCount(columns), RowsCount(rows)) = (g.columns(), g.rows());
        for coord in g.iter() {
            let (x, y) = (coord.x as usize, coord.y as usize);
            if x == 0 || y == 0 || x == columns - 1 || y == rows - 1 {
                assert!(g.is_wall(coord), "boundary cell {:?} open", coord);
            }
        }
    }
}
