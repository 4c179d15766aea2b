use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};

/// Steps from a start cell to every open cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`. None if the start is not an open cell.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_open(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.open_count());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is by a shortest route and the
        // distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for neighbour in grid.open_neighbours(*cell_coord).iter() {
                    if !distances.contains_key(neighbour) {
                        distances.insert(*neighbour, distance_to_cell + 1);
                        new_frontier.push(*neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
                               .iter()
                               .filter(|&(_, distance)| *distance == furthest_distance)
                               .map(|(coord, _)| *coord)
                               .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// The open cells from the distances' start to `end_point`, both included.
/// None if `end_point` cannot be reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.open_neighbours(current_coord)
                         .iter()
                         .cloned()
                         .find(|neighbour| {
                             distances_from_start.distance_from_start_to(*neighbour) ==
                             Some(current_distance - 1)
                         })?;
        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

pub type PassageGraph = Graph<GridCoordinate, (), Undirected, u32>;

/// Undirected graph of the open cells, with an edge between every pair of orthogonally adjacent
/// open cells.
pub fn passage_graph(grid: &Grid) -> PassageGraph {
    let open_count = grid.open_count();
    let mut graph = PassageGraph::with_capacity(open_count, 2 * open_count);
    let mut node_indices = utils::fnv_hashmap(open_count);

    for coord in grid.iter_open() {
        node_indices.insert(coord, graph.add_node(coord));
    }
    for coord in grid.iter_open() {
        // Only look forwards so each adjacency is added once.
        for dir in &[CompassPrimary::East, CompassPrimary::South] {
            let neighbour_index = coord.offset(*dir).and_then(|n| node_indices.get(&n));
            if let Some(&neighbour_index) = neighbour_index {
                graph.add_edge(node_indices[&coord], neighbour_index, ());
            }
        }
    }

    graph
}

/// Do the open cells form a tree: one connected piece with no loops?
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = passage_graph(grid);
    graph.node_count() > 0 && connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
}
