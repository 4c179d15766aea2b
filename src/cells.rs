use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnsCount, Height, Width};

/// A cell of the wall/open grid. `x` runs along the columns (world x), `y` along the rows (world z).
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

/// A room of the logical `Width x Height` maze. Room `(x, y)` lives at grid cell `(2x + 1, 2y + 1)`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct RoomCoordinate {
    pub x: u32,
    pub y: u32,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Open,
}

/// The structural role of a grid cell, decided purely by the parity of its indices.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellKind {
    /// Even column and even row: always a wall in a generated maze.
    Pillar,
    /// Odd column and odd row: always open in a generated maze.
    Room,
    /// Exactly one odd index: open only where a passage was carved.
    Connector,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// The order neighbouring rooms are enumerated in during generation: left, right, up, down.
pub const ROOM_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::West,
                                                  CompassPrimary::East,
                                                  CompassPrimary::North,
                                                  CompassPrimary::South];

pub type RoomNeighboursSmallVec = SmallVec<[(RoomCoordinate, CompassPrimary); 4]>;

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn row_major_index(&self, columns: ColumnsCount) -> usize {
        self.y as usize * columns.0 + self.x as usize
    }

    pub fn kind(&self) -> CellKind {
        match (self.x % 2 == 1, self.y % 2 == 1) {
            (true, true) => CellKind::Room,
            (false, false) => CellKind::Pillar,
            _ => CellKind::Connector,
        }
    }

    /// The room this cell is, if it is a room cell.
    pub fn as_room(&self) -> Option<RoomCoordinate> {
        if self.kind() == CellKind::Room {
            Some(RoomCoordinate::new(self.x / 2, self.y / 2))
        } else {
            None
        }
    }

    /// The cell one step away in the given direction, None when that would leave the
    /// non-negative quadrant. No upper bound check is made here; that is the grid's job.
    pub fn offset(&self, direction: CompassPrimary) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match direction {
            CompassPrimary::North => y.checked_sub(1).map(|y| GridCoordinate::new(x, y)),
            CompassPrimary::South => Some(GridCoordinate::new(x, y + 1)),
            CompassPrimary::East => Some(GridCoordinate::new(x + 1, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| GridCoordinate::new(x, y)),
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl RoomCoordinate {
    pub fn new(x: u32, y: u32) -> RoomCoordinate {
        RoomCoordinate { x, y }
    }

    #[inline]
    pub fn as_grid_coordinate(&self) -> GridCoordinate {
        GridCoordinate::new(2 * self.x + 1, 2 * self.y + 1)
    }

    /// The connector cell between this room and whatever lies in `direction`.
    /// Always representable: a room's grid cell is never on the zero row or column.
    #[inline]
    pub fn connector(&self, direction: CompassPrimary) -> GridCoordinate {
        let room_cell = self.as_grid_coordinate();
        match direction {
            CompassPrimary::North => GridCoordinate::new(room_cell.x, room_cell.y - 1),
            CompassPrimary::South => GridCoordinate::new(room_cell.x, room_cell.y + 1),
            CompassPrimary::East => GridCoordinate::new(room_cell.x + 1, room_cell.y),
            CompassPrimary::West => GridCoordinate::new(room_cell.x - 1, room_cell.y),
        }
    }

    /// The adjacent room in `direction`, if it lies within `[0, width) x [0, height)`.
    pub fn neighbour(&self,
                     direction: CompassPrimary,
                     width: Width,
                     height: Height)
                     -> Option<RoomCoordinate> {
        let (x, y) = (self.x, self.y);
        let neighbour = match direction {
            CompassPrimary::North => y.checked_sub(1).map(|y| RoomCoordinate::new(x, y)),
            CompassPrimary::South => Some(RoomCoordinate::new(x, y + 1)),
            CompassPrimary::East => Some(RoomCoordinate::new(x + 1, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| RoomCoordinate::new(x, y)),
        };
        neighbour.filter(|room| (room.x as usize) < width.0 && (room.y as usize) < height.0)
    }

    /// All in-bounds neighbouring rooms, in `ROOM_DIRECTIONS` order.
    pub fn neighbours(&self, width: Width, height: Height) -> RoomNeighboursSmallVec {
        ROOM_DIRECTIONS.iter()
            .filter_map(|&dir| self.neighbour(dir, width, height).map(|room| (room, dir)))
            .collect()
    }
}
