use bit_set::BitSet;
use error_chain::bail;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{CellState, CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnsCount, Height, RowsCount, Width};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

const DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                         CompassPrimary::South,
                                         CompassPrimary::East,
                                         CompassPrimary::West];

/// Rectangular wall/open grid. A generated maze of `W x H` rooms is `(2W + 1) x (2H + 1)` cells.
///
/// Only the open cells are stored, as bits in row major order; every other cell is wall.
#[derive(Clone)]
pub struct Grid {
    open_cells: BitSet,
    columns: ColumnsCount,
    rows: RowsCount,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellEditError {
    InvalidGridCoordinate,
}

impl fmt::Display for CellEditError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CellEditError::InvalidGridCoordinate => write!(f, "grid coordinate out of range"),
        }
    }
}
impl ::std::error::Error for CellEditError {}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.columns == other.columns && self.rows == other.rows &&
        self.open_cells.iter().eq(other.open_cells.iter())
    }
}
impl Eq for Grid {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: columns: {:?}, rows: {:?}, open cells: {:?}",
               self.columns, self.rows, self.open_cells.len())
    }
}

impl Grid {
    /// A grid where every cell is a wall.
    pub fn walled(columns: ColumnsCount, rows: RowsCount) -> Grid {
        Grid {
            open_cells: BitSet::with_capacity(columns.0 * rows.0),
            columns,
            rows,
        }
    }

    /// Builds a grid from one line of text per row: `#` is a wall, `.` is open.
    /// Leading and trailing whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Grid> {
        let lines = text.lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .collect::<Vec<_>>();

        let columns_count = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = Grid::walled(ColumnsCount(columns_count), RowsCount(lines.len()));

        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != columns_count {
                bail!(ErrorKind::InvalidConfiguration(
                    format!("grid row {} has {} cells, expected {}", y, line.chars().count(), columns_count)));
            }
            for (x, glyph) in line.chars().enumerate() {
                let coord = GridCoordinate::new(x as u32, y as u32);
                match glyph {
                    '#' => {}
                    '.' => { grid.open_cells.insert(coord.row_major_index(grid.columns)); }
                    other => {
                        bail!(ErrorKind::InvalidConfiguration(
                            format!("unknown grid glyph {:?} at ({}, {})", other, x, y)))
                    }
                }
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.columns.0 * self.rows.0
    }

    /// Does the grid have a zero length dimension?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Logical maze size in rooms this grid can hold.
    pub fn rooms_dimensions(&self) -> (Width, Height) {
        (Width(self.columns.0.saturating_sub(1) / 2), Height(self.rows.0.saturating_sub(1) / 2))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// The state of a cell, None if the coordinate is outside the grid.
    pub fn cell_state(&self, coord: GridCoordinate) -> Option<CellState> {
        if self.is_valid_coordinate(coord) {
            if self.open_cells.contains(coord.row_major_index(self.columns)) {
                Some(CellState::Open)
            } else {
                Some(CellState::Wall)
            }
        } else {
            None
        }
    }

    /// Is there a wall at the coordinate? Space outside the grid is never wall.
    #[inline]
    pub fn is_wall(&self, coord: GridCoordinate) -> bool {
        self.cell_state(coord) == Some(CellState::Wall)
    }

    #[inline]
    pub fn is_open(&self, coord: GridCoordinate) -> bool {
        self.cell_state(coord) == Some(CellState::Open)
    }

    pub fn set_cell_state(&mut self,
                          coord: GridCoordinate,
                          state: CellState)
                          -> ::std::result::Result<(), CellEditError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellEditError::InvalidGridCoordinate);
        }

        let index = coord.row_major_index(self.columns);
        match state {
            CellState::Open => { self.open_cells.insert(index); }
            CellState::Wall => { self.open_cells.remove(index); }
        }
        Ok(())
    }

    /// The boundary connector above room `(0, 0)`.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(1, 0)
    }

    /// The boundary connector below room `(W - 1, H - 1)`.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new(self.columns.0.saturating_sub(2) as u32,
                            self.rows.0.saturating_sub(1) as u32)
    }

    /// Opens the entrance and exit connectors on the outer boundary, returning `(entrance, exit)`.
    ///
    /// This deliberately breaks the perfect maze property at exactly those two cells.
    pub fn carve_entrance_and_exit(&mut self)
                                   -> ::std::result::Result<(GridCoordinate, GridCoordinate),
                                                            CellEditError> {
        if self.columns.0 < 3 || self.rows.0 < 3 {
            return Err(CellEditError::InvalidGridCoordinate);
        }
        let (entrance, exit) = (self.entrance(), self.exit());
        self.set_cell_state(entrance, CellState::Open)?;
        self.set_cell_state(exit, CellState::Open)?;
        Ok((entrance, exit))
    }

    pub fn open_count(&self) -> usize {
        self.open_cells.len()
    }

    pub fn walls_count(&self) -> usize {
        self.size() - self.open_count()
    }

    /// Open cells directly North, South, East or West of a cell.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        DIRECTIONS.iter()
                  .filter_map(|dir| coord.offset(*dir))
                  .filter(|neighbour| self.is_open(*neighbour))
                  .collect()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            columns: self.columns,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    pub fn iter_walls<'a>(&'a self) -> impl Iterator<Item = GridCoordinate> + 'a {
        self.iter().filter(move |coord| self.is_wall(*coord))
    }

    pub fn iter_open<'a>(&'a self) -> impl Iterator<Item = GridCoordinate> + 'a {
        self.iter().filter(move |coord| self.is_open(*coord))
    }
}

/// Row major iteration over every coordinate of a grid.
#[derive(Debug, Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Two glyphs per cell so the cells look square in a terminal.
        const WALL: &str = "██";
        const OPEN: &str = "  ";

        let mut output = String::with_capacity((self.columns.0 * 2 + 1) * self.rows.0 * 3);
        for y in 0..self.rows.0 {
            for x in 0..self.columns.0 {
                let coord = GridCoordinate::new(x as u32, y as u32);
                output.push_str(if self.is_wall(coord) { WALL } else { OPEN });
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
