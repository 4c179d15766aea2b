//! Top down plan view of a maze, the same picture a minimap shows: one square per grid cell.

use image::{Rgb, RgbImage};
use log::info;
use std::cmp;
use std::path::Path;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;

const WALL_COLOUR: Rgb<u8> = Rgb([0x2d, 0x5a, 0x27]);
const GROUND_COLOUR: Rgb<u8> = Rgb([0x4a, 0x3a, 0x2d]);
const ENTRANCE_COLOUR: Rgb<u8> = Rgb([0x00, 0xff, 0x00]);
const EXIT_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0x00]);
const PATH_COLOUR: Rgb<u8> = Rgb([0xff, 0xdd, 0x99]);
const PLAYER_COLOUR: Rgb<u8> = Rgb([0xff, 0x00, 0x00]);

#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    cell_pixels: u32,
    mark_entrance_exit: bool,
    path: Option<&'a [GridCoordinate]>,
    player: Option<(f32, f32)>,
    cell_spacing: f32,
}

#[derive(Debug, Clone)]
pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_pixels: 10,
                mark_entrance_exit: false,
                path: None,
                player: None,
                cell_spacing: 1.0,
            },
        }
    }

    /// Side length of one grid cell in pixels. Zero is treated as one.
    pub fn cell_pixels(mut self, pixels: u8) -> Self {
        self.options.cell_pixels = cmp::max(pixels, 1) as u32;
        self
    }

    pub fn mark_entrance_exit(mut self, mark: bool) -> Self {
        self.options.mark_entrance_exit = mark;
        self
    }

    pub fn path(mut self, path: Option<&'a [GridCoordinate]>) -> Self {
        self.options.path = path;
        self
    }

    /// Draw a player marker at a world position, given the world distance between cell centres.
    pub fn player(mut self, position: Option<[f32; 3]>, cell_spacing: f32) -> Self {
        self.options.player = position.map(|[x, _, z]| (x, z));
        self.options.cell_spacing = cell_spacing;
        self
    }

    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

impl<'a> Default for RenderOptionsBuilder<'a> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

pub fn render_plan(grid: &Grid, options: &RenderOptions) -> RgbImage {
    let cell_pixels = options.cell_pixels;
    let mut image = RgbImage::new(grid.columns().0 as u32 * cell_pixels,
                                  grid.rows().0 as u32 * cell_pixels);

    let fill_cell = |image: &mut RgbImage, coord: GridCoordinate, colour: Rgb<u8>| {
        for y in 0..cell_pixels {
            for x in 0..cell_pixels {
                image.put_pixel(coord.x * cell_pixels + x, coord.y * cell_pixels + y, colour);
            }
        }
    };

    for coord in grid.iter() {
        let colour = if grid.is_wall(coord) { WALL_COLOUR } else { GROUND_COLOUR };
        fill_cell(&mut image, coord, colour);
    }

    if let Some(path) = options.path {
        for coord in path.iter().filter(|coord| grid.is_valid_coordinate(**coord)) {
            fill_cell(&mut image, *coord, PATH_COLOUR);
        }
    }

    if options.mark_entrance_exit && grid.is_valid_coordinate(grid.entrance()) &&
       grid.is_valid_coordinate(grid.exit()) {
        fill_cell(&mut image, grid.entrance(), ENTRANCE_COLOUR);
        fill_cell(&mut image, grid.exit(), EXIT_COLOUR);
    }

    if let Some((x, z)) = options.player {
        // Cell centres sit on multiples of the spacing, half a cell in from the image edge.
        let to_pixels = |world: f32| (world / options.cell_spacing + 0.5) * cell_pixels as f32;
        let (centre_x, centre_y) = (to_pixels(x), to_pixels(z));
        let half_marker = cmp::max(cell_pixels / 4, 1) as f32;

        for py in 0..image.height() {
            for px in 0..image.width() {
                let (dx, dy) = (px as f32 + 0.5 - centre_x, py as f32 + 0.5 - centre_y);
                if dx.abs() <= half_marker && dy.abs() <= half_marker {
                    image.put_pixel(px, py, PLAYER_COLOUR);
                }
            }
        }
    }

    image
}

pub fn save_plan(grid: &Grid, options: &RenderOptions, file_path: &Path) -> Result<()> {
    let image = render_plan(grid, options);
    image.save(file_path)
         .chain_err(|| format!("Failed to save maze image to {}", file_path.display()))?;
    info!("saved {}x{} maze plan to {}", image.width(), image.height(), file_path.display());
    Ok(())
}
