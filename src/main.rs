use docopt::Docopt;
use hedgemaze::{
    collision::MovementResolver,
    config::MazeConfig,
    generators,
    grid::Grid,
    movement::{MoveCommand, Walker},
    pathing,
    renderers,
};
use log::{info, warn};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Hedge maze

Usage:
    hedgemaze_driver -h | --help
    hedgemaze_driver [--width=<w> --height=<h>] [--seed=<s>] [--no-entrances] [--text-out=<path>] [--image-out=<path> --cell-pixels=<n> --show-path] [--walk=<keys> --turn=<px>]

Options:
    -h --help              Show this screen.
    --width=<w>            Number of rooms across the maze [default: 10].
    --height=<h>           Number of rooms down the maze [default: 10].
    --seed=<s>             Seed for a reproducible maze. A fresh random maze if not given.
    --no-entrances         Leave the outer boundary closed.
    --text-out=<path>      Output file path for a textual rendering of the maze. Printed if not given.
    --image-out=<path>     Output file path for a top down plan image of the maze. Always PNG format.
    --cell-pixels=<n>      Pixel count to render one grid cell [default: 10] max 255.
    --show-path            Draw the route from the entrance to the exit on the plan image.
    --walk=<keys>          Replay a walk from the start position, one step per w/a/s/d character.
    --turn=<px>            Horizontal mouse movement in pixels applied before the walk [default: 0].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_no_entrances: bool,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_show_path: bool,
    flag_walk: String,
    flag_turn: f32,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::hedgemaze::errors::Error, ::hedgemaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let config = MazeConfig {
        maze_width: args.flag_width,
        maze_height: args.flag_height,
        ..MazeConfig::default()
    };
    config.validate()?;

    let (width, height) = config.dimensions();
    let mut maze_grid = if let Some(seed) = args.flag_seed {
        generators::recursive_backtracker(width, height, &mut generators::seeded_rng(seed))?
    } else {
        generators::recursive_backtracker(width, height, &mut rand::thread_rng())?
    };

    if !args.flag_no_entrances {
        maze_grid.carve_entrance_and_exit()
            .chain_err(|| "Failed to carve the maze entrance and exit")?;
    }

    if args.flag_text_out.is_empty() {
        print!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    let final_position = if args.flag_walk.is_empty() && args.flag_turn == 0.0 {
        None
    } else {
        let position = replay_walk(&maze_grid, &config, &args.flag_walk, args.flag_turn)?;
        println!("walker at ({:.3}, {:.3}, {:.3})", position[0], position[1], position[2]);
        Some(position)
    };

    if !args.flag_image_out.is_empty() {
        let path_opt = if args.flag_show_path {
            entrance_to_exit_path(&maze_grid)
        } else {
            None
        };

        let render_options = renderers::RenderOptionsBuilder::new()
            .cell_pixels(args.flag_cell_pixels)
            .mark_entrance_exit(!args.flag_no_entrances)
            .path(path_opt.as_ref().map(|path| &path[..]))
            .player(final_position, config.cell_spacing)
            .build();
        renderers::save_plan(&maze_grid, &render_options, Path::new(&args.flag_image_out))?;
    }

    Ok(())
}

/// Walk from the configured start position: turn first, then one resolved step per key.
/// Keys that are not movement keys are skipped.
fn replay_walk(maze_grid: &Grid, config: &MazeConfig, keys: &str, turn: f32) -> Result<[f32; 3]> {

    let resolver = MovementResolver::new(maze_grid, config.cell_spacing, config.player_radius)?;
    let mut walker = Walker::from_config(config);
    walker.turn(turn);

    for key in keys.chars() {
        match MoveCommand::from_char(key) {
            Some(command) => {
                walker.step(command, &resolver);
            }
            None => warn!("ignoring non movement key {:?}", key),
        }
    }

    info!("walked {} keys, heading {:.3}", keys.len(), walker.marker_heading());
    Ok(walker.position())
}

fn entrance_to_exit_path(maze_grid: &Grid) -> Option<Vec<hedgemaze::cells::GridCoordinate>> {
    let distances = pathing::Distances::new(maze_grid, maze_grid.entrance())?;
    let path = pathing::shortest_path(maze_grid, &distances, maze_grid.exit());
    if path.is_none() {
        warn!("no route from the entrance to the exit");
    }
    path
}

fn write_text_to_file(data: &str, file_name: &str) -> Result<()> {
    let path = Path::new(file_name);
    let mut file = File::create(&path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
