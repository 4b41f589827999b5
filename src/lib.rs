use std::path::PathBuf;

use clap::Parser;

pub mod direction;
pub mod grid;
pub mod input;
pub mod lab;
pub mod maze;
pub mod memory;
pub mod path;
pub mod pqueue;
pub mod race;
pub mod warehouse;

pub use direction::Direction;
pub use grid::{Grid, Offset, Position};

/// Arguments of the puzzles that only need an input file.
#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}
