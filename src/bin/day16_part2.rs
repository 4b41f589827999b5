use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::{maze, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let maze = maze::read_maze(&args.input_path).with_context(|| {
        format!(
            "Failed to read maze from given file({}).",
            args.input_path.display()
        )
    })?;

    if let Some(tiles_n) = maze.best_path_tiles_n() {
        println!(
            "There are {} tiles in maze that's on at least one path with the minimium score.",
            tiles_n
        );
    } else {
        eprintln!("There're no actions can complete the given maze.");
    }

    Ok(())
}
