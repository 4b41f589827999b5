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

    if let Some(min_score) = maze.min_score() {
        println!("The minimium score of completing the maze is {}.", min_score);
    } else {
        eprintln!("There're no actions can complete the given maze.");
    }

    Ok(())
}
