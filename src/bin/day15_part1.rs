use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::{warehouse, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let (mut warehouse, move_dirs) = warehouse::read_game(&args.input_path).with_context(|| {
        format!(
            "Failed to read warehouse and robot moves from given file({}).",
            args.input_path.display()
        )
    })?;

    warehouse.simulate(&move_dirs);
    println!(
        "After the robot finishes {} moves, the sum of boxes' GPS coordinates is {}.",
        move_dirs.len(),
        warehouse.gps_sum()
    );

    Ok(())
}
