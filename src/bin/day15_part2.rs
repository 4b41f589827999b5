use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::{warehouse, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let (warehouse, move_dirs) = warehouse::read_game(&args.input_path).with_context(|| {
        format!(
            "Failed to read warehouse and robot moves from given file({}).",
            args.input_path.display()
        )
    })?;

    let mut wide_warehouse = warehouse.widen();
    wide_warehouse.simulate(&move_dirs);
    println!(
        "In the widened warehouse, the sum of boxes' GPS coordinates is {}.",
        wide_warehouse.gps_sum()
    );

    Ok(())
}
