use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::{lab, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let lab = lab::read_lab(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory layout from given file({}).",
            args.input_path.display()
        )
    })?;

    if lab.is_loop_patrol() {
        eprintln!("The guard already walks in a loop in the given laboratory.");
        return Ok(());
    }

    let positions = lab.loop_obstruction_positions();
    println!(
        "There are {} positions where a new obstruction traps the guard in a loop.",
        positions.len()
    );

    Ok(())
}
