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

    if let Some(positions) = lab.patrol_positions() {
        println!(
            "The guard visits {} distinct positions before leaving the laboratory.",
            positions.len()
        );
    } else {
        eprintln!("The guard never leaves the given laboratory.");
    }

    Ok(())
}
