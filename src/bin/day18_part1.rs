use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::{
    memory::{self, CLIArgs, Memory},
    Position,
};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let corr_positions = memory::read_positions(&args.input_path).with_context(|| {
        format!(
            "Failed to read corrupted positions from given file({}).",
            args.input_path.display()
        )
    })?;

    let mut memory = Memory::new_square(args.map_size);
    let corrupt_size = args.corrupt_size.min(corr_positions.len());
    memory.corrupt(&corr_positions[..corrupt_size])?;
    let start_pos = Position::new(0, 0);
    let last_ind = args.map_size.saturating_sub(1);
    let end_pos = Position::new(last_ind, last_ind);
    if let Some(min_exit_steps_n) = memory.min_steps_n(&start_pos, &end_pos) {
        println!(
            "It takes at least {} steps moving from {} to {} after {} bytes fell.",
            min_exit_steps_n, start_pos, end_pos, corrupt_size
        );
    } else {
        eprintln!(
            "There's no path from {} to {} after {} bytes fell.",
            start_pos, end_pos, corrupt_size
        );
    }

    Ok(())
}
