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

    let memory = Memory::new_square(args.map_size);
    let start_pos = Position::new(0, 0);
    let last_ind = args.map_size.saturating_sub(1);
    let end_pos = Position::new(last_ind, last_ind);
    if let Some(pos) = memory.first_blocking_byte(&corr_positions, &start_pos, &end_pos)? {
        println!(
            "The first byte that leaves no path from {} to {} falls at {}.",
            start_pos,
            end_pos,
            memory::format_position(&pos)
        );
    } else {
        eprintln!(
            "There's no byte can break the path from {} to {}.",
            start_pos, end_pos
        );
    }

    Ok(())
}
