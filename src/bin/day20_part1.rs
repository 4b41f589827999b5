use anyhow::{Context, Result};
use clap::Parser;
use day6_15_16_18_20::race::{self, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let racetrack = race::read_racetrack(&args.input_path).with_context(|| {
        format!(
            "Failed to read racetrack from given file({}).",
            args.input_path.display()
        )
    })?;

    if racetrack.fastest_steps_n().is_none() {
        eprintln!("Given racetrack has no path if no cheat is allowed.");
        return Ok(());
    }

    let cheat_duration = 2;
    let cheats_n = racetrack.cheats_n(cheat_duration, args.threshold);
    println!(
        "There is(are) {} cheat ways to save at least {} steps on given racetrack.",
        cheats_n, args.threshold
    );

    Ok(())
}
