use std::{
    collections::HashSet,
    error,
    fmt::Display,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    grid::{Grid, Position},
    input, path,
};

#[derive(Debug)]
pub enum Error {
    NoCommaInPositionText,
    InvalidCoordinateText(String),
    OutsideMemory(Position),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoCommaInPositionText => write!(
                f,
                "Expect a comma to separate coordinates of position in text."
            ),
            Error::InvalidCoordinateText(s) => {
                write!(f, "Invalid text({}) for coordinate of position.", s)
            }
            Error::OutsideMemory(pos) => {
                write!(f, "Given position{} is outside of memory space.", pos)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Side length of the square memory space.
    #[arg(default_value_t = 71)]
    pub map_size: usize,
    /// How many of the first bytes have fallen.
    #[arg(long, default_value_t = 1024)]
    pub corrupt_size: usize,
}

/// Parses a byte position written as `X,Y`, column first.
pub fn parse_position(text: &str) -> std::result::Result<Position, Error> {
    let (c_text, r_text) = text.split_once(',').ok_or(Error::NoCommaInPositionText)?;
    let parse_coordinate = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|_| Error::InvalidCoordinateText(s.to_string()))
    };

    Ok(Position::new(parse_coordinate(r_text)?, parse_coordinate(c_text)?))
}

pub fn format_position(pos: &Position) -> String {
    format!("{},{}", pos.c(), pos.r())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Safe,
    Corrupted,
}

#[derive(Debug, Clone)]
pub struct Memory {
    tiles: Grid<Tile>,
}

impl Memory {
    pub fn new(row_n: usize, col_n: usize) -> Self {
        Self {
            tiles: Grid::new(row_n, col_n, Tile::Safe),
        }
    }

    pub fn new_square(side_len: usize) -> Self {
        Self::new(side_len, side_len)
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn corrupt(&mut self, corr_positions: &[Position]) -> std::result::Result<(), Error> {
        if let Some(pos) = corr_positions
            .iter()
            .find(|pos| !self.tiles.is_inside(pos))
        {
            return Err(Error::OutsideMemory(pos.clone()));
        }

        for pos in corr_positions {
            self.tiles.set(pos, Tile::Corrupted);
        }

        Ok(())
    }

    pub fn min_steps_n(&self, from: &Position, to: &Position) -> Option<usize> {
        path::step_distances(&self.tiles, from, Self::is_safe)
            .tile(to)
            .copied()
            .flatten()
    }

    /// Drops `bytes` in order and returns the first one after which `to` is
    /// no longer reachable from `from`.
    pub fn first_blocking_byte(
        &self,
        bytes: &[Position],
        from: &Position,
        to: &Position,
    ) -> std::result::Result<Option<Position>, Error> {
        let mut memory = self.clone();
        let Some(mut cur_path) = memory.shortest_path_positions(from, to) else {
            return Ok(None);
        };

        for byte in bytes {
            memory.corrupt(&[byte.clone()])?;
            // Only a byte landing on the current path can cut it.
            if !cur_path.contains(byte) {
                continue;
            }

            match memory.shortest_path_positions(from, to) {
                Some(next_path) => cur_path = next_path,
                None => return Ok(Some(byte.clone())),
            }
        }

        Ok(None)
    }

    fn shortest_path_positions(&self, from: &Position, to: &Position) -> Option<HashSet<Position>> {
        path::shortest_path(&self.tiles, from, to, Self::is_safe)
            .map(|positions| positions.into_iter().collect())
    }

    fn is_safe(tile: &Tile) -> bool {
        *tile == Tile::Safe
    }
}

pub fn read_positions<P: AsRef<Path>>(path: P) -> Result<Vec<Position>> {
    let lines = input::read_lines(&path)?;
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ind, line)| {
            parse_position(line).with_context(|| {
                format!(
                    "Failed to parse position from line {} of given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BYTES: &str = "\
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0";

    fn sample_bytes() -> Vec<Position> {
        SAMPLE_BYTES
            .lines()
            .map(|line| parse_position(line).unwrap())
            .collect()
    }

    #[test]
    fn sample_takes_22_steps_after_12_bytes() {
        let bytes = sample_bytes();
        let mut memory = Memory::new_square(7);
        memory.corrupt(&bytes[..12]).unwrap();
        assert_eq!(
            memory.min_steps_n(&Position::new(0, 0), &Position::new(6, 6)),
            Some(22)
        );
    }

    #[test]
    fn sample_first_blocking_byte() {
        let bytes = sample_bytes();
        let memory = Memory::new_square(7);
        let byte = memory
            .first_blocking_byte(&bytes, &Position::new(0, 0), &Position::new(6, 6))
            .unwrap();
        assert_eq!(byte.as_ref().map(format_position).as_deref(), Some("6,1"));

        // Every byte before the blocking one still leaves a path.
        let block_ind = bytes.iter().position(|pos| Some(pos) == byte.as_ref()).unwrap();
        let mut memory = Memory::new_square(7);
        memory.corrupt(&bytes[..block_ind]).unwrap();
        assert!(memory
            .min_steps_n(&Position::new(0, 0), &Position::new(6, 6))
            .is_some());
        memory.corrupt(&bytes[block_ind..=block_ind]).unwrap();
        assert_eq!(
            memory.min_steps_n(&Position::new(0, 0), &Position::new(6, 6)),
            None
        );
    }

    #[test]
    fn corrupted_endpoint_has_no_path() {
        let mut memory = Memory::new_square(3);
        memory.corrupt(&[Position::new(2, 2)]).unwrap();
        assert_eq!(
            memory.min_steps_n(&Position::new(0, 0), &Position::new(2, 2)),
            None
        );
        assert_eq!(
            memory.min_steps_n(&Position::new(0, 0), &Position::new(5, 5)),
            None
        );
    }

    #[test]
    fn byte_outside_memory_is_rejected() {
        let mut memory = Memory::new_square(3);
        assert!(matches!(
            memory.corrupt(&[Position::new(1, 1), Position::new(0, 3)]),
            Err(Error::OutsideMemory(_))
        ));
        assert_eq!(memory.tiles()[&Position::new(1, 1)], Tile::Safe);
    }

    #[test]
    fn position_text() {
        assert_eq!(parse_position("6,1").unwrap(), Position::new(1, 6));
        assert!(matches!(
            parse_position("61"),
            Err(Error::NoCommaInPositionText)
        ));
        assert!(matches!(
            parse_position("6,x"),
            Err(Error::InvalidCoordinateText(s)) if s == "x"
        ));
        assert_eq!(format_position(&Position::new(1, 6)), "6,1");
    }
}
