use std::{
    collections::BTreeMap,
    error,
    fmt::Display,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::Parser;

use crate::{
    grid::{self, Grid, GridBuilder, Offset, Position},
    input, path,
};

#[derive(Debug)]
pub enum Error {
    Grid(grid::Error),
    MultipleStartPosition(Position, Position),
    MultipleEndPosition(Position, Position),
    InvalidCharForMap(char),
    NoStartPosition,
    NoEndPosition,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Grid(e) => write!(f, "Invalid racetrack map: {}", e),
            Error::MultipleStartPosition(last_pos, pos) => write!(
                f,
                "Expect only one start position, given two({}, {}).",
                last_pos, pos
            ),
            Error::MultipleEndPosition(last_pos, pos) => write!(
                f,
                "Expect only one end position, given two({}, {}).",
                last_pos, pos
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::NoStartPosition => write!(f, "No start position in map."),
            Error::NoEndPosition => write!(f, "No end position in map."),
        }
    }
}

impl error::Error for Error {}

impl From<grid::Error> for Error {
    fn from(value: grid::Error) -> Self {
        Error::Grid(value)
    }
}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    /// Least steps a cheat must save to be counted.
    #[arg(long, default_value_t = 100)]
    pub threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Track,
}

#[derive(Debug, Clone)]
pub struct Racetrack {
    tiles: Grid<Tile>,
    start_pos: Position,
    end_pos: Position,
}

impl Racetrack {
    pub fn start_pos(&self) -> &Position {
        &self.start_pos
    }

    pub fn end_pos(&self) -> &Position {
        &self.end_pos
    }

    pub fn distances_to_end(&self) -> Grid<Option<usize>> {
        path::step_distances(&self.tiles, &self.end_pos, |tile| *tile == Tile::Track)
    }

    pub fn fastest_steps_n(&self) -> Option<usize> {
        self.distances_to_end()[&self.start_pos]
    }

    /// Counts cheats by the steps they save.
    ///
    /// A cheat jumps from track tile `p` to track tile `q` at most `radius`
    /// steps away, ignoring walls in between, and saves
    /// `d(p) - d(q) - |p - q|` where `d` is the distance to the end. Cheats
    /// that lose steps are left out; ones saving nothing are kept under `0`.
    pub fn cheat_savings(&self, radius: usize) -> BTreeMap<usize, usize> {
        let distances = self.distances_to_end();
        let cheat_offsets = Self::cheat_offsets(radius);
        let mut savings = BTreeMap::new();
        for from_pos in distances.position_iter(|d| d.is_some()) {
            let Some(from_steps_n) = distances[&from_pos] else {
                continue;
            };

            for offset in &cheat_offsets {
                let Some(to_steps_n) = from_pos
                    .offset_by(offset)
                    .and_then(|to_pos| distances.tile(&to_pos).copied().flatten())
                else {
                    continue;
                };

                let cheat_steps_n = to_steps_n + offset.manhattan_len();
                if cheat_steps_n <= from_steps_n {
                    *savings.entry(from_steps_n - cheat_steps_n).or_insert(0) += 1;
                }
            }
        }

        savings
    }

    pub fn cheats_n(&self, radius: usize, threshold: usize) -> usize {
        self.cheat_savings(radius)
            .range(threshold..)
            .map(|(_, count)| count)
            .sum()
    }

    fn cheat_offsets(radius: usize) -> Vec<Offset> {
        let radius = radius as isize;
        (-radius..=radius)
            .flat_map(|dr| {
                let c_radius = radius - dr.abs();
                (-c_radius..=c_radius).map(move |dc| Offset::new(dr, dc))
            })
            .filter(|offset| offset.manhattan_len() > 0)
            .collect()
    }
}

#[derive(Debug, Default)]
struct RacetrackBuilder {
    tiles: GridBuilder<Tile>,
    start_pos: Option<Position>,
    end_pos: Option<Position>,
}

impl RacetrackBuilder {
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let mut row = Vec::with_capacity(text.len());
        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(self.tiles.row_n(), ind);
            row.push(match c {
                'S' => {
                    if let Some(last_pos) = self.start_pos.replace(pos.clone()) {
                        return Err(Error::MultipleStartPosition(last_pos, pos));
                    }

                    Tile::Track
                }
                'E' => {
                    if let Some(last_pos) = self.end_pos.replace(pos.clone()) {
                        return Err(Error::MultipleEndPosition(last_pos, pos));
                    }

                    Tile::Track
                }
                '#' => Tile::Wall,
                '.' => Tile::Track,
                other => return Err(Error::InvalidCharForMap(other)),
            });
        }

        Ok(self.tiles.add_row(row)?)
    }

    pub fn build(self) -> Result<Racetrack, Error> {
        let Some(start_pos) = self.start_pos else {
            return Err(Error::NoStartPosition);
        };
        let Some(end_pos) = self.end_pos else {
            return Err(Error::NoEndPosition);
        };

        Ok(Racetrack {
            tiles: self.tiles.build()?,
            start_pos,
            end_pos,
        })
    }
}

impl TryFrom<&str> for Racetrack {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut builder = RacetrackBuilder::default();
        for line in value.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

pub fn read_racetrack<P: AsRef<Path>>(path: P) -> Result<Racetrack> {
    let mut builder = RacetrackBuilder::default();
    for line in input::read_lines(&path)? {
        builder.add_row(&line)?;
    }

    Ok(builder.build()?)
}
