use std::{
    collections::{HashSet, VecDeque},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::Result;

use crate::{
    direction::{self, Direction},
    grid::{self, Grid, GridBuilder, Position},
    input,
};

#[derive(Debug)]
pub enum Error {
    Grid(grid::Error),
    Direction(direction::Error),
    MultipleRobots(Position, Position),
    InvalidCharForMap(char),
    NoRobotInMap,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Grid(e) => write!(f, "Invalid warehouse map: {}", e),
            Error::Direction(e) => write!(f, "Invalid robot move: {}", e),
            Error::MultipleRobots(last_position, this_position) => write!(
                f,
                "Given two robots in map({}, {}), expect only one.",
                last_position, this_position
            ),
            Error::InvalidCharForMap(c) => write!(f, "Invalid character({}) for map.", c),
            Error::NoRobotInMap => write!(f, "No robot found in given map, expect one."),
        }
    }
}

impl error::Error for Error {}

impl From<grid::Error> for Error {
    fn from(value: grid::Error) -> Self {
        Error::Grid(value)
    }
}

impl From<direction::Error> for Error {
    fn from(value: direction::Error) -> Self {
        Error::Direction(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Box,
    WideBoxLeft,
    WideBoxRight,
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tile_char = match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Box => 'O',
            Tile::WideBoxLeft => '[',
            Tile::WideBoxRight => ']',
        };

        write!(f, "{}", tile_char)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    tiles: Grid<Tile>,
    robot_pos: Position,
}

impl Display for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.tiles.row_n() {
            for c in 0..self.tiles.col_n() {
                let pos = Position::new(r, c);
                if pos == self.robot_pos {
                    write!(f, "@")?;
                } else {
                    write!(f, "{}", self.tiles[&pos])?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Warehouse {
    pub fn robot_pos(&self) -> &Position {
        &self.robot_pos
    }

    pub fn simulate(&mut self, dirs: &[Direction]) {
        for dir in dirs {
            self.push_robot(*dir);
        }
    }

    /// Moves the robot one tile along `dir`, shoving every box in the way.
    /// Nothing moves if any of those boxes is blocked by a wall.
    pub fn push_robot(&mut self, dir: Direction) -> bool {
        let mut moving_positions = Vec::new();
        let mut check_positions = VecDeque::from([self.robot_pos.clone()]);
        let mut checked_positions = HashSet::new();
        while let Some(cur_pos) = check_positions.pop_front() {
            if !checked_positions.insert(cur_pos.clone()) {
                continue;
            }

            let Some(next_pos) = cur_pos.neighbor(dir) else {
                return false;
            };
            match self.tiles.tile(&next_pos) {
                None | Some(Tile::Wall) => return false,
                Some(Tile::Floor) => (),
                Some(Tile::Box) => check_positions.push_back(next_pos.clone()),
                Some(Tile::WideBoxLeft) => {
                    if dir.is_vertical() {
                        if let Some(right_pos) = next_pos.neighbor(Direction::Right) {
                            check_positions.push_back(right_pos);
                        }
                    }
                    check_positions.push_back(next_pos.clone());
                }
                Some(Tile::WideBoxRight) => {
                    if dir.is_vertical() {
                        if let Some(left_pos) = next_pos.neighbor(Direction::Left) {
                            check_positions.push_back(left_pos);
                        }
                    }
                    check_positions.push_back(next_pos.clone());
                }
            }
            moving_positions.push(cur_pos);
        }

        // Positions were found nearest first, so the farthest box moves first.
        for pos in moving_positions.iter().skip(1).rev() {
            if let Some(next_pos) = pos.neighbor(dir) {
                let tile = self.tiles[pos];
                self.tiles.set(&next_pos, tile);
                self.tiles.set(pos, Tile::Floor);
            }
        }
        if let Some(next_pos) = self.robot_pos.neighbor(dir) {
            self.robot_pos = next_pos;
        }

        true
    }

    pub fn gps_sum(&self) -> usize {
        self.tiles
            .position_iter(|tile| matches!(tile, Tile::Box | Tile::WideBoxLeft))
            .map(|pos| pos.r() * 100 + pos.c())
            .sum()
    }

    pub fn widen(&self) -> Warehouse {
        let mut tiles = Grid::new(self.tiles.row_n(), self.tiles.col_n() * 2, Tile::Floor);
        for pos in self.tiles.positions() {
            let (left_tile, right_tile) = match self.tiles[&pos] {
                Tile::Wall => (Tile::Wall, Tile::Wall),
                Tile::Box | Tile::WideBoxLeft | Tile::WideBoxRight => {
                    (Tile::WideBoxLeft, Tile::WideBoxRight)
                }
                Tile::Floor => (Tile::Floor, Tile::Floor),
            };
            tiles.set(&Position::new(pos.r(), pos.c() * 2), left_tile);
            tiles.set(&Position::new(pos.r(), pos.c() * 2 + 1), right_tile);
        }

        Warehouse {
            tiles,
            robot_pos: Position::new(self.robot_pos.r(), self.robot_pos.c() * 2),
        }
    }
}

#[derive(Debug, Default)]
struct WarehouseBuilder {
    tiles: GridBuilder<Tile>,
    robot_pos: Option<Position>,
}

impl WarehouseBuilder {
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let mut row = Vec::with_capacity(text.len());
        for (ind, c) in text.chars().enumerate() {
            row.push(match c {
                '#' => Tile::Wall,
                '.' => Tile::Floor,
                'O' => Tile::Box,
                '@' => {
                    let this_robot_pos = Position::new(self.tiles.row_n(), ind);
                    if let Some(last_robot_pos) = self.robot_pos.take() {
                        return Err(Error::MultipleRobots(last_robot_pos, this_robot_pos));
                    }

                    self.robot_pos = Some(this_robot_pos);
                    Tile::Floor
                }
                other => return Err(Error::InvalidCharForMap(other)),
            });
        }

        Ok(self.tiles.add_row(row)?)
    }

    pub fn build(self) -> Result<Warehouse, Error> {
        let Some(robot_pos) = self.robot_pos else {
            return Err(Error::NoRobotInMap);
        };

        Ok(Warehouse {
            tiles: self.tiles.build()?,
            robot_pos,
        })
    }
}

pub fn parse_game<'a, I>(lines: I) -> Result<(Warehouse, Vec<Direction>), Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut lines = lines.into_iter();
    let mut builder = WarehouseBuilder::default();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        builder.add_row(line)?;
    }

    let mut move_dirs = Vec::new();
    for line in lines {
        for c in line.chars() {
            move_dirs.push(Direction::try_from(c)?);
        }
    }

    Ok((builder.build()?, move_dirs))
}

pub fn read_game<P: AsRef<Path>>(path: P) -> Result<(Warehouse, Vec<Direction>)> {
    let lines = input::read_lines(&path)?;
    Ok(parse_game(lines.iter().map(|line| line.as_str()))?)
}
