use std::{collections::HashSet, error, fmt::Display, path::Path};

use anyhow::Result;

use crate::{
    direction::Direction,
    grid::{self, Grid, GridBuilder, Position},
    input,
};

#[derive(Debug)]
pub enum Error {
    Grid(grid::Error),
    MultipleGuards(Guard, Guard),
    InvalidChar(char),
    NoGuard,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Grid(e) => write!(f, "Invalid laboratory layout: {}", e),
            Error::MultipleGuards(guard0, guard1) => write!(
                f,
                "Found multiple guards({}, {}) in given laboratory, expect one only.",
                guard0, guard1
            ),
            Error::InvalidChar(c) => {
                write!(f, "Invalid character({}) in text of laboratory layout.", c)
            }
            Error::NoGuard => write!(f, "There's no guard in given laboratory, but expect one."),
        }
    }
}

impl error::Error for Error {}

impl From<grid::Error> for Error {
    fn from(value: grid::Error) -> Self {
        Error::Grid(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Obstruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guard {
    pos: Position,
    dir: Direction,
}

impl Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dir, self.pos)
    }
}

impl Guard {
    pub fn new(pos: &Position, dir: Direction) -> Self {
        Self {
            pos: pos.clone(),
            dir,
        }
    }

    pub fn pos(&self) -> &Position {
        &self.pos
    }

    pub fn dir(&self) -> Direction {
        self.dir
    }

    pub fn ahead_pos(&self) -> Option<Position> {
        self.pos.neighbor(self.dir)
    }

    pub fn turn_right(&mut self) {
        self.dir = self.dir.turn_right();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolState {
    Walking,
    Exited,
    Looping,
}

// Turns are recorded with the facing they were taken from.
#[derive(Debug)]
pub struct Patrol<'a> {
    lab: &'a Lab,
    guard: Guard,
    turns: HashSet<Guard>,
    state: PatrolState,
}

impl<'a> Patrol<'a> {
    fn new(lab: &'a Lab) -> Self {
        Self {
            lab,
            guard: lab.guard.clone(),
            turns: HashSet::new(),
            state: PatrolState::Walking,
        }
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn state(&self) -> PatrolState {
        self.state
    }

    pub fn step(&mut self) -> PatrolState {
        if self.state != PatrolState::Walking {
            return self.state;
        }

        let mut turn_n = 0;
        loop {
            let ahead_pos = self.guard.ahead_pos();
            if !ahead_pos
                .as_ref()
                .is_some_and(|pos| self.lab.is_obstructed(pos))
            {
                break;
            }

            if turn_n == Direction::all_dirs().len() || !self.turns.insert(self.guard.clone()) {
                self.state = PatrolState::Looping;
                return self.state;
            }

            self.guard.turn_right();
            turn_n += 1;
        }

        match self.guard.ahead_pos() {
            Some(next_pos) if self.lab.tiles.is_inside(&next_pos) => self.guard.pos = next_pos,
            _ => self.state = PatrolState::Exited,
        }

        self.state
    }

    /// Walks until the guard leaves or loops, calling `visit` on every
    /// position the guard stands on.
    pub fn run<F: FnMut(&Position)>(&mut self, mut visit: F) -> PatrolState {
        visit(self.guard.pos());
        while self.step() == PatrolState::Walking {
            visit(self.guard.pos());
        }

        self.state
    }
}

#[derive(Debug, Clone)]
pub struct Lab {
    tiles: Grid<Tile>,
    guard: Guard,
}

impl Lab {
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    pub fn patrol(&self) -> Patrol<'_> {
        Patrol::new(self)
    }

    pub fn patrol_positions(&self) -> Option<HashSet<Position>> {
        let mut positions = HashSet::new();
        match self.patrol().run(|pos| {
            positions.insert(pos.clone());
        }) {
            PatrolState::Exited => Some(positions),
            _ => None,
        }
    }

    pub fn is_loop_patrol(&self) -> bool {
        self.patrol().run(|_| ()) == PatrolState::Looping
    }

    /// Positions on the original patrol where one extra obstruction traps
    /// the guard in a loop. The guard's own position is never a candidate.
    pub fn loop_obstruction_positions(&self) -> HashSet<Position> {
        let Some(mut candidates) = self.patrol_positions() else {
            return HashSet::new();
        };
        candidates.remove(self.guard.pos());

        let mut trial_lab = self.clone();
        let mut loop_positions = HashSet::new();
        for pos in candidates {
            trial_lab.tiles.set(&pos, Tile::Obstruction);
            if trial_lab.is_loop_patrol() {
                loop_positions.insert(pos.clone());
            }
            trial_lab.tiles.set(&pos, Tile::Floor);
        }

        loop_positions
    }

    fn is_obstructed(&self, pos: &Position) -> bool {
        self.tiles
            .tile(pos)
            .is_some_and(|tile| *tile == Tile::Obstruction)
    }
}

#[derive(Debug, Default)]
struct LabBuilder {
    tiles: GridBuilder<Tile>,
    guard: Option<Guard>,
}

impl LabBuilder {
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let mut row = Vec::with_capacity(text.len());
        for (ind, c) in text.chars().enumerate() {
            row.push(match c {
                '.' => Tile::Floor,
                '#' => Tile::Obstruction,
                '^' | '>' | 'v' | '<' => {
                    let dir = Direction::try_from(c).map_err(|_| Error::InvalidChar(c))?;
                    let guard = Guard::new(&Position::new(self.tiles.row_n(), ind), dir);
                    if let Some(last_guard) = self.guard.take() {
                        return Err(Error::MultipleGuards(last_guard, guard));
                    }

                    self.guard = Some(guard);
                    Tile::Floor
                }
                other => return Err(Error::InvalidChar(other)),
            });
        }

        Ok(self.tiles.add_row(row)?)
    }

    pub fn build(self) -> Result<Lab, Error> {
        let Some(guard) = self.guard else {
            return Err(Error::NoGuard);
        };

        Ok(Lab {
            tiles: self.tiles.build()?,
            guard,
        })
    }
}

impl TryFrom<&str> for Lab {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut builder = LabBuilder::default();
        for line in value.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

pub fn read_lab<P: AsRef<Path>>(path: P) -> Result<Lab> {
    let mut builder = LabBuilder::default();
    for line in input::read_lines(&path)? {
        builder.add_row(line.as_str())?;
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LAB: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...";

    #[test]
    fn sample_patrol_visits_41_positions() {
        let lab = Lab::try_from(SAMPLE_LAB).unwrap();
        assert_eq!(lab.guard(), &Guard::new(&Position::new(6, 4), Direction::Up));
        assert_eq!(lab.patrol_positions().map(|p| p.len()), Some(41));
        assert!(!lab.is_loop_patrol());
    }

    #[test]
    fn sample_has_6_loop_obstructions() {
        let lab = Lab::try_from(SAMPLE_LAB).unwrap();
        let positions = lab.loop_obstruction_positions();
        assert_eq!(positions.len(), 6);
        assert!(positions.contains(&Position::new(6, 3)));
        assert!(!positions.contains(lab.guard().pos()));
    }

    #[test]
    fn obstruction_ahead_of_guard_is_reproducible() {
        let lab = Lab::try_from(SAMPLE_LAB).unwrap();
        let ahead_pos = lab.guard().ahead_pos().unwrap();
        let verdicts = (0..3)
            .map(|_| {
                let mut trial_lab = lab.clone();
                trial_lab.tiles.set(&ahead_pos, Tile::Obstruction);
                trial_lab.is_loop_patrol()
            })
            .collect::<Vec<_>>();
        assert!(verdicts.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(lab.tiles()[&ahead_pos], Tile::Floor);
    }

    #[test]
    fn revisiting_a_straight_line_is_not_a_loop() {
        // The guard comes back to the start facing left, then leaves.
        let lab = Lab::try_from(
            "\
..#..
....#
.....
#.^..
...#.",
        )
        .unwrap();
        assert_eq!(lab.patrol_positions().map(|p| p.len()), Some(10));
    }

    #[test]
    fn stacked_corner_turns_twice() {
        let lab = Lab::try_from(
            "\
.#.
..#
.^.",
        )
        .unwrap();
        let mut patrol = lab.patrol();
        assert_eq!(patrol.step(), PatrolState::Walking);
        assert_eq!(patrol.step(), PatrolState::Walking);
        assert_eq!(patrol.guard(), &Guard::new(&Position::new(2, 1), Direction::Down));
        assert_eq!(patrol.step(), PatrolState::Exited);
    }

    #[test]
    fn boxed_in_guard_loops() {
        let lab = Lab::try_from(
            "\
.#.
#>#
.#.",
        )
        .unwrap();
        assert_eq!(lab.patrol_positions(), None);
        assert!(lab.is_loop_patrol());
        assert!(lab.loop_obstruction_positions().is_empty());
    }

    #[test]
    fn patrol_ends_within_state_space_bound() {
        let lab = Lab::try_from(
            "\
.#....
.....#
#.....
....#.
..^...",
        )
        .unwrap();
        let bound = lab.tiles().row_n() * lab.tiles().col_n() * 4;
        for pos in lab.tiles().positions() {
            let mut trial_lab = lab.clone();
            if pos != *lab.guard().pos() {
                trial_lab.tiles.set(&pos, Tile::Obstruction);
            }
            let mut patrol = trial_lab.patrol();
            let mut step_n = 0;
            while patrol.step() == PatrolState::Walking {
                step_n += 1;
                assert!(step_n <= bound);
            }
        }
    }

    #[test]
    fn layout_errors() {
        assert!(matches!(Lab::try_from("..\n.."), Err(Error::NoGuard)));
        assert!(matches!(
            Lab::try_from("^.\n.v"),
            Err(Error::MultipleGuards(_, _))
        ));
        assert!(matches!(Lab::try_from(".x^"), Err(Error::InvalidChar('x'))));
        assert!(matches!(
            Lab::try_from("^..\n.."),
            Err(Error::Grid(grid::Error::InconsistentRow(3, 2)))
        ));
    }
}
