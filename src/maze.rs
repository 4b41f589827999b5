use std::{
    collections::{HashSet, LinkedList},
    error,
    fmt::Display,
    path::Path,
};

use anyhow::Result;

use crate::{
    direction::Direction,
    grid::{self, Grid, GridBuilder, Position},
    input,
    pqueue::PriorityQueue,
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
            Error::Grid(e) => write!(f, "Invalid maze map: {}", e),
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    TurnClockwise,
    TurnCounterclockwise,
}

impl Action {
    pub fn all_actions() -> &'static [Action] {
        static ALL_ACTIONS: [Action; 3] = [
            Action::Forward,
            Action::TurnClockwise,
            Action::TurnCounterclockwise,
        ];

        &ALL_ACTIONS
    }

    pub fn score(&self) -> usize {
        match self {
            Action::Forward => 1,
            Action::TurnClockwise | Action::TurnCounterclockwise => 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reindeer {
    pos: Position,
    dir: Direction,
}

impl Reindeer {
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

    pub fn clone_and_do(&self, action: Action, maze: &Maze) -> Option<Reindeer> {
        match action {
            Action::Forward => self
                .pos
                .neighbor(self.dir)
                .filter(|pos| maze.is_floor(pos))
                .map(|pos| Self::new(&pos, self.dir)),
            Action::TurnClockwise => Some(Self::new(&self.pos, self.dir.turn_right())),
            Action::TurnCounterclockwise => Some(Self::new(&self.pos, self.dir.turn_left())),
        }
    }

    pub fn clone_and_do_reverse(&self, action: Action, maze: &Maze) -> Option<Reindeer> {
        match action {
            Action::Forward => self
                .pos
                .neighbor(self.dir.reverse())
                .filter(|pos| maze.is_floor(pos))
                .map(|pos| Self::new(&pos, self.dir)),
            Action::TurnClockwise => Some(Self::new(&self.pos, self.dir.turn_left())),
            Action::TurnCounterclockwise => Some(Self::new(&self.pos, self.dir.turn_right())),
        }
    }
}

// Field order gives the queue its tie-break: score, then position, then facing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct State {
    score: usize,
    deer: Reindeer,
}

impl State {
    pub fn new(deer: Reindeer, score: usize) -> Self {
        Self { score, deer }
    }
}

type PoseScores = Grid<[Option<usize>; 4]>;

#[derive(Debug, Clone)]
pub struct Maze {
    tiles: Grid<Tile>,
    start_pos: Position,
    end_pos: Position,
}

impl Maze {
    pub fn start_pos(&self) -> &Position {
        &self.start_pos
    }

    pub fn end_pos(&self) -> &Position {
        &self.end_pos
    }

    pub fn min_score(&self) -> Option<usize> {
        self.pose_scores().map(|(_, min_score)| min_score)
    }

    /// Number of tiles lying on at least one path with the minimum score.
    pub fn best_path_tiles_n(&self) -> Option<usize> {
        let (scores, min_score) = self.pose_scores()?;
        let end_deers = Direction::all_dirs()
            .iter()
            .map(|dir| Reindeer::new(&self.end_pos, *dir))
            .filter(|deer| Self::score_of(&scores, deer) == Some(min_score))
            .collect::<Vec<_>>();

        let mut searched_deers = end_deers.iter().cloned().collect::<HashSet<_>>();
        let mut search_deers = end_deers.into_iter().collect::<LinkedList<_>>();
        let mut path_positions = HashSet::new();
        while let Some(cur_deer) = search_deers.pop_front() {
            path_positions.insert(cur_deer.pos.clone());
            let Some(cur_score) = Self::score_of(&scores, &cur_deer) else {
                continue;
            };

            for action in Action::all_actions() {
                let Some(src_deer) = cur_deer.clone_and_do_reverse(*action, self) else {
                    continue;
                };
                if Self::score_of(&scores, &src_deer)
                    .is_some_and(|src_score| src_score + action.score() == cur_score)
                    && searched_deers.insert(src_deer.clone())
                {
                    search_deers.push_back(src_deer);
                }
            }
        }

        Some(path_positions.len())
    }

    // Every pose scoring no more than the minimum is settled when this returns.
    fn pose_scores(&self) -> Option<(PoseScores, usize)> {
        let mut scores: PoseScores = self.tiles.map(|_| [None; 4]);
        let mut settled = self.tiles.map(|_| [false; 4]);
        let init_deer = self.init_deer();
        scores[&init_deer.pos][init_deer.dir.index()] = Some(0);

        let mut min_score: Option<usize> = None;
        let mut possible_states = PriorityQueue::from_iter([State::new(init_deer, 0)]);
        while !possible_states.is_empty() {
            let cur_state = possible_states.remove();
            if min_score.is_some_and(|min_score| cur_state.score > min_score) {
                break;
            }

            let cur_deer = &cur_state.deer;
            if Self::score_of(&scores, cur_deer).is_some_and(|score| score < cur_state.score) {
                continue;
            }
            settled[&cur_deer.pos][cur_deer.dir.index()] = true;

            if cur_deer.pos == self.end_pos {
                min_score.get_or_insert(cur_state.score);
                continue;
            }

            for action in Action::all_actions() {
                let Some(next_deer) = cur_deer.clone_and_do(*action, self) else {
                    continue;
                };
                let next_score = cur_state.score + action.score();
                let score_slot = &mut scores[&next_deer.pos][next_deer.dir.index()];
                if score_slot.is_some_and(|score| score <= next_score) {
                    continue;
                }

                debug_assert!(
                    !settled[&next_deer.pos][next_deer.dir.index()],
                    "Settled reindeer({:?}) gets a lower score({}).",
                    next_deer,
                    next_score
                );
                *score_slot = Some(next_score);
                possible_states.push(State::new(next_deer, next_score));
            }
        }

        min_score.map(|min_score| (scores, min_score))
    }

    fn score_of(scores: &PoseScores, deer: &Reindeer) -> Option<usize> {
        scores[&deer.pos][deer.dir.index()]
    }

    fn is_floor(&self, pos: &Position) -> bool {
        self.tiles.tile(pos).is_some_and(|tile| *tile == Tile::Floor)
    }

    fn init_deer(&self) -> Reindeer {
        Reindeer::new(&self.start_pos, Direction::Right)
    }
}

#[derive(Debug, Default)]
struct MazeBuilder {
    tiles: GridBuilder<Tile>,
    start_pos: Option<Position>,
    end_pos: Option<Position>,
}

impl MazeBuilder {
    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let mut row = Vec::with_capacity(text.len());
        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(self.tiles.row_n(), ind);
            row.push(match c {
                'S' => {
                    if let Some(last_pos) = self.start_pos.take() {
                        return Err(Error::MultipleStartPosition(last_pos, pos));
                    }

                    self.start_pos = Some(pos);
                    Tile::Floor
                }
                'E' => {
                    if let Some(last_pos) = self.end_pos.take() {
                        return Err(Error::MultipleEndPosition(last_pos, pos));
                    }

                    self.end_pos = Some(pos);
                    Tile::Floor
                }
                '#' => Tile::Wall,
                '.' => Tile::Floor,
                other => return Err(Error::InvalidCharForMap(other)),
            });
        }

        Ok(self.tiles.add_row(row)?)
    }

    pub fn build(self) -> Result<Maze, Error> {
        let start_pos = self.start_pos.ok_or(Error::NoStartPosition)?;
        let end_pos = self.end_pos.ok_or(Error::NoEndPosition)?;

        Ok(Maze {
            tiles: self.tiles.build()?,
            start_pos,
            end_pos,
        })
    }
}

impl TryFrom<&str> for Maze {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut builder = MazeBuilder::default();
        for line in value.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

pub fn read_maze<P: AsRef<Path>>(path: P) -> Result<Maze> {
    let mut builder = MazeBuilder::default();
    for line in input::read_lines(&path)? {
        builder.add_row(&line)?;
    }

    Ok(builder.build()?)
}
