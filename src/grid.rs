use std::{
    error,
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::direction::Direction;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    EmptyGrid,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::EmptyGrid => write!(f, "Given grid has no tile."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dr: isize,
    pub dc: isize,
}

impl Offset {
    pub fn new(dr: isize, dc: isize) -> Self {
        Self { dr, dc }
    }

    pub fn manhattan_len(&self) -> usize {
        self.dr.unsigned_abs() + self.dc.unsigned_abs()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    /// Position one step along `dir`, or `None` if that would leave the
    /// non-negative quadrant.
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        self.offset_by(&dir.offset())
    }

    pub fn offset_by(&self, offset: &Offset) -> Option<Self> {
        let r = self.r.checked_add_signed(offset.dr)?;
        let c = self.c.checked_add_signed(offset.dc)?;
        Some(Self::new(r, c))
    }

    pub fn manhattan_dist(&self, other: &Position) -> usize {
        self.r.abs_diff(other.r) + self.c.abs_diff(other.c)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    tiles: Vec<T>,
    row_n: usize,
    col_n: usize,
}

impl<T: Clone> Grid<T> {
    pub fn new(row_n: usize, col_n: usize, fill: T) -> Self {
        Self {
            tiles: vec![fill; row_n * col_n],
            row_n,
            col_n,
        }
    }
}

impl<T> Grid<T> {
    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn is_inside(&self, pos: &Position) -> bool {
        pos.r < self.row_n && pos.c < self.col_n
    }

    pub fn tile(&self, pos: &Position) -> Option<&T> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub fn tile_mut(&mut self, pos: &Position) -> Option<&mut T> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get_mut(ind))
    }

    pub fn set(&mut self, pos: &Position, tile: T) {
        self[pos] = tile;
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tiles.len()).map(|ind| self.ind_to_pos(ind))
    }

    pub fn position_iter<'a, F>(&'a self, mut pred: F) -> impl Iterator<Item = Position> + 'a
    where
        F: FnMut(&T) -> bool + 'a,
    {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| pred(*tile))
            .map(|(ind, _)| self.ind_to_pos(ind))
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            tiles: self.tiles.iter().map(f).collect(),
            row_n: self.row_n,
            col_n: self.col_n,
        }
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if self.is_inside(pos) {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind / self.col_n, ind % self.col_n)
    }
}

impl<T> Index<&Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: &Position) -> &Self::Output {
        self.tile(pos).unwrap_or_else(|| {
            panic!(
                "Position{} is outside of grid({} x {}).",
                pos, self.row_n, self.col_n
            )
        })
    }
}

impl<T> IndexMut<&Position> for Grid<T> {
    fn index_mut(&mut self, pos: &Position) -> &mut Self::Output {
        let (row_n, col_n) = (self.row_n, self.col_n);
        self.tile_mut(pos).unwrap_or_else(|| {
            panic!(
                "Position{} is outside of grid({} x {}).",
                pos, row_n, col_n
            )
        })
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.chunks(self.col_n.max(1)) {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct GridBuilder<T> {
    tiles: Vec<T>,
    row_n: usize,
    col_n: Option<usize>,
}

impl<T> Default for GridBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GridBuilder<T> {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
        }
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn add_row<I: IntoIterator<Item = T>>(&mut self, row: I) -> Result<(), Error> {
        let last_len = self.tiles.len();
        self.tiles.extend(row);
        let this_col_n = self.tiles.len() - last_len;
        let expect_col_n = *self.col_n.get_or_insert(this_col_n);
        if expect_col_n != this_col_n {
            self.tiles.truncate(last_len);
            return Err(Error::InconsistentRow(expect_col_n, this_col_n));
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<Grid<T>, Error> {
        match self.col_n {
            Some(col_n) if col_n > 0 => Ok(Grid {
                tiles: self.tiles,
                row_n: self.row_n,
                col_n,
            }),
            _ => Err(Error::EmptyGrid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid<u8> {
        let mut builder = GridBuilder::new();
        builder.add_row([1, 2, 3]).unwrap();
        builder.add_row([4, 5, 6]).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn builder_rejects_ragged_rows() {
        let mut builder = GridBuilder::new();
        builder.add_row([1, 2, 3]).unwrap();
        assert!(matches!(
            builder.add_row([4, 5]),
            Err(Error::InconsistentRow(3, 2))
        ));
        assert!(matches!(
            GridBuilder::<u8>::new().build(),
            Err(Error::EmptyGrid)
        ));
    }

    #[test]
    fn bounds_checked_access() {
        let grid = sample_grid();
        assert_eq!(grid.row_n(), 2);
        assert_eq!(grid.col_n(), 3);
        assert_eq!(grid[&Position::new(1, 2)], 6);
        assert!(grid.is_inside(&Position::new(1, 0)));
        assert!(!grid.is_inside(&Position::new(2, 0)));
        assert!(!grid.is_inside(&Position::new(0, 3)));
        assert_eq!(grid.tile(&Position::new(0, 3)), None);
    }

    #[test]
    #[should_panic]
    fn index_outside_panics() {
        let grid = sample_grid();
        let _ = grid[&Position::new(2, 0)];
    }

    #[test]
    fn clone_is_independent() {
        let grid = sample_grid();
        let mut copy = grid.clone();
        copy.set(&Position::new(0, 0), 9);
        assert_eq!(grid[&Position::new(0, 0)], 1);
        assert_eq!(copy[&Position::new(0, 0)], 9);
    }

    #[test]
    fn positions_are_row_major() {
        let grid = sample_grid();
        let even = grid.position_iter(|n| n % 2 == 0).collect::<Vec<_>>();
        assert_eq!(
            even,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2)
            ]
        );
        assert_eq!(grid.positions().count(), 6);
        assert_eq!(grid.map(|n| n * 2)[&Position::new(1, 1)], 10);
    }

    #[test]
    fn neighbors_stay_non_negative() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.neighbor(Direction::Up), None);
        assert_eq!(origin.neighbor(Direction::Left), None);
        assert_eq!(origin.neighbor(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(
            Position::new(3, 4).offset_by(&Offset::new(-2, 1)),
            Some(Position::new(1, 5))
        );
        assert_eq!(Position::new(3, 4).manhattan_dist(&Position::new(1, 7)), 5);
        assert_eq!(Offset::new(-2, 3).manhattan_len(), 5);
    }
}
