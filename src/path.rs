use crate::{
    direction::Direction,
    grid::{Grid, Position},
    pqueue::PriorityQueue,
};

pub fn step_distances<T, F>(grid: &Grid<T>, from: &Position, is_open: F) -> Grid<Option<usize>>
where
    F: Fn(&T) -> bool,
{
    let mut distances = grid.map(|_| None);
    if !grid.tile(from).is_some_and(&is_open) {
        return distances;
    }

    distances[from] = Some(0);
    let mut frontier = PriorityQueue::from_iter([(0, from.clone())]);
    while let Some((cur_steps_n, cur_pos)) = frontier.pop() {
        if distances[&cur_pos].is_some_and(|steps_n| steps_n < cur_steps_n) {
            continue;
        }

        for next_pos in open_neighbors(grid, &cur_pos, &is_open) {
            let next_steps_n = cur_steps_n + 1;
            if distances[&next_pos].map_or(true, |steps_n| next_steps_n < steps_n) {
                distances[&next_pos] = Some(next_steps_n);
                frontier.push((next_steps_n, next_pos));
            }
        }
    }

    distances
}

/// Tiles of one shortest path from `from` to `to`, both ends included.
pub fn shortest_path<T, F>(
    grid: &Grid<T>,
    from: &Position,
    to: &Position,
    is_open: F,
) -> Option<Vec<Position>>
where
    F: Fn(&T) -> bool,
{
    if !grid.tile(from).is_some_and(&is_open) || !grid.tile(to).is_some_and(&is_open) {
        return None;
    }

    let mut best_steps: Grid<Option<usize>> = grid.map(|_| None);
    let mut prev_positions: Grid<Option<Position>> = grid.map(|_| None);
    best_steps[from] = Some(0);
    let mut frontier = PriorityQueue::from_iter([(0, from.clone())]);
    while let Some((cur_steps_n, cur_pos)) = frontier.pop() {
        if cur_pos == *to {
            let mut path = vec![cur_pos];
            while let Some(prev_pos) = path.last().and_then(|pos| prev_positions[pos].clone()) {
                path.push(prev_pos);
            }
            path.reverse();
            return Some(path);
        }

        if best_steps[&cur_pos].is_some_and(|steps_n| steps_n < cur_steps_n) {
            continue;
        }

        for next_pos in open_neighbors(grid, &cur_pos, &is_open) {
            let next_steps_n = cur_steps_n + 1;
            if best_steps[&next_pos].map_or(true, |steps_n| next_steps_n < steps_n) {
                best_steps[&next_pos] = Some(next_steps_n);
                prev_positions[&next_pos] = Some(cur_pos.clone());
                frontier.push((next_steps_n, next_pos));
            }
        }
    }

    None
}

fn open_neighbors<'a, T, F>(
    grid: &'a Grid<T>,
    pos: &'a Position,
    is_open: &'a F,
) -> impl Iterator<Item = Position> + 'a
where
    F: Fn(&T) -> bool,
{
    Direction::all_dirs()
        .iter()
        .filter_map(move |dir| pos.neighbor(*dir))
        .filter(move |next_pos| grid.tile(next_pos).is_some_and(is_open))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;

    fn walls(rows: &[&str]) -> Grid<bool> {
        let mut builder = GridBuilder::new();
        for row in rows {
            builder.add_row(row.chars().map(|c| c != '#')).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn distances_around_walls() {
        let grid = walls(&["...", "##.", "..."]);
        let distances = step_distances(&grid, &Position::new(0, 0), |open| *open);
        assert_eq!(distances[&Position::new(0, 2)], Some(2));
        assert_eq!(distances[&Position::new(2, 0)], Some(6));
        assert_eq!(distances[&Position::new(1, 0)], None);
    }

    #[test]
    fn unreachable_tiles_have_no_distance() {
        let grid = walls(&[".#.", "##.", "..."]);
        let distances = step_distances(&grid, &Position::new(0, 0), |open| *open);
        assert_eq!(distances[&Position::new(0, 0)], Some(0));
        assert_eq!(distances.position_iter(|d| d.is_some()).count(), 1);
    }

    #[test]
    fn path_includes_both_ends() {
        let grid = walls(&["...", "##.", "..."]);
        let path =
            shortest_path(&grid, &Position::new(0, 0), &Position::new(2, 0), |open| *open)
                .unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.first(), Some(&Position::new(0, 0)));
        assert_eq!(path.last(), Some(&Position::new(2, 0)));
        assert!(path
            .windows(2)
            .all(|pair| pair[0].manhattan_dist(&pair[1]) == 1));
    }

    #[test]
    fn no_path_through_walls() {
        let grid = walls(&[".#.", ".#.", ".#."]);
        assert_eq!(
            shortest_path(&grid, &Position::new(0, 0), &Position::new(0, 2), |open| *open),
            None
        );
        assert_eq!(
            shortest_path(&grid, &Position::new(0, 0), &Position::new(0, 1), |open| *open),
            None
        );
    }
}
