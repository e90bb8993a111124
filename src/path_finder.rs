//! Shortest paths with breadth-first search

use std::collections::VecDeque;

use tracing::trace;

use crate::{Direction, Grid, Point};

/// Breadth-first search over the open squares of a [Grid].
///
/// All moves have unit cost, so the first time BFS reaches the target it has
/// found a shortest path.
pub struct PathFinder<'a> {
    grid: &'a Grid,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Find the shortest walk from `origin` to `target`
    ///
    /// Returns the points after `origin`, ending with `target`. The result is
    /// empty when the target cannot be reached, when `origin == target`, or
    /// when either point lies outside the grid.
    ///
    /// Neighbours are expanded in the order up, down, left, right, which
    /// decides between equally short paths.
    pub fn shortest_path(&self, origin: Point, target: Point) -> Vec<Point> {
        let grid = self.grid;
        if origin == target || !grid.contains(origin) || !grid.is_open(target) {
            return vec![];
        }

        // Previous square on the shortest path to each visited square
        let mut prev: Vec<Option<Point>> = vec![None; grid.len()];
        let mut visited = vec![false; grid.len()];
        let mut queue = VecDeque::from([origin]);
        visited[grid.offset(origin)] = true;
        let mut expanded = 0;

        while let Some(current) = queue.pop_front() {
            expanded += 1;
            if current == target {
                trace!(expanded, "reached target");
                return Self::reconstruct(grid, &prev, origin, target);
            }
            for direction in Direction::ALL {
                let Some(next) = grid.neighbor(current, direction) else {
                    continue;
                };
                let idx = grid.offset(next);
                if !visited[idx] && grid.is_open(next) {
                    visited[idx] = true;
                    prev[idx] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        trace!(expanded, "target unreachable");
        vec![]
    }

    /// Walk the `prev` table back from `target` to `origin`
    fn reconstruct(grid: &Grid, prev: &[Option<Point>], origin: Point, target: Point) -> Vec<Point> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(p) = prev[grid.offset(current)] {
            if p == origin {
                break;
            }
            path.push(p);
            current = p;
        }
        path.reverse();
        path
    }
}

/// Shortest path from `origin` to `target`, see [PathFinder::shortest_path]
pub fn shortest_path(grid: &Grid, origin: Point, target: Point) -> Vec<Point> {
    PathFinder::new(grid).shortest_path(origin, target)
}

/// Direction of each step of `path`, starting from `origin`
///
/// Stops at the first pair of points that are not adjacent.
pub fn path_directions(origin: Point, path: &[Point]) -> Vec<Direction> {
    std::iter::once(&origin)
        .chain(path)
        .zip(path)
        .map_while(|(from, to)| Direction::between(*from, *to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{path_directions, shortest_path};
    use crate::{Direction, Grid, Point};

    fn p(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn straight_corridor() {
        let grid = Grid::parse(". . . .").unwrap();
        assert_eq!(
            shortest_path(&grid, p(0, 0), p(0, 3)),
            vec![p(0, 1), p(0, 2), p(0, 3)]
        );
    }

    #[test]
    fn goes_around_walls() {
        let grid = Grid::parse(
            "
. # . .
. # . #
. . . .",
        )
        .unwrap();
        let path = shortest_path(&grid, p(0, 0), p(0, 3));
        assert_eq!(
            path,
            vec![p(1, 0), p(2, 0), p(2, 1), p(2, 2), p(1, 2), p(0, 2), p(0, 3)]
        );
    }

    #[test]
    fn prefers_shorter_of_two_routes() {
        let grid = Grid::parse(
            "
. . . . .
. # # # .
. . . . .
# # # # .",
        )
        .unwrap();
        let path = shortest_path(&grid, p(2, 0), p(3, 4));
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&p(3, 4)));
    }

    #[test]
    fn unreachable_target_gives_empty_path() {
        let grid = Grid::parse(
            "
. # .
# # .
. . .",
        )
        .unwrap();
        assert!(shortest_path(&grid, p(0, 0), p(2, 2)).is_empty());
    }

    #[test]
    fn degenerate_queries_give_empty_path() {
        let grid = Grid::parse(". #\n. .").unwrap();
        assert!(shortest_path(&grid, p(1, 1), p(1, 1)).is_empty());
        assert!(shortest_path(&grid, p(0, 0), p(0, 1)).is_empty());
        assert!(shortest_path(&grid, p(0, 0), p(4, 4)).is_empty());
        assert!(shortest_path(&grid, p(9, 0), p(1, 1)).is_empty());
    }

    #[test]
    fn length_is_at_least_manhattan_distance() {
        let grid = Grid::parse(
            "
. . # . .
# . . . #
. . # . .
. # . . .
. . . # .",
        )
        .unwrap();
        let exit = p(4, 4);
        for origin in grid.points().filter(|o| grid.is_open(*o) && *o != exit) {
            let path = shortest_path(&grid, origin, exit);
            if path.is_empty() {
                continue;
            }
            assert!(path.len() >= origin.manhattan(exit));
            // Every suffix of a shortest path is itself a shortest path
            for (i, step) in path.iter().enumerate() {
                assert_eq!(shortest_path(&grid, *step, exit).len(), path.len() - i - 1);
            }
        }
    }

    #[test]
    fn directions_follow_path() {
        let path = vec![p(1, 0), p(1, 1), p(0, 1)];
        assert_eq!(
            path_directions(p(0, 0), &path),
            vec![Direction::Down, Direction::Right, Direction::Up]
        );
        assert_eq!(path_directions(p(0, 0), &[p(2, 2)]), vec![]);
        assert_eq!(path_directions(p(0, 0), &[]), vec![]);
    }
}
