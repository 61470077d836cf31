//! Shortest paths through a carved grid

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::direction::{Direction, UnknownDirection};
use crate::grid::Grid;
use crate::Point;

/// Walk through open passages, one direction per step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    pub fn new(steps: Vec<Direction>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Cells visited when following the path from `start`, including both
    /// ends.
    ///
    /// Returns `None` if a step leaves the grid or crosses a wall.
    pub fn walk(&self, grid: &Grid, start: Point) -> Option<Vec<Point>> {
        let mut cells = vec![start];
        let mut current = start;
        for &dir in &self.steps {
            if grid.has_wall(current, dir) {
                return None;
            }
            current = grid.neighbour(current, dir)?;
            cells.push(current);
        }
        Some(cells)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.iter().join(""))
    }
}

impl FromStr for Path {
    type Err = UnknownDirection;

    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        letters
            .chars()
            .map(Direction::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}

/// Breadth-first exploration state
struct Search {
    /// Direction each visited cell was first reached by, row-major
    came_from: Vec<Option<Direction>>,
    /// Cells in the order they were dequeued
    order: Vec<Point>,
}

/// Breadth-first search from `start`, stopping once `target` is dequeued.
///
/// Neighbours are enqueued in [Direction::ALL] order, which fixes the
/// tie-breaking between equally short paths.
fn explore(grid: &Grid, start: Point, target: Option<Point>) -> Search {
    let width = grid.width();
    let index = |p: Point| p.y * width + p.x;

    let mut visited = vec![false; width * grid.height()];
    let mut came_from = vec![None; width * grid.height()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited[index(start)] = true;

    while let Some(current) = queue.pop_front() {
        order.push(current);
        if Some(current) == target {
            break;
        }
        for dir in Direction::ALL {
            if grid.has_wall(current, dir) {
                continue;
            }
            let Some(next) = grid.neighbour(current, dir) else {
                continue;
            };
            if !visited[index(next)] {
                visited[index(next)] = true;
                came_from[index(next)] = Some(dir);
                queue.push_back(next);
            }
        }
    }
    Search { came_from, order }
}

/// Shortest path from `start` to `end`
///
/// Returns `Some` of an empty path when `start == end`, and `None` when
/// `end` cannot be reached. Among equally short paths, the one found first
/// when expanding neighbours in N, E, S, W order wins.
///
/// # Panics
/// If `start` or `end` lies outside the grid.
///
/// # Examples
/// ```
/// use a_maze_ing::{direction::Direction, grid::Grid, solver, Point};
///
/// let mut grid = Grid::new(2, 2);
/// grid.carve_edge(Point::new(0, 0), Direction::E);
/// grid.carve_edge(Point::new(1, 0), Direction::S);
///
/// let path = solver::solve(&grid, Point::new(0, 0), Point::new(1, 1)).unwrap();
/// assert_eq!(path.to_string(), "ES");
/// assert_eq!(solver::solve(&grid, Point::new(0, 0), Point::new(0, 1)), None);
/// ```
pub fn solve(grid: &Grid, start: Point, end: Point) -> Option<Path> {
    assert!(
        grid.contains(start) && grid.contains(end),
        "endpoints {start} and {end} must lie inside the grid"
    );
    if start == end {
        return Some(Path::default());
    }

    let search = explore(grid, start, Some(end));
    if search.order.last() != Some(&end) {
        return None;
    }

    let width = grid.width();
    let mut steps = Vec::new();
    let mut current = end;
    while current != start {
        let dir = search.came_from[current.y * width + current.x]?;
        steps.push(dir);
        current = grid.neighbour(current, dir.opposite())?;
    }
    steps.reverse();
    Some(Path::new(steps))
}

/// Cells reachable from `start` through open passages, `start` first
///
/// # Panics
/// If `start` lies outside the grid.
pub fn reachable(grid: &Grid, start: Point) -> Vec<Point> {
    assert!(grid.contains(start), "cell {start} outside the grid");
    explore(grid, start, None).order
}
