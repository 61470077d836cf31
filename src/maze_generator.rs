//! Maze generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::direction::Direction;
use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::{solver, Point};

/// Maze generator owning its own random source
///
/// Two generators built with the same seed carve identical mazes.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Share of the cell count tried as extra openings in imperfect mazes
    const BRAID_DIVISOR: usize = 20;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a `width` x `height` maze around the obstacles of `pattern`
    ///
    /// A perfect maze is a spanning tree over the cells reachable from the
    /// origin. An imperfect one gets a few extra openings on top, adding
    /// loops.
    ///
    /// # Examples
    /// ```
    /// use a_maze_ing::{maze_generator::MazeGenerator, pattern::Pattern};
    ///
    /// let grid = MazeGenerator::new(Some(7)).generate(10, 8, &Pattern::default(), true);
    /// let open_cells = 10 * 8 - grid.obstacles().count();
    /// assert_eq!(grid.passages(), open_cells - 1);
    /// ```
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        pattern: &Pattern,
        perfect: bool,
    ) -> Grid {
        if !pattern.fits(width, height) {
            log::warn!(
                "{width}x{height} maze is too small for the {}x{} pattern, clipping it",
                pattern.width(),
                pattern.height()
            );
        }
        let mut grid = Grid::with_obstacles(width, height, pattern.cells(width, height));
        self.carve(&mut grid);
        if !perfect {
            self.braid(&mut grid);
        }
        grid
    }

    /// Carve a spanning tree with the recursive backtracker
    ///
    /// Starts from the top-left cell, or from the first free cell in
    /// row-major order when the top-left cell is an obstacle. Obstacles are
    /// never entered. Cells cut off from the start by obstacles stay fully
    /// walled.
    ///
    /// Returns the number of passages carved.
    pub fn carve(&mut self, grid: &mut Grid) -> usize {
        let Some(origin) = grid.points().find(|p| !grid.is_obstacle(*p)) else {
            log::warn!("Every cell is an obstacle, nothing to carve");
            return 0;
        };
        if origin != Point::ORIGIN {
            log::debug!("Top-left cell is an obstacle, carving from {origin}");
        }

        let width = grid.width();
        let index = |p: Point| p.y * width + p.x;
        let mut visited = vec![false; width * grid.height()];
        visited[index(origin)] = true;

        let mut stack = vec![origin];
        let mut carved = 0;
        while let Some(&current) = stack.last() {
            let candidates: Vec<(Point, Direction)> = Direction::ALL
                .into_iter()
                .filter_map(|dir| grid.neighbour(current, dir).map(|next| (next, dir)))
                .filter(|&(next, _)| !grid.is_obstacle(next) && !visited[index(next)])
                .collect();

            if let Some(&(next, dir)) = candidates.choose(&mut self.random) {
                grid.carve_edge(current, dir);
                visited[index(next)] = true;
                stack.push(next);
                carved += 1;
            } else {
                // Dead end, backtrack
                stack.pop();
            }
        }

        let free = visited.len() - grid.obstacles().count();
        if carved + 1 < free {
            log::warn!(
                "{} cells are walled off from {origin} by obstacles",
                free - solver::reachable(grid, origin).len()
            );
        }
        log::debug!("Carved {carved} passages from {origin}");
        carved
    }

    /// Knock down extra walls to add loops
    ///
    /// Makes `width * height / 20` attempts. Each picks a cell away from the
    /// last row and column and a wall to its east or south; the attempt is
    /// skipped if either side is an obstacle or the wall is already open.
    ///
    /// Returns the number of walls actually removed.
    pub fn braid(&mut self, grid: &mut Grid) -> usize {
        let (width, height) = (grid.width(), grid.height());
        let attempts = width * height / Self::BRAID_DIVISOR;
        if width < 2 || height < 2 {
            log::debug!("{width}x{height} maze is too narrow to braid");
            return 0;
        }

        let mut opened = 0;
        for _ in 0..attempts {
            let cell = Point::new(
                self.random.gen_range(0..width - 1),
                self.random.gen_range(0..height - 1),
            );
            let dir = if self.random.gen_bool(0.5) {
                Direction::E
            } else {
                Direction::S
            };
            let Some(next) = grid.neighbour(cell, dir) else {
                continue;
            };
            if grid.is_obstacle(cell) || grid.is_obstacle(next) || !grid.has_wall(cell, dir) {
                continue;
            }
            grid.carve_edge(cell, dir);
            opened += 1;
        }
        log::debug!("Braiding removed {opened} of {attempts} candidate walls");
        opened
    }
}
