//! Wall bitmask grid

use bitflags::bitflags;

use crate::direction::Direction;
use crate::Point;

bitflags! {
    /// Closed sides of a cell
    ///
    /// The bit values are the ones written to the maze file, one hex digit
    /// per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const NORTH = 0b0001;
        const EAST  = 0b0010;
        const SOUTH = 0b0100;
        const WEST  = 0b1000;
    }
}

/// Rectangular grid of cells, each holding its own wall bitmask
///
/// Every passage is stored twice, once in each of the two cells it joins.
/// [Grid::carve_edge] is the only way to open a passage and it always
/// clears both bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major wall masks
    cells: Vec<Walls>,
    /// Row-major obstacle flags; obstacle cells are never carved
    obstacles: Vec<bool>,
}

impl Grid {
    /// Fully walled grid without obstacles
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self {
            width,
            height,
            cells: vec![Walls::all(); width * height],
            obstacles: vec![false; width * height],
        }
    }

    /// Fully walled grid with the given cells marked as obstacles
    ///
    /// Obstacles outside the grid are ignored.
    pub fn with_obstacles(
        width: usize,
        height: usize,
        obstacles: impl IntoIterator<Item = Point>,
    ) -> Self {
        let mut grid = Self::new(width, height);
        for p in obstacles {
            if grid.contains(p) {
                let idx = grid.index(p);
                grid.obstacles[idx] = true;
            }
        }
        grid
    }

    /// Replace every wall mask at once, used when reading a stored maze.
    pub(crate) fn set_walls(&mut self, cells: Vec<Walls>) {
        assert_eq!(cells.len(), self.cells.len(), "wall count mismatch");
        self.cells = cells;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// # Panics
    /// If `p` lies outside the grid.
    fn index(&self, p: Point) -> usize {
        assert!(
            self.contains(p),
            "cell {p} outside {}x{} grid",
            self.width,
            self.height
        );
        p.y * self.width + p.x
    }

    /// Wall mask of a cell
    pub fn walls(&self, p: Point) -> Walls {
        self.cells[self.index(p)]
    }

    pub fn has_wall(&self, p: Point, dir: Direction) -> bool {
        self.walls(p).contains(dir.wall())
    }

    pub fn is_obstacle(&self, p: Point) -> bool {
        self.obstacles[self.index(p)]
    }

    /// Obstacle cells in row-major order
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|p| self.is_obstacle(*p))
    }

    /// All cells in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Point { y, x }))
    }

    /// Rows of wall masks, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Walls]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Neighbouring cell in `dir`, if it lies inside the grid
    pub fn neighbour(&self, p: Point, dir: Direction) -> Option<Point> {
        let x = p.x.checked_add_signed(dir.dx())?;
        let y = p.y.checked_add_signed(dir.dy())?;
        let next = Point { y, x };
        self.contains(next).then_some(next)
    }

    /// Open the passage from `a` towards `dir`.
    ///
    /// Clears the `dir` wall on `a` and the opposite wall on its neighbour
    /// together, so the two masks never disagree.
    ///
    /// # Panics
    /// If the neighbour is outside the grid or either cell is an obstacle.
    pub fn carve_edge(&mut self, a: Point, dir: Direction) {
        let b = self
            .neighbour(a, dir)
            .unwrap_or_else(|| panic!("no cell {dir} of {a}"));
        assert!(
            !self.is_obstacle(a) && !self.is_obstacle(b),
            "cannot carve between {a} and obstacle {b}"
        );
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells[ia].remove(dir.wall());
        self.cells[ib].remove(dir.opposite().wall());
    }

    /// Number of open passages
    ///
    /// Counts each passage once, looking only east and south from each
    /// cell.
    pub fn passages(&self) -> usize {
        self.points()
            .map(|p| {
                [Direction::E, Direction::S]
                    .into_iter()
                    .filter(|&dir| self.neighbour(p, dir).is_some() && !self.has_wall(p, dir))
                    .count()
            })
            .sum()
    }

    /// First border wall that is open onto the outside of the grid
    pub fn find_open_border(&self) -> Option<(Point, Direction)> {
        self.points().find_map(|p| {
            Direction::ALL
                .into_iter()
                .find(|&dir| self.neighbour(p, dir).is_none() && !self.has_wall(p, dir))
                .map(|dir| (p, dir))
        })
    }

    /// First cell pair whose shared wall is recorded on one side only
    pub fn find_asymmetry(&self) -> Option<(Point, Direction)> {
        self.points().find_map(|p| {
            [Direction::E, Direction::S].into_iter().find_map(|dir| {
                let q = self.neighbour(p, dir)?;
                (self.has_wall(p, dir) != self.has_wall(q, dir.opposite())).then_some((p, dir))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, Walls};
    use crate::direction::Direction;
    use crate::Point;

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(4, 3);
        assert!(grid.points().all(|p| grid.walls(p) == Walls::all()));
        assert_eq!(Walls::all().bits(), 15);
        assert_eq!(grid.passages(), 0);
        assert_eq!(grid.obstacles().count(), 0);
    }

    #[test]
    fn carve_clears_both_sides() {
        let mut grid = Grid::new(3, 3);
        let a = Point::new(1, 1);
        grid.carve_edge(a, Direction::E);

        assert!(!grid.has_wall(a, Direction::E));
        assert!(!grid.has_wall(Point::new(2, 1), Direction::W));
        assert_eq!(grid.walls(a).bits(), 13);
        assert_eq!(grid.walls(Point::new(2, 1)).bits(), 7);
        assert_eq!(grid.passages(), 1);
        assert_eq!(grid.find_asymmetry(), None);
    }

    #[test]
    fn neighbours_are_bounds_checked() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.neighbour(Point::new(0, 0), Direction::N), None);
        assert_eq!(grid.neighbour(Point::new(0, 0), Direction::W), None);
        assert_eq!(grid.neighbour(Point::new(1, 1), Direction::E), None);
        assert_eq!(grid.neighbour(Point::new(1, 1), Direction::S), None);
        assert_eq!(
            grid.neighbour(Point::new(0, 0), Direction::S),
            Some(Point::new(0, 1))
        );
    }

    #[test]
    fn open_border_is_found() {
        let mut grid = Grid::new(3, 2);
        grid.carve_edge(Point::new(0, 0), Direction::E);
        assert_eq!(grid.find_open_border(), None);

        let mut cells: Vec<Walls> = grid.rows().flatten().copied().collect();
        cells[5].remove(Walls::SOUTH);
        grid.set_walls(cells);
        assert_eq!(
            grid.find_open_border(),
            Some((Point::new(2, 1), Direction::S))
        );
    }

    #[test]
    fn obstacles_outside_grid_are_dropped() {
        let grid = Grid::with_obstacles(2, 2, [Point::new(1, 0), Point::new(5, 5)]);
        assert_eq!(grid.obstacles().collect::<Vec<_>>(), vec![Point::new(1, 0)]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_access_panics() {
        let grid = Grid::new(2, 2);
        grid.walls(Point::new(2, 0));
    }

    #[test]
    #[should_panic]
    fn carving_past_the_edge_panics() {
        let mut grid = Grid::new(2, 2);
        grid.carve_edge(Point::new(1, 0), Direction::E);
    }

    #[test]
    #[should_panic]
    fn carving_into_obstacle_panics() {
        let mut grid = Grid::with_obstacles(2, 1, [Point::new(1, 0)]);
        grid.carve_edge(Point::new(0, 0), Direction::E);
    }
}
