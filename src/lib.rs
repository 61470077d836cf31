//! Generate a random grid maze and find the shortest way through it
//!
//! The maze is a rectangle of cells, each with up to four walls. A
//! recursive backtracker carves a spanning tree around a fixed "42"
//! obstacle pattern, an optional braiding pass knocks down a few extra
//! walls, and a breadth-first search finds the shortest path from the
//! entry to the exit.
//!
//! # Examples
//! ## Perfect maze
//! ```
//! use a_maze_ing::{config::Config, Maze, Point};
//!
//! let config = "
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42";
//! let config: Config = config.parse().unwrap();
//! let maze = Maze::generate(&config);
//! assert_eq!(maze.entry(), Point::new(0, 0));
//! assert!(maze.solution().is_some());
//! maze.print_report();
//! ```
//!
//! ## Reading a maze back
//! The clipped pattern covers five of the nine cells here.
//! ```
//! use a_maze_ing::{Maze, Point};
//!
//! let text = "\
//! F97
//! FAF
//! FEF
//!
//! 1,2
//! 2,0
//! NNE
//! ";
//! let maze = Maze::parse(text).unwrap();
//! assert_eq!(maze.exit(), Point::new(2, 0));
//! assert_eq!(maze.pattern().count(), 5);
//! assert_eq!(maze.solution().unwrap().to_string(), "NNE");
//! assert_eq!(maze.to_string(), text);
//! ```

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::config::Config;
use crate::grid::Grid;
use crate::maze_generator::MazeGenerator;
use crate::pattern::Pattern;
use crate::solver::Path;

pub mod config;
pub mod direction;
pub mod grid;
pub mod maze_file;
pub mod maze_generator;
pub mod pattern;
pub mod solver;

/// Location in the maze
///
/// Ordered row by row, so sorted points read top to bottom, left to right.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub y: usize,
    pub x: usize,
}

impl Point {
    /// Top-left cell
    pub const ORIGIN: Point = Point { y: 0, x: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { y, x }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Failure to read an `x,y` coordinate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("expected two comma-separated numbers `x,y`")]
    Shape,
    #[error("invalid coordinate: {0}")]
    Coordinate(#[from] ParseIntError),
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or(ParsePointError::Shape)?;
        if y.contains(',') {
            return Err(ParsePointError::Shape);
        }
        Ok(Self::new(x.trim().parse()?, y.trim().parse()?))
    }
}

/// Finished maze with its endpoints and solution
///
/// This is a read-only snapshot: nothing can change the walls once it is
/// built. Generating again yields a new [Maze].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Carved walls and obstacle cells
    grid: Grid,
    entry: Point,
    exit: Point,
    /// Shortest path from entry to exit, `None` if the exit is unreachable
    solution: Option<Path>,
}

impl Maze {
    /// Generate and solve a maze as described by `config`
    ///
    /// # Panics
    /// If the entry or exit lies outside the maze. [Config] rejects such
    /// values when it is parsed.
    pub fn generate(config: &Config) -> Self {
        let mut gen = MazeGenerator::new(config.seed);
        let grid = gen.generate(
            config.width,
            config.height,
            &Pattern::default(),
            config.perfect,
        );
        Self::new(grid, config.entry, config.exit)
    }

    /// Solve `grid` between `entry` and `exit`
    ///
    /// # Panics
    /// If the entry or exit lies outside the grid.
    pub fn new(grid: Grid, entry: Point, exit: Point) -> Self {
        for (name, p) in [("Entry", entry), ("Exit", exit)] {
            if grid.contains(p) && grid.is_obstacle(p) {
                log::warn!("{name} {p} is inside the obstacle pattern");
            }
        }
        let solution = solver::solve(&grid, entry, exit);
        match &solution {
            Some(path) => log::info!("Shortest path from {entry} to {exit}: {} steps", path.len()),
            None => log::warn!("No path from {entry} to {exit}"),
        }
        Self {
            grid,
            entry,
            exit,
            solution,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Obstacle cells, row by row
    pub fn pattern(&self) -> impl Iterator<Item = Point> + '_ {
        self.grid.obstacles()
    }

    pub fn entry(&self) -> Point {
        self.entry
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    /// Print report
    pub fn print_report(&self) {
        match &self.solution {
            Some(path) => println!("The shortest path is {} steps.", path.len()),
            None => println!("No path from entry to exit."),
        }
    }
}
