//! Text format of a stored maze
//!
//! ```text
//! <one line per row, one uppercase hex wall digit per cell>
//! <blank line>
//! <entry x>,<entry y>
//! <exit x>,<exit y>
//! <solution letters, empty when there is none>
//! ```
//!
//! Every line ends with `\n`. The obstacle cells are not stored; they
//! follow from the maze size.

use std::fmt;
use std::fs;
use std::path::{Path as FsPath, PathBuf};

use itertools::Itertools;
use thiserror::Error;

use crate::direction::{Direction, UnknownDirection};
use crate::grid::{Grid, Walls};
use crate::pattern::Pattern;
use crate::solver::Path;
use crate::{Maze, ParsePointError, Point};

/// Failure to read or write a maze file
#[derive(Error, Debug)]
pub enum MazeFileError {
    #[error("cannot {operation} `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected {expected}")]
    MissingLine { line: usize, expected: &'static str },
    #[error("maze has no rows")]
    NoRows,
    #[error("line {line}: `{found}` is not a hex wall digit")]
    InvalidCell { line: usize, found: char },
    #[error("line {line}: row has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("line {line}: {source}")]
    InvalidPoint {
        line: usize,
        #[source]
        source: ParsePointError,
    },
    #[error("line {line}: {point} lies outside the {width}x{height} maze")]
    OutOfBounds {
        line: usize,
        point: Point,
        width: usize,
        height: usize,
    },
    #[error("line {line}: {source}")]
    InvalidSolution {
        line: usize,
        #[source]
        source: UnknownDirection,
    },
    #[error("wall {dir} of {point} is only recorded on one side")]
    Asymmetric { point: Point, dir: Direction },
    #[error("wall {dir} of {point} opens onto the outside")]
    OpenBorder { point: Point, dir: Direction },
    #[error("obstacle cell {0} has open walls")]
    CarvedObstacle(Point),
    #[error("stored solution does not lead from entry to exit")]
    BrokenSolution,
}

impl fmt::Display for Maze {
    /// Writes the maze in the stored text format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            writeln!(
                f,
                "{}",
                row.iter().map(|walls| format!("{:X}", walls.bits())).join("")
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.entry)?;
        writeln!(f, "{}", self.exit)?;
        match &self.solution {
            Some(path) => writeln!(f, "{path}"),
            None => writeln!(f),
        }
    }
}

/// Lines of the file with 1-based line numbers
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn next(&mut self, expected: &'static str) -> Result<(usize, &'a str), MazeFileError> {
        self.line += 1;
        let text = self.inner.next().ok_or(MazeFileError::MissingLine {
            line: self.line,
            expected,
        })?;
        Ok((self.line, text))
    }
}

impl Maze {
    /// Read a maze from its stored text form
    ///
    /// The solution is taken from the text as is, after checking that it
    /// walks from the entry to the exit. An empty solution line reads as an
    /// empty path when entry and exit coincide and as no path otherwise.
    pub fn parse(text: &str) -> Result<Self, MazeFileError> {
        Self::parse_with(text, &Pattern::default())
    }

    /// Read a maze whose obstacles were placed with `pattern`
    pub fn parse_with(text: &str, pattern: &Pattern) -> Result<Self, MazeFileError> {
        let mut lines = Lines {
            inner: text.lines(),
            line: 0,
        };

        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        loop {
            let (line, row) = lines.next("a row or a blank line")?;
            let row = row.trim_end();
            if row.is_empty() {
                break;
            }
            let walls = row
                .chars()
                .map(|c| {
                    c.to_digit(16)
                        .map(|bits| Walls::from_bits_truncate(bits as u8))
                        .ok_or(MazeFileError::InvalidCell { line, found: c })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let expected = *width.get_or_insert(walls.len());
            if walls.len() != expected {
                return Err(MazeFileError::RaggedRow {
                    line,
                    found: walls.len(),
                    expected,
                });
            }
            cells.extend(walls);
            height += 1;
        }
        let width = width.ok_or(MazeFileError::NoRows)?;

        let obstacles = pattern.cells(width, height);
        let mut grid = Grid::with_obstacles(width, height, obstacles);
        grid.set_walls(cells);
        if let Some((point, dir)) = grid.find_asymmetry() {
            return Err(MazeFileError::Asymmetric { point, dir });
        }
        if let Some((point, dir)) = grid.find_open_border() {
            return Err(MazeFileError::OpenBorder { point, dir });
        }
        if let Some(point) = grid.obstacles().find(|&p| grid.walls(p) != Walls::all()) {
            return Err(MazeFileError::CarvedObstacle(point));
        }

        let mut read_point = |expected: &'static str| -> Result<Point, MazeFileError> {
            let (line, text) = lines.next(expected)?;
            let point: Point = text
                .trim()
                .parse()
                .map_err(|source| MazeFileError::InvalidPoint { line, source })?;
            if !grid.contains(point) {
                return Err(MazeFileError::OutOfBounds {
                    line,
                    point,
                    width,
                    height,
                });
            }
            Ok(point)
        };
        let entry = read_point("the entry `x,y`")?;
        let exit = read_point("the exit `x,y`")?;

        let (line, letters) = lines.next("the solution line")?;
        let path: Path = letters
            .trim()
            .parse()
            .map_err(|source| MazeFileError::InvalidSolution { line, source })?;
        let solution = if path.is_empty() && entry != exit {
            None
        } else {
            let cells = path.walk(&grid, entry).ok_or(MazeFileError::BrokenSolution)?;
            if cells.last() != Some(&exit) {
                return Err(MazeFileError::BrokenSolution);
            }
            Some(path)
        };

        Ok(Self {
            grid,
            entry,
            exit,
            solution,
        })
    }

    /// Read a maze file
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, MazeFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MazeFileError::Io {
            path: path.to_owned(),
            operation: "read",
            source,
        })?;
        Self::parse(&text)
    }

    /// Write the maze to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<FsPath>) -> Result<(), MazeFileError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| MazeFileError::Io {
            path: path.to_owned(),
            operation: "write",
            source,
        })
    }
}
