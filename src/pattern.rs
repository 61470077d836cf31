//! Decorative obstacle overlay
//!
//! A small ASCII template is stamped onto the middle of the grid. Cells
//! under a marker glyph become obstacles: they stay fully walled and the
//! carver never enters them.

use std::collections::BTreeSet;

use crate::Point;

/// ASCII obstacle template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    rows: Vec<&'static str>,
}

impl Pattern {
    /// Glyph marking an obstacle cell in the template
    const S_MARKER: char = 'X';

    /// The "42" logo
    const LOGO: [&'static str; 5] = [
        "X.X.XXX",
        "X.X...X",
        "XXX.XXX",
        "..X.X..",
        "..X.XXX",
    ];

    pub fn new(rows: Vec<&'static str>) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Top-left corner of the centered template, possibly negative
    fn offset(&self, width: usize, height: usize) -> (i64, i64) {
        (
            (width as i64 - self.width() as i64).div_euclid(2),
            (height as i64 - self.height() as i64).div_euclid(2),
        )
    }

    /// Whether the whole template lands inside a `width` x `height` grid
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.width() <= width && self.height() <= height
    }

    /// Absolute obstacle cells for a `width` x `height` grid
    ///
    /// The template is centered with floor division and clipped to the grid,
    /// so a grid smaller than the template yields a partial or empty set.
    ///
    /// # Examples
    /// ```
    /// use a_maze_ing::{pattern::Pattern, Point};
    ///
    /// let cells = Pattern::default().cells(9, 7);
    /// assert!(cells.contains(&Point::new(1, 1)));
    /// assert!(!cells.contains(&Point::new(2, 1)));
    /// assert_eq!(Pattern::default().cells(1, 1).len(), 0);
    /// ```
    pub fn cells(&self, width: usize, height: usize) -> BTreeSet<Point> {
        let (ox, oy) = self.offset(width, height);
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(ty, row)| {
                row.chars()
                    .enumerate()
                    .filter(|(_, c)| *c == Self::S_MARKER)
                    .map(move |(tx, _)| (ox + tx as i64, oy + ty as i64))
            })
            .filter(|&(x, y)| (0..width as i64).contains(&x) && (0..height as i64).contains(&y))
            .map(|(x, y)| Point::new(x as usize, y as usize))
            .collect()
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(Self::LOGO.to_vec())
    }
}
