//! Compass directions between neighbouring cells

use std::fmt;

use thiserror::Error;

use crate::grid::Walls;

/// One of the four moves between grid-adjacent cells
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    /// Every direction, in the fixed order used by both carver and solver.
    ///
    /// The order decides tie-breaking between equally short paths, so it
    /// must not change.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Column offset of the neighbour
    pub const fn dx(self) -> isize {
        match self {
            Direction::E => 1,
            Direction::W => -1,
            Direction::N | Direction::S => 0,
        }
    }

    /// Row offset of the neighbour
    pub const fn dy(self) -> isize {
        match self {
            Direction::N => -1,
            Direction::S => 1,
            Direction::E | Direction::W => 0,
        }
    }

    /// Wall bit on the side facing this direction
    pub const fn wall(self) -> Walls {
        match self {
            Direction::N => Walls::NORTH,
            Direction::E => Walls::EAST,
            Direction::S => Walls::SOUTH,
            Direction::W => Walls::WEST,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::E => Direction::W,
            Direction::S => Direction::N,
            Direction::W => Direction::E,
        }
    }

    /// Letter used in the solution string
    pub const fn letter(self) -> char {
        match self {
            Direction::N => 'N',
            Direction::E => 'E',
            Direction::S => 'S',
            Direction::W => 'W',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Direction> {
        match letter {
            'N' => Some(Direction::N),
            'E' => Some(Direction::E),
            'S' => Some(Direction::S),
            'W' => Some(Direction::W),
            _ => None,
        }
    }
}

/// A solution letter outside `N`, `E`, `S`, `W`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown direction `{0}`")]
pub struct UnknownDirection(pub char);

impl TryFrom<char> for Direction {
    type Error = UnknownDirection;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::from_letter(letter).ok_or(UnknownDirection(letter))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn opposite_walls_face_each_other() {
        for dir in Direction::ALL {
            let back = dir.opposite();
            assert_eq!(back.opposite(), dir);
            assert_eq!(dir.dx(), -back.dx());
            assert_eq!(dir.dy(), -back.dy());
            assert_ne!(dir.wall(), back.wall());
        }
    }

    #[test]
    fn letters_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
        }
        assert_eq!(Direction::from_letter('x'), None);
    }
}
