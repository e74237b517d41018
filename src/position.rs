//! Board squares and algebraic notation.
//!
//! A [`Position`] is a (column, row) pair with both coordinates in `0..8`.
//! Column 0 is file `a`; row 0 is rank `8`, so `(0, 0)` prints as `a8`
//! and `(7, 7)` as `h1`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{COL_LABELS, N, ROW_LABELS};
use crate::error::TourError;

/// A square on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    /// Create a position.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `0..8`. Out-of-bounds squares
    /// are a caller bug, not a runtime condition.
    pub fn new(col: u8, row: u8) -> Self {
        assert!(
            (col as usize) < N && (row as usize) < N,
            "position ({col}, {row}) is off the board"
        );
        Self { col, row }
    }

    /// Create a position, or `None` if it would be off the board.
    pub fn try_new(col: i16, row: i16) -> Option<Self> {
        let range = 0..N as i16;
        if range.contains(&col) && range.contains(&row) {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// The square reached by adding `(dc, dr)`, if it is on the board.
    #[inline]
    pub fn offset(self, dc: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.col as i16 + dc as i16, self.row as i16 + dr as i16)
    }

    /// Linear index in `0..64`, column-major.
    #[inline]
    pub fn index(self) -> usize {
        self.col as usize * N + self.row as usize
    }

    /// Euclidean distance to the point `(x, y)`.
    pub fn distance_to(self, x: f64, y: f64) -> f64 {
        let dx = self.col as f64 - x;
        let dy = self.row as f64 - y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Iterate over every square, column by column.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..N as u8).flat_map(|col| (0..N as u8).map(move |row| Position { col, row }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            COL_LABELS[self.col as usize], ROW_LABELS[self.row as usize]
        )
    }
}

impl FromStr for Position {
    type Err = TourError;

    /// Parse algebraic notation such as `e4`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TourError::InvalidSquare(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let col = COL_LABELS.iter().position(|&c| c == file).ok_or_else(invalid)?;
        let row = ROW_LABELS.iter().position(|&c| c == rank).ok_or_else(invalid)?;
        Ok(Position::new(col as u8, row as u8))
    }
}

/// Parse a square in algebraic notation.
pub fn parse_coord(s: &str) -> Result<Position, TourError> {
    s.parse()
}
