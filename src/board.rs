//! The visited-order grid and tour paths.

use std::fmt;

use crate::constants::{N, PROBE, SQUARES, UNVISITED};
use crate::error::{TourError, TourResult};
use crate::movegen::is_knight_move;
use crate::position::Position;

/// Ordered squares of a (partial) tour. Index 0 is the start square.
pub type Path = Vec<Position>;

/// 8x8 grid of visit orders.
///
/// Each cell is [`UNVISITED`] or the 1-based order in which the knight
/// reached it. [`PROBE`] marks a square that is temporarily occupied while
/// a candidate move is scored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [u8; SQUARES],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self {
            cells: [UNVISITED; SQUARES],
        }
    }

    /// Build the grid a path leaves behind: square `i` gets order `i + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is longer than a full tour.
    pub fn from_path(path: &[Position]) -> Self {
        assert!(
            path.len() <= SQUARES,
            "path of {} squares does not fit the board",
            path.len()
        );
        let mut grid = Self::new();
        for (i, &pos) in path.iter().enumerate() {
            grid.visit(pos, i as u8 + 1);
        }
        grid
    }

    #[inline]
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.index()]
    }

    #[inline]
    pub fn is_unvisited(&self, pos: Position) -> bool {
        self.get(pos) == UNVISITED
    }

    /// Record that the knight reached `pos` as its `order`-th square.
    pub fn visit(&mut self, pos: Position, order: u8) {
        debug_assert!((1..=SQUARES as u8).contains(&order));
        self.cells[pos.index()] = order;
    }

    /// Put the probe marker on `pos`, returning the value it replaced.
    pub(crate) fn mark_probe(&mut self, pos: Position) -> u8 {
        std::mem::replace(&mut self.cells[pos.index()], PROBE)
    }

    /// Write back a cell value saved by [`Grid::mark_probe`].
    pub(crate) fn restore(&mut self, pos: Position, value: u8) {
        self.cells[pos.index()] = value;
    }

    /// Reset `pos` to unvisited.
    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.index()] = UNVISITED;
    }

    /// Number of squares not yet visited (probed squares count as visited).
    pub fn unvisited_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == UNVISITED).count()
    }

    pub fn visited_count(&self) -> usize {
        SQUARES - self.unvisited_count()
    }

    pub fn is_complete(&self) -> bool {
        self.unvisited_count() == 0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::constants::{COL_LABELS, ROW_LABELS};

        for row in 0..N as u8 {
            write!(f, "{} ", ROW_LABELS[row as usize])?;
            for col in 0..N as u8 {
                match self.get(Position::new(col, row)) {
                    UNVISITED => write!(f, "  .")?,
                    PROBE => write!(f, "  ?")?,
                    order => write!(f, "{order:>3}")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for label in COL_LABELS {
            write!(f, "{label:>3}")?;
        }
        writeln!(f)
    }
}

/// Whether a finished tour returns to its start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TourKind {
    Open,
    Closed,
}

/// Check that `path` is a complete knight's tour and classify it.
///
/// A complete tour has 64 distinct squares, each a knight move from the
/// previous one. It is closed when the last square is a knight move from
/// the first.
pub fn validate_tour(path: &[Position]) -> TourResult<TourKind> {
    if path.len() != SQUARES {
        return Err(TourError::InvalidTour {
            index: path.len(),
            reason: format!("expected {SQUARES} squares, got {}", path.len()),
        });
    }

    let mut seen = [false; SQUARES];
    for (i, &pos) in path.iter().enumerate() {
        if std::mem::replace(&mut seen[pos.index()], true) {
            return Err(TourError::InvalidTour {
                index: i,
                reason: format!("{pos} visited twice"),
            });
        }
        if i > 0 && !is_knight_move(path[i - 1], pos) {
            return Err(TourError::InvalidTour {
                index: i,
                reason: format!("{} to {pos} is not a knight move", path[i - 1]),
            });
        }
    }

    if is_knight_move(path[SQUARES - 1], path[0]) {
        Ok(TourKind::Closed)
    } else {
        Ok(TourKind::Open)
    }
}
