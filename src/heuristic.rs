//! Move ordering: Warnsdorff's rule with closing and edge tie-breaks.
//!
//! Each candidate square is scored by:
//! - whether stepping there completes a closed tour (only on the last move)
//! - its onward degree, counted with the candidate itself occupied
//! - its distance from the board center
//!
//! Candidates that close the tour come first, then lower degree, then
//! squares further from the center. Ties keep move-generation order.

use std::cmp::Ordering;
use std::ops::Deref;

use crate::board::Grid;
use crate::constants::{CENTER, SQUARES};
use crate::movegen::{can_close, degree, valid_moves};
use crate::position::Position;

/// A scored candidate move. Lives only for the duration of a ranking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub position: Position,
    /// Legal moves onward from this square once it is occupied
    pub degree: usize,
    /// Stepping here fills the board next to the start square
    pub closes_tour: bool,
    /// Euclidean distance to the board center
    pub center_distance: f64,
}

impl Candidate {
    /// Ranking order: smaller sorts first and is preferred.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .closes_tour
            .cmp(&self.closes_tour)
            .then(self.degree.cmp(&other.degree))
            .then(other.center_distance.total_cmp(&self.center_distance))
    }
}

/// Temporarily occupies one square of a grid.
///
/// The square's previous value is written back when the probe is dropped,
/// so the grid is restored on every exit path.
pub struct Probe<'a> {
    grid: &'a mut Grid,
    pos: Position,
    saved: u8,
}

impl<'a> Probe<'a> {
    pub fn new(grid: &'a mut Grid, pos: Position) -> Self {
        let saved = grid.mark_probe(pos);
        Self { grid, pos, saved }
    }
}

impl Deref for Probe<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &*self.grid
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.grid.restore(self.pos, self.saved);
    }
}

/// Score a single candidate square.
///
/// `start` is only consulted for the closing flag, and only when the
/// candidate would be the last unvisited square.
pub fn evaluate(grid: &mut Grid, position: Position, start: Option<Position>) -> Candidate {
    let last_square = grid.visited_count() == SQUARES - 1;
    let probe = Probe::new(grid, position);

    let degree = degree(position, &probe);
    let closes_tour = match start {
        Some(start) if last_square => can_close(position, start, &probe),
        _ => false,
    };

    Candidate {
        position,
        degree,
        closes_tour,
        center_distance: position.distance_to(CENTER, CENTER),
    }
}

/// Every legal move from `position`, best first.
///
/// The grid is borrowed mutably for probing but is identical to its
/// original state when this returns.
pub fn rank_moves(position: Position, grid: &mut Grid, start: Option<Position>) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = valid_moves(position, grid)
        .into_iter()
        .map(|to| evaluate(grid, to, start))
        .collect();
    candidates.sort_by(Candidate::rank_cmp);
    candidates
}

/// The preferred next square from `position`, or `None` if the knight is
/// stuck. Pass `start` when a closed tour is wanted.
pub fn best_move(position: Position, grid: &mut Grid, start: Option<Position>) -> Option<Position> {
    rank_moves(position, grid, start)
        .first()
        .map(|c| c.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(degree: usize, closes_tour: bool, center_distance: f64) -> Candidate {
        Candidate {
            position: Position::new(0, 0),
            degree,
            closes_tour,
            center_distance,
        }
    }

    #[test]
    fn test_closing_beats_degree() {
        let closing = candidate(5, true, 1.0);
        let low = candidate(0, false, 5.0);
        assert_eq!(closing.rank_cmp(&low), Ordering::Less);
    }

    #[test]
    fn test_lower_degree_first() {
        assert_eq!(candidate(2, false, 1.0).rank_cmp(&candidate(3, false, 5.0)), Ordering::Less);
    }

    #[test]
    fn test_edge_breaks_degree_ties() {
        assert_eq!(candidate(2, false, 4.9).rank_cmp(&candidate(2, false, 0.7)), Ordering::Less);
        assert_eq!(candidate(2, false, 1.0).rank_cmp(&candidate(2, false, 1.0)), Ordering::Equal);
    }

    #[test]
    fn test_probe_restores_on_drop() {
        let mut grid = Grid::new();
        let sq = Position::new(4, 4);
        {
            let probe = Probe::new(&mut grid, sq);
            assert!(!probe.is_unvisited(sq));
        }
        assert!(grid.is_unvisited(sq));
    }

    #[test]
    fn test_evaluate_visited_square_keeps_order() {
        let mut grid = Grid::new();
        grid.visit(Position::new(0, 0), 1);
        grid.visit(Position::new(2, 1), 5);
        let before = grid.clone();
        evaluate(&mut grid, Position::new(2, 1), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_evaluate_counts_onward_moves() {
        let mut grid = Grid::new();
        grid.visit(Position::new(0, 0), 1);
        let c = evaluate(&mut grid, Position::new(1, 2), None);
        assert_eq!(c.degree, 5);
        assert!(!c.closes_tour);
        assert!(grid.is_unvisited(Position::new(1, 2)));
    }

    #[test]
    fn test_evaluate_ignores_start_before_last_move() {
        let mut grid = Grid::new();
        let start = Position::new(0, 0);
        grid.visit(start, 1);
        let c = evaluate(&mut grid, Position::new(1, 2), Some(start));
        assert!(!c.closes_tour);
    }

    #[test]
    fn test_best_move_prefers_corner_region() {
        // From b6 on an empty grid, a8 has the fewest onward moves
        let mut grid = Grid::new();
        let from = Position::new(1, 2);
        grid.visit(from, 1);
        assert_eq!(best_move(from, &mut grid, None), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_best_move_none_when_stuck() {
        let mut grid = Grid::new();
        let from = Position::new(0, 0);
        grid.visit(from, 1);
        grid.visit(Position::new(1, 2), 2);
        grid.visit(Position::new(2, 1), 3);
        let before = grid.clone();
        assert_eq!(best_move(from, &mut grid, None), None);
        assert_eq!(grid, before);
    }
}
