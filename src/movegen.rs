//! Knight move generation.

use crate::board::Grid;
use crate::constants::KNIGHT_OFFSETS;
use crate::position::Position;

/// Legal knight moves from `pos`: on the board and not yet visited.
///
/// Candidates follow the fixed order of [`KNIGHT_OFFSETS`]. The grid is
/// not modified. An empty list means the knight has nowhere to go.
pub fn valid_moves(pos: Position, grid: &Grid) -> Vec<Position> {
    knight_targets(pos)
        .filter(|&to| grid.is_unvisited(to))
        .collect()
}

/// Number of legal knight moves from `pos` (the Warnsdorff degree).
pub fn degree(pos: Position, grid: &Grid) -> usize {
    knight_targets(pos).filter(|&to| grid.is_unvisited(to)).count()
}

/// Every on-board knight target of `pos`, ignoring the grid.
pub fn knight_targets(pos: Position) -> impl Iterator<Item = Position> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(move |&(dc, dr)| pos.offset(dc, dr))
}

/// Whether `a` and `b` are one knight move apart.
pub fn is_knight_move(a: Position, b: Position) -> bool {
    let dc = a.col.abs_diff(b.col);
    let dr = a.row.abs_diff(b.row);
    matches!((dc, dr), (1, 2) | (2, 1))
}

/// Whether a knight on `pos` could close the tour by jumping back to
/// `start`.
///
/// The start square is always visited, so adjacency ignores the visited
/// filter. Only meaningful on the final move: the grid must have no
/// unvisited squares left.
pub fn can_close(pos: Position, start: Position, grid: &Grid) -> bool {
    is_knight_move(pos, start) && grid.is_complete()
}
