//! Constants for board geometry, grid sentinels and knight offsets.
//!
//! The board is a fixed 8x8 square. Grid cells hold `0` for an unvisited
//! square or the 1-based order in which the knight reached it.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of squares on the board, and the length of a complete tour.
pub const SQUARES: usize = N * N;

/// Board center used by the edge-preference tie-break.
pub const CENTER: f64 = (N as f64 - 1.0) / 2.0;

// =============================================================================
// Grid Cell Values
// =============================================================================

/// Cell value of a square the knight has not visited.
pub const UNVISITED: u8 = 0;

/// Temporary marker placed while a candidate square is being probed.
/// Never a valid order index (those run 1..=64).
pub const PROBE: u8 = u8::MAX;

// =============================================================================
// Knight Offsets
// =============================================================================

/// The eight knight jumps as (column delta, row delta).
/// Order is fixed: move generation and tie-breaking depend on it.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

// =============================================================================
// Notation
// =============================================================================

/// File letters, indexed by column.
pub const COL_LABELS: [char; N] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digits, indexed by row. Row 0 is the top rank.
pub const ROW_LABELS: [char; N] = ['8', '7', '6', '5', '4', '3', '2', '1'];
