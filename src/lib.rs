//! Knight's tour engine for the 8x8 board.
//!
//! This crate builds complete knight's tours, open or closed, from any start
//! square. Candidate moves are ordered by Warnsdorff's rule (fewest onward
//! moves first) with two tie-breaks, and a backtracking search undoes
//! squares that lead to dead ends.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, grid sentinels and knight offsets
//! - [`position`] - Squares and algebraic notation
//! - [`board`] - The visited-order grid, paths and tour validation
//! - [`movegen`] - Legal knight moves
//! - [`heuristic`] - Candidate scoring and move ordering
//! - [`search`] - Backtracking tour search
//! - [`session`] - Play-session state machine (manual, greedy, solver)
//! - [`protocol`] - Text command loop driving a session
//! - [`config`] - Solver and session settings
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use knights_tour::board::{Grid, TourKind, validate_tour};
//! use knights_tour::heuristic::best_move;
//! use knights_tour::movegen::valid_moves;
//! use knights_tour::position::Position;
//! use knights_tour::search::solve_tour;
//!
//! let corner = Position::new(0, 0);
//! assert_eq!(valid_moves(corner, &Grid::new()).len(), 2);
//!
//! // One step of Warnsdorff's rule
//! let mut grid = Grid::new();
//! grid.visit(corner, 1);
//! let next = best_move(corner, &mut grid, None);
//! println!("Best move from {corner}: {}", next.unwrap());
//!
//! // A full closed tour
//! let tour = solve_tour(corner, true).unwrap();
//! assert_eq!(validate_tour(&tour), Ok(TourKind::Closed));
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod heuristic;
pub mod movegen;
pub mod position;
pub mod protocol;
pub mod search;
pub mod session;
