//! Backtracking tour search.
//!
//! The search extends a path one square at a time, trying candidates in the
//! order given by [`rank_moves`]. A dead end undoes the last square and tries
//! the next candidate. Grid and path are mutated in place and rolled back
//! explicitly, one cell and one path entry per level.
//!
//! With pruning enabled, a branch is abandoned early when:
//! - an unvisited square can no longer be entered (no unvisited neighbours
//!   and not adjacent to the knight), or
//! - a closed tour is required and every neighbour of the start is used up.
//!
//! Both conditions only reject branches that cannot succeed, so the first
//! tour found is the same with or without pruning.

use tracing::{debug, trace, warn};

use crate::board::{Grid, Path};
use crate::config::SolveConfig;
use crate::constants::SQUARES;
use crate::heuristic::rank_moves;
use crate::movegen::{is_knight_move, knight_targets};
use crate::position::Position;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search states entered
    pub nodes: u64,
    /// Squares undone after their subtree failed
    pub backtracks: u64,
    /// Branches cut by the feasibility checks
    pub pruned: u64,
}

/// Result of a full search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A complete tour, start square first
    Tour(Path),
    /// Every ordering was tried; no qualifying tour exists from this start
    Exhausted,
    /// The node budget ran out before the search finished
    NodeLimit,
}

impl SolveOutcome {
    pub fn into_path(self) -> Option<Path> {
        match self {
            SolveOutcome::Tour(path) => Some(path),
            SolveOutcome::Exhausted | SolveOutcome::NodeLimit => None,
        }
    }
}

/// Marker for a search stopped by its node budget.
struct BudgetExceeded;

/// Runs tour searches with a fixed configuration.
pub struct Solver {
    config: SolveConfig,
    stats: SearchStats,
}

impl Solver {
    pub fn new(config: SolveConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the most recent [`Solver::solve`] call.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Search for a tour starting at `start`.
    pub fn solve(&mut self, start: Position) -> SolveOutcome {
        self.stats = SearchStats::default();
        debug!(%start, closed = self.config.prefer_closed, "solve started");

        let mut search = Search {
            config: &self.config,
            stats: &mut self.stats,
            grid: Grid::new(),
            path: Vec::with_capacity(SQUARES),
            start,
        };
        search.grid.visit(start, 1);
        search.path.push(start);

        let outcome = match search.extend(start) {
            Ok(true) => SolveOutcome::Tour(search.path),
            Ok(false) => SolveOutcome::Exhausted,
            Err(BudgetExceeded) => {
                warn!(%start, nodes = self.stats.nodes, "solve stopped at node limit");
                SolveOutcome::NodeLimit
            }
        };

        debug!(
            %start,
            found = matches!(outcome, SolveOutcome::Tour(_)),
            nodes = self.stats.nodes,
            backtracks = self.stats.backtracks,
            pruned = self.stats.pruned,
            "solve finished"
        );
        outcome
    }
}

/// Mutable state of one search in progress.
struct Search<'a> {
    config: &'a SolveConfig,
    stats: &'a mut SearchStats,
    grid: Grid,
    path: Path,
    start: Position,
}

impl Search<'_> {
    /// Try to complete the tour from `current`, which is already on the path.
    fn extend(&mut self, current: Position) -> Result<bool, BudgetExceeded> {
        self.stats.nodes += 1;
        if self.config.max_nodes.is_some_and(|max| self.stats.nodes > max) {
            return Err(BudgetExceeded);
        }

        let visited = self.path.len();
        if visited == SQUARES {
            return Ok(!self.config.prefer_closed || is_knight_move(current, self.start));
        }

        if self.config.prune && self.is_dead_end(current, visited) {
            self.stats.pruned += 1;
            trace!(%current, visited, "branch pruned");
            return Ok(false);
        }

        let closing_start = self.config.prefer_closed.then_some(self.start);
        let candidates = rank_moves(current, &mut self.grid, closing_start);

        for candidate in candidates {
            let next = candidate.position;
            self.grid.visit(next, visited as u8 + 1);
            self.path.push(next);

            if self.extend(next)? {
                return Ok(true);
            }

            self.grid.clear(next);
            self.path.pop();
            self.stats.backtracks += 1;
            trace!(square = %next, depth = visited + 1, "backtrack");
        }

        Ok(false)
    }

    /// Whether no completion of the current path can be a valid tour.
    fn is_dead_end(&self, current: Position, visited: usize) -> bool {
        if visited < SQUARES - 1 {
            let stranded = Position::all().any(|sq| {
                self.grid.is_unvisited(sq)
                    && !is_knight_move(sq, current)
                    && knight_targets(sq).all(|n| !self.grid.is_unvisited(n))
            });
            if stranded {
                return true;
            }
        }

        self.config.prefer_closed
            && knight_targets(self.start).all(|n| !self.grid.is_unvisited(n))
    }
}

/// Find a knight's tour from `start`.
///
/// Returns the 64 squares in order, or `None` when no tour of the requested
/// kind exists from `start`. When `prefer_closed` is set, the last square
/// is a knight move from `start`.
pub fn solve_tour(start: Position, prefer_closed: bool) -> Option<Path> {
    let config = SolveConfig {
        prefer_closed,
        ..SolveConfig::default()
    };
    Solver::new(config).solve(start).into_path()
}
