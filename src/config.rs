//! Solver and session configuration.

use crate::session::Mode;

/// Configuration for a full tour search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveConfig {
    /// Require the last square to be a knight move from the start.
    pub prefer_closed: bool,

    /// Stop after expanding this many search nodes. `None` searches until
    /// a tour is found or the space is exhausted.
    pub max_nodes: Option<u64>,

    /// Skip branches that provably cannot complete a tour.
    /// Does not change which tour is found, only how fast.
    pub prune: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            prefer_closed: false,
            max_nodes: None,
            prune: true,
        }
    }
}

impl SolveConfig {
    /// Open tour, unlimited search.
    pub fn open() -> Self {
        Self::default()
    }

    /// Closed tour, unlimited search.
    pub fn closed() -> Self {
        Self {
            prefer_closed: true,
            ..Self::default()
        }
    }

    /// Small node budget so a pathological case fails fast in tests.
    pub fn for_testing() -> Self {
        Self {
            max_nodes: Some(100_000),
            ..Self::default()
        }
    }
}

/// Configuration for an interactive play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub prefer_closed: bool,
    /// Node budget passed to the solver in [`Mode::Solver`].
    pub max_nodes: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Manual,
            prefer_closed: false,
            max_nodes: None,
        }
    }
}

impl SessionConfig {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// The solver configuration this session uses in [`Mode::Solver`].
    pub fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            prefer_closed: self.prefer_closed,
            max_nodes: self.max_nodes,
            prune: true,
        }
    }
}
