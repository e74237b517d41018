//! Play session state machine.
//!
//! A session moves through `Setup -> Playing -> {Solved | Stuck | Failed}`.
//! The player picks a start square in `Setup`; how the knight advances
//! afterwards depends on the [`Mode`]:
//!
//! - `Manual`: the player chooses every square, optionally asking for hints.
//! - `Greedy`: each tick takes the heuristic's best move, with no
//!   backtracking. Running out of advice before the board is full is `Stuck`.
//! - `Solver`: a full backtracking search runs at start; ticks then replay
//!   the tour one square at a time. No tour found is `Failed`.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::board::{Grid, Path};
use crate::config::SessionConfig;
use crate::constants::SQUARES;
use crate::error::{TourError, TourResult};
use crate::heuristic::best_move;
use crate::movegen::valid_moves;
use crate::position::Position;
use crate::search::{SolveOutcome, Solver};

/// How the knight is driven once the tour has started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Manual,
    Greedy,
    Solver,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Manual => "manual",
            Mode::Greedy => "greedy",
            Mode::Solver => "solver",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manual" => Ok(Mode::Manual),
            "greedy" => Ok(Mode::Greedy),
            "solver" | "auto" => Ok(Mode::Solver),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Lifecycle of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Waiting for a start square
    Setup,
    /// Moves remain
    Playing,
    /// All 64 squares visited
    Solved,
    /// No legal continuation before the board was full
    Stuck,
    /// The solver found no tour
    Failed,
}

impl Status {
    pub fn is_finished(self) -> bool {
        matches!(self, Status::Solved | Status::Stuck | Status::Failed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Setup => "setup",
            Status::Playing => "playing",
            Status::Solved => "solved",
            Status::Stuck => "stuck",
            Status::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One entry of the move history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1 for the start square
    pub move_number: usize,
    pub position: Position,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.move_number, self.position)
    }
}

/// Counters shown alongside the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub hints: u32,
    /// Nodes expanded by the solver in `Solver` mode
    pub nodes: u64,
    /// Backtracks performed by the solver in `Solver` mode
    pub backtracks: u64,
}

/// An interactive knight's tour.
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    path: Path,
    status: Status,
    planned: VecDeque<Position>,
    stats: SessionStats,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            grid: Grid::new(),
            path: Vec::with_capacity(SQUARES),
            status: Status::Setup,
            planned: VecDeque::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn prefer_closed(&self) -> bool {
        self.config.prefer_closed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The knight's square, once the tour has started.
    pub fn current(&self) -> Option<Position> {
        self.path.last().copied()
    }

    /// Visited squares in order, numbered from 1.
    pub fn history(&self) -> impl Iterator<Item = MoveRecord> + '_ {
        self.path
            .iter()
            .enumerate()
            .map(|(i, &position)| MoveRecord {
                move_number: i + 1,
                position,
            })
    }

    /// Percentage of the board visited, rounded.
    pub fn progress(&self) -> u32 {
        ((self.path.len() * 100 + SQUARES / 2) / SQUARES) as u32
    }

    /// Legal squares for the knight right now. Empty outside `Playing`.
    pub fn legal_moves(&self) -> Vec<Position> {
        match (self.status, self.current()) {
            (Status::Playing, Some(pos)) => valid_moves(pos, &self.grid),
            _ => Vec::new(),
        }
    }

    /// Discard the tour and return to `Setup`. Mode and closed preference
    /// are kept.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.path.clear();
        self.planned.clear();
        self.stats = SessionStats::default();
        self.set_status(Status::Setup);
    }

    pub fn set_mode(&mut self, mode: Mode) -> TourResult<()> {
        self.expect_status(Status::Setup)?;
        self.config.mode = mode;
        Ok(())
    }

    pub fn set_prefer_closed(&mut self, prefer_closed: bool) -> TourResult<()> {
        self.expect_status(Status::Setup)?;
        self.config.prefer_closed = prefer_closed;
        Ok(())
    }

    /// Place the knight on its start square and begin playing.
    ///
    /// In `Solver` mode the whole tour is searched for here; if none is
    /// found the session ends as `Failed`.
    pub fn start(&mut self, square: Position) -> TourResult<Status> {
        self.expect_status(Status::Setup)?;
        self.commit(square);
        self.set_status(Status::Playing);

        if self.config.mode == Mode::Solver {
            let mut solver = Solver::new(self.config.solve_config());
            let outcome = solver.solve(square);
            let stats = solver.stats();
            self.stats.nodes = stats.nodes;
            self.stats.backtracks = stats.backtracks;

            match outcome {
                SolveOutcome::Tour(path) => self.planned = path.into_iter().skip(1).collect(),
                SolveOutcome::Exhausted | SolveOutcome::NodeLimit => {
                    self.set_status(Status::Failed)
                }
            }
        } else {
            self.update_status();
        }
        Ok(self.status)
    }

    /// Move the knight to `square` (manual mode only).
    pub fn make_move(&mut self, square: Position) -> TourResult<Status> {
        self.expect_mode(Mode::Manual)?;
        let from = self.expect_playing()?;
        if !valid_moves(from, &self.grid).contains(&square) {
            return Err(TourError::IllegalMove { from, to: square });
        }

        self.commit(square);
        self.update_status();
        Ok(self.status)
    }

    /// The square the knight should visit next, or `None` if stuck.
    ///
    /// In `Solver` mode this is the next square of the planned tour, so it
    /// matches what [`Session::tick`] will play.
    pub fn hint(&mut self) -> TourResult<Option<Position>> {
        let from = self.expect_playing()?;
        self.stats.hints += 1;
        if self.config.mode == Mode::Solver {
            return Ok(self.planned.front().copied());
        }
        let start = self.closing_start();
        Ok(best_move(from, &mut self.grid, start))
    }

    /// Advance one square in `Greedy` or `Solver` mode.
    ///
    /// Returns the square moved to, or `None` when the knight could not move
    /// (the session is then finished).
    pub fn tick(&mut self) -> TourResult<Option<Position>> {
        let from = self.expect_playing()?;
        let next = match self.config.mode {
            Mode::Manual => return Err(TourError::WrongMode { mode: Mode::Manual }),
            Mode::Greedy => {
                let start = self.closing_start();
                best_move(from, &mut self.grid, start)
            }
            Mode::Solver => self.planned.pop_front(),
        };

        match next {
            Some(square) => {
                self.commit(square);
                self.update_status();
            }
            None => self.set_status(Status::Stuck),
        }
        Ok(next)
    }

    /// Tick until the session leaves `Playing`.
    pub fn run(&mut self) -> TourResult<Status> {
        while self.status == Status::Playing {
            self.tick()?;
        }
        Ok(self.status)
    }

    fn closing_start(&self) -> Option<Position> {
        if self.config.prefer_closed {
            self.path.first().copied()
        } else {
            None
        }
    }

    fn commit(&mut self, square: Position) {
        self.path.push(square);
        self.grid.visit(square, self.path.len() as u8);
        debug!(%square, move_number = self.path.len(), "knight moved");
    }

    /// Settle `Playing` into a finished status when the board is full or the
    /// knight has nowhere to go.
    fn update_status(&mut self) {
        if self.status != Status::Playing {
            return;
        }
        if self.path.len() == SQUARES {
            self.set_status(Status::Solved);
        } else if self.config.mode != Mode::Solver && self.legal_moves().is_empty() {
            self.set_status(Status::Stuck);
        }
    }

    fn set_status(&mut self, status: Status) {
        if status != self.status {
            info!(from = %self.status, to = %status, moves = self.path.len(), "session status changed");
            self.status = status;
        }
    }

    fn expect_status(&self, expected: Status) -> TourResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TourError::WrongStatus {
                expected,
                actual: self.status,
            })
        }
    }

    fn expect_mode(&self, mode: Mode) -> TourResult<()> {
        if self.config.mode == mode {
            Ok(())
        } else {
            Err(TourError::WrongMode {
                mode: self.config.mode,
            })
        }
    }

    /// Current square, provided the session is `Playing`.
    fn expect_playing(&self) -> TourResult<Position> {
        match (self.status, self.current()) {
            (Status::Playing, Some(pos)) => Ok(pos),
            (actual, _) => Err(TourError::WrongStatus {
                expected: Status::Playing,
                actual,
            }),
        }
    }
}
