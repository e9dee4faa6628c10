//! Session tracking and scoring.
//!
//! This module contains the session, which owns the player, counts moves and revisits, watches for
//! the player reaching the goal and freezes the elapsed time and score the moment that happens.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    grid::{Grid, Position},
    movement::{InputSnapshot, Player, Step},
};

/// Points a session starts from before penalties.
pub const BASE_SCORE: u32 = 10_000;
/// Penalty per whole second elapsed.
pub const SECOND_PENALTY: u64 = 10;
/// Penalty per accepted move.
pub const MOVE_PENALTY: u64 = 5;
/// Penalty per move into an already visited cell.
pub const BACKTRACK_PENALTY: u64 = 50;

/// Computes the final score of a session.
///
/// The score starts at [`BASE_SCORE`] and loses [`SECOND_PENALTY`] per whole elapsed second,
/// [`MOVE_PENALTY`] per move and [`BACKTRACK_PENALTY`] per backtrack, never dropping below zero.
pub fn compute_score(elapsed: Duration, moves: u32, backtracks: u32) -> u32 {
    let penalty = elapsed
        .as_secs()
        .saturating_mul(SECOND_PENALTY)
        .saturating_add(u64::from(moves).saturating_mul(MOVE_PENALTY))
        .saturating_add(u64::from(backtracks).saturating_mul(BACKTRACK_PENALTY));

    u32::try_from(u64::from(BASE_SCORE).saturating_sub(penalty)).unwrap_or(0)
}

/// Result of a won session, frozen at the winning tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Time from session start to the winning tick.
    pub elapsed: Duration,
    /// Final score.
    pub score: u32,
}

/// State of a single play-through.
///
/// The session is the control authority of the game: once it holds an [`Outcome`] the player no
/// longer receives input.
#[derive(Clone, Debug)]
pub struct Session {
    /// Instant the session started.
    started: Instant,
    /// Cell that ends the session when reached.
    goal: Position,
    /// Player being tracked.
    player: Player,
    /// Number of accepted moves.
    move_count: u32,
    /// Number of moves into cells already in [`visited_cells`](Session::visited_cells).
    backtrack_count: u32,
    /// Every cell ever occupied; only ever inserted into.
    visited_cells: HashSet<Position>,
    /// Set exactly once, on the tick the goal is reached.
    outcome: Option<Outcome>,
}

impl Session {
    /// Starts a session at `started` with the player in its starting cell.
    pub fn new(player: Player, goal: Position, started: Instant) -> Self {
        let visited_cells = HashSet::from([player.position()]);

        Self {
            started,
            goal,
            player,
            move_count: 0,
            backtrack_count: 0,
            visited_cells,
            outcome: None,
        }
    }

    /// Advances the session by one tick.
    ///
    /// Unless the session is already won, this samples `input` for a discrete move, advances the
    /// glide and then checks for the win. The [`Outcome`] is returned only from the tick that
    /// produced it; later ticks return [`None`] and change nothing.
    pub fn tick(&mut self, grid: &Grid, input: InputSnapshot, now: Instant) -> Option<Outcome> {
        if self.is_won() {
            return None;
        }

        if let Some(step) = self.player.try_move(grid, input, now) {
            self.record(step);
        }
        self.player.settle(now);

        self.check_win(now)
    }

    /// Books an accepted move into the counters.
    fn record(&mut self, step: Step) {
        self.move_count = self.move_count.saturating_add(1);
        if !self.visited_cells.insert(step.to) {
            self.backtrack_count = self.backtrack_count.saturating_add(1);
        }
    }

    /// Marks the session won if the player stands on the goal and it was not won before.
    fn check_win(&mut self, now: Instant) -> Option<Outcome> {
        if self.outcome.is_some() || self.player.position() != self.goal {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.started);
        let outcome = Outcome {
            elapsed,
            score: compute_score(elapsed, self.move_count, self.backtrack_count),
        };
        self.outcome = Some(outcome);
        info!(
            elapsed_secs = elapsed.as_secs(),
            moves = self.move_count,
            backtracks = self.backtrack_count,
            score = outcome.score,
            "maze solved"
        );

        Some(outcome)
    }

    /// Returns the tracked player.
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the goal cell.
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Returns the number of accepted moves.
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns the number of moves into previously visited cells.
    pub const fn backtrack_count(&self) -> u32 {
        self.backtrack_count
    }

    /// Returns the number of distinct cells occupied so far.
    pub fn explored(&self) -> usize {
        self.visited_cells.len()
    }

    /// Returns `true` if `position` has been occupied at some point.
    pub fn has_visited(&self, position: Position) -> bool {
        self.visited_cells.contains(&position)
    }

    /// Returns `true` once the goal has been reached.
    pub const fn is_won(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns the frozen outcome of a won session.
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the time to display: live until the win, frozen afterwards.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.outcome.map_or_else(
            || now.saturating_duration_since(self.started),
            |outcome| outcome.elapsed,
        )
    }
}
