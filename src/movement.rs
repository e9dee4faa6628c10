//! Player movement state machine.
//!
//! Movement has a discrete half and a continuous half. The discrete half decides, from a snapshot
//! of held keys, whether the player steps into a neighbouring cell; the logical position jumps to
//! the destination at once. The continuous half then glides the rendered position from the old
//! cell center to the new one over a fixed duration, during which no further input is accepted.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::grid::{Direction, Grid, Position};

/// Directional keys held at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Left arrow held.
    pub left: bool,
    /// Right arrow held.
    pub right: bool,
    /// Up arrow held.
    pub up: bool,
    /// Down arrow held.
    pub down: bool,
}

impl InputSnapshot {
    /// Marks the key for `direction` as held.
    pub fn hold(&mut self, direction: Direction) {
        match direction {
            Direction::West => self.left = true,
            Direction::East => self.right = true,
            Direction::North => self.up = true,
            Direction::South => self.down = true,
        }
    }

    /// Returns `true` if no directional key is held.
    pub const fn is_empty(self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }

    /// Iterates over the held directions in priority order: left, right, up, down.
    pub fn held(self) -> impl Iterator<Item = Direction> {
        [
            (self.left, Direction::West),
            (self.right, Direction::East),
            (self.up, Direction::North),
            (self.down, Direction::South),
        ]
        .into_iter()
        .filter_map(|(held, direction)| held.then_some(direction))
    }
}

/// Continuous position in cell units.
///
/// Cell `(x, y)` spans `[x, x + 1) × [y, y + 1)`, so its center sits at `(x + 0.5, y + 0.5)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards like the grid rows.
    pub y: f64,
}

impl Point {
    /// Returns the center of the cell at `position`.
    pub fn center(position: Position) -> Self {
        Self {
            x: f64::from(position.x) + 0.5,
            y: f64::from(position.y) + 0.5,
        }
    }

    /// Linearly blends from `self` towards `target` by `progress`, clamped to `[0, 1]`.
    ///
    /// A progress of zero yields `self` and anything at or past one yields `target` exactly.
    pub fn lerp(self, target: Self, progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        if progress >= 1.0 {
            return target;
        }

        Self {
            x: (target.x - self.x).mul_add(progress, self.x),
            y: (target.y - self.y).mul_add(progress, self.y),
        }
    }
}

/// State of the movement state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Motion {
    /// Stationary and accepting input.
    #[default]
    Idle,
    /// Gliding between two cell centers; input is ignored until the glide ends.
    Animating {
        /// Instant the move was accepted.
        started: Instant,
        /// Center of the cell the player left.
        from: Point,
        /// Center of the cell the player entered.
        to: Point,
    },
}

/// Accepted discrete move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Cell the player left.
    pub from: Position,
    /// Cell the player entered.
    pub to: Position,
    /// Direction of travel.
    pub direction: Direction,
}

/// Player position, motion and trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Logical cell, already the destination while a glide is in flight.
    position: Position,
    /// Current state of the movement state machine.
    motion: Motion,
    /// Every cell ever occupied, in order; only ever appended to.
    path: Vec<Position>,
    /// Time a single glide takes.
    move_duration: Duration,
}

impl Player {
    /// Places a new player at `start`.
    pub fn new(start: Position, move_duration: Duration) -> Self {
        Self {
            position: start,
            motion: Motion::Idle,
            path: vec![start],
            move_duration,
        }
    }

    /// Returns the logical cell of the player.
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the state of the movement state machine.
    pub const fn motion(&self) -> Motion {
        self.motion
    }

    /// Returns every cell the player has occupied, oldest first.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Returns `true` while a glide is in flight.
    pub const fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    /// Returns the fraction of the current glide completed at `now`, in `[0, 1]`.
    ///
    /// An idle player is always at full progress.
    pub fn progress(&self, now: Instant) -> f64 {
        match self.motion {
            Motion::Idle => 1.0,
            Motion::Animating { started, .. } => {
                if self.move_duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(started);
                (elapsed.as_secs_f64() / self.move_duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// Returns the interpolated position to render at `now`.
    pub fn display_position(&self, now: Instant) -> Point {
        match self.motion {
            Motion::Idle => Point::center(self.position),
            Motion::Animating { from, to, .. } => from.lerp(to, self.progress(now)),
        }
    }

    /// Attempts a discrete move from the held keys.
    ///
    /// Only an idle player moves. The first held direction, in priority order, whose wall is open
    /// wins; blocked directions are skipped silently. On success the logical position jumps to the
    /// destination, the destination is appended to the path and a glide starts at `now`.
    pub fn try_move(&mut self, grid: &Grid, input: InputSnapshot, now: Instant) -> Option<Step> {
        if self.is_animating() {
            return None;
        }

        let (direction, to) = input
            .held()
            .filter(|&direction| grid.is_passable(self.position, direction))
            .find_map(|direction| {
                grid.neighbor(self.position, direction)
                    .map(|next| (direction, next))
            })?;

        let from = self.position;
        self.motion = Motion::Animating {
            started: now,
            from: Point::center(from),
            to: Point::center(to),
        };
        self.position = to;
        self.path.push(to);
        trace!(?from, ?to, ?direction, "player moved");

        Some(Step {
            from,
            to,
            direction,
        })
    }

    /// Ends the current glide once its progress reaches one.
    pub fn settle(&mut self, now: Instant) {
        if self.is_animating() && self.progress(now) >= 1.0 {
            self.motion = Motion::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a 3x1 corridor with both passages carved.
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 1).expect("failed to create grid");
        let _ = grid.carve(Position::new(0, 0), Direction::East);
        let _ = grid.carve(Position::new(1, 0), Direction::East);
        grid
    }

    /// Snapshot with only the right arrow held.
    fn right() -> InputSnapshot {
        InputSnapshot {
            right: true,
            ..InputSnapshot::default()
        }
    }

    /// Compares two points with a small tolerance.
    fn close(first: Point, second: Point) -> bool {
        (first.x - second.x).abs() < 1e-9 && (first.y - second.y).abs() < 1e-9
    }

    #[test]
    fn test_held_priority_order() {
        let all = InputSnapshot {
            left: true,
            right: true,
            up: true,
            down: true,
        };

        assert_eq!(
            all.held().collect::<Vec<_>>(),
            vec![
                Direction::West,
                Direction::East,
                Direction::North,
                Direction::South
            ]
        );
        assert!(InputSnapshot::default().is_empty());
        assert_eq!(InputSnapshot::default().held().count(), 0);
    }

    #[test]
    fn test_hold_sets_matching_key() {
        let mut input = InputSnapshot::default();
        input.hold(Direction::South);

        assert!(input.down);
        assert!(!input.is_empty());
        assert_eq!(input.held().collect::<Vec<_>>(), vec![Direction::South]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let from = Point { x: 0.5, y: 0.5 };
        let to = Point { x: 1.5, y: 0.5 };

        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 3.0), to);
        assert_eq!(from.lerp(to, -2.0), from);
        assert!(close(from.lerp(to, 0.5), Point { x: 1.0, y: 0.5 }));
    }

    #[test]
    fn test_accepted_move_updates_position_and_path() {
        let grid = corridor();
        let now = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(120));

        let step = player.try_move(&grid, right(), now).expect("move should be accepted");

        assert_eq!(step.from, Position::new(0, 0));
        assert_eq!(step.to, Position::new(1, 0));
        assert_eq!(step.direction, Direction::East);
        assert_eq!(player.position(), Position::new(1, 0));
        assert_eq!(player.path(), &[Position::new(0, 0), Position::new(1, 0)]);
        assert!(player.is_animating());
    }

    #[test]
    fn test_blocked_move_is_ignored() {
        let grid = corridor();
        let now = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(120));
        let up = InputSnapshot {
            up: true,
            ..InputSnapshot::default()
        };

        assert_eq!(player.try_move(&grid, up, now), None);
        assert_eq!(player.position(), Position::new(0, 0));
        assert_eq!(player.path(), &[Position::new(0, 0)]);
        assert_eq!(player.motion(), Motion::Idle);
    }

    #[test]
    fn test_blocked_priority_falls_through_to_open_direction() {
        let grid = corridor();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(120));
        let input = InputSnapshot {
            left: true,
            right: true,
            ..InputSnapshot::default()
        };

        let step = player
            .try_move(&grid, input, Instant::now())
            .expect("right should be taken when left is walled");

        assert_eq!(step.direction, Direction::East);
    }

    #[test]
    fn test_input_ignored_while_animating() {
        let grid = corridor();
        let now = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(120));

        let _ = player.try_move(&grid, right(), now);
        let second = player.try_move(&grid, right(), now + Duration::from_millis(60));

        assert_eq!(second, None);
        assert_eq!(player.position(), Position::new(1, 0));
    }

    #[test]
    fn test_animation_progress_and_settle() {
        let grid = corridor();
        let now = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(100));

        assert!((player.progress(now) - 1.0).abs() < f64::EPSILON);
        assert_eq!(player.display_position(now), Point::center(Position::new(0, 0)));

        let _ = player.try_move(&grid, right(), now);

        assert!(player.progress(now).abs() < f64::EPSILON);
        assert_eq!(player.display_position(now), Point::center(Position::new(0, 0)));

        let halfway = now + Duration::from_millis(50);
        assert!((player.progress(halfway) - 0.5).abs() < 1e-9);
        assert!(close(player.display_position(halfway), Point { x: 1.0, y: 0.5 }));

        player.settle(halfway);
        assert!(player.is_animating());

        let late = now + Duration::from_millis(400);
        assert!((player.progress(late) - 1.0).abs() < f64::EPSILON);
        assert_eq!(player.display_position(late), Point::center(Position::new(1, 0)));

        player.settle(late);
        assert_eq!(player.motion(), Motion::Idle);
        assert!(player.try_move(&grid, right(), late).is_some());
    }

    #[test]
    fn test_progress_before_start_is_zero() {
        let grid = corridor();
        let earlier = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::from_millis(100));
        let _ = player.try_move(&grid, right(), earlier + Duration::from_secs(1));

        assert!(player.progress(earlier).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let grid = corridor();
        let now = Instant::now();
        let mut player = Player::new(Position::new(0, 0), Duration::ZERO);
        let _ = player.try_move(&grid, right(), now);

        assert!((player.progress(now) - 1.0).abs() < f64::EPSILON);
        player.settle(now);
        assert!(!player.is_animating());
    }
}
