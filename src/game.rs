//! A single game: one maze and one session played on it.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use rand::Rng;
use tracing::info;

use crate::{
    config::GameConfig,
    generator::Algorithm,
    grid::{Grid, Position},
    movement::{InputSnapshot, Player, Point},
    session::{Outcome, Session},
};

/// Everything a renderer needs to draw one frame.
///
/// This structure is the whole contract between the game and whatever displays it: wall state,
/// the interpolated player, the trail and the scoreboard.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'game> {
    /// Maze walls.
    pub grid: &'game Grid,
    /// Interpolated player position, in cell units.
    pub player: Point,
    /// Every cell the player has occupied, oldest first.
    pub path: &'game [Position],
    /// Starting cell.
    pub start: Position,
    /// Goal cell.
    pub goal: Position,
    /// Live elapsed time, or the frozen final time once won.
    pub elapsed: Duration,
    /// Accepted moves.
    pub moves: u32,
    /// Moves into previously visited cells.
    pub backtracks: u32,
    /// Distinct cells occupied so far.
    pub explored: usize,
    /// Final time and score, present once the maze is solved.
    pub outcome: Option<Outcome>,
}

/// A generated maze together with the session being played on it.
#[derive(Clone, Debug)]
pub struct Game {
    /// Algorithm the maze was carved with.
    algorithm: Algorithm,
    /// Starting cell.
    start: Position,
    /// Carved maze.
    grid: Grid,
    /// Session tracking the player.
    session: Session,
}

impl Game {
    /// Generates a maze with `algorithm` and starts a session on it at `now`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configuration has a zero dimension.
    pub fn new<R: Rng + ?Sized>(
        config: &GameConfig,
        algorithm: Algorithm,
        rng: &mut R,
        now: Instant,
    ) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::new(config.width, config.height)?;
        algorithm.generate(&mut grid, rng);

        let start = config.start();
        let player = Player::new(start, config.move_duration);
        let session = Session::new(player, config.goal(), now);
        info!(%algorithm, width = config.width, height = config.height, "game started");

        Ok(Self {
            algorithm,
            start,
            grid,
            session,
        })
    }

    /// Advances the game by one tick with the keys held at `now`.
    ///
    /// Returns the outcome on the tick the maze is solved.
    pub fn tick(&mut self, input: InputSnapshot, now: Instant) -> Option<Outcome> {
        self.session.tick(&self.grid, input, now)
    }

    /// Captures the state to render at `now`.
    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        let player = self.session.player();

        Snapshot {
            grid: &self.grid,
            player: player.display_position(now),
            path: player.path(),
            start: self.start,
            goal: self.session.goal(),
            elapsed: self.session.elapsed(now),
            moves: self.session.move_count(),
            backtracks: self.session.backtrack_count(),
            explored: self.session.explored(),
            outcome: self.session.outcome(),
        }
    }

    /// Returns the algorithm the maze was carved with.
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the session.
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{
        grid::Direction,
        session::{compute_score, BASE_SCORE},
    };

    /// Configuration for a tiny 2x2 maze.
    fn tiny() -> GameConfig {
        GameConfig {
            width: 2,
            height: 2,
            ..GameConfig::default()
        }
    }

    /// Finds the first seed whose 2x2 maze opens east from the start and then south to the goal.
    fn right_then_down_game(now: Instant) -> Game {
        (0..)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                Game::new(&tiny(), Algorithm::Backtracker, &mut rng, now)
                    .expect("failed to create game")
            })
            .find(|game| {
                game.grid().is_passable(Position::new(0, 0), Direction::East)
                    && game.grid().is_passable(Position::new(1, 0), Direction::South)
            })
            .expect("some seed should produce the right-then-down layout")
    }

    /// Snapshot holding only the key for `direction`.
    fn holding(direction: Direction) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        input.hold(direction);
        input
    }

    #[test]
    fn test_new_game_rejects_invalid_config() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);

        assert!(Game::new(&config, Algorithm::Prim, &mut rng, Instant::now()).is_err());
    }

    #[test]
    fn test_default_game_is_solvable() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = Game::new(
            &GameConfig::default(),
            Algorithm::default(),
            &mut rng,
            Instant::now(),
        )
        .expect("failed to create game");

        assert_eq!(game.grid().len(), 1600);
        assert_eq!(game.grid().passage_count(), 1599);
        assert_eq!(game.algorithm(), Algorithm::Backtracker);
        assert_eq!(game.session().goal(), Position::new(39, 39));
    }

    #[test]
    fn test_initial_snapshot() {
        let now = Instant::now();
        let game = right_then_down_game(now);
        let snapshot = game.snapshot(now);

        assert_eq!(snapshot.player, Point::center(Position::new(0, 0)));
        assert_eq!(snapshot.path, &[Position::new(0, 0)]);
        assert_eq!(snapshot.start, Position::new(0, 0));
        assert_eq!(snapshot.goal, Position::new(1, 1));
        assert_eq!(snapshot.moves, 0);
        assert_eq!(snapshot.explored, 1);
        assert_eq!(snapshot.outcome, None);
    }

    #[test]
    fn test_right_then_down_wins() {
        let start = Instant::now();
        let mut game = right_then_down_game(start);

        assert_eq!(game.tick(holding(Direction::East), start), None);

        let settled = start + Duration::from_millis(200);
        assert_eq!(game.tick(InputSnapshot::default(), settled), None);

        let arrival = start + Duration::from_millis(300);
        let outcome = game
            .tick(holding(Direction::South), arrival)
            .expect("reaching the corner should win");

        let snapshot = game.snapshot(arrival + Duration::from_secs(5));
        assert_eq!(snapshot.moves, 2);
        assert_eq!(snapshot.backtracks, 0);
        assert_eq!(snapshot.outcome, Some(outcome));
        assert_eq!(snapshot.elapsed, Duration::from_millis(300));
        assert_eq!(snapshot.player, Point::center(Position::new(1, 1)));
        assert_eq!(
            snapshot.path,
            &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );

        let whole_seconds = u32::try_from(outcome.elapsed.as_secs()).expect("elapsed fits");
        assert_eq!(outcome.score, 10_000 - 10 * whole_seconds - 10);
        assert_eq!(outcome.score, compute_score(outcome.elapsed, 2, 0));
    }

    #[test]
    fn test_single_cell_game_is_won_immediately() {
        let config = GameConfig {
            width: 1,
            height: 1,
            ..GameConfig::default()
        };
        let now = Instant::now();
        let mut rng = StdRng::seed_from_u64(0);
        let mut game =
            Game::new(&config, Algorithm::default(), &mut rng, now).expect("failed to create game");

        let outcome = game.tick(InputSnapshot::default(), now);

        assert_eq!(
            outcome,
            Some(Outcome {
                elapsed: Duration::ZERO,
                score: BASE_SCORE,
            })
        );
    }
}
