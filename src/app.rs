//! Core application state and logic for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::{
    config::GameConfig,
    events,
    game::Game,
    generator::Algorithm,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Fixed sizes and timings every new game is built from.
    pub(crate) config: GameConfig,
    /// Algorithm used for the next generated maze.
    ///
    /// This field starts off as the algorithm given on the command line and changes whenever the
    /// user confirms an entry in the algorithm menu.
    pub(crate) algorithm: Algorithm,
    /// Random source shared by every maze generated during this run.
    pub(crate) rng: StdRng,
    /// Game currently being played.
    ///
    /// This field is only populated while on the in-game screen. Leaving that screen drops the
    /// game, and starting again always builds a fresh maze.
    pub(crate) game: Option<Game>,
}

impl App {
    /// Creates a new instance of the App structure.
    ///
    /// A `seed` makes the sequence of generated mazes reproducible; without one the random source
    /// is seeded from the operating system.
    ///
    /// # Errors
    ///
    /// This function returns an error if `config` does not describe a playable maze.
    pub fn new(config: GameConfig, algorithm: Algorithm, seed: Option<u64>) -> Result<Self> {
        config.validate()?;

        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            config,
            algorithm,
            rng,
            game: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame, Instant::now()).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Generates a fresh maze and switches to the in-game screen.
    ///
    /// # Errors
    ///
    /// This function returns an error if the game cannot be built from the configuration.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        self.game = Some(Game::new(
            &self.config,
            self.algorithm,
            &mut self.rng,
            Instant::now(),
        )?);
        self.screen = Screen::InGame;

        Ok(())
    }

    /// Drops the current game and returns to the main menu.
    pub(crate) fn abandon_game(&mut self) {
        if self.game.take().is_some() {
            debug!("game abandoned");
        }
        self.screen = Screen::MainMenu(MainMenuItem::StartGame);
    }
}
