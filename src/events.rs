//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, info};

use crate::{
    generator::Algorithm,
    grid::Direction,
    movement::InputSnapshot,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Length of one game tick.
///
/// Input is collected for this long before the game is advanced and the next frame is drawn, which
/// puts the loop at roughly sixty frames per second.
pub(crate) const TICK_RATE: Duration = Duration::from_millis(16);

/// Handles input events for one tick and advances the game.
///
/// This function drains every keyboard event arriving within [`TICK_RATE`]. Menu keys are applied
/// as they arrive, while arrow keys are folded into the [`InputSnapshot`] the game samples once at
/// the end of the tick.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let deadline = Instant::now() + TICK_RATE;
    let mut input = InputSnapshot::default();

    while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
        if !event::poll(timeout)? {
            break;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                handle_key(app, key.code, &mut input)?;
            }
        }
    }

    tick(app, input, Instant::now());

    Ok(())
}

/// Advances the game, if one is being played, with the keys held during the last tick.
pub(crate) fn tick(app: &mut App, input: InputSnapshot, now: Instant) {
    if !matches!(app.screen, Screen::InGame) {
        return;
    }

    if let Some(outcome) = app.game.as_mut().and_then(|game| game.tick(input, now)) {
        info!(score = outcome.score, "session won");
    }
}

/// Dispatches a single key press to the handler for the current screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode, input: &mut InputSnapshot) -> Result<()> {
    if matches!(app.screen, Screen::InGame) {
        match code {
            KeyCode::Char('q') => app.exit = true,
            KeyCode::Char('h') | KeyCode::Esc => app.abandon_game(),
            KeyCode::Left => input.hold(Direction::West),
            KeyCode::Right => input.hold(Direction::East),
            KeyCode::Up => input.hold(Direction::North),
            KeyCode::Down => input.hold(Direction::South),
            _ => {}
        }
        return Ok(());
    }

    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus and lists.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::AlgorithmMenu(cursor) if cursor + 1 < Algorithm::ALL.len() => {
            app.screen = Screen::AlgorithmMenu(cursor + 1);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus and lists.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::AlgorithmMenu(cursor) => {
            app.screen = Screen::AlgorithmMenu(cursor.saturating_sub(1));
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. Starting a game generates its maze here.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => app.start_game()?,
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            let cursor = Algorithm::ALL
                .iter()
                .position(|&algorithm| algorithm == app.algorithm)
                .unwrap_or_default();
            app.screen = Screen::AlgorithmMenu(cursor);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::AlgorithmMenu(cursor) => {
            if let Some(&algorithm) = Algorithm::ALL.get(cursor) {
                debug!(%algorithm, "algorithm selected");
                app.algorithm = algorithm;
            }
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for moving back or returning to
/// previous screens.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => app.abandon_game(),
        Screen::AlgorithmMenu(_) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}
