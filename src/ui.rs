//! User interface rendering functions for all application screens.

use std::{rc::Rc, time::Instant};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as Segment, Points},
        Block, BorderType, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    game::Snapshot,
    generator::Algorithm,
    grid::{Direction, Grid, Position},
    movement::Point,
    session::Outcome,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame, now: Instant) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::AlgorithmMenu(cursor) => algorithm_menu(app, frame, *cursor),
        Screen::InGame => {
            let game = app
                .game
                .as_ref()
                .ok_or_eyre("in-game screen without a game")?;
            in_game(frame, &game.snapshot(now), game.algorithm())?;
        }
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);
    let style_for = |entry: MainMenuItem| {
        if entry == item {
            active_content_style
        } else {
            content_style
        }
    };

    let opt1 = Line::raw("Start Game")
        .centered()
        .style(style_for(MainMenuItem::StartGame));
    let opt2 = Line::raw("Options")
        .centered()
        .style(style_for(MainMenuItem::Options));
    let opt3 = Line::raw("Quit")
        .centered()
        .style(style_for(MainMenuItem::Quit));

    frame.render_widget(opt1, inner_layout[0]);
    frame.render_widget(opt2, inner_layout[1]);
    frame.render_widget(opt3, inner_layout[2]);
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with choices for "Algorithm" selection and "Return" to
/// the main menu. It provides the same navigation highlighting as the main menu.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let mut opt1 = Line::raw("Algorithm").centered();
    let mut opt2 = Line::raw("Return").centered();
    match item {
        OptionsMenuItem::Algorithm => {
            opt1 = opt1.style(active_content_style);
            opt2 = opt2.style(content_style);
        }
        OptionsMenuItem::Back => {
            opt1 = opt1.style(content_style);
            opt2 = opt2.style(active_content_style);
        }
    }

    frame.render_widget(opt1, inner_layout[0]);
    frame.render_widget(opt2, inner_layout[1]);
}

/// Renders the algorithm selection menu.
///
/// This function lists every maze generation algorithm. The entry under the cursor is highlighted
/// and the algorithm that will carve the next maze is marked with a dot.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn algorithm_menu(app: &App, frame: &mut Frame, cursor: usize) {
    clear(frame);

    let rows = Algorithm::ALL.len();
    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let layout = Layout::vertical([Constraint::Length(
        u16::try_from(rows + 2).unwrap_or(u16::MAX),
    )])
    .flex(Flex::Center)
    .split(space)[0];

    let block = Block::bordered()
        .title_top("Algorithm list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let inner_selector = Layout::vertical(vec![Constraint::Max(1); rows]).split(inner_layout[0]);
    let inner_list = Layout::vertical(vec![Constraint::Max(1); rows]).split(inner_layout[1]);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, algorithm) in Algorithm::ALL.into_iter().enumerate() {
        let style = if idx == cursor {
            active_content_style
        } else {
            content_style
        };
        let marker = if algorithm == app.algorithm { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), inner_selector[idx]);
        frame.render_widget(Line::styled(algorithm.repr(), style), inner_list[idx]);
    }
}

/// Maps a continuous grid position onto canvas coordinates.
///
/// Rows grow downwards in the grid while the canvas y axis grows upwards.
fn to_canvas(point: Point, grid: &Grid) -> (f64, f64) {
    (point.x, f64::from(grid.height()) - point.y)
}

/// Collects the wall segments still standing, in canvas coordinates.
///
/// Every cell contributes its north and west walls; the cells on the east and south borders also
/// contribute the outer edge on that side.
pub(crate) fn wall_segments(grid: &Grid) -> Vec<(f64, f64, f64, f64)> {
    let height = f64::from(grid.height());
    let mut segments = Vec::new();

    for position in grid.positions() {
        let left = f64::from(position.x);
        let top = height - f64::from(position.y);
        let (right, bottom) = (left + 1.0, top - 1.0);
        let closed = |direction| !grid.is_passable(position, direction);

        if closed(Direction::North) {
            segments.push((left, top, right, top));
        }
        if closed(Direction::West) {
            segments.push((left, top, left, bottom));
        }
        if position.x + 1 == grid.width() && closed(Direction::East) {
            segments.push((right, top, right, bottom));
        }
        if position.y + 1 == grid.height() && closed(Direction::South) {
            segments.push((left, bottom, right, bottom));
        }
    }

    segments
}

/// Returns the canvas coordinates of the center of `position`.
fn cell_center(position: Position, grid: &Grid) -> (f64, f64) {
    to_canvas(Point::center(position), grid)
}

/// Returns the share of cells visited so far as a rounded percentage.
///
/// # Errors
///
/// This function may return errors if the cell counts do not fit the arithmetic type.
pub(crate) fn explored_percent(explored: usize, total: usize) -> Result<i32> {
    let explored = i32::try_from(explored)?;
    let total = i32::try_from(total)?.max(1);

    Ok(rounded_div::i32(explored.saturating_mul(100), total))
}

/// Draws the walls, the markers, the trail and the player of `snapshot` centered in `area`.
///
/// # Errors
///
/// This function may return errors from layout lookups.
fn draw_maze(frame: &mut Frame, area: Rect, snapshot: &Snapshot<'_>) -> Result<()> {
    let grid = snapshot.grid;

    // Each maze cell takes two columns and one row, which is square in braille dots.
    let space = Layout::vertical([Constraint::Length(grid.height())])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze rows from layout")?;
    let space = Layout::horizontal([Constraint::Length(grid.width().saturating_mul(2))])
        .flex(Flex::Center)
        .split(space)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze columns from layout")?;

    // Pre-compute canvas coordinates before handing them to the paint closure
    let walls = wall_segments(grid);
    let trail: Vec<(f64, f64)> = snapshot
        .path
        .iter()
        .map(|&position| cell_center(position, grid))
        .collect();
    let start = [cell_center(snapshot.start, grid)];
    let goal = [cell_center(snapshot.goal, grid)];
    let (player_x, player_y) = to_canvas(snapshot.player, grid);

    let maze = Canvas::default()
        .x_bounds([0.0, f64::from(grid.width())])
        .y_bounds([0.0, f64::from(grid.height())])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for &(x1, y1, x2, y2) in &walls {
                ctx.draw(&Segment {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: Color::White,
                });
            }
            ctx.layer();

            ctx.draw(&Points {
                coords: &start,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &goal,
                color: Color::Red,
            });
            for pair in trail.windows(2) {
                if let [(x1, y1), (x2, y2)] = *pair {
                    ctx.draw(&Segment {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: Color::LightRed,
                    });
                }
            }
            ctx.layer();

            ctx.draw(&Circle {
                x: player_x,
                y: player_y,
                radius: 0.3,
                color: Color::Cyan,
            });
        });
    frame.render_widget(maze, space);

    Ok(())
}

/// Shows the final score of a solved maze in a popup over `area`.
///
/// # Errors
///
/// This function may return errors from layout lookups.
fn win_popup(frame: &mut Frame, area: Rect, outcome: Outcome) -> Result<()> {
    let popup = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get popup rows from layout")?;
    let popup = Layout::horizontal([Constraint::Length(30)])
        .flex(Flex::Center)
        .split(popup)
        .first()
        .copied()
        .ok_or_eyre("failed to get popup columns from layout")?;

    let summary = Paragraph::new(vec![
        Line::raw(format!("Score: {}", outcome.score)),
        Line::raw(format!("Time: {}s", outcome.elapsed.as_secs())),
    ])
    .centered()
    .block(
        Block::bordered()
            .title("You Win!")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .border_type(BorderType::Double),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(summary, popup);

    Ok(())
}

/// Renders the in-game screen with the maze, the trail and the player.
///
/// This function lays out a scoreboard on top, the maze in the middle and a tooltip at the bottom.
/// Walls, markers, the trail and the player are drawn on separate [`Canvas`] layers so their
/// colors do not bleed into each other. Once the maze is solved a popup shows the final score.
///
/// # Errors
///
/// This function may return errors from layout lookups or data conversion failures.
pub(crate) fn in_game(
    frame: &mut Frame,
    snapshot: &Snapshot<'_>,
    algorithm: Algorithm,
) -> Result<()> {
    clear(frame);

    let grid = snapshot.grid;
    let overall_layout = Layout::vertical([
        Constraint::Length(3), // Scoreboard
        Constraint::Min(1),    // Maze
        Constraint::Length(1), // Tooltip
    ])
    .split(frame.area());

    let hud_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get scoreboard area from layout")?;
    let maze_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let hud = Paragraph::new(Line::raw(format!(
        "Time: {}s  Moves: {}  Backtracks: {}  Explored: {}%",
        snapshot.elapsed.as_secs(),
        snapshot.moves,
        snapshot.backtracks,
        explored_percent(snapshot.explored, grid.len())?,
    )))
    .centered()
    .block(
        Block::bordered()
            .title(algorithm.repr())
            .title_alignment(Alignment::Center)
            .style(Color::Green)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(hud, hud_area);

    draw_maze(frame, maze_area, snapshot)?;

    let tooltip = Line::raw("(arrows) move / (h) return to menu / (q) quit")
        .centered()
        .style(Style::default().fg(Color::Green));
    frame.render_widget(tooltip, tooltip_area);

    if let Some(outcome) = snapshot.outcome {
        win_popup(frame, maze_area, outcome)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, events, movement::InputSnapshot};
    use ratatui::{backend::TestBackend, Terminal};

    /// Creates a minimal test app for UI testing.
    fn create_test_app(config: GameConfig) -> App {
        App::new(config, Algorithm::default(), Some(8)).expect("failed to create app")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(120, 60);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Draws `app` once and returns the rendered buffer as a single string.
    fn render(app: &App) -> String {
        let mut terminal = create_test_terminal();
        let _ = terminal
            .draw(|frame| {
                draw(app, frame, Instant::now()).expect("drawing should succeed in test");
            })
            .expect("terminal drawing should succeed");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app(GameConfig::default());

        let screen = render(&app);

        assert!(screen.contains("Start Game"));
        assert!(screen.contains("Main Menu"));
    }

    #[test]
    fn test_draw_options_menu() {
        let mut app = create_test_app(GameConfig::default());
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);

        let screen = render(&app);

        assert!(screen.contains("Options Menu"));
        assert!(screen.contains("Algorithm"));
    }

    #[test]
    fn test_draw_algorithm_menu() {
        let mut app = create_test_app(GameConfig::default());
        app.screen = Screen::AlgorithmMenu(1);

        let screen = render(&app);

        for algorithm in Algorithm::ALL {
            assert!(screen.contains(algorithm.repr()), "{algorithm} should be listed");
        }
    }

    #[test]
    fn test_draw_in_game() {
        let mut app = create_test_app(GameConfig::default());
        app.start_game().expect("game should start");

        let screen = render(&app);

        assert!(screen.contains("Moves: 0"));
        assert!(screen.contains("Backtracks: 0"));
        assert!(screen.contains("Recursive Backtracker"));
        assert!(!screen.contains("You Win!"));
    }

    #[test]
    fn test_draw_in_game_without_game_fails() {
        let mut app = create_test_app(GameConfig::default());
        app.screen = Screen::InGame;
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            assert!(
                draw(&app, frame, Instant::now()).is_err(),
                "in-game drawing should fail without a game"
            );
        });

        assert!(result.is_ok(), "terminal drawing should succeed even if draw fails");
    }

    #[test]
    fn test_draw_win_popup() {
        let config = GameConfig {
            width: 1,
            height: 1,
            ..GameConfig::default()
        };
        let mut app = create_test_app(config);
        app.start_game().expect("game should start");
        events::tick(&mut app, InputSnapshot::default(), Instant::now());

        let screen = render(&app);

        assert!(screen.contains("You Win!"));
        assert!(screen.contains("Score: "));
        assert!(screen.contains("Explored: 100%"));
    }

    #[test]
    fn test_wall_segments_of_closed_cell() {
        let grid = Grid::new(1, 1).expect("failed to create grid");

        assert_eq!(wall_segments(&grid).len(), 4);
    }

    #[test]
    fn test_wall_segments_of_perfect_maze() {
        let mut app = create_test_app(GameConfig {
            width: 5,
            height: 4,
            ..GameConfig::default()
        });
        app.start_game().expect("game should start");
        let grid = app.game.as_ref().map(|game| game.grid().clone()).expect("game exists");

        // Interior edges minus carved passages plus the outer border.
        let interior = 4 * 4 + 5 * 3;
        let border = 2 * (5 + 4);
        assert_eq!(
            wall_segments(&grid).len(),
            interior - grid.passage_count() + border
        );
    }

    #[test]
    fn test_explored_percent_rounds() {
        assert_eq!(explored_percent(1, 3).expect("in range"), 33);
        assert_eq!(explored_percent(2, 3).expect("in range"), 67);
        assert_eq!(explored_percent(1600, 1600).expect("in range"), 100);
        assert_eq!(explored_percent(0, 0).expect("in range"), 0);
    }
}
