//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    ///
    /// This variant represents the options menu screen of the game.
    OptionsMenu(OptionsMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the ingame screen where the maze is walked by the player.
    InGame,
    /// Algorithm selection screen.
    ///
    /// This variant represents the list of maze generation algorithms the user can pick from. The
    /// payload is the index of the entry under the cursor.
    AlgorithmMenu(usize),
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

/// Options menu navigation choices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// "Back" navigation option.
    Back,
    /// "Algorithm" selection option.
    Algorithm,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant represents the main menu in the game.
    MainMenu(u8),
    /// Options menu configuration.
    ///
    /// This variant represents the options menu in the game.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}
