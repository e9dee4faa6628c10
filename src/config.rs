//! Game configuration and command line arguments.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Result};

use crate::{generator::Algorithm, grid::Position};

/// Immutable game configuration.
///
/// This structure replaces scattered global constants: it is built once at startup and handed to
/// every constructor that needs sizes or timings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of maze columns.
    pub width: u16,
    /// Number of maze rows.
    pub height: u16,
    /// Time the player takes to glide from one cell to the next.
    pub move_duration: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            move_duration: Duration::from_millis(120),
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable maze.
    ///
    /// # Errors
    ///
    /// This function returns an error if either maze dimension is zero.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width >= 1, "maze width must be at least 1");
        ensure!(self.height >= 1, "maze height must be at least 1");

        Ok(())
    }

    /// Returns the cell every game starts in.
    pub const fn start(&self) -> Position {
        Position::new(0, 0)
    }

    /// Returns the goal cell, the bottom-right corner of the maze.
    pub const fn goal(&self) -> Position {
        Position::new(
            self.width.saturating_sub(1),
            self.height.saturating_sub(1),
        )
    }
}

/// Command line interface of the game binary.
///
/// Maze dimensions and movement speed are fixed and always come from [`GameConfig::default`].
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Maze generation algorithm preselected in the options menu.
    #[arg(short, long, value_enum, default_value_t = Algorithm::Backtracker)]
    pub algorithm: Algorithm,
    /// Seed for the maze generator; omitted means a fresh random seed.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// File to write logs to; logging is disabled when omitted.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();

        assert_eq!(config.width, 40);
        assert_eq!(config.height, 40);
        assert_eq!(config.move_duration, Duration::from_millis(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_and_goal_corners() {
        let config = GameConfig {
            width: 7,
            height: 3,
            ..GameConfig::default()
        };

        assert_eq!(config.start(), Position::new(0, 0));
        assert_eq!(config.goal(), Position::new(6, 2));
    }

    #[test]
    fn test_validate_rejects_empty_maze() {
        let narrow = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let flat = GameConfig {
            height: 0,
            ..GameConfig::default()
        };

        assert!(narrow.validate().is_err());
        assert!(flat.validate().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["mazetrail", "--algorithm", "growing-tree", "--seed", "9"])
            .expect("arguments should parse");

        assert_eq!(cli.algorithm, Algorithm::GrowingTree);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["mazetrail"]).expect("arguments should parse");

        assert_eq!(cli.algorithm, Algorithm::Backtracker);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_cli_rejects_unknown_algorithm() {
        assert!(Cli::try_parse_from(["mazetrail", "--algorithm", "wilson"]).is_err());
    }
}
