//! This crate contains the source code for the binary for the game mazetrail.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazetrail::{
    config::{Cli, GameConfig},
    logging, App,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    install()?;
    logging::init(cli.log_file.as_deref())?;

    let mut app = App::new(GameConfig::default(), cli.algorithm, cli.seed)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
