//! Core of the `mazetrail` maze game.
//!
//! A game starts by carving a perfect maze into a [`grid::Grid`] with one of the
//! [`generator::Algorithm`]s. The player then walks it one cell at a time: a [`movement::Player`]
//! only accepts a new step once the animation of the previous one has finished, and the
//! [`session::Session`] counts moves, revisits and time until the goal corner is reached, at which
//! point the run is scored.
//!
//! [`game::Game`] ties those pieces together behind a per-frame `tick` and a read-only
//! [`game::Snapshot`] for rendering. [`App`] is the terminal front-end driving it.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod config;
pub mod game;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod movement;
pub mod session;

mod app;
mod events;
mod types;
mod ui;

pub use app::App;
