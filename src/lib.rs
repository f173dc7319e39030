//! Conway's Game of Life on finite grids
//!
//! This library provides grid storage and transforms, a double-buffered
//! simulation world with bounded or toroidal edges, and text and packed-bit
//! binary grid formats.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, Result};
pub use game_of_life::{Cell, Grid, Preset, World};
pub use simulation::{RunReport, Simulation};

/// Main entry point for running a configured simulation
pub fn run_simulation(settings: Settings) -> anyhow::Result<RunReport> {
    let mut simulation = Simulation::new(settings)?;
    Ok(simulation.run())
}
