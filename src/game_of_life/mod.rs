//! Game of Life core functionality

pub mod binary;
pub mod cell;
pub mod grid;
pub mod io;
pub mod presets;
pub mod rules;
pub mod world;

pub use binary::{load_binary, save_binary};
pub use cell::Cell;
pub use grid::Grid;
pub use io::{load, load_text, save, save_text, Format};
pub use presets::Preset;
pub use rules::GameOfLifeRules;
pub use world::World;
