//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    CliOverrides, OutputConfig, OutputFormat, PatternConfig, Settings, SimulationConfig,
};
