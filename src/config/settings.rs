//! Configuration settings for the Game of Life simulator

use crate::game_of_life::Preset;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub pattern: PatternConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// World width in cells
    pub width: u32,
    /// World height in cells
    pub height: u32,
    pub generations: u64,
    #[serde(default)]
    pub toroidal: bool,
    /// How many past generations to remember when looking for still lifes
    /// and oscillators; 0 disables detection
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

/// Initial pattern and where it is placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    /// Clockwise quarter turns applied before placement
    #[serde(default)]
    pub rotation: i64,
    #[serde(default)]
    pub alive_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormat,
    pub save_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_every: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `.gol` text grid
    Text,
    /// `.bgol` packed-bit grid
    Binary,
    /// JSON run report alongside a text grid
    Json,
}

fn default_history_window() -> usize {
    16
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            format: OutputFormat::Text,
            save_final: true,
            render_every: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                width: 32,
                height: 32,
                generations: 100,
                toroidal: false,
                history_window: default_history_window(),
            },
            pattern: PatternConfig {
                preset: Some(Preset::Glider),
                file: None,
                x: 1,
                y: 1,
                rotation: 0,
                alive_only: false,
            },
            output: OutputConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.validate_run()?;

        match (&self.pattern.preset, &self.pattern.file) {
            (Some(_), Some(_)) => anyhow::bail!("Specify either a preset or a pattern file, not both"),
            (None, None) => anyhow::bail!("No initial pattern: specify a preset or a pattern file"),
            (None, Some(file)) if !file.exists() => {
                anyhow::bail!("Pattern file does not exist: {}", file.display())
            }
            _ => {}
        }

        Ok(())
    }

    /// Validate the world and output settings, ignoring the pattern source
    pub fn validate_run(&self) -> Result<()> {
        if self.simulation.width == 0 || self.simulation.height == 0 {
            anyhow::bail!(
                "World dimensions must be positive, got {}x{}",
                self.simulation.width,
                self.simulation.height
            );
        }

        if self.output.render_every == Some(0) {
            anyhow::bail!("render_every must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(width) = cli_overrides.width {
            self.simulation.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.simulation.height = height;
        }
        if cli_overrides.toroidal {
            self.simulation.toroidal = true;
        }
        if let Some(preset) = cli_overrides.preset {
            self.pattern.preset = Some(preset);
            self.pattern.file = None;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.pattern.file = Some(pattern_file.clone());
            self.pattern.preset = None;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(render_every) = cli_overrides.render_every {
            self.output.render_every = Some(render_every);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub toroidal: bool,
    pub preset: Option<Preset>,
    pub pattern_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub render_every: Option<u64>,
}
