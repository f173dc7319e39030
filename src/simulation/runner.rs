//! Drives a world from configured settings

use super::{RunReport, Settlement};
use crate::config::{OutputFormat, Settings};
use crate::game_of_life::{self, binary, Grid, World};
use anyhow::{Context, Result};
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// A configured simulation: the initial world plus the rules for running it
pub struct Simulation {
    settings: Settings,
    world: World,
}

impl Simulation {
    /// Create a simulation from settings, loading the pattern file or preset
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate().context("Invalid simulation settings")?;

        let pattern = match (&settings.pattern.preset, &settings.pattern.file) {
            (Some(preset), None) => preset.grid(),
            (None, Some(file)) => game_of_life::load(file)
                .with_context(|| format!("Failed to load pattern file: {}", file.display()))?,
            _ => anyhow::bail!("Specify exactly one of a preset or a pattern file"),
        };

        Self::with_pattern(settings, pattern)
    }

    /// Create a simulation with an explicit pattern (useful for testing)
    pub fn with_pattern(settings: Settings, pattern: Grid) -> Result<Self> {
        settings.validate_run().context("Invalid simulation settings")?;
        let world = Self::build_world(&settings, &pattern)?;
        Ok(Self { settings, world })
    }

    /// Rotate the pattern and overlay it onto a blank world
    fn build_world(settings: &Settings, pattern: &Grid) -> Result<World> {
        let sim = &settings.simulation;
        let placement = &settings.pattern;

        let rotated = pattern.rotate(placement.rotation);
        let mut canvas = Grid::new(sim.width, sim.height);
        canvas
            .merge(&rotated, placement.x, placement.y, placement.alive_only)
            .with_context(|| {
                format!(
                    "Pattern of size {}x{} does not fit in a {}x{} world at ({}, {})",
                    rotated.width(),
                    rotated.height(),
                    sim.width,
                    sim.height,
                    placement.x,
                    placement.y
                )
            })?;

        debug!(
            width = sim.width,
            height = sim.height,
            alive = canvas.alive_cells(),
            "built initial world"
        );
        Ok(World::from_grid(canvas))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run every configured generation
    pub fn run(&mut self) -> RunReport {
        self.run_with(|_| {})
    }

    /// Run every configured generation, calling `on_render` for the initial
    /// state and then every `output.render_every` generations
    pub fn run_with<F: FnMut(&World)>(&mut self, mut on_render: F) -> RunReport {
        let start_time = Instant::now();
        let generations = self.settings.simulation.generations;
        let toroidal = self.settings.simulation.toroidal;
        let render_every = self.settings.output.render_every;

        let mut detector = CycleDetector::new(self.settings.simulation.history_window);
        let mut population = Vec::with_capacity((generations as usize).saturating_add(1).min(4096));
        let mut settled = None;

        population.push(self.world.alive_cells());
        detector.observe(self.world.generation(), self.world.get_state());
        if render_every.is_some() {
            on_render(&self.world);
        }

        for _ in 0..generations {
            self.world.step(toroidal);
            population.push(self.world.alive_cells());

            let cycle = detector.observe(self.world.generation(), self.world.get_state());
            if settled.is_none() {
                if let Some(found) = cycle {
                    info!(
                        generation = found.generation,
                        period = found.period,
                        "world settled into a repeating cycle"
                    );
                    settled = Some(found);
                }
            }

            if let Some(every) = render_every {
                if self.world.generation() % every == 0 {
                    on_render(&self.world);
                }
            }
        }

        RunReport {
            width: self.world.width(),
            height: self.world.height(),
            toroidal,
            generations,
            population,
            final_alive: self.world.alive_cells(),
            final_dead: self.world.dead_cells(),
            settled,
            elapsed: start_time.elapsed(),
        }
    }

    /// Write the final state (and the report for JSON output) to the output directory
    pub fn save_outputs(&self, report: &RunReport) -> Result<Vec<PathBuf>> {
        let output = &self.settings.output;
        if !output.save_final {
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&output.directory)
            .with_context(|| format!("Failed to create directory: {}", output.directory.display()))?;

        let state = self.world.get_state();
        let mut written = Vec::new();
        match output.format {
            OutputFormat::Binary => {
                let path = output.directory.join("final.bgol");
                binary::save_binary(&path, state)?;
                written.push(path);
            }
            OutputFormat::Text | OutputFormat::Json => {
                let path = output.directory.join("final.gol");
                game_of_life::save_text(&path, state)?;
                written.push(path);
            }
        }

        if output.format == OutputFormat::Json {
            let path = output.directory.join("report.json");
            report
                .save_to_file(&path)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Remembers recent generations and reports when one repeats
struct CycleDetector {
    window: usize,
    recent: VecDeque<(u64, u64, Grid)>,
}

impl CycleDetector {
    fn new(window: usize) -> Self {
        Self {
            window,
            recent: VecDeque::with_capacity(window),
        }
    }

    fn fingerprint(grid: &Grid) -> u64 {
        let mut hasher = DefaultHasher::new();
        grid.hash(&mut hasher);
        hasher.finish()
    }

    fn observe(&mut self, generation: u64, grid: &Grid) -> Option<Settlement> {
        if self.window == 0 {
            return None;
        }

        let hash = Self::fingerprint(grid);
        let found = self
            .recent
            .iter()
            .rev()
            .find(|(_, h, seen)| *h == hash && seen == grid)
            .map(|&(seen_at, _, _)| Settlement {
                generation: seen_at,
                period: generation - seen_at,
            });

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back((generation, hash, grid.clone()));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{presets, Preset};
    use tempfile::tempdir;

    fn settings(width: u32, height: u32, generations: u64) -> Settings {
        let mut settings = Settings::default();
        settings.simulation.width = width;
        settings.simulation.height = height;
        settings.simulation.generations = generations;
        settings.pattern.x = 0;
        settings.pattern.y = 0;
        settings
    }

    #[test]
    fn test_places_rotated_pattern() {
        let mut config = settings(6, 6, 0);
        config.pattern.x = 2;
        config.pattern.y = 1;
        config.pattern.rotation = 1;
        let sim = Simulation::with_pattern(config, presets::light_weight_spaceship()).unwrap();

        let state = sim.world().get_state();
        assert_eq!(state.alive_cells(), 9);
        let placed = state.crop(2, 1, 6, 6).unwrap();
        assert_eq!(placed, presets::light_weight_spaceship().rotate(1));
    }

    #[test]
    fn test_pattern_must_fit() {
        let mut config = settings(4, 4, 0);
        config.pattern.x = 2;
        assert!(Simulation::with_pattern(config, presets::glider()).is_err());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut config = settings(8, 8, 4);
        config.output.render_every = Some(0);
        assert!(Simulation::with_pattern(config.clone(), presets::glider()).is_err());
        assert!(Simulation::new(config).is_err());

        let mut config = settings(8, 8, 4);
        config.pattern.preset = Some(Preset::Glider);
        config.pattern.file = Some(PathBuf::from("Cargo.toml"));
        assert!(Simulation::new(config).is_err());

        let config = settings(0, 8, 4);
        assert!(Simulation::with_pattern(config, Grid::new(0, 0)).is_err());
    }

    #[test]
    fn test_block_is_still_life() {
        let block = Grid::from_rows(&["##", "##"]).unwrap();
        let mut config = settings(4, 4, 5);
        config.pattern.x = 1;
        config.pattern.y = 1;
        let mut sim = Simulation::with_pattern(config, block).unwrap();

        let report = sim.run();
        assert_eq!(report.settled, Some(Settlement { generation: 0, period: 1 }));
        assert_eq!(report.population, vec![4; 6]);
        assert_eq!(report.final_alive + report.final_dead, 16);
    }

    #[test]
    fn test_blinker_is_oscillator() {
        let blinker = Grid::from_rows(&["###"]).unwrap();
        let mut config = settings(5, 5, 6);
        config.pattern.x = 1;
        config.pattern.y = 2;
        let mut sim = Simulation::with_pattern(config, blinker).unwrap();

        let report = sim.run();
        let settled = report.settled.unwrap();
        assert_eq!(settled.period, 2);
        assert_eq!(settled.generation, 0);
        assert_eq!(sim.world().generation(), 6);
    }

    #[test]
    fn test_detection_can_be_disabled() {
        let block = Grid::from_rows(&["##", "##"]).unwrap();
        let mut config = settings(4, 4, 3);
        config.simulation.history_window = 0;
        let mut sim = Simulation::with_pattern(config, block).unwrap();
        assert_eq!(sim.run().settled, None);
    }

    #[test]
    fn test_glider_keeps_moving() {
        let mut config = settings(12, 12, 8);
        config.pattern.x = 1;
        config.pattern.y = 1;
        let mut sim = Simulation::with_pattern(config, presets::glider()).unwrap();
        let report = sim.run();
        assert_eq!(report.settled, None);
        assert_eq!(report.final_alive, 5);
    }

    #[test]
    fn test_render_callback() {
        let mut config = settings(8, 8, 6);
        config.output.render_every = Some(2);
        let mut sim = Simulation::with_pattern(config, presets::glider()).unwrap();

        let mut rendered = Vec::new();
        sim.run_with(|world| rendered.push(world.generation()));
        assert_eq!(rendered, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_save_outputs() {
        let temp_dir = tempdir().unwrap();
        let mut config = settings(8, 8, 4);
        config.pattern.preset = Some(Preset::Glider);
        config.output.directory = temp_dir.path().join("out");
        config.output.format = OutputFormat::Json;

        let mut sim = Simulation::new(config.clone()).unwrap();
        let report = sim.run();
        let written = sim.save_outputs(&report).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            game_of_life::load_text(&written[0]).unwrap(),
            *sim.world().get_state()
        );

        config.output.format = OutputFormat::Binary;
        let sim = Simulation::new(config).unwrap();
        let written = sim.save_outputs(&report).unwrap();
        assert!(written[0].ends_with("final.bgol"));
        assert_eq!(binary::load_binary(&written[0]).unwrap(), *sim.world().get_state());
    }

    #[test]
    fn test_loads_pattern_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("seed.bgol");
        binary::save_binary(&path, &presets::r_pentomino()).unwrap();

        let mut config = settings(10, 10, 0);
        config.pattern.preset = None;
        config.pattern.file = Some(path);
        let sim = Simulation::new(config).unwrap();
        assert_eq!(sim.world().alive_cells(), 5);
    }
}
