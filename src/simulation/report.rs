//! Summary of a finished simulation run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A repeating cycle detected during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// First generation of the cycle
    pub generation: u64,
    /// Cycle length; 1 means a still life
    pub period: u64,
}

impl Settlement {
    pub fn is_still_life(&self) -> bool {
        self.period == 1
    }
}

/// Statistics collected while running a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub width: u32,
    pub height: u32,
    pub toroidal: bool,
    /// Generations stepped
    pub generations: u64,
    /// Alive count per generation, starting with the initial state
    pub population: Vec<u64>,
    pub final_alive: u64,
    pub final_dead: u64,
    pub settled: Option<Settlement>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    pub fn initial_alive(&self) -> u64 {
        self.population.first().copied().unwrap_or(0)
    }

    pub fn peak_alive(&self) -> u64 {
        self.population.iter().copied().max().unwrap_or(0)
    }

    pub fn is_extinct(&self) -> bool {
        self.final_alive == 0
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "World: {}x{} ({})",
            self.width,
            self.height,
            if self.toroidal { "toroidal" } else { "bounded" }
        )?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(
            f,
            "Living Cells: {} → {} (peak {})",
            self.initial_alive(),
            self.final_alive,
            self.peak_alive()
        )?;
        match self.settled {
            Some(_) if self.is_extinct() => writeln!(f, "Outcome: Extinct")?,
            Some(s) if s.is_still_life() => {
                writeln!(f, "Outcome: Still life from generation {}", s.generation)?
            }
            Some(s) => writeln!(
                f,
                "Outcome: Oscillator (period {}) from generation {}",
                s.period, s.generation
            )?,
            None => writeln!(f, "Outcome: Still evolving")?,
        }
        write!(f, "Elapsed: {:.3}s", self.elapsed.as_secs_f64())
    }
}
