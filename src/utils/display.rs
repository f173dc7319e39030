//! Display and output formatting utilities

use crate::game_of_life::{Grid, World};
use crate::simulation::RunReport;

/// Format grids and worlds for the console
pub struct GridFormatter;

impl GridFormatter {
    /// Bordered `+---+` block, the canonical diagnostic rendering
    pub fn format_bordered(grid: &Grid) -> String {
        grid.to_string()
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for row in grid.rows() {
            output.extend(row.iter().map(|cell| if cell.is_alive() { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.rows().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One frame of a running world: generation header plus bordered grid
    pub fn format_frame(world: &World) -> String {
        format!(
            "Generation {} (Living: {}):\n{}",
            world.generation(),
            world.alive_cells(),
            Self::format_bordered(world.get_state())
        )
    }

    /// Population statistics for a grid
    pub fn format_stats(grid: &Grid) -> String {
        let density = if grid.total_cells() == 0 {
            0.0
        } else {
            grid.alive_cells() as f64 / grid.total_cells() as f64 * 100.0
        };
        format!(
            "Size: {}x{}\nLiving cells: {}\nDead cells: {}\nDensity: {:.1}%\n",
            grid.width(),
            grid.height(),
            grid.alive_cells(),
            grid.dead_cells(),
            density
        )
    }

    /// Population over time as a bar chart, one row per sampled generation
    pub fn format_population(report: &RunReport, max_rows: usize) -> String {
        let peak = report.peak_alive().max(1);
        let stride = report.population.len().div_ceil(max_rows.max(1)).max(1);

        let mut output = String::new();
        for (generation, &alive) in report.population.iter().enumerate().step_by(stride) {
            let bar = (alive * 40 / peak) as usize;
            output.push_str(&format!("{:6} | {:<40} {}\n", generation, "█".repeat(bar), alive));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::presets;
    use std::time::Duration;

    #[test]
    fn test_grid_formatting() {
        let grid = presets::glider();

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "·█·\n··█\n███\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert_eq!(with_coords.lines().count(), 4);
    }

    #[test]
    fn test_frame_and_stats() {
        let world = World::from(presets::glider());
        let frame = GridFormatter::format_frame(&world);
        assert!(frame.starts_with("Generation 0 (Living: 5):\n+---+\n"));

        let stats = GridFormatter::format_stats(&Grid::new(0, 0));
        assert!(stats.contains("Density: 0.0%"));
    }

    #[test]
    fn test_population_chart() {
        let report = RunReport {
            width: 4,
            height: 4,
            toroidal: false,
            generations: 3,
            population: vec![2, 4, 0, 4],
            final_alive: 4,
            final_dead: 12,
            settled: None,
            elapsed: Duration::ZERO,
        };
        let chart = GridFormatter::format_population(&report, 10);
        assert_eq!(chart.lines().count(), 4);
        assert!(chart.lines().nth(1).unwrap().ends_with(&format!("{} 4", "█".repeat(40))));

        let sampled = GridFormatter::format_population(&report, 2);
        assert_eq!(sampled.lines().count(), 2);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
