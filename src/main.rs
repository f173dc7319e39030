//! Main CLI application for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{self, binary, Format, Grid, Preset},
    simulation::Simulation,
    utils::{ColorOutput, GridFormatter},
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Conway's Game of Life on finite grids")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Start from a preset (overrides config)
        #[arg(long, value_enum, conflicts_with = "pattern")]
        preset: Option<Preset>,

        /// Start from a .gol or .bgol file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// World width (overrides config)
        #[arg(long)]
        width: Option<u32>,

        /// World height (overrides config)
        #[arg(long)]
        height: Option<u32>,

        /// Wrap around the world edges
        #[arg(short, long)]
        toroidal: bool,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the world every N generations
        #[arg(short, long)]
        render_every: Option<u64>,
    },

    /// Convert a grid file between the text and binary formats
    Convert {
        /// Input file (.gol or .bgol)
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Output format; defaults to the one implied by the output extension
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Print a grid file or preset
    Show {
        /// Grid file to print
        #[arg(required_unless_present = "preset")]
        file: Option<PathBuf>,

        /// Preset to print instead of a file
        #[arg(long, value_enum, conflicts_with = "file")]
        preset: Option<Preset>,

        /// Clockwise quarter turns to apply first
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        rotate: i64,

        /// Show row and column numbers
        #[arg(long, conflicts_with = "compact")]
        coords: bool,

        /// One character per cell, no border
        #[arg(long)]
        compact: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            config, preset, pattern, generations, width, height,
            toroidal, output, format, render_every,
        } => {
            let overrides = CliOverrides {
                generations,
                width,
                height,
                toroidal,
                preset,
                pattern_file: pattern,
                output_dir: output,
                format,
                render_every,
            };
            run_command(config, overrides, cli.verbose)
        }
        Commands::Convert { input, output, format } => {
            convert_command(input, output, format)
        }
        Commands::Show { file, preset, rotate, coords, compact } => {
            show_command(file, preset, rotate, coords, compact)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🔄 Starting Game of Life simulation"));

    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  World: {}x{}", settings.simulation.width, settings.simulation.height);
        println!("  Generations: {}", settings.simulation.generations);
        println!("  Toroidal: {}", settings.simulation.toroidal);
        println!("  Output dir: {}", settings.output.directory.display());
        println!();
    }

    let mut simulation = Simulation::new(settings)
        .context("Failed to set up simulation")?;

    let report = simulation.run_with(|world| {
        println!("{}", GridFormatter::format_frame(world));
    });

    println!("{}", ColorOutput::success(&format!(
        "✅ Ran {} generation(s) in {:.3}s",
        report.generations,
        report.elapsed.as_secs_f64()
    )));
    println!("\n{}\n", report);
    if report.is_extinct() {
        println!("{}", ColorOutput::error("❌ Every cell died"));
    }

    if verbose {
        println!("Population:");
        println!("{}", GridFormatter::format_population(&report, 20));
    }

    let written = simulation.save_outputs(&report)
        .context("Failed to save outputs")?;
    for path in &written {
        println!("{}", ColorOutput::success(&format!("💾 Saved {}", path.display())));
    }

    info!(generations = report.generations, alive = report.final_alive, "run complete");
    Ok(())
}

fn convert_command(input: PathBuf, output: PathBuf, format: Option<Format>) -> Result<()> {
    let grid = game_of_life::load(&input)
        .with_context(|| format!("Failed to load grid from {}", input.display()))?;

    let format = format.unwrap_or_else(|| Format::from_path(&output));
    debug!(?format, "converting grid");
    let saved = match format {
        Format::Text => game_of_life::save_text(&output, &grid),
        Format::Binary => binary::save_binary(&output, &grid),
    };
    saved.with_context(|| format!("Failed to save grid to {}", output.display()))?;

    println!("{}", ColorOutput::success(&format!(
        "Converted {} ({}x{}) to {}",
        input.display(), grid.width(), grid.height(), output.display()
    )));
    Ok(())
}

fn show_command(
    file: Option<PathBuf>,
    preset: Option<Preset>,
    rotate: i64,
    coords: bool,
    compact: bool,
) -> Result<()> {
    let grid = match (preset, file) {
        (Some(preset), _) => preset.grid(),
        (None, Some(file)) => game_of_life::load(&file)
            .with_context(|| format!("Failed to load grid from {}", file.display()))?,
        (None, None) => anyhow::bail!("Specify a grid file or --preset"),
    };
    let grid = grid.rotate(rotate);

    if coords {
        println!("{}", GridFormatter::format_grid_with_coords(&grid));
    } else if compact {
        print!("{}", GridFormatter::format_grid_compact(&grid));
    } else {
        print!("{}", GridFormatter::format_bordered(&grid));
    }
    print!("{}", GridFormatter::format_stats(&grid));
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Write every preset in both formats
    for preset in Preset::ALL {
        let grid: Grid = preset.grid();
        for format in [Format::Text, Format::Binary] {
            let path = patterns_dir.join(format!("{}.{}", preset.name(), format.extension()));
            game_of_life::save(&path, &grid)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }
    println!("Created preset patterns in: {}", patterns_dir.display());

    // Example configuration starting from a pattern file on a torus
    let examples_dir = config_dir.join("examples");
    let mut torus = Settings::default();
    torus.simulation.toroidal = true;
    torus.simulation.width = 16;
    torus.simulation.height = 16;
    torus.pattern.preset = None;
    torus.pattern.file = Some(patterns_dir.join("light_weight_spaceship.bgol"));
    torus.output.format = OutputFormat::Json;
    torus.to_file(&examples_dir.join("torus.yaml"))?;
    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}
