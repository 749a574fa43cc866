//! Command line front-end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use conway_grid::{
    config::{CliOverrides, OutputFormat, Settings},
    render::{JsonRenderer, Renderer, TextRenderer},
    utils::ColorOutput,
    Controller, Grid, Scheduler, UiEvent,
};
use itertools::Itertools;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;

/// Generations a headless run covers when neither the CLI nor the config sets a limit
const DEFAULT_RUN_GENERATIONS: u64 = 50;

#[derive(Parser)]
#[command(name = "conway_grid")]
#[command(about = "Fixed-size Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fixed number of generations and print every frame
    Run {
        #[command(flatten)]
        grid: GridArgs,

        /// Number of generations to run (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,
    },

    /// Drive the simulator with commands read from stdin
    Interactive {
        #[command(flatten)]
        grid: GridArgs,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(Args)]
struct GridArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Grid width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Tick interval in milliseconds (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Cells to bring to life before starting, as `i,j`
    #[arg(short, long, value_parser = parse_position)]
    alive: Vec<(usize, usize)>,

    /// Draw neighbor counts
    #[arg(long)]
    show_counts: bool,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Label rows and columns in text output
    #[arg(long)]
    coords: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn parse_position(value: &str) -> Result<(usize, usize)> {
    let (i, j) = value
        .split_once(',')
        .with_context(|| format!("Expected `i,j`, got '{}'", value))?;
    let i = i.trim().parse::<usize>().with_context(|| format!("Invalid column '{}'", i))?;
    let j = j.trim().parse::<usize>().with_context(|| format!("Invalid row '{}'", j))?;
    Ok((i, j))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { grid, generations } => run_command(grid, generations),
        Commands::Interactive { grid } => interactive_command(grid),
        Commands::Setup { directory, force, no_color } => {
            setup_command(directory, force, ColorOutput::new(!no_color))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_settings(args: &GridArgs, max_generations: Option<u64>) -> Result<Settings> {
    let mut settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    settings.merge_with_cli(&CliOverrides {
        width: args.width,
        height: args.height,
        tick_interval_ms: args.tick_ms,
        max_generations,
        show_counts: args.show_counts,
        format: args.format,
        no_color: args.no_color,
    });

    settings.validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn build_controller(settings: &Settings, args: &GridArgs) -> Result<Controller<Box<dyn Renderer>>> {
    let mut grid = Grid::new(settings.grid.width, settings.grid.height)
        .context("Failed to create grid")?;
    for &(i, j) in args.alive.iter().unique() {
        grid.toggle(i, j)
            .with_context(|| format!("Cannot seed cell ({}, {})", i, j))?;
    }
    grid.drain_notifications();

    let stdout = std::io::stdout();
    let renderer: Box<dyn Renderer> = match settings.output.format {
        OutputFormat::Text => Box::new(
            TextRenderer::new(stdout, settings.output.color).with_coords(args.coords),
        ),
        OutputFormat::Json => Box::new(JsonRenderer::new(stdout)),
    };

    Ok(Controller::new(grid, renderer)
        .with_show_counts(settings.controller.show_counts)
        .with_max_generations(settings.controller.max_generations))
}

fn run_command(args: GridArgs, generations: Option<u64>) -> Result<()> {
    let mut settings = load_settings(&args, generations)?;
    settings
        .controller
        .max_generations
        .get_or_insert(DEFAULT_RUN_GENERATIONS);

    log::info!(
        "Running {}x{} grid for {} generations",
        settings.grid.width,
        settings.grid.height,
        settings.controller.max_generations.unwrap_or_default()
    );

    let mut controller = build_controller(&settings, &args)?;
    controller.refresh()?;

    Scheduler::new(settings.controller.tick_interval())
        .run_until_halt(&mut controller)
        .context("Simulation failed")?;

    if settings.output.format == OutputFormat::Text {
        let palette = ColorOutput::new(settings.output.color);
        println!("{}", palette.success(&format!(
            "Finished at generation {} with {} living cells",
            controller.grid().generation(),
            controller.grid().living_count()
        )));
    }
    Ok(())
}

fn interactive_command(args: GridArgs) -> Result<()> {
    let settings = load_settings(&args, None)?;
    let mut controller = build_controller(&settings, &args)?;
    let palette = ColorOutput::new(settings.output.color);

    if settings.output.format == OutputFormat::Text {
        println!("{}", palette.info(
            "Commands: click I J | start | stop | tick | reset | count | quit"
        ));
    }
    controller.refresh()?;

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<UiEvent>() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", palette.warning(&format!("{:#}", e))),
            }
        }
    });

    Scheduler::new(settings.controller.tick_interval())
        .run(&mut controller, &rx)
        .context("Simulation failed")
}

fn setup_command(directory: PathBuf, force: bool, palette: ColorOutput) -> Result<()> {
    println!("{}", palette.info("Setting up configuration..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", palette.success("Setup complete!"));
    println!("Run: cargo run -- run --config {} --alive 1,1 --alive 1,2", config_path.display());

    Ok(())
}
