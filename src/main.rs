//! CLI for maze generation

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use a_maze_ing::{config::Config, Maze};

/// Generate a random maze, solve it and write it to the configured file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Random seed, overrides `SEED` from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the written maze file to stdout
    #[arg(short, long)]
    print: bool,

    /// Log more details, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file with `KEY=value` lines
    config: PathBuf,
}

/// Read config, generate maze, write output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .without_timestamps()
        .with_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .env()
        .init()
        .context("While initializing logging")?;

    let mut config = Config::load(&args.config)
        .with_context(|| format!("While loading {}", args.config.display()))?;
    config.seed = args.seed.or(config.seed);

    let maze = Maze::generate(&config);
    maze.save(&config.output_file)?;
    log::info!("Maze written to {}", config.output_file.display());

    if args.print {
        print!("{maze}");
    }
    maze.print_report();
    Ok(())
}
