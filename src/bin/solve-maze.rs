//! CLI for checking a stored maze

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{bail, Context};
use clap::Parser;
use simple_logger::SimpleLogger;

use a_maze_ing::{solver, Maze};

/// Re-solve a maze file and check its stored solution
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log more details, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print report
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

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("While reading {}", args.file.display()))?
    };
    let maze = Maze::parse(&text).context("Invalid maze file")?;

    let fresh = solver::solve(maze.grid(), maze.entry(), maze.exit());
    let stored = maze.solution();
    log::debug!(
        "Stored solution: {:?}, fresh solution: {:?}",
        stored.map(ToString::to_string),
        fresh.as_ref().map(ToString::to_string)
    );
    maze.print_report();

    match (stored, &fresh) {
        (Some(stored), Some(fresh)) if stored.len() != fresh.len() => bail!(
            "Stored solution takes {} steps, but the shortest path takes {}",
            stored.len(),
            fresh.len()
        ),
        (None, Some(fresh)) => bail!("No solution stored, but a {}-step path exists", fresh.len()),
        _ => Ok(()),
    }
}
