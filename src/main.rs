mod app;
mod error;
mod food;
mod grid;
mod name;
mod render;
mod session;
mod snake;
mod term;

use std::{fs::File, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use app::{App, Options, MAX_LEVEL};
use grid::Grid;
use term::TermManager;

pub type GridInt = i32;
pub type Cell = (GridInt, GridInt);
pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

#[derive(Parser)]
#[command(name = "snake", about = "Grid snake with ten levels")]
struct Args {
    /// Skip the name screen and play as NAME
    #[arg(long)]
    player: Option<String>,

    /// Level to start on
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_LEVEL as i64))]
    level: u32,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let player = match args.player.as_deref() {
        Some(raw) => match name::validate(raw) {
            Some(name) => Some(name),
            None => bail!("player name must be 1-{} letters, digits or spaces", name::MAX_NAME_LEN),
        },
        None => None,
    };

    let grid = Grid::default();
    let term = TermManager::new(grid).context("failed to set up the terminal")?;
    let options = Options { player, level: args.level, seed: args.seed };

    let mut app = App::new(term, grid, options);
    info!(cols = grid.cols(), rows = grid.rows(), "starting");
    app.run()?;
    info!(state = ?app.state(), progress = ?app.progress(), "exiting");

    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
