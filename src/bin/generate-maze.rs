//! CLI for maze generation

use clap::Parser;
use maze_game::{GeneratorConfig, Grid, MazeGenerator, MazeSession};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Print a solvable maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze side length
    #[arg(long, default_value_t = 10)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of a wall outside the guaranteed path
    #[arg(long, default_value_t = GeneratorConfig::DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,

    /// Number of distinct guaranteed paths
    #[arg(long, default_value_t = 1)]
    paths: usize,

    /// Print bare cells without start and exit markers
    #[arg(long)]
    raw: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let gen = MazeGenerator::new(GeneratorConfig {
        carved_paths: args.paths,
        wall_probability: args.wall_probability,
    })?;
    let mut random = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let grid: Grid = gen.generate(args.size, &mut random)?;

    if args.raw {
        println!("{grid}");
    } else {
        println!("{}", MazeSession::from_grid(grid)?);
    }
    Ok(())
}
