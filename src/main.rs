//! Console maze game

use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use maze_game::{Direction, GeneratorConfig, MazeGenerator, MazeSession, Point};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Find your way from the top-left corner to the exit of a random maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze side length
    #[arg(short, long, default_value_t = 10)]
    size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of a wall outside the guaranteed path
    #[arg(short, long, default_value_t = GeneratorConfig::DEFAULT_WALL_PROBABILITY)]
    wall_probability: f64,

    /// Use the sparser, harder wall probability
    #[arg(long, conflicts_with = "wall_probability")]
    strict: bool,

    /// Number of distinct guaranteed paths
    #[arg(short, long, default_value_t = 1)]
    paths: usize,

    /// Solve the maze automatically and exit
    #[arg(short, long)]
    auto: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 500)]
    frame_length: u64,
}

impl Args {
    fn generator(&self) -> anyhow::Result<MazeGenerator> {
        let wall_probability = if self.strict {
            GeneratorConfig::STRICT_WALL_PROBABILITY
        } else {
            self.wall_probability
        };
        Ok(MazeGenerator::new(GeneratorConfig {
            carved_paths: self.paths,
            wall_probability,
        })?)
    }
}

/// Player command read from the console
enum Command {
    Move(Direction),
    Path,
    Auto,
    Reset,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "u" => Command::Move(Direction::Up),
            "d" => Command::Move(Direction::Down),
            "l" => Command::Move(Direction::Left),
            "r" => Command::Move(Direction::Right),
            "path" | "p" => Command::Path,
            "auto" => Command::Auto,
            "reset" => Command::Reset,
            "quit" | "q" | "exit" => Command::Quit,
            other => match other.parse() {
                Ok(direction) => Command::Move(direction),
                Err(_) => Command::Unknown(line.trim().to_string()),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let random = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = MazeSession::with_generator(args.size, args.generator()?, random)
        .context("Could not create maze")?;
    info!(size = args.size, config = ?session.config(), "maze generated");

    if args.auto {
        playback(&mut session, args.frame_length);
        return Ok(());
    }
    play(&mut session, args.frame_length)
}

/// Read commands from stdin until the player quits or input ends
fn play(session: &mut MazeSession, frame_length: u64) -> anyhow::Result<()> {
    const MSG_SOLVED: &str = "Maze solved. Type `reset` for a new one.";

    let stdin = io::stdin();
    let mut overlay: Vec<Point> = vec![];
    let mut notice: Option<&'static str> = None;

    loop {
        let message = match notice.take() {
            Some(notice) => notice,
            None => session.status(),
        };
        draw(session, &overlay, message);
        print!("Move (up/down/left/right), path, auto, reset or quit: ");
        io::stdout().flush().context("Could not write to stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Could not read from stdin")?;
        if read == 0 {
            return Ok(());
        }
        overlay.clear();

        match Command::parse(&line) {
            // Finished mazes only accept path, reset and quit
            Command::Move(_) | Command::Auto if session.is_won() => notice = Some(MSG_SOLVED),
            Command::Move(direction) => {
                session.move_player(direction);
            }
            Command::Path => overlay = session.shortest_path_from_current(),
            Command::Auto => playback(session, frame_length),
            Command::Reset => session.reset().context("Could not generate maze")?,
            Command::Quit => return Ok(()),
            Command::Unknown(token) => {
                session.move_token(&token);
            }
        }
    }
}

/// Walk the shortest path to the exit, one frame per step
fn playback(session: &mut MazeSession, frame_length: u64) {
    let path = session.shortest_path_from_current();
    if path.is_empty() && !session.is_won() {
        draw(session, &[], "No path to the exit.");
        return;
    }
    info!(steps = path.len(), "playing back shortest path");

    draw(session, &path, session.status());
    for (i, step) in path.iter().enumerate() {
        thread::sleep(Duration::from_millis(frame_length));
        session.teleport_to(*step);
        draw(session, &path[i + 1..], session.status());
    }
    println!("The shortest path is {} steps.", path.len());
}

fn draw(session: &MazeSession, overlay: &[Point], message: &str) {
    print!("\x1B[2J\x1B[1;1H");
    println!("{}", session.render_with_path(overlay));
    println!();
    println!("{message}");
}
