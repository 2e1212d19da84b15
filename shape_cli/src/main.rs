mod simulate;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use shape_core::config::GameConfig;
use shape_core::gameplay::rank::resolve_rank;
use shape_core::gameplay::score::{evaluate, ScoreTier};
use shape_schema::{DrawingTape, Leaderboard, Point, RoundRecord, ShapeKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_PER_SHAPE: usize = 20;

#[derive(Debug, Parser)]
#[command(name = "shape_cli")]
#[command(about = "Freehand shape drawing scorer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a recorded path (JSON array of points).
    Score {
        path: PathBuf,
        #[arg(short, long)]
        shape: ShapeKind,
        #[arg(long, default_value_t = 0.0)]
        elapsed_ms: f64,
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rank a score against a leaderboard.
    Rank {
        score: f64,
        #[arg(short, long)]
        shape: ShapeKind,
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Print the reference outline of a shape.
    Guide {
        #[arg(short, long)]
        shape: ShapeKind,
        #[arg(long, default_value_t = 32)]
        samples: usize,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Replay a pointer tape through a full round.
    Simulate {
        tape: PathBuf,
        #[arg(long)]
        board: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate a mock leaderboard.
    Board {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_PER_SHAPE)]
        per_shape: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Score {
            path,
            shape,
            elapsed_ms,
            board,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let board = load_board(board.as_deref(), seed)?;
            let bytes = fs::read(&path)
                .with_context(|| format!("failed to read path: {}", path.display()))?;
            let points: Vec<Point> = serde_json::from_slice(&bytes)
                .with_context(|| format!("failed to parse path json: {}", path.display()))?;

            let evaluation = evaluate(&points, shape, elapsed_ms, &config.scoring);
            let record = RoundRecord {
                shape,
                score: evaluation.score,
                rank: resolve_rank(evaluation.score, board.entries(shape)),
                tier: ScoreTier::from_score(evaluation.score).as_str().to_string(),
                completeness: evaluation.metrics.map(|m| m.completeness).unwrap_or(0.0),
                average_deviation: evaluation.average_deviation,
                elapsed_ms,
                point_count: points.len(),
            };
            println!("{}", serde_json::to_string_pretty(&record).context("failed to serialize record")?);
        }
        Command::Rank {
            score,
            shape,
            board,
            seed,
        } => {
            let board = load_board(board.as_deref(), seed)?;
            println!("{}", resolve_rank(score, board.entries(shape)));
        }
        Command::Guide {
            shape,
            samples,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let outline = config.scoring.model(shape).outline(samples);
            println!("{}", serde_json::to_string_pretty(&outline).context("failed to serialize outline")?);
        }
        Command::Simulate {
            tape,
            board,
            seed,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let board = load_board(board.as_deref(), seed)?;
            let bytes = fs::read(&tape)
                .with_context(|| format!("failed to read tape: {}", tape.display()))?;
            let tape: DrawingTape = serde_json::from_slice(&bytes)
                .with_context(|| format!("failed to parse tape json: {}", tape.display()))?;

            match simulate::run_simulation(&tape, config, board) {
                Some(record) => {
                    println!("{}", serde_json::to_string_pretty(&record).context("failed to serialize record")?);
                }
                None => println!("timeout"),
            }
        }
        Command::Board {
            seed,
            per_shape,
            output,
        } => {
            let board = shape_board::mock_leaderboard(seed, per_shape);
            let json = serde_json::to_string_pretty(&board).context("failed to serialize leaderboard")?;
            match output {
                Some(out_path) => {
                    fs::write(&out_path, json)
                        .with_context(|| format!("failed to write: {}", out_path.display()))?;
                    info!(path = %out_path.display(), seed, per_shape, "wrote mock leaderboard");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn load_board(path: Option<&Path>, seed: u64) -> anyhow::Result<Leaderboard> {
    match path {
        Some(path) => shape_board::load_leaderboard_from_path(path),
        None => Ok(shape_board::mock_leaderboard(seed, DEFAULT_PER_SHAPE)),
    }
}
