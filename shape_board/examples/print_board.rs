use std::path::PathBuf;

use clap::Parser;
use shape_schema::ShapeKind;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let board = shape_board::load_leaderboard_from_path(args.path)?;
    for shape in ShapeKind::ALL {
        let entries = board.entries(shape);
        println!("{shape} ({} entries)", entries.len());
        for e in entries.iter().take(3) {
            println!("  #{} {} {} {:.1}", e.rank, e.avatar, e.name, e.score);
        }
    }
    Ok(())
}
