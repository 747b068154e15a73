//! Cover inspection tool.
//!
//! Loads a scene fixture and prints the cover a target gets, either for one
//! attacker/target pair, for every pair of the scene, or against a point.

mod commands;
mod input;

use anyhow::Result;
use clap::Parser;
use commands::{Matrix, Pair, Point};

/// Inspect cover between tokens of a scene fixture
#[derive(Parser)]
#[command(name = "cover-inspect")]
#[command(about = "Cover detection inspector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Cover for one attacker/target pair
    Pair(Pair),

    /// Cover for every ordered pair of creatures in the scene
    Matrix(Matrix),

    /// Cover against an area-effect origin point
    Point(Point),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Pair(cmd) => cmd.execute(),
        Command::Matrix(cmd) => cmd.execute(),
        Command::Point(cmd) => cmd.execute(),
    }
}
