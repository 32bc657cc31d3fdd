// crates/gitpaint-cli/src/main.rs

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "gitpaint-cli")]
#[command(about = "Draw an image on a contribution calendar with backdated commits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the quantized image as calendar glyphs (optionally save a palette PNG)
    Preview(cmd::preview::PreviewArgs),

    /// Print the commit plan for an image without touching git
    Plan(cmd::plan::PlanArgs),

    /// Replay the commits into a local directory (no push)
    Commit(cmd::commit::CommitArgs),

    /// Replay the commits into a fresh repository and force-push it
    Push(cmd::push::PushArgs),
}

fn main() -> anyhow::Result<()> {
    // stdout carries the glyph preview; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Preview(args) => cmd::preview::run(args),
        Commands::Plan(args) => cmd::plan::run(args),
        Commands::Commit(args) => cmd::commit::run(args),
        Commands::Push(args) => cmd::push::run(args),
    }
}
