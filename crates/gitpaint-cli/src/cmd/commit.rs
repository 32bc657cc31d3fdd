use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cmd::{load_graph, now, replay_into, EncodeOpts};

#[derive(Args, Debug)]
pub struct CommitArgs {
    #[command(flatten)]
    pub opts: EncodeOpts,

    /// Working tree to commit into (created if missing)
    #[arg(long)]
    pub dir: PathBuf,

    /// Branch to (re)create
    #[arg(long, default_value = "contribution")]
    pub branch: String,
}

pub fn run(args: CommitArgs) -> anyhow::Result<()> {
    let params = args.opts.params();
    let now = now();
    let graph = load_graph(&args.opts, &params, &now)?;

    std::fs::create_dir_all(&args.dir).with_context(|| format!("create {}", args.dir.display()))?;
    let applied = replay_into(&args.dir, &args.branch, &graph, &params, now)?;

    eprintln!(
        "commit ok: dir={} branch={} commits={}",
        args.dir.display(),
        args.branch,
        applied
    );
    Ok(())
}
