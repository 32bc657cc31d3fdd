use anyhow::Context;
use clap::Args;

use crate::cmd::{load_graph, now, replay_into, EncodeOpts};
use crate::io::git;

#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub opts: EncodeOpts,

    /// GitHub username/project to push to
    #[arg(long)]
    pub project: String,

    /// Git branch to push to
    #[arg(long, default_value = "contribution")]
    pub branch: String,

    /// Do not look up the GitHub identity over ssh first
    #[arg(long, default_value_t = false)]
    pub skip_identity: bool,
}

pub fn run(args: PushArgs) -> anyhow::Result<()> {
    let username = if args.skip_identity {
        None
    } else {
        Some(git::github_username()?)
    };

    let params = args.opts.params();
    let now = now();
    let graph = load_graph(&args.opts, &params, &now)?;

    // Removed on drop, including when anything below fails.
    let tmp = tempfile::Builder::new()
        .prefix("gitpaint")
        .tempdir()
        .context("create temporary working tree")?;

    let applied = replay_into(tmp.path(), &args.branch, &graph, &params, now)?;

    tracing::info!(project = %args.project, branch = %args.branch, "pushing");
    git::push_all(tmp.path(), &args.project, &args.branch)?;

    eprintln!(
        "push ok: project={} branch={} commits={}",
        args.project, args.branch, applied
    );
    if let Some(name) = username {
        println!("Go check out https://github.com/{name}");
    }
    Ok(())
}
