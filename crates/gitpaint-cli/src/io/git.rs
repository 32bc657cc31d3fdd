// crates/gitpaint-cli/src/io/git.rs

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use gitpaint_core::encode::driver::RepoDriver;
use gitpaint_core::CommitRequest;

/// Run `program args..` inside `dir`; a non-zero exit becomes an error carrying its output.
fn command(dir: &Path, program: &str, args: &[&str], env: &[(&str, &str)]) -> io::Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    for (k, v) in env {
        cmd.env(k, v);
    }

    let out = cmd.output()?;
    if !out.status.success() {
        return Err(io::Error::other(format!(
            "{program} {args:?}: {}{}",
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        )));
    }
    Ok(())
}

/// `git init` + `git checkout -B <branch>`.
pub fn create_branch(dir: &Path, branch: &str) -> anyhow::Result<()> {
    command(dir, "git", &["init"], &[]).with_context(|| format!("git init in {}", dir.display()))?;
    command(dir, "git", &["checkout", "-B", branch], &[])
        .with_context(|| format!("git checkout -B {branch}"))?;
    Ok(())
}

/// Force-push `branch` to `git@github.com:<project>.git`.
pub fn push_all(dir: &Path, project: &str, branch: &str) -> anyhow::Result<()> {
    let url = format!("git@github.com:{project}.git");
    command(dir, "git", &["push", "-fu", url.as_str(), branch], &[])
        .with_context(|| format!("git push {url} {branch}"))
}

/// ssh command honoring `GIT_SSH_COMMAND`.
fn base_ssh_cmd() -> Vec<String> {
    match std::env::var("GIT_SSH_COMMAND") {
        Ok(s) if !s.trim().is_empty() => s.split_whitespace().map(str::to_string).collect(),
        _ => vec!["ssh".to_string()],
    }
}

/// Pull the user name out of GitHub's ssh greeting ("Hi <name>! You've ...").
pub fn parse_greeting(resp: &str) -> Option<String> {
    let head = resp.split('!').next()?;
    let name = head.trim().strip_prefix("Hi ")?.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }
    Some(name.to_string())
}

/// GitHub user name of the current ssh identity.
pub fn github_username() -> anyhow::Result<String> {
    let mut parts = base_ssh_cmd();
    parts.extend(["-T".to_string(), "git@github.com".to_string()]);
    let (program, args) = parts
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("empty ssh command"))?;

    // GitHub answers `ssh -T` with a non-zero exit even on success; only the text matters.
    let out = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("spawn {program}"))?;
    let mut resp = String::from_utf8_lossy(&out.stdout).into_owned();
    resp.push_str(&String::from_utf8_lossy(&out.stderr));

    parse_greeting(&resp).ok_or_else(|| anyhow::anyhow!("invalid identity: {}", resp.trim()))
}

/// Writes the tracked file into a working tree and commits it with the requested date.
pub struct GitDriver {
    dir: PathBuf,
}

impl GitDriver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        GitDriver { dir: dir.into() }
    }
}

impl RepoDriver for GitDriver {
    type Error = io::Error;

    fn commit(&mut self, req: &CommitRequest<'_>) -> io::Result<()> {
        let path = self.dir.join(req.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, req.content.as_bytes())?;

        let date = req.date.to_rfc3339();
        // Both dates, so the calendar and `git log` agree.
        let env = [("GIT_AUTHOR_DATE", date.as_str()), ("GIT_COMMITTER_DATE", date.as_str())];
        command(&self.dir, "git", &["add", "."], &[])?;
        command(
            &self.dir,
            "git",
            &[
                "commit",
                "--all",
                "--allow-empty-message",
                "--message",
                "",
                "--date",
                date.as_str(),
            ],
            &env,
        )
    }
}
