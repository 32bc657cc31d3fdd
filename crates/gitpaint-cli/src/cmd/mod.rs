// crates/gitpaint-cli/src/cmd/mod.rs

pub mod commit;
pub mod plan;
pub mod preview;
pub mod push;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, ValueEnum};
use gitpaint_core::calendar::temporal::weekday_index;
use gitpaint_core::config::defaults::{DEFAULT_MULTIPLIER, DEFAULT_TARGET_FILE};
use gitpaint_core::encode::driver::RepoDriver;
use gitpaint_core::encode::{replay, Encoder};
use gitpaint_core::palette::ACTIVITY_PALETTE;
use gitpaint_core::render::pixel_glyph;
use gitpaint_core::{CommitRequest, ContentMode, EncodeParams, Graph};

use crate::io::{git, image_file};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ContentArg {
    /// Accumulated glyph history plus filler characters.
    History,
    /// Current glyph plus a sequence number.
    Sequence,
}

impl From<ContentArg> for ContentMode {
    fn from(c: ContentArg) -> Self {
        match c {
            ContentArg::History => ContentMode::History,
            ContentArg::Sequence => ContentMode::Sequence,
        }
    }
}

/// Options shared by every command that turns an image into commits.
#[derive(Args, Debug)]
pub struct EncodeOpts {
    /// Path to the source image
    #[arg(long)]
    pub img: String,

    /// Weeks ago of all activity. A value of 2 moves the drawing two columns to the left.
    #[arg(short = 'w', long, default_value_t = 0)]
    pub weeks_ago: u32,

    /// Commits per intensity level
    #[arg(long, default_value_t = DEFAULT_MULTIPLIER)]
    pub multiplier: u32,

    /// Number of activity levels to quantize to (2..=5)
    #[arg(long, default_value_t = ACTIVITY_PALETTE.len())]
    pub palette_size: usize,

    /// How commit contents are kept unique
    #[arg(long, value_enum, default_value_t = ContentArg::History)]
    pub content: ContentArg,

    /// Tracked file rewritten by every commit
    #[arg(long, default_value = DEFAULT_TARGET_FILE)]
    pub file: String,
}

impl EncodeOpts {
    pub fn params(&self) -> EncodeParams {
        EncodeParams {
            weeks_ago: self.weeks_ago,
            multiplier: self.multiplier,
            palette_size: self.palette_size,
            target_file: self.file.clone(),
            content_mode: self.content.into(),
        }
    }
}

/// Invocation time; every date in one run derives from it.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Image -> graph for the given params and `now`.
pub fn load_graph(opts: &EncodeOpts, params: &EncodeParams, now: &DateTime<FixedOffset>) -> anyhow::Result<Graph> {
    gitpaint_core::validate::validate_params(params)?;
    let q = image_file::load_quantized(&opts.img, params.palette_size)?;
    let graph = Graph::build(&q, params.weeks_ago, weekday_index(now))
        .with_context(|| format!("build graph for {}", opts.img))?;
    Ok(graph)
}

/// Prints each record's glyph to `out` once all of its commits are in.
struct Progress<'g, D, W> {
    inner: D,
    graph: &'g Graph,
    out: W,
    shown: usize,
}

impl<'g, D, W: Write> Progress<'g, D, W> {
    /// Print every record before `upto`.
    fn show_until(&mut self, upto: usize) -> std::io::Result<()> {
        while self.shown < upto.min(self.graph.records().len()) {
            let r = &self.graph.records()[self.shown];
            write!(self.out, "{}", pixel_glyph(r.intensity))?;
            if self.graph.is_row_end(self.shown) {
                writeln!(self.out)?;
            }
            self.shown += 1;
        }
        self.out.flush()
    }
}

impl<'g, D: RepoDriver, W: Write> RepoDriver for Progress<'g, D, W> {
    type Error = D::Error;

    fn commit(&mut self, req: &CommitRequest<'_>) -> Result<(), Self::Error> {
        // The preview is cosmetic; a broken terminal must not stop the history.
        if let Err(e) = self.show_until(req.index) {
            tracing::warn!(error = %e, index = req.index, "progress output failed");
        }
        self.inner.commit(req)
    }
}

/// Create/reset `branch` in `dir` and replay every commit of `graph` into it.
pub fn replay_into(
    dir: &Path,
    branch: &str,
    graph: &Graph,
    params: &EncodeParams,
    now: DateTime<FixedOffset>,
) -> anyhow::Result<u64> {
    let encoder = Encoder::new(graph, params, now)?;
    let total = encoder.total_commits();
    tracing::info!(dir = %dir.display(), branch, total, "replaying commits");

    git::create_branch(dir, branch)?;

    let mut driver = Progress {
        inner: git::GitDriver::new(dir),
        graph,
        out: std::io::stdout(),
        shown: 0,
    };
    println!();
    let applied = replay(encoder, &mut driver).with_context(|| format!("commit into {}", dir.display()))?;
    driver
        .show_until(graph.records().len())
        .context("write progress")?;
    println!();

    tracing::info!(applied, "commits written");
    Ok(applied)
}
