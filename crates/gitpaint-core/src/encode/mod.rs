// crates/gitpaint-core/src/encode/mod.rs

pub mod driver;

use chrono::{DateTime, FixedOffset};

use crate::calendar::temporal;
use crate::config::{ContentMode, EncodeParams};
use crate::encode::driver::RepoDriver;
use crate::error::{GpError, Result};
use crate::graph::{Graph, PixelRecord};
use crate::palette::MAX_INTENSITY;
use crate::render::pixel_glyph;
use crate::validate::validate_params;

const FENCE: &str = "```\n";

/// Appended `amplify - 1` times so consecutive same-level commits differ.
/// Never part of a glyph.
const FILLER: char = '<';

/// One file rewrite + commit for the repository driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRequest<'a> {
    pub path: &'a str,
    pub content: String,
    pub date: DateTime<FixedOffset>,
    /// Record index in the graph.
    pub index: usize,
    pub level: u8,
    pub amplify: u32,
    /// 0-based position of this request in the whole encode.
    pub seq: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Pending { index: usize },
    Emitting { index: usize, level: u8, amplify: u32 },
    Done,
}

/// Streams the commit requests for a graph, one record at a time.
///
/// For a record of intensity `d` it yields `d * multiplier` requests:
/// levels `1..=d`, and within each level `amplify` counting down from the
/// multiplier to 1. Intensity-0 records yield nothing.
#[derive(Debug)]
pub struct Encoder<'a> {
    graph: &'a Graph,
    params: &'a EncodeParams,
    now: DateTime<FixedOffset>,
    state: State,
    /// Glyphs of every completed record, with a newline after each grid row.
    history: String,
    seq: u64,
}

impl<'a> Encoder<'a> {
    /// Fails before yielding anything if the params are invalid or any record
    /// lands in the future or above the top activity level.
    pub fn new(graph: &'a Graph, params: &'a EncodeParams, now: DateTime<FixedOffset>) -> Result<Self> {
        validate_params(params)?;

        if let Some((index, r)) = graph
            .records()
            .iter()
            .enumerate()
            .find(|(_, r)| r.intensity > MAX_INTENSITY)
        {
            return Err(GpError::Validation(format!(
                "record {index} at ({},{}): intensity {} exceeds {MAX_INTENSITY}",
                r.x, r.y, r.intensity
            )));
        }

        if let Some((index, r)) = graph.first_future() {
            return Err(GpError::FutureDate {
                index,
                x: r.x,
                y: r.y,
                days_ago: r.days_ago,
            });
        }

        Ok(Encoder {
            graph,
            params,
            now,
            state: State::Pending { index: 0 },
            history: String::new(),
            seq: 0,
        })
    }

    pub fn total_commits(&self) -> u64 {
        self.graph.commit_count(self.params.multiplier)
    }

    fn finish_record(&mut self, index: usize, r: &PixelRecord) {
        self.history.push_str(&pixel_glyph(r.intensity));
        if self.graph.is_row_end(index) {
            self.history.push('\n');
        }
        self.state = State::Pending { index: index + 1 };
    }

    fn content(&self, level: u8, amplify: u32) -> String {
        let glyph = pixel_glyph(level);
        match self.params.content_mode {
            ContentMode::History => {
                let fillers = amplify.saturating_sub(1) as usize;
                let mut s = String::with_capacity(self.history.len() + glyph.len() + fillers + 12);
                s.push_str(FENCE);
                s.push_str(&self.history);
                s.push_str(&glyph);
                s.extend(std::iter::repeat(FILLER).take(fillers));
                s.push('\n');
                s.push_str(FENCE);
                s
            }
            ContentMode::Sequence => format!("{FENCE}{glyph}\n{FENCE}{}\n", self.seq),
        }
    }

    fn request(&self, index: usize, r: &PixelRecord, level: u8, amplify: u32) -> Result<CommitRequest<'a>> {
        let params: &'a EncodeParams = self.params;
        let date = temporal::commit_date(&self.now, r.days_ago as u64).ok_or(GpError::DateOutOfRange {
            index,
            x: r.x,
            y: r.y,
            days_ago: r.days_ago,
        })?;

        Ok(CommitRequest {
            path: params.target_file.as_str(),
            content: self.content(level, amplify),
            date,
            index,
            level,
            amplify,
            seq: self.seq,
        })
    }
}

impl<'a> Iterator for Encoder<'a> {
    type Item = Result<CommitRequest<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph: &'a Graph = self.graph;
        let multiplier = self.params.multiplier;

        loop {
            match self.state {
                State::Done => return None,

                State::Pending { index } => {
                    let Some(r) = graph.records().get(index) else {
                        self.state = State::Done;
                        return None;
                    };
                    if r.intensity == 0 {
                        self.finish_record(index, r);
                        continue;
                    }
                    tracing::debug!(index, x = r.x, y = r.y, days_ago = r.days_ago, intensity = r.intensity, "record");
                    self.state = State::Emitting {
                        index,
                        level: 1,
                        amplify: multiplier,
                    };
                }

                State::Emitting { index, level, amplify } => {
                    let r = &graph.records()[index];
                    let req = match self.request(index, r, level, amplify) {
                        Ok(req) => req,
                        Err(e) => {
                            self.state = State::Done;
                            return Some(Err(e));
                        }
                    };
                    self.seq += 1;

                    if amplify > 1 {
                        self.state = State::Emitting {
                            index,
                            level,
                            amplify: amplify - 1,
                        };
                    } else if level < r.intensity {
                        self.state = State::Emitting {
                            index,
                            level: level + 1,
                            amplify: multiplier,
                        };
                    } else {
                        self.finish_record(index, r);
                    }
                    return Some(Ok(req));
                }
            }
        }
    }
}

/// Collect every commit request for `graph`.
pub fn encode<'a>(
    graph: &'a Graph,
    params: &'a EncodeParams,
    now: DateTime<FixedOffset>,
) -> Result<Vec<CommitRequest<'a>>> {
    Encoder::new(graph, params, now)?.collect()
}

/// Feed every request to `driver` in order. Stops at the first failure;
/// commits already applied stay applied.
///
/// Returns the number of commits applied.
pub fn replay<D: RepoDriver>(encoder: Encoder<'_>, driver: &mut D) -> Result<u64> {
    let mut applied = 0u64;
    for req in encoder {
        let req = req?;
        driver.commit(&req).map_err(|e| GpError::Driver {
            index: req.index,
            level: req.level,
            amplify: req.amplify,
            source: Box::new(e),
        })?;
        applied += 1;
    }
    tracing::debug!(applied, "replay finished");
    Ok(applied)
}
