// crates/gitpaint-core/src/encode/driver.rs

use std::convert::Infallible;

use chrono::{DateTime, FixedOffset};

use crate::encode::CommitRequest;

/// Something that can write the tracked file and record a backdated commit.
pub trait RepoDriver {
    type Error: std::error::Error + Send + Sync + 'static;

    fn commit(&mut self, req: &CommitRequest<'_>) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredCommit {
    pub path: String,
    pub content: String,
    pub date: DateTime<FixedOffset>,
}

/// Keeps every commit in memory. Never fails.
#[derive(Clone, Debug, Default)]
pub struct MemoryDriver {
    pub commits: Vec<StoredCommit>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the tracked file after the last commit.
    pub fn head(&self) -> Option<&str> {
        self.commits.last().map(|c| c.content.as_str())
    }
}

impl RepoDriver for MemoryDriver {
    type Error = Infallible;

    fn commit(&mut self, req: &CommitRequest<'_>) -> Result<(), Self::Error> {
        self.commits.push(StoredCommit {
            path: req.path.to_string(),
            content: req.content.clone(),
            date: req.date,
        });
        Ok(())
    }
}
