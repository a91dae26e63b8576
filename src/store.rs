#![cfg(feature = "std")]

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Key-value persistence for best scores, keyed by difficulty.
pub trait ScoreStore {
    /// Stored value for `key`; anything unreadable counts as absent.
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()>;
}

/// Scores kept for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScoreStore {
    scores: BTreeMap<String, u32>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `entries`.
    pub fn with_scores<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            scores: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()> {
        self.scores.insert(key.to_string(), value);
        Ok(())
    }
}

/// Scores persisted to a bincode-encoded file on the local machine.
///
/// The whole map is rewritten on every `set`, through a temporary file so a
/// crash mid-write never leaves a truncated store behind.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    scores: BTreeMap<String, u32>,
}

impl FileScoreStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match fs::read(&path) {
            Ok(bytes) => match bincode::deserialize::<BTreeMap<String, u32>>(&bytes) {
                Ok(scores) => scores,
                Err(e) => {
                    log::warn!(
                        "ignoring unreadable score file {}: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("cannot read score file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Forget every stored score.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.commit(BTreeMap::new())
    }

    /// Write `scores` to disk and adopt them only once the write succeeded.
    fn commit(&mut self, scores: BTreeMap<String, u32>) -> anyhow::Result<()> {
        Self::persist(&self.path, &scores)?;
        self.scores = scores;
        Ok(())
    }

    fn persist(path: &Path, scores: &BTreeMap<String, u32>) -> anyhow::Result<()> {
        let bytes = bincode::serialize(scores)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> anyhow::Result<()> {
        let mut scores = self.scores.clone();
        scores.insert(key.to_string(), value);
        self.commit(scores)
    }
}
