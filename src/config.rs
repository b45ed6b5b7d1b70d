use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override these values.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding `{topic}_tweets.csv` and receiving the outputs
    pub data_dir: PathBuf,
    /// Worker threads for pairwise similarity (1 = sequential)
    pub workers: usize,
    /// Optional JSON lexicon merged over the built-in sentiment lexicon
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            workers: 1,
            lexicon_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default, so an empty environment loads. Values are not
    /// range-checked here: apply CLI overrides first, then call
    /// [`Config::validate`].
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let workers = match env::var("TWEETNET_WORKERS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("TWEETNET_WORKERS must be a positive integer, got {raw:?}"))?,
            Err(_) => defaults.workers,
        };

        Ok(Self {
            data_dir: env::var("TWEETNET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            workers,
            lexicon_path: Self::lexicon_from_env(),
        })
    }

    /// Lexicon override path from `TWEETNET_LEXICON`, if set.
    pub fn lexicon_from_env() -> Option<PathBuf> {
        env::var("TWEETNET_LEXICON")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Check values that can't be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            anyhow::bail!("Worker count must be at least 1 (set TWEETNET_WORKERS or --workers)");
        }
        Ok(())
    }

    /// Check that a topic can be used as a file name prefix.
    pub fn validate_topic(topic: &str) -> Result<()> {
        if topic.is_empty() || topic.contains(['/', '\\']) || topic == "." || topic == ".." {
            anyhow::bail!("Topic {topic:?} must be a plain name (no path separators)");
        }
        Ok(())
    }

    /// Input table for a topic.
    pub fn tweets_path(&self, topic: &str) -> PathBuf {
        self.data_dir.join(format!("{topic}_tweets.csv"))
    }

    /// Adjacency matrix output for a topic.
    pub fn network_path(&self, topic: &str) -> PathBuf {
        self.data_dir.join(format!("{topic}_network.csv"))
    }

    /// Node index map output for a topic.
    pub fn nodes_path(&self, topic: &str) -> PathBuf {
        self.data_dir.join(format!("{topic}_nodes.csv"))
    }
}
