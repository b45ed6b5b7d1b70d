// Tweet records and CSV loading.
//
// The tweet table is a CSV with at least `id`, `text` and `entities` columns.
// Other columns (followers, friends, timestamps) are ignored. Rows keep their
// file order, which becomes the node order of the similarity graph.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use super::entities::extract_hashtags;

/// A single tweet: just the fields the graph builder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub id: u64,
    pub text: String,
    /// Distinct hashtag texts, case-sensitive
    pub hashtags: BTreeSet<String>,
}

impl Tweet {
    pub fn new<S: Into<String>>(
        id: u64,
        text: impl Into<String>,
        hashtags: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            hashtags: hashtags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Raw CSV row, before the entities literal is parsed.
#[derive(Debug, Deserialize)]
struct TweetRow {
    id: u64,
    text: String,
    entities: String,
}

/// Load tweets from a CSV file.
pub fn load_tweets(path: &Path) -> Result<Vec<Tweet>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open tweet table {}", path.display()))?;
    let tweets = read_tweets(file)
        .with_context(|| format!("Failed to load tweet table {}", path.display()))?;

    info!(path = %path.display(), tweets = tweets.len(), "Loaded tweet table");
    Ok(tweets)
}

/// Read tweets from any CSV source.
///
/// Fails on the first bad row: a missing column, an unparsable id, a duplicate
/// id, or a malformed entities field.
pub fn read_tweets<R: Read>(reader: R) -> Result<Vec<Tweet>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut seen = HashSet::new();
    let mut tweets = Vec::new();

    for (index, result) in reader.deserialize::<TweetRow>().enumerate() {
        // Row 1 is the header
        let row = result.with_context(|| format!("Failed to parse tweet row {}", index + 2))?;

        if !seen.insert(row.id) {
            anyhow::bail!("Duplicate tweet id {} at row {}", row.id, index + 2);
        }

        let hashtags = extract_hashtags(&row.entities)
            .with_context(|| format!("Malformed entities for tweet {}", row.id))?;

        tweets.push(Tweet {
            id: row.id,
            text: row.text,
            hashtags,
        });
    }

    if tweets.is_empty() {
        warn!("Tweet table has no rows");
    }

    Ok(tweets)
}
