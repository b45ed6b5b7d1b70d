// Feature extraction: sentiment channels, hashtag vocabulary, feature matrix.
//
// Every tweet becomes the vector
//   [negative_sentiment, positive_sentiment, hashtag_bit_0, ..., hashtag_bit_k]
// where the hashtag bits follow the sorted vocabulary of all tags in the table.

use std::collections::BTreeSet;

use serde::Serialize;

use super::GraphError;

/// Value given to both channels when a text scores exactly 0.0.
///
/// Neutral tweets get a small equal weight in both channels instead of a zero
/// vector, so they still compare as similar to each other and stay weakly
/// connected to everything else.
pub const NEUTRAL_CHANNEL_VALUE: f64 = 0.25;

/// Number of sentiment columns at the front of every feature vector.
pub const SENTIMENT_COLUMNS: usize = 2;

/// Polarity split into two non-negative channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentChannels {
    pub negative: f64,
    pub positive: f64,
}

impl SentimentChannels {
    /// Split a polarity in [-1, 1] into negative and positive magnitudes.
    pub fn from_polarity(polarity: f64) -> Result<Self, GraphError> {
        if !polarity.is_finite() || !(-1.0..=1.0).contains(&polarity) {
            return Err(GraphError::InvalidPolarity(polarity));
        }

        let channels = if polarity < 0.0 {
            Self {
                negative: polarity.abs(),
                positive: 0.0,
            }
        } else if polarity > 0.0 {
            Self {
                negative: 0.0,
                positive: polarity,
            }
        } else {
            Self {
                negative: NEUTRAL_CHANNEL_VALUE,
                positive: NEUTRAL_CHANNEL_VALUE,
            }
        };
        Ok(channels)
    }
}

/// The set of all hashtags in a table, in sorted order.
///
/// The position of a tag in this vocabulary is its column in the hashtag block
/// of every feature vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HashtagVocabulary {
    tags: Vec<String>,
}

impl HashtagVocabulary {
    /// Build the vocabulary as the union of every tweet's tags.
    pub fn from_tag_sets<'a>(sets: impl IntoIterator<Item = &'a BTreeSet<String>>) -> Self {
        let union: BTreeSet<&String> = sets.into_iter().flatten().collect();
        Self {
            tags: union.into_iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Column of `tag` in the hashtag block, if it is in the vocabulary.
    pub fn index_of(&self, tag: &str) -> Option<usize> {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .ok()
    }

    /// One-hot membership vector of `tags` over this vocabulary.
    ///
    /// Tags outside the vocabulary are ignored.
    pub fn encode(&self, tags: &BTreeSet<String>) -> Vec<f64> {
        let mut bits = vec![0.0; self.tags.len()];
        for tag in tags {
            if let Some(i) = self.index_of(tag) {
                bits[i] = 1.0;
            }
        }
        bits
    }
}

/// Per-tweet feature vectors, all of the same dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
    dimension: usize,
}

impl FeatureMatrix {
    /// Concatenate sentiment channels with hashtag membership, row by row.
    ///
    /// `channels` and `tags` must describe the same tweets in the same order.
    pub fn assemble(
        channels: &[SentimentChannels],
        tags: &[&BTreeSet<String>],
        vocabulary: &HashtagVocabulary,
    ) -> Result<Self, GraphError> {
        if channels.len() != tags.len() {
            return Err(GraphError::RowCountMismatch {
                sentiment: channels.len(),
                hashtags: tags.len(),
            });
        }

        let rows = channels
            .iter()
            .zip(tags)
            .map(|(channel, tag_set)| {
                let mut row = Vec::with_capacity(SENTIMENT_COLUMNS + vocabulary.len());
                row.push(channel.negative);
                row.push(channel.positive);
                row.extend(vocabulary.encode(tag_set));
                row
            })
            .collect();

        Ok(Self {
            rows,
            dimension: SENTIMENT_COLUMNS + vocabulary.len(),
        })
    }

    /// Build a matrix from raw rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GraphError> {
        let dimension = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != dimension)
        {
            return Err(GraphError::DimensionMismatch {
                row,
                expected: dimension,
                found,
            });
        }
        Ok(Self { rows, dimension })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}
