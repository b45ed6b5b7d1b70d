// Tweet similarity graph: feature extraction, pairwise cosine similarity and
// the network pipeline that ties them together.

pub mod features;
pub mod network;
pub mod similarity;

use thiserror::Error;

/// Errors raised while turning tweets into features.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("tweet id {0} appears more than once")]
    DuplicateId(u64),

    #[error("sentiment polarity {0} is outside [-1, 1]")]
    InvalidPolarity(f64),

    #[error("scorer returned {sentiment} polarities for {hashtags} tweets")]
    RowCountMismatch { sentiment: usize, hashtags: usize },

    #[error("feature row {row} has {found} columns, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}
