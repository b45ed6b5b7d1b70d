// Tweet network pipeline: tweets -> features -> weighted adjacency matrix.
//
// 1. Score each tweet's text with the SentimentScorer
// 2. Split the polarity into negative/positive channels
// 3. Build the sorted hashtag vocabulary and one-hot encode each tweet
// 4. Concatenate into the feature matrix (tweet order preserved)
// 5. Cosine similarity of every pair of rows

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use super::features::{FeatureMatrix, HashtagVocabulary, SentimentChannels};
use super::similarity::AdjacencyMatrix;
use super::GraphError;
use crate::sentiment::traits::SentimentScorer;
use crate::tweets::record::Tweet;

/// A built similarity graph over a tweet table.
///
/// Node `i` is the `i`th tweet of the input; `node_ids()[i]` is its tweet id.
#[derive(Debug, Clone)]
pub struct TweetNetwork {
    node_ids: Vec<u64>,
    index: HashMap<u64, usize>,
    channels: Vec<SentimentChannels>,
    vocabulary: HashtagVocabulary,
    features: Arc<FeatureMatrix>,
    adjacency: AdjacencyMatrix,
}

/// Headline numbers for a built network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub hashtags: usize,
    /// Off-diagonal pairs with a non-zero weight
    pub edges: usize,
    /// Mean weight over all off-diagonal pairs, including zero-weight ones
    pub mean_weight: f64,
    /// Heaviest pairs as `(tweet_id, tweet_id, weight)`, heaviest first
    pub strongest: Vec<(u64, u64, f64)>,
}

/// Everything derived from the tweets before the pairwise step.
struct Extracted {
    node_ids: Vec<u64>,
    channels: Vec<SentimentChannels>,
    vocabulary: HashtagVocabulary,
    features: Arc<FeatureMatrix>,
}

impl TweetNetwork {
    /// Build the network, computing similarities on the current thread.
    pub fn build(tweets: &[Tweet], scorer: &dyn SentimentScorer) -> Result<Self> {
        let extracted = extract_features(tweets, scorer)?;
        let adjacency = AdjacencyMatrix::from_features(&extracted.features);
        Ok(Self::assemble(extracted, adjacency))
    }

    /// Build the network, spreading the pairwise similarities over `workers`
    /// blocking threads. The result is identical to [`TweetNetwork::build`].
    pub async fn build_parallel(
        tweets: &[Tweet],
        scorer: &dyn SentimentScorer,
        workers: usize,
    ) -> Result<Self> {
        let extracted = extract_features(tweets, scorer)?;
        let adjacency =
            AdjacencyMatrix::from_features_parallel(Arc::clone(&extracted.features), workers)
                .await
                .context("Pairwise similarity worker failed")?;
        Ok(Self::assemble(extracted, adjacency))
    }

    fn assemble(extracted: Extracted, adjacency: AdjacencyMatrix) -> Self {
        let index = extracted
            .node_ids
            .iter()
            .enumerate()
            .map(|(node, &id)| (id, node))
            .collect();

        Self {
            node_ids: extracted.node_ids,
            index,
            channels: extracted.channels,
            vocabulary: extracted.vocabulary,
            features: extracted.features,
            adjacency,
        }
    }

    /// Tweet id of each node, in node order.
    pub fn node_ids(&self) -> &[u64] {
        &self.node_ids
    }

    /// Dense node index -> tweet id.
    pub fn node_tweet_id_map(&self) -> BTreeMap<usize, u64> {
        self.node_ids.iter().copied().enumerate().collect()
    }

    /// Node index of a tweet id.
    pub fn node_of(&self, tweet_id: u64) -> Option<usize> {
        self.index.get(&tweet_id).copied()
    }

    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.adjacency
    }

    /// The adjacency matrix as nested rows, in node order.
    pub fn adjacency_rows(&self) -> Vec<Vec<f64>> {
        self.adjacency.to_rows()
    }

    /// Edge weight between two tweets, if both are in the network.
    pub fn weight_between(&self, a: u64, b: u64) -> Option<f64> {
        Some(self.adjacency.get(self.node_of(a)?, self.node_of(b)?))
    }

    pub fn channels(&self) -> &[SentimentChannels] {
        &self.channels
    }

    pub fn vocabulary(&self) -> &HashtagVocabulary {
        &self.vocabulary
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Summarize the network, keeping the `top` heaviest pairs.
    pub fn summary(&self, top: usize) -> NetworkSummary {
        let mut pairs: Vec<(usize, usize, f64)> = self.adjacency.upper_triangle().collect();
        let pair_count = pairs.len();
        let edges = pairs.iter().filter(|&&(_, _, w)| w != 0.0).count();
        let total: f64 = pairs.iter().map(|&(_, _, w)| w).sum();

        pairs.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
        let strongest = pairs
            .into_iter()
            .take(top)
            .map(|(i, j, w)| (self.node_ids[i], self.node_ids[j], w))
            .collect();

        NetworkSummary {
            nodes: self.node_ids.len(),
            hashtags: self.vocabulary.len(),
            edges,
            mean_weight: if pair_count == 0 {
                0.0
            } else {
                total / pair_count as f64
            },
            strongest,
        }
    }
}

fn extract_features(tweets: &[Tweet], scorer: &dyn SentimentScorer) -> Result<Extracted> {
    let mut seen = HashSet::with_capacity(tweets.len());
    if let Some(tweet) = tweets.iter().find(|t| !seen.insert(t.id)) {
        return Err(GraphError::DuplicateId(tweet.id).into());
    }

    let texts: Vec<String> = tweets.iter().map(|t| t.text.clone()).collect();
    let polarities = scorer
        .polarity_batch(&texts)
        .context("Sentiment scoring failed")?;
    if polarities.len() != tweets.len() {
        return Err(GraphError::RowCountMismatch {
            sentiment: polarities.len(),
            hashtags: tweets.len(),
        }
        .into());
    }

    let channels = tweets
        .iter()
        .zip(&polarities)
        .map(|(tweet, &polarity)| {
            SentimentChannels::from_polarity(polarity)
                .with_context(|| format!("Bad sentiment score for tweet {}", tweet.id))
        })
        .collect::<Result<Vec<_>>>()?;

    let neutral = polarities.iter().filter(|&&p| p == 0.0).count();
    info!(
        tweets = tweets.len(),
        neutral,
        "Extracted sentiment features"
    );

    let vocabulary = HashtagVocabulary::from_tag_sets(tweets.iter().map(|t| &t.hashtags));
    info!(hashtags = vocabulary.len(), "Built hashtag vocabulary");

    let tag_sets: Vec<_> = tweets.iter().map(|t| &t.hashtags).collect();
    let features = FeatureMatrix::assemble(&channels, &tag_sets, &vocabulary)?;

    Ok(Extracted {
        node_ids: tweets.iter().map(|t| t.id).collect(),
        channels,
        vocabulary,
        features: Arc::new(features),
    })
}
