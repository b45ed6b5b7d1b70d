// Unit tests for feature extraction and pairwise similarity.
//
// Tests SentimentChannels::from_polarity (including the neutral 0.25/0.25
// default), vocabulary ordering, feature matrix layout, cosine similarity
// edge cases and adjacency matrix symmetry.

use std::collections::BTreeSet;

use tweetnet::graph::features::{
    FeatureMatrix, HashtagVocabulary, SentimentChannels, NEUTRAL_CHANNEL_VALUE,
};
use tweetnet::graph::similarity::{cosine_similarity, AdjacencyMatrix};
use tweetnet::graph::GraphError;

fn tags(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// SentimentChannels::from_polarity
// ============================================================

#[test]
fn neutral_polarity_sets_both_channels() {
    let c = SentimentChannels::from_polarity(0.0).unwrap();
    assert_eq!(c.negative, 0.25);
    assert_eq!(c.positive, 0.25);
    assert_eq!(NEUTRAL_CHANNEL_VALUE, 0.25);
}

#[test]
fn negative_polarity_goes_to_negative_channel() {
    let c = SentimentChannels::from_polarity(-1.0).unwrap();
    assert_eq!((c.negative, c.positive), (1.0, 0.0));
}

#[test]
fn positive_polarity_goes_to_positive_channel() {
    let c = SentimentChannels::from_polarity(0.125).unwrap();
    assert_eq!((c.negative, c.positive), (0.0, 0.125));
}

#[test]
fn tiny_polarity_is_not_neutral() {
    let c = SentimentChannels::from_polarity(1e-12).unwrap();
    assert_eq!((c.negative, c.positive), (0.0, 1e-12));
}

#[test]
fn out_of_range_polarity_rejected() {
    assert_eq!(
        SentimentChannels::from_polarity(-1.01),
        Err(GraphError::InvalidPolarity(-1.01))
    );
    assert!(SentimentChannels::from_polarity(f64::INFINITY).is_err());
}

// ============================================================
// HashtagVocabulary
// ============================================================

#[test]
fn vocabulary_order_is_independent_of_input_order() {
    let a = tags(&["zebra", "apple"]);
    let b = tags(&["mango"]);
    let forward = HashtagVocabulary::from_tag_sets([&a, &b]);
    let backward = HashtagVocabulary::from_tag_sets([&b, &a]);
    assert_eq!(forward, backward);
    assert_eq!(forward.tags(), ["apple", "mango", "zebra"]);
}

#[test]
fn vocabulary_is_case_sensitive() {
    let vocab = HashtagVocabulary::from_tag_sets([&tags(&["Rust", "rust"])]);
    assert_eq!(vocab.len(), 2);
}

#[test]
fn empty_vocabulary_encodes_to_empty_vector() {
    let vocab = HashtagVocabulary::from_tag_sets([&tags(&[])]);
    assert!(vocab.is_empty());
    assert!(vocab.encode(&tags(&["anything"])).is_empty());
}

// ============================================================
// FeatureMatrix::assemble
// ============================================================

#[test]
fn feature_rows_are_sentiment_then_hashtags() {
    let a = tags(&["b"]);
    let b = tags(&["a", "b"]);
    let vocab = HashtagVocabulary::from_tag_sets([&a, &b]);
    let channels = [
        SentimentChannels::from_polarity(-0.5).unwrap(),
        SentimentChannels::from_polarity(0.0).unwrap(),
    ];

    let matrix = FeatureMatrix::assemble(&channels, &[&a, &b], &vocab).unwrap();
    assert_eq!(matrix.len(), 2);
    assert_eq!(matrix.dimension(), 4);
    assert_eq!(matrix.row(0), [0.5, 0.0, 0.0, 1.0]);
    assert_eq!(matrix.row(1), [0.25, 0.25, 1.0, 1.0]);
}

#[test]
fn assemble_rejects_mismatched_inputs() {
    let a = tags(&[]);
    let vocab = HashtagVocabulary::default();
    let channels = [SentimentChannels::from_polarity(0.1).unwrap(); 2];
    let err = FeatureMatrix::assemble(&channels, &[&a], &vocab).unwrap_err();
    assert_eq!(
        err,
        GraphError::RowCountMismatch {
            sentiment: 2,
            hashtags: 1
        }
    );
}

// ============================================================
// cosine_similarity
// ============================================================

#[test]
fn cosine_identical_vectors_is_one() {
    let v = [0.25, 0.25, 1.0, 0.0, 1.0];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
}

#[test]
fn cosine_orthogonal_vectors_is_zero() {
    assert_eq!(cosine_similarity(&[0.7, 0.0, 1.0], &[0.0, 0.3, 0.0]), 0.0);
}

#[test]
fn cosine_zero_vector_is_zero_not_nan() {
    let s = cosine_similarity(&[0.0, 0.0, 0.0], &[0.5, 0.5, 1.0]);
    assert_eq!(s, 0.0);
    assert!(!s.is_nan());
}

#[test]
fn cosine_is_scale_invariant() {
    let a = [0.1, 0.2, 0.3];
    let b = [1.0, 2.0, 3.0];
    assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
}

#[test]
fn cosine_neutral_against_pure_positive() {
    // [0.25, 0.25] . [0, 1] / (sqrt(0.125) * 1) = 1/sqrt(2)
    let s = cosine_similarity(&[0.25, 0.25], &[0.0, 1.0]);
    assert!((s - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

// ============================================================
// AdjacencyMatrix
// ============================================================

#[test]
fn adjacency_is_symmetric_with_zero_diagonal() {
    let rows: Vec<Vec<f64>> = (0..9)
        .map(|i| {
            vec![
                (i % 2) as f64 * 0.3,
                ((i + 1) % 2) as f64 * 0.8,
                (i % 3 == 0) as u8 as f64,
                (i % 4 == 0) as u8 as f64,
            ]
        })
        .collect();
    let matrix = AdjacencyMatrix::from_features(&FeatureMatrix::from_rows(rows).unwrap());

    assert_eq!(matrix.size(), 9);
    for i in 0..9 {
        assert_eq!(matrix.get(i, i), 0.0);
        for j in 0..9 {
            assert_eq!(matrix.get(i, j), matrix.get(j, i), "({i}, {j})");
            assert!((0.0..=1.0).contains(&matrix.get(i, j)));
        }
    }
}

#[test]
fn adjacency_upper_triangle_covers_each_pair_once() {
    let matrix = AdjacencyMatrix::zeros(5);
    let pairs: Vec<_> = matrix.upper_triangle().map(|(i, j, _)| (i, j)).collect();
    assert_eq!(pairs.len(), 10);
    assert!(pairs.iter().all(|&(i, j)| i < j));
}
