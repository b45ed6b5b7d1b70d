// Pairwise cosine similarity and the weighted adjacency matrix.
//
// Only the upper triangle is computed; each value is mirrored into the lower
// triangle so the matrix is symmetric by construction. The diagonal is never
// written and stays 0.0.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use super::features::FeatureMatrix;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm (the ratio is undefined), so a
/// missing signal never turns into NaN in the graph.
///
/// # Panics
///
/// If the vectors have different lengths. Feature vectors of one matrix always
/// share a dimensionality, so a mismatch is a bug in the caller.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "cosine similarity of vectors with different lengths"
    );

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = norm_a * norm_b;
    let similarity = dot / denom;
    if denom == 0.0 || !similarity.is_finite() {
        0.0
    } else {
        similarity.clamp(-1.0, 1.0)
    }
}

/// Symmetric `n x n` matrix of edge weights, indexed by node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl AdjacencyMatrix {
    /// An all-zero matrix for `size` nodes.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Compute the similarity of every pair of feature rows on the current
    /// thread.
    pub fn from_features(features: &FeatureMatrix) -> Self {
        let n = features.len();
        let mut matrix = Self::zeros(n);
        for i in 0..n {
            for (j, weight) in row_similarities(features, i) {
                matrix.set_pair(i, j, weight);
            }
        }

        debug!(nodes = n, "Computed adjacency matrix");
        matrix
    }

    /// Compute the same matrix as [`AdjacencyMatrix::from_features`] with the
    /// rows spread over `workers` blocking threads.
    ///
    /// Row `i` belongs to worker `i % workers`, and each worker computes the
    /// pairs `(i, j > i)` of its rows, so every pair is computed exactly once.
    /// Interleaving the rows keeps the triangular workload balanced.
    pub async fn from_features_parallel(
        features: Arc<FeatureMatrix>,
        workers: usize,
    ) -> Result<Self> {
        let n = features.len();
        let workers = workers.clamp(1, n.max(1));

        let handles = (0..workers).map(|worker| {
            let features = Arc::clone(&features);
            tokio::task::spawn_blocking(move || {
                (worker..n)
                    .step_by(workers)
                    .flat_map(|i| {
                        row_similarities(&features, i)
                            .map(move |(j, weight)| (i, j, weight))
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>()
            })
        });

        let results = futures::future::try_join_all(handles).await?;

        let mut matrix = Self::zeros(n);
        for (i, j, weight) in results.into_iter().flatten() {
            matrix.set_pair(i, j, weight);
        }

        info!(nodes = n, workers, "Computed adjacency matrix in parallel");
        Ok(matrix)
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    /// Row `i` of the matrix: the weights of every edge touching node `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    /// The matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    /// Off-diagonal pairs `(i, j, weight)` with `i < j`.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size)
            .flat_map(move |i| ((i + 1)..self.size).map(move |j| (i, j, self.get(i, j))))
    }

    fn set_pair(&mut self, i: usize, j: usize, weight: f64) {
        self.cells[i * self.size + j] = weight;
        self.cells[j * self.size + i] = weight;
    }
}

/// Similarities of row `i` against every later row.
fn row_similarities(
    features: &FeatureMatrix,
    i: usize,
) -> impl Iterator<Item = (usize, f64)> + '_ {
    ((i + 1)..features.len())
        .map(move |j| (j, cosine_similarity(features.row(i), features.row(j))))
}
