//! Clustering traits.

use crate::error::Result;

/// Trait for clustering algorithms.
pub trait Clustering {
    /// Fit a fresh model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point. The receiver's
    /// own fitted state, if any, is left untouched.
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}
