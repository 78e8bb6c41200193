//! Hard clustering by Lloyd's algorithm.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! This implementation is fully deterministic. Centroids start at the first
//! k input points, ties in the assignment step go to the lowest cluster id,
//! and an empty cluster keeps its centroid. Training stops when no centroid
//! moves ([`Convergence::Exact`], the default) or when the largest move is
//! within the tolerance ([`Convergence::Tolerance`]), and never runs more than
//! `max_iter` rounds.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![10.0, 10.0],
//!     vec![0.1, 0.1],
//!     vec![10.1, 10.1],
//! ];
//!
//! // One-shot labels through the trait.
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 1, 0, 1]);
//!
//! // Keep the fitted model around for prediction and rendering.
//! let mut model = Kmeans::new(2);
//! model.train(&data).unwrap();
//! assert_eq!(model.predict(&[9.0, 9.5]).unwrap(), 1);
//! for (id, members) in model.assignment().unwrap().iter() {
//!     assert_eq!(members.len(), 2, "cluster {id}");
//! }
//! ```

mod assignment;
mod convergence;
mod kmeans;
mod traits;

pub use assignment::Assignment;
pub use convergence::Convergence;
pub use kmeans::{FitStats, Kmeans, DEFAULT_MAX_ITER, DEFAULT_TOL};
pub use traits::Clustering;
