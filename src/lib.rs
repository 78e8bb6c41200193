//! # lloyd
//!
//! Deterministic k-means clustering by Lloyd's algorithm.
//!
//! Given a set of equal-length `f64` points and a cluster count k, [`Kmeans`]
//! alternates between assigning each point to its nearest centroid and moving
//! each centroid to the mean of its points, until the centroids settle or the
//! iteration budget runs out. The fitted model predicts clusters for new
//! points and exposes its centroids and cluster membership read-only, for
//! whatever renders or consumes them.
//!
//! No randomness is involved anywhere: identical input in identical order
//! yields identical output.
//!
//! Optional features:
//! - `parallel`: run the assignment step on the rayon thread pool. Results are
//!   identical to the sequential build.

pub mod cluster;
/// Error types used across `lloyd`.
pub mod error;
pub mod points;


pub use cluster::{Assignment, Clustering, Convergence, FitStats, Kmeans};
pub use error::{Error, ErrorKind, Result};
