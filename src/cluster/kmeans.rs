//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS). The foundational clustering algorithm, dating to 1957 (Lloyd).
//!
//! # The Objective
//!
//! K-means minimizes:
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize centroid `i` to input point `i`, for `i < k`
//! 2. **Assign**: each point → nearest centroid (Euclidean, lowest id on ties)
//! 3. **Update**: each centroid → mean of its assigned points
//! 4. Repeat until the centroids stop moving or `max_iter` rounds have run
//!
//! Every step is deterministic: the same points in the same order with the
//! same k always produce the same centroids and assignment.
//!
//! # Failure Modes
//!
//! - **Initialization sensitivity**: the first k points seed the centroids, so
//!   reordering the input can change the result. Sorted or grouped input is
//!   the common way to end up in a poor local optimum. Shuffle (with a fixed
//!   seed) upstream if that matters.
//! - **Empty clusters**: a centroid that attracts no points keeps its previous
//!   position instead of being reseeded.
//! - **Local optima**: Lloyd finds a local minimum of WCSS only.
//! - **Non-spherical clusters**: assumes roughly spherical, equal-sized clusters.
//!
//! # Assignment lag
//!
//! The assignment is computed against the centroids *before* the final
//! update. On convergence the two agree. When the loop stops on `max_iter`
//! with centroids still moving, the assignment lags the centroids by one
//! update.

use super::assignment::Assignment;
use super::convergence::{max_shift, Convergence};
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::points::{self, nearest};
use ndarray::{aview1, s, Array2, ArrayView1, ArrayView2};
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default convergence tolerance. Only consulted under [`Convergence::Tolerance`].
pub const DEFAULT_TOL: f64 = 0.001;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Summary of the last training run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitStats {
    /// Assign/update rounds performed (`1..=max_iter`).
    pub iterations: usize,
    /// Whether training stopped on the convergence check rather than the budget.
    pub converged: bool,
    /// Within-cluster sum of squared distances, final assignment against final centroids.
    pub inertia: f64,
}

#[derive(Debug, Clone)]
struct Fitted {
    data: Array2<f64>,
    centroids: Array2<f64>,
    assignment: Assignment,
    stats: FitStats,
}

/// K-means clustering model (Lloyd's algorithm).
///
/// Holds its configuration and, after [`Kmeans::train`], the fitted centroids
/// and assignment. Training takes `&mut self` and prediction `&self`; sharing
/// one model between threads that both train and predict needs external
/// synchronization.
///
/// ```rust
/// use lloyd::Kmeans;
///
/// let points = vec![
///     vec![0.0, 0.0],
///     vec![10.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 1.0],
/// ];
///
/// let mut model = Kmeans::new(2);
/// model.train(&points).unwrap();
///
/// assert_eq!(model.predict(&[0.2, 0.4]).unwrap(), 0);
/// assert_eq!(model.predict(&[9.0, 0.7]).unwrap(), 1);
/// assert_eq!(model.centroids().unwrap().row(0).to_vec(), vec![0.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Convergence tolerance.
    tol: f64,
    /// Stopping rule.
    convergence: Convergence,
    fitted: Option<Fitted>,
}

impl Kmeans {
    /// Create a new K-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            convergence: Convergence::Exact,
            fitted: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    ///
    /// Has no effect unless the stopping rule is [`Convergence::Tolerance`].
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the stopping rule.
    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = convergence;
        self
    }

    /// Maximum iterations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Convergence tolerance.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Stopping rule.
    pub fn convergence(&self) -> Convergence {
        self.convergence
    }

    /// Whether a training run has completed.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit the model to `points`, one `Vec` per point.
    ///
    /// Replaces any previous fit. On error the model is left untouched.
    pub fn train(&mut self, points: &[Vec<f64>]) -> Result<()> {
        let data = points::to_matrix(points)?;
        self.train_owned(data)
    }

    /// Fit the model to a matrix whose rows are points.
    pub fn train_array(&mut self, points: ArrayView2<'_, f64>) -> Result<()> {
        let data = points::validate_matrix(points)?;
        self.train_owned(data)
    }

    fn train_owned(&mut self, data: Array2<f64>) -> Result<()> {
        self.check_params(data.nrows())?;
        self.fitted = Some(self.lloyd(data));
        Ok(())
    }

    fn check_params(&self, n: usize) -> Result<()> {
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Run the assign/update loop on validated data.
    fn lloyd(&self, data: Array2<f64>) -> Fitted {
        let (n, d) = data.dim();
        debug!(
            n,
            d,
            k = self.k,
            max_iter = self.max_iter,
            convergence = ?self.convergence,
            "k-means training started"
        );

        // First k points, in input order.
        let mut centroids = data.slice(s![..self.k, ..]).to_owned();
        let mut iterations = 0;
        let mut converged = false;

        let assignment = loop {
            iterations += 1;

            let labels = assign(data.view(), centroids.view());
            let assignment = Assignment::from_labels(labels, self.k);
            let next = assignment.means(data.view(), centroids.view());

            trace!(
                iteration = iterations,
                empty_clusters = assignment.empty_clusters(),
                max_shift = max_shift(centroids.view(), next.view()),
                "k-means iteration"
            );

            let done = self
                .convergence
                .is_converged(centroids.view(), next.view(), self.tol);
            centroids = next;

            if done {
                converged = true;
                break assignment;
            }
            if iterations == self.max_iter {
                break assignment;
            }
        };

        let inertia = inertia(data.view(), centroids.view(), assignment.labels());
        if !converged {
            warn!(iterations, inertia, "k-means hit max_iter before centroids settled");
        }
        debug!(iterations, converged, inertia, "k-means training finished");

        Fitted {
            data,
            centroids,
            assignment,
            stats: FitStats {
                iterations,
                converged,
                inertia,
            },
        }
    }

    fn fitted(&self) -> Result<&Fitted> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }

    /// Cluster id of the centroid nearest to `point`.
    ///
    /// Ties go to the lowest cluster id.
    pub fn predict(&self, point: &[f64]) -> Result<usize> {
        let fitted = self.fitted()?;
        points::check_point(point, fitted.centroids.ncols())?;
        Ok(nearest(aview1(point), fitted.centroids.view()))
    }

    /// Predict several points. All points are validated before any is predicted.
    pub fn predict_batch(&self, points: &[Vec<f64>]) -> Result<Vec<usize>> {
        let fitted = self.fitted()?;
        let d = fitted.centroids.ncols();
        for (i, point) in points.iter().enumerate() {
            points::check_point(point, d).map_err(|e| match e {
                Error::NonFiniteCoordinate { coordinate, .. } => Error::NonFiniteCoordinate {
                    point: i,
                    coordinate,
                },
                other => other,
            })?;
        }
        Ok(points
            .iter()
            .map(|p| nearest(aview1(p), fitted.centroids.view()))
            .collect())
    }

    /// Centroids, row `i` is centroid `i`.
    pub fn centroids(&self) -> Result<ArrayView2<'_, f64>> {
        Ok(self.fitted()?.centroids.view())
    }

    /// Cluster membership from the last iteration.
    pub fn assignment(&self) -> Result<&Assignment> {
        Ok(&self.fitted()?.assignment)
    }

    /// Cluster id of each training point.
    pub fn labels(&self) -> Result<&[usize]> {
        Ok(self.fitted()?.assignment.labels())
    }

    /// Training points assigned to `cluster`, in input order.
    pub fn cluster_points(
        &self,
        cluster: usize,
    ) -> Result<impl Iterator<Item = ArrayView1<'_, f64>> + '_> {
        let fitted = self.fitted()?;
        if cluster >= self.k {
            return Err(Error::InvalidParameter {
                name: "cluster",
                message: "cluster id out of range",
            });
        }
        Ok(fitted.assignment.rows_of(fitted.data.view(), cluster))
    }

    /// Statistics of the last training run.
    pub fn stats(&self) -> Result<&FitStats> {
        Ok(&self.fitted()?.stats)
    }

    /// Within-cluster sum of squared distances.
    pub fn inertia(&self) -> Result<f64> {
        Ok(self.fitted()?.stats.inertia)
    }
}

/// Label every point with its nearest centroid.
#[cfg(feature = "parallel")]
fn assign(data: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>) -> Vec<usize> {
    // Each point runs the same sequential scan; `collect` keeps input order.
    (0..data.nrows())
        .into_par_iter()
        .map(|i| nearest(data.row(i), centroids))
        .collect()
}

/// Label every point with its nearest centroid.
#[cfg(not(feature = "parallel"))]
fn assign(data: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>) -> Vec<usize> {
    data.rows()
        .into_iter()
        .map(|point| nearest(point, centroids))
        .collect()
}

fn inertia(data: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>, labels: &[usize]) -> f64 {
    data.rows()
        .into_iter()
        .zip(labels)
        .map(|(point, &k)| points::euclidean(point, centroids.row(k)).powi(2))
        .sum()
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        let mut model = Kmeans::new(self.k)
            .with_max_iter(self.max_iter)
            .with_tol(self.tol)
            .with_convergence(self.convergence);
        model.train(data)?;
        Ok(model.labels()?.to_vec())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
