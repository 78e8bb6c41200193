//! When to stop iterating.

use ndarray::ArrayView2;

/// Stopping rule checked after each centroid update.
///
/// The default, [`Convergence::Exact`], stops only when no centroid moved at
/// all. Under that rule the model's tolerance is stored but never consulted.
/// [`Convergence::Tolerance`] is the approximate variant: stop once the
/// largest single-coordinate movement is within the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convergence {
    /// Every centroid coordinate is bit-for-bit equal to its previous value.
    #[default]
    Exact,
    /// `max |new - old| <= tol` over all centroid coordinates.
    Tolerance,
}

impl Convergence {
    /// Whether the move from `old` to `new` ends training.
    pub fn is_converged(
        self,
        old: ArrayView2<'_, f64>,
        new: ArrayView2<'_, f64>,
        tol: f64,
    ) -> bool {
        match self {
            Convergence::Exact => old == new,
            Convergence::Tolerance => max_shift(old, new) <= tol,
        }
    }
}

/// Largest absolute change of any single centroid coordinate.
pub(crate) fn max_shift(old: ArrayView2<'_, f64>, new: ArrayView2<'_, f64>) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}
