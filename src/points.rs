//! Point ingestion and the Euclidean primitives shared by training and prediction.
//!
//! Every point set entering the crate passes through [`to_matrix`] (or
//! [`validate_matrix`] for data that is already an `ndarray`), which rejects
//! empty input, ragged rows and non-finite coordinates before any model state
//! is touched. Rows of the returned matrix are points, in input order.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Copy a row-per-point slice into a dense `n × d` matrix.
///
/// Fails with [`Error::EmptyInput`] for an empty slice or zero-width points,
/// [`Error::DimensionMismatch`] when a row's length differs from the first
/// row's, and [`Error::NonFiniteCoordinate`] for NaN or infinite values.
pub fn to_matrix(points: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n = points.len();
    let d = points.first().map(Vec::len).ok_or(Error::EmptyInput)?;
    if d == 0 {
        return Err(Error::EmptyInput);
    }

    for (i, point) in points.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        check_finite(point, i)?;
    }

    Ok(Array2::from_shape_fn((n, d), |(i, j)| points[i][j]))
}

/// Validate a matrix whose rows are points and return an owned copy.
pub fn validate_matrix(points: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if points.nrows() == 0 || points.ncols() == 0 {
        return Err(Error::EmptyInput);
    }
    for (i, row) in points.rows().into_iter().enumerate() {
        if let Some(j) = row.iter().position(|x| !x.is_finite()) {
            return Err(Error::NonFiniteCoordinate {
                point: i,
                coordinate: j,
            });
        }
    }
    Ok(points.to_owned())
}

/// Check a single query point against the fitted dimensionality.
pub fn check_point(point: &[f64], dim: usize) -> Result<()> {
    if point.len() != dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            found: point.len(),
        });
    }
    check_finite(point, 0)
}

fn check_finite(point: &[f64], index: usize) -> Result<()> {
    match point.iter().position(|x| !x.is_finite()) {
        Some(j) => Err(Error::NonFiniteCoordinate {
            point: index,
            coordinate: j,
        }),
        None => Ok(()),
    }
}

/// Euclidean distance.
///
/// Squared differences are summed directly. If that overflows, the distance
/// is recomputed with the differences scaled by their largest magnitude, the
/// way `hypot` avoids overflow, so only distances beyond `f64::MAX` are
/// infinite.
#[inline]
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let plain = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt();
    if plain.is_finite() {
        plain
    } else {
        scaled_euclidean(a, b)
    }
}

// Halved differences of finite values cannot overflow.
fn scaled_euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let half_diff = |(x, y): (&f64, &f64)| x * 0.5 - y * 0.5;
    let scale = a
        .iter()
        .zip(b.iter())
        .map(|p| half_diff(p).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|p| (half_diff(p) / scale).powi(2))
        .sum();
    2.0 * scale * sum.sqrt()
}

/// Index of the centroid nearest to `point`.
///
/// Linear scan keeping the first minimum: when several centroids are at
/// exactly the same distance, the lowest row index wins.
#[inline]
pub fn nearest(point: ArrayView1<'_, f64>, centroids: ArrayView2<'_, f64>) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::INFINITY;

    for (k, centroid) in centroids.rows().into_iter().enumerate() {
        let dist = euclidean(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = k;
        }
    }
    best_cluster
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, aview1};

    #[test]
    fn to_matrix_keeps_row_order() {
        let m = to_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn to_matrix_rejects_bad_input() {
        assert_eq!(to_matrix(&[]), Err(Error::EmptyInput));
        assert_eq!(to_matrix(&[vec![], vec![]]), Err(Error::EmptyInput));
        assert_eq!(
            to_matrix(&[vec![0.0, 0.0], vec![1.0]]),
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            to_matrix(&[vec![0.0, 0.0], vec![1.0, f64::NAN]]),
            Err(Error::NonFiniteCoordinate {
                point: 1,
                coordinate: 1
            })
        );
    }

    #[test]
    fn validate_matrix_rejects_infinity() {
        let m = array![[0.0, 0.0], [f64::INFINITY, 1.0]];
        assert_eq!(
            validate_matrix(m.view()),
            Err(Error::NonFiniteCoordinate {
                point: 1,
                coordinate: 0
            })
        );
    }

    #[test]
    fn nearest_prefers_lowest_index_on_ties() {
        // (0,0) is exactly 1.0 from both (1,0) and (-1,0).
        let centroids = array![[1.0, 0.0], [-1.0, 0.0], [5.0, 5.0]];
        assert_eq!(nearest(aview1(&[0.0, 0.0]), centroids.view()), 0);

        let flipped = array![[5.0, 5.0], [-1.0, 0.0], [1.0, 0.0]];
        assert_eq!(nearest(aview1(&[0.0, 0.0]), flipped.view()), 1);
    }

    #[test]
    fn huge_coordinates_keep_distance_ordering() {
        let far = euclidean(aview1(&[1e200, 0.0]), aview1(&[0.0, 0.0]));
        assert!((far / 1e200 - 1.0).abs() < 1e-12, "{far}");

        let across = euclidean(aview1(&[-1e308]), aview1(&[1e308]));
        assert!(across.is_infinite());

        let centroids = array![[3e200], [1e200]];
        assert_eq!(nearest(aview1(&[0.0]), centroids.view()), 1);
    }

    #[test]
    fn euclidean_3_4_5() {
        assert_eq!(euclidean(aview1(&[0.0, 0.0]), aview1(&[3.0, 4.0])), 5.0);
    }
}
