use core::fmt;

/// Result alias for `lloyd`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by training, prediction and accessor reads.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Point set was empty, or points have zero coordinates.
    EmptyInput,

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of points.
        n_items: usize,
    },

    /// A coordinate was NaN or infinite.
    NonFiniteCoordinate {
        /// Index of the offending point (0 for a single `predict` point).
        point: usize,
        /// Index of the offending coordinate within the point.
        coordinate: usize,
    },

    /// Point dimensionality differs from the rest of the run.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// `predict` or an accessor was used before a successful `train`.
    NotFitted,

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

/// Coarse classification of [`Error`].
///
/// All `InvalidInput` errors are caller mistakes detected before any model
/// state is touched; none of them is worth retrying with the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty point set, bad cluster count, non-finite coordinate or bad parameter.
    InvalidInput,
    /// Inconsistent dimensionality.
    DimensionMismatch,
    /// Model has not been trained.
    NotFitted,
}

impl Error {
    /// Which of the three error kinds this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput
            | Error::InvalidClusterCount { .. }
            | Error::NonFiniteCoordinate { .. }
            | Error::InvalidParameter { .. } => ErrorKind::InvalidInput,
            Error::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Error::NotFitted => ErrorKind::NotFitted,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::NonFiniteCoordinate { point, coordinate } => {
                write!(
                    f,
                    "non-finite value at coordinate {coordinate} of point {point}"
                )
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::NotFitted => write!(f, "model has not been trained"),
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
