use thiserror::Error;

/// Which rank assumption of the pipeline was violated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegeneracyKind {
    /// The 5x9 epipolar constraint matrix has rank below five, so its null space
    /// is wider than four dimensions.
    NullSpaceRank {
        /// Ratio of the fifth to the first singular value.
        sigma_ratio: f64,
    },
    /// The leading 10x10 block of the elimination matrix is singular.
    SingularElimination {
        /// Column in which no usable pivot was found.
        column: usize,
    },
}

impl std::fmt::Display for DegeneracyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegeneracyKind::NullSpaceRank { sigma_ratio } => write!(
                f,
                "constraint matrix is rank deficient (sigma5 / sigma1 = {sigma_ratio:e})"
            ),
            DegeneracyKind::SingularElimination { column } => {
                write!(f, "elimination matrix has no pivot in column {column}")
            }
        }
    }
}

/// Error types for the five-point essential matrix solver.
#[derive(Debug, Error)]
pub enum FivePointError {
    /// Exactly five correspondences are required in each image.
    #[error("five-point solver requires exactly 5 points per image, got {right} right and {left} left")]
    InvalidPointCount {
        /// Number of right-image points supplied.
        right: usize,
        /// Number of left-image points supplied.
        left: usize,
    },

    /// The correspondences do not determine a four-dimensional solution family.
    #[error("degenerate point configuration: {0}")]
    DegenerateConfiguration(DegeneracyKind),

    /// Every real candidate required a division by a vanishing quantity.
    #[error("numeric overflow while normalizing {what} (divisor {value:e})")]
    NumericOverflow {
        /// The quantity being normalized.
        what: &'static str,
        /// Offending divisor.
        value: f64,
    },
}
