//! Five-point solver entry points and input validation.

use crate::action::compute_action_matrix;
use crate::constraints::constraint_polynomials;
use crate::elimination::compute_groebner_basis;
use crate::error::FivePointError;
use crate::essential::EssentialMatrix;
use crate::nullspace::compute_nullspace_basis;
use crate::params::FivePointParams;
use crate::resolve::compute_e_matrices;

/// Number of correspondences consumed by the minimal solver.
pub const NUM_POINTS: usize = 5;

/// Trait for essential matrix solvers.
pub trait EssentialSolver {
    /// Solver-specific parameters.
    type Param;

    /// Compute candidate essential matrices from normalized correspondences.
    ///
    /// # Arguments
    /// * `right` – Normalized coordinates in the right image.
    /// * `left` – Corresponding normalized coordinates in the left image.
    /// * `params` – Solver-specific parameters.
    fn solve(
        right: &[[f64; 2]],
        left: &[[f64; 2]],
        params: &Self::Param,
    ) -> Result<Vec<EssentialMatrix>, FivePointError>;
}

/// Marker type representing Nistér's five-point algorithm.
pub struct FivePoint;

impl EssentialSolver for FivePoint {
    type Param = FivePointParams;

    fn solve(
        right: &[[f64; 2]],
        left: &[[f64; 2]],
        params: &Self::Param,
    ) -> Result<Vec<EssentialMatrix>, FivePointError> {
        solve_five_point(right, left, params)
    }
}

fn validate_points<'a>(
    right: &'a [[f64; 2]],
    left: &'a [[f64; 2]],
) -> Result<(&'a [[f64; 2]; NUM_POINTS], &'a [[f64; 2]; NUM_POINTS]), FivePointError> {
    let count_err = || FivePointError::InvalidPointCount {
        right: right.len(),
        left: left.len(),
    };
    let right = right.try_into().map_err(|_| count_err())?;
    let left = left.try_into().map_err(|_| count_err())?;
    Ok((right, left))
}

/// Solve for the essential matrices relating two calibrated views.
///
/// # Arguments
/// * `right` – Exactly five normalized points in the right image.
/// * `left` – The five corresponding normalized points in the left image.
/// * `params` – Verbosity and numeric tolerances.
///
/// # Returns
/// Up to ten candidates `E` with `rightᵗ · E · left = 0`, one per real root
/// of the polynomial system, each scaled so that `E(2, 2) = 1` (or to unit
/// Frobenius norm when that entry vanishes). The order is the eigenvalue
/// enumeration order; no candidate is preferred.
///
/// # Errors
/// * [`FivePointError::InvalidPointCount`] unless both slices hold five points.
/// * [`FivePointError::DegenerateConfiguration`] for rank-deficient inputs
///   (collinear or repeated correspondences).
/// * [`FivePointError::NumericOverflow`] when every real root fails to normalize.
///
/// Example:
///
/// ```no_run
/// use kornia_essential::{solve_five_point, FivePointParams};
///
/// let right = [[0.1, 0.2], [-0.3, 0.25], [0.4, -0.1], [-0.2, -0.35], [0.05, 0.45]];
/// let left = [[0.12, 0.18], [-0.25, 0.3], [0.35, -0.05], [-0.22, -0.3], [0.1, 0.4]];
/// let candidates = solve_five_point(&right, &left, &FivePointParams::default())?;
/// assert!(candidates.len() <= 10);
/// # Ok::<(), kornia_essential::FivePointError>(())
/// ```
pub fn solve_five_point(
    right: &[[f64; 2]],
    left: &[[f64; 2]],
    params: &FivePointParams,
) -> Result<Vec<EssentialMatrix>, FivePointError> {
    let result = run_pipeline(right, left, params);
    if let Err(err) = &result {
        if params.verbose {
            log::warn!("five-point solve failed: {err}");
        }
    }
    result
}

fn run_pipeline(
    right: &[[f64; 2]],
    left: &[[f64; 2]],
    params: &FivePointParams,
) -> Result<Vec<EssentialMatrix>, FivePointError> {
    let (right, left) = validate_points(right, left)?;
    let tol = &params.tol;

    let basis = compute_nullspace_basis(right, left, tol)?;
    let constraints = constraint_polynomials(&basis);
    let groebner_basis = compute_groebner_basis(&constraints, tol)?;
    let action_matrix = compute_action_matrix(&groebner_basis);
    let ems = compute_e_matrices(&basis, &action_matrix, tol)?;

    log::debug!("five-point solve produced {} candidates", ems.len());
    Ok(ems)
}
