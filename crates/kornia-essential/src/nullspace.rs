//! Null space of the linear epipolar constraints.

use crate::error::{DegeneracyKind, FivePointError};
use crate::params::NumericTol;

/// Four 9-vectors spanning the right null space of the epipolar constraint matrix.
pub type NullSpaceBasis = [[f64; 9]; 4];

/// Build the 5x9 epipolar constraint matrix.
///
/// Each row holds the products `[rx*lx, ry*lx, lx, rx*ly, ry*ly, ly, rx, ry, 1]`
/// of one correspondence, where `r` is the right-image point and `l` the
/// left-image point.
pub fn epipolar_constraint_matrix(right: &[[f64; 2]; 5], left: &[[f64; 2]; 5]) -> faer::Mat<f64> {
    let mut a = faer::Mat::<f64>::zeros(5, 9);
    for (i, (r, l)) in right.iter().zip(left.iter()).enumerate() {
        let (rx, ry) = (r[0], r[1]);
        let (lx, ly) = (l[0], l[1]);
        let row = [rx * lx, ry * lx, lx, rx * ly, ry * ly, ly, rx, ry, 1.0];
        for (j, val) in row.into_iter().enumerate() {
            a.write(i, j, val);
        }
    }
    a
}

/// Compute the four-dimensional null space of the epipolar constraint matrix.
///
/// The basis vectors are the right singular vectors of the four smallest
/// singular values (the trailing four columns of `V`).
///
/// # Errors
///
/// Returns [`FivePointError::DegenerateConfiguration`] when the constraint
/// matrix has rank below five, e.g. for collinear correspondences.
pub fn compute_nullspace_basis(
    right: &[[f64; 2]; 5],
    left: &[[f64; 2]; 5],
    tol: &NumericTol,
) -> Result<NullSpaceBasis, FivePointError> {
    let a = epipolar_constraint_matrix(right, left);

    // five singular values, in nonincreasing order
    let sigma = a.singular_values();
    let sigma_ratio = if sigma[0] > 0.0 { sigma[4] / sigma[0] } else { 0.0 };
    log::debug!("constraint matrix singular values: {:?}", sigma);

    // NaN-safe: a NaN ratio is rejected as well
    if !(sigma_ratio > tol.rank) {
        return Err(FivePointError::DegenerateConfiguration(
            DegeneracyKind::NullSpaceRank { sigma_ratio },
        ));
    }

    let svd = a.svd();
    let v = svd.v();

    let mut basis = [[0.0; 9]; 4];
    for (k, vector) in basis.iter_mut().enumerate() {
        for (j, val) in vector.iter_mut().enumerate() {
            *val = v.read(j, 5 + k);
        }
    }

    Ok(basis)
}
