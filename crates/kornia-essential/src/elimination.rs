//! Elimination of the cubic monomials from the 10x20 constraint coefficient matrix.

use faer::prelude::SpSolver;

use crate::constraints::NUM_CONSTRAINTS;
use crate::error::{DegeneracyKind, FivePointError};
use crate::params::NumericTol;
use crate::polynomial::{Poly3, NUM_MONOMIALS};

/// Stack the constraint coefficient rows into a 10x20 matrix over [`crate::polynomial::MONOMIAL_BASIS`].
pub fn coefficient_matrix(constraints: &[Poly3; NUM_CONSTRAINTS]) -> faer::Mat<f64> {
    faer::Mat::from_fn(NUM_CONSTRAINTS, NUM_MONOMIALS, |i, j| {
        constraints[i].coeffs()[j]
    })
}

/// Solve `[A | B]` for `A⁻¹ · B`, where `A` is the leading square block of `m`.
///
/// `A` is factorized with partial pivoting. A pivot is rejected when its
/// magnitude is at or below `tol.pivot` times the largest absolute entry of `m`.
///
/// # Errors
///
/// Returns [`FivePointError::DegenerateConfiguration`] with
/// [`DegeneracyKind::SingularElimination`] when the leading block is singular.
pub fn eliminate(
    m: faer::MatRef<'_, f64>,
    tol: &NumericTol,
) -> Result<faer::Mat<f64>, FivePointError> {
    let (n, ncols) = (m.nrows(), m.ncols());
    assert!(n <= ncols);

    let mut max_abs = 0.0f64;
    for j in 0..ncols {
        for i in 0..n {
            max_abs = max_abs.max(m.read(i, j).abs());
        }
    }
    let threshold = tol.pivot * max_abs;

    let lu = m.submatrix(0, 0, n, n).partial_piv_lu();
    let u = lu.compute_u();

    // L has a unit diagonal, so the pivots live on the diagonal of U.
    // The negated test also rejects NaN pivots.
    if let Some(column) = (0..n).find(|&j| !(u.read(j, j).abs() > threshold)) {
        return Err(FivePointError::DegenerateConfiguration(
            DegeneracyKind::SingularElimination { column },
        ));
    }

    Ok(lu.solve(m.submatrix(0, n, n, ncols - n)))
}

/// Eliminate the cubic monomials and return the reduced Groebner block.
///
/// After elimination the coefficient matrix reads `[I | G]`; `G` (10x10) is
/// returned. Row `r` states `m_r + Σ_j G(r, j) · b_j = 0` where `m_r` is the
/// `r`-th cubic monomial and `b_j` the `j`-th quotient-ring monomial.
pub fn compute_groebner_basis(
    constraints: &[Poly3; NUM_CONSTRAINTS],
    tol: &NumericTol,
) -> Result<faer::Mat<f64>, FivePointError> {
    let m = coefficient_matrix(constraints);
    eliminate(m.as_ref(), tol)
}
