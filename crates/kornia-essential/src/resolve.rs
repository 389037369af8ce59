//! Recover essential matrices from the real eigenpairs of the action matrix.

use faer::complex_native::c64;

use crate::action::ACTION_SIZE;
use crate::error::FivePointError;
use crate::essential::EssentialMatrix;
use crate::nullspace::NullSpaceBasis;
use crate::params::NumericTol;

/// Real part of `a / b`.
fn ratio_re(a: c64, b: c64) -> f64 {
    (a.re * b.re + a.im * b.im) / (b.re * b.re + b.im * b.im)
}

fn modulus(a: c64) -> f64 {
    a.re.hypot(a.im)
}

/// Back-substitute `(x, y, z)` through the null-space basis and scale the
/// result so that its last entry equals one.
///
/// When the last entry vanishes (e.g. a translation parallel to the image
/// plane without rotation) the result is scaled to unit Frobenius norm
/// instead. Returns `None` if the coefficients are not finite.
fn back_substitute(
    basis: &NullSpaceBasis,
    x: f64,
    y: f64,
    z: f64,
    tol: &NumericTol,
) -> Option<[f64; 9]> {
    let mut linear_e: [f64; 9] =
        std::array::from_fn(|j| x * basis[0][j] + y * basis[1][j] + z * basis[2][j] + basis[3][j]);

    let max_abs = linear_e.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let last = linear_e[8];
    let scale = if last.abs() > tol.scale * max_abs {
        last
    } else {
        // basis[3] has unit norm and is orthogonal to the others, so the norm is >= 1
        linear_e.iter().map(|v| v * v).sum::<f64>().sqrt()
    };
    linear_e.iter_mut().for_each(|v| *v /= scale);

    linear_e.iter().all(|v| v.is_finite()).then_some(linear_e)
}

/// Compute one essential matrix per real eigenvalue of the action matrix.
///
/// The right eigenvector of each real eigenvalue holds the quotient-ring
/// monomials `[x² xy y² xz yz z² x y z 1]` up to scale, so `(x, y, z)` are read
/// off entries 6-8 divided by entry 9.
///
/// The matrices keep the eigenvalue enumeration order. Each is scaled so that
/// `E(2, 2) = 1`, or to unit Frobenius norm when that entry vanishes.
/// Candidates whose eigenvector scale entry vanishes are dropped.
///
/// # Errors
///
/// Returns [`FivePointError::NumericOverflow`] when real eigenvalues exist but
/// every one of them was dropped.
pub fn compute_e_matrices(
    basis: &NullSpaceBasis,
    action_matrix: &faer::Mat<f64>,
    tol: &NumericTol,
) -> Result<Vec<EssentialMatrix>, FivePointError> {
    assert_eq!(action_matrix.nrows(), ACTION_SIZE);
    assert_eq!(action_matrix.ncols(), ACTION_SIZE);

    let eig = action_matrix.eigendecomposition::<c64>();
    let eigenvalues = eig.s().column_vector();
    let eigenvectors = eig.u();

    let mut ems = Vec::with_capacity(ACTION_SIZE);
    let mut overflow = None;

    for i in 0..ACTION_SIZE {
        let lambda = eigenvalues.read(i);
        if lambda.im.abs() > tol.tolerance {
            continue;
        }

        let v = |k: usize| eigenvectors.read(k, i);
        let norm = (0..ACTION_SIZE).map(|k| modulus(v(k)).powi(2)).sum::<f64>().sqrt();
        let w = v(9);
        if !(modulus(w) > tol.scale * norm) {
            log::debug!("dropping eigenvalue {}: vanishing scale component", lambda.re);
            overflow = Some(FivePointError::NumericOverflow {
                what: "eigenvector scale component",
                value: modulus(w),
            });
            continue;
        }

        let x = ratio_re(v(6), w);
        let y = ratio_re(v(7), w);
        let z = ratio_re(v(8), w);

        match back_substitute(basis, x, y, z, tol) {
            // the coefficient vector is indexed by (left, right) coordinates
            Some(linear_e) => ems.push(EssentialMatrix::from_vec9(&linear_e).transpose()),
            None => {
                log::debug!("dropping eigenvalue {}: non-finite coefficients", lambda.re);
                overflow = Some(FivePointError::NumericOverflow {
                    what: "essential matrix coefficients",
                    value: f64::INFINITY,
                });
            }
        }
    }

    match overflow {
        Some(err) if ems.is_empty() => Err(err),
        _ => Ok(ems),
    }
}
