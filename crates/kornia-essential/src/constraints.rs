//! Cubic constraints on the essential matrix family `E = xX + yY + zZ + W`.

use crate::nullspace::NullSpaceBasis;
use crate::polynomial::Poly3;

/// Number of constraint polynomials: one determinant and nine trace constraints.
pub const NUM_CONSTRAINTS: usize = 10;

/// Express each of the nine entries of `E` as an affine form in `x, y, z`.
///
/// Entry `i` reads `x * basis[0][i] + y * basis[1][i] + z * basis[2][i] + basis[3][i]`.
pub fn entry_polynomials(basis: &NullSpaceBasis) -> [Poly3; 9] {
    std::array::from_fn(|i| Poly3::linear(basis[0][i], basis[1][i], basis[2][i], basis[3][i]))
}

/// Build the ten cubic constraints `det(E) = 0` and `2·E·Eᵗ·E − trace(E·Eᵗ)·E = 0`.
///
/// The entries are read row-major, `e[3 * r + c]` being `E(r, c)`. Both
/// conditions are invariant under transposition so the same system holds for
/// `Eᵗ`.
pub fn constraint_polynomials(basis: &NullSpaceBasis) -> [Poly3; NUM_CONSTRAINTS] {
    let e = entry_polynomials(basis);

    // E = [a b c; d e f; g h i]
    // det(E) = e(ai - gc) + f(bg - ah) + d(ch - bi)
    let det = e[4] * (e[0] * e[8] - e[6] * e[2])
        + e[5] * (e[1] * e[6] - e[0] * e[7])
        + e[3] * (e[2] * e[7] - e[1] * e[8]);

    let sum_of_squares = e.iter().fold(Poly3::zero(), |acc, p| acc + *p * *p);

    // 2 * (E Eᵗ)(r, k) for every pair of rows
    let mut eet = [[Poly3::zero(); 3]; 3];
    for (r, row) in eet.iter_mut().enumerate() {
        for (k, val) in row.iter_mut().enumerate() {
            *val = (e[3 * r] * e[3 * k] + e[3 * r + 1] * e[3 * k + 1] + e[3 * r + 2] * e[3 * k + 2])
                * 2.0;
        }
    }

    let mut constraints = [Poly3::zero(); NUM_CONSTRAINTS];
    constraints[0] = det;
    for (i, constraint) in constraints[1..].iter_mut().enumerate() {
        let (r, c) = (i / 3, i % 3);
        let mut acc = -(e[i] * sum_of_squares);
        // one pass per row block of E (entries 0-2, 3-5, 6-8)
        for k in 0..3 {
            acc = acc + e[3 * k + c] * eet[r][k];
        }
        *constraint = acc;
    }

    constraints
}
