//! Action matrix for multiplication by `x` in the quotient ring.

/// Size of the quotient-ring monomial basis `[x² xy y² xz yz z² x y z 1]`.
pub const ACTION_SIZE: usize = 10;

/// Groebner rows holding `x·x²`, `x·xy`, `x·y²`, `x·xz`, `x·yz`, `x·z²`.
const GROEBNER_ROWS: [usize; 6] = [0, 1, 2, 4, 5, 7];

/// Unit entries mapping `x·x`, `x·y`, `x·z` and `x·1` onto basis monomials.
const SHIFT_ENTRIES: [(usize, usize); 4] = [(6, 0), (7, 1), (8, 3), (9, 6)];

/// Assemble the 10x10 action matrix `M` with `M · b = x · b`, where `b` is the
/// quotient-ring monomial vector evaluated at a solution.
///
/// Rows 0-5 are the negated Groebner rows of the six products that fall into
/// the cubic block; rows 6-9 are single unit entries for the products that
/// stay in the basis.
pub fn compute_action_matrix(groebner_basis: &faer::Mat<f64>) -> faer::Mat<f64> {
    assert_eq!(groebner_basis.nrows(), ACTION_SIZE);
    assert_eq!(groebner_basis.ncols(), ACTION_SIZE);

    let mut action = faer::Mat::<f64>::zeros(ACTION_SIZE, ACTION_SIZE);
    for (dst, &src) in GROEBNER_ROWS.iter().enumerate() {
        for j in 0..ACTION_SIZE {
            action.write(dst, j, -groebner_basis.read(src, j));
        }
    }
    for &(i, j) in SHIFT_ENTRIES.iter() {
        action.write(i, j, 1.0);
    }
    action
}
