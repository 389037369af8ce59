//! Dense polynomials of total degree at most three in three variables.
//!
//! Every [`Poly3`] stores one coefficient per monomial of [`MONOMIAL_BASIS`], so
//! a term that vanishes is still present with a zero coefficient and lookups by
//! exponent triple never have to guess.

use std::ops::{Add, Mul, Neg, Sub};

/// Number of monomials of total degree <= 3 in three variables.
pub const NUM_MONOMIALS: usize = 20;

/// Highest total degree representable by [`Poly3`].
pub const MAX_DEGREE: u8 = 3;

/// Exponent triple `(x, y, z)` of a monomial `x^a * y^b * z^c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Monomial(pub u8, pub u8, pub u8);

impl Monomial {
    /// Total degree of the monomial.
    pub const fn degree(&self) -> u8 {
        self.0 + self.1 + self.2
    }

    /// Position of the monomial in [`MONOMIAL_BASIS`], `None` if its degree exceeds three.
    pub fn index(&self) -> Option<usize> {
        MONOMIAL_BASIS.iter().position(|m| m == self)
    }
}

/// Canonical monomial ordering used to flatten the constraint polynomials:
///
/// `x³ x²y xy² y³ x²z xyz y²z xz² yz² z³ | x² xy y² xz yz z² x y z 1`
///
/// The first ten columns are eliminated, the last ten span the quotient ring.
/// The action matrix layout depends on this exact order.
pub const MONOMIAL_BASIS: [Monomial; NUM_MONOMIALS] = [
    Monomial(3, 0, 0),
    Monomial(2, 1, 0),
    Monomial(1, 2, 0),
    Monomial(0, 3, 0),
    Monomial(2, 0, 1),
    Monomial(1, 1, 1),
    Monomial(0, 2, 1),
    Monomial(1, 0, 2),
    Monomial(0, 1, 2),
    Monomial(0, 0, 3),
    Monomial(2, 0, 0),
    Monomial(1, 1, 0),
    Monomial(0, 2, 0),
    Monomial(1, 0, 1),
    Monomial(0, 1, 1),
    Monomial(0, 0, 2),
    Monomial(1, 0, 0),
    Monomial(0, 1, 0),
    Monomial(0, 0, 1),
    Monomial(0, 0, 0),
];

/// Multiplication table of the basis: `PRODUCT_INDEX[i][j]` is the index of
/// `MONOMIAL_BASIS[i] * MONOMIAL_BASIS[j]`, or `None` past degree three.
const PRODUCT_INDEX: [[Option<usize>; NUM_MONOMIALS]; NUM_MONOMIALS] = build_product_table();

const fn find_index(a: u8, b: u8, c: u8) -> Option<usize> {
    let mut k = 0;
    while k < NUM_MONOMIALS {
        let m = MONOMIAL_BASIS[k];
        if m.0 == a && m.1 == b && m.2 == c {
            return Some(k);
        }
        k += 1;
    }
    None
}

const fn build_product_table() -> [[Option<usize>; NUM_MONOMIALS]; NUM_MONOMIALS] {
    let mut table = [[None; NUM_MONOMIALS]; NUM_MONOMIALS];
    let mut i = 0;
    while i < NUM_MONOMIALS {
        let mut j = 0;
        while j < NUM_MONOMIALS {
            let (a, b) = (MONOMIAL_BASIS[i], MONOMIAL_BASIS[j]);
            table[i][j] = find_index(a.0 + b.0, a.1 + b.1, a.2 + b.2);
            j += 1;
        }
        i += 1;
    }
    table
}

/// Polynomial in `x, y, z` of total degree <= 3, stored densely over [`MONOMIAL_BASIS`].
///
/// `degree` is a structural bound (the degree the polynomial was built with),
/// not the degree of its highest non-zero term, so that products are always
/// checked against the representable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poly3 {
    coeffs: [f64; NUM_MONOMIALS],
    degree: u8,
}

impl Default for Poly3 {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly3 {
    /// The zero polynomial.
    pub const fn zero() -> Self {
        Self {
            coeffs: [0.0; NUM_MONOMIALS],
            degree: 0,
        }
    }

    /// Affine form `cx * x + cy * y + cz * z + c`.
    pub fn linear(cx: f64, cy: f64, cz: f64, c: f64) -> Self {
        let mut p = Self::zero();
        p.coeffs[16] = cx;
        p.coeffs[17] = cy;
        p.coeffs[18] = cz;
        p.coeffs[19] = c;
        p.degree = 1;
        p
    }

    /// Builds a polynomial from its dense coefficient row.
    pub fn from_coeffs(coeffs: [f64; NUM_MONOMIALS]) -> Self {
        Self {
            coeffs,
            degree: MAX_DEGREE,
        }
    }

    /// Dense coefficient row in [`MONOMIAL_BASIS`] order.
    pub fn coeffs(&self) -> &[f64; NUM_MONOMIALS] {
        &self.coeffs
    }

    /// Structural degree bound of the polynomial.
    pub fn degree(&self) -> u8 {
        self.degree
    }

    /// Coefficient of `x^a * y^b * z^c`.
    ///
    /// Returns `Some(0.0)` for a vanishing term and `None` only when the
    /// exponent triple lies outside the representable basis.
    pub fn coeff(&self, monomial: Monomial) -> Option<f64> {
        monomial.index().map(|i| self.coeffs[i])
    }

    /// Evaluates the polynomial at `(x, y, z)`.
    pub fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        MONOMIAL_BASIS
            .iter()
            .zip(self.coeffs.iter())
            .map(|(m, c)| c * x.powi(m.0 as i32) * y.powi(m.1 as i32) * z.powi(m.2 as i32))
            .sum()
    }
}

impl Add for Poly3 {
    type Output = Poly3;

    fn add(self, rhs: Poly3) -> Poly3 {
        let mut coeffs = self.coeffs;
        for (c, r) in coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *c += r;
        }
        Poly3 {
            coeffs,
            degree: self.degree.max(rhs.degree),
        }
    }
}

impl Sub for Poly3 {
    type Output = Poly3;

    fn sub(self, rhs: Poly3) -> Poly3 {
        self + (-rhs)
    }
}

impl Neg for Poly3 {
    type Output = Poly3;

    fn neg(self) -> Poly3 {
        self * -1.0
    }
}

impl Mul<f64> for Poly3 {
    type Output = Poly3;

    fn mul(self, rhs: f64) -> Poly3 {
        let mut coeffs = self.coeffs;
        coeffs.iter_mut().for_each(|c| *c *= rhs);
        Poly3 {
            coeffs,
            degree: self.degree,
        }
    }
}

impl Mul for Poly3 {
    type Output = Poly3;

    /// Polynomial product.
    ///
    /// PRECONDITION: the sum of both structural degrees is at most three.
    fn mul(self, rhs: Poly3) -> Poly3 {
        let degree = self.degree + rhs.degree;
        assert!(
            degree <= MAX_DEGREE,
            "product of degree {degree} exceeds the cubic basis"
        );

        let mut coeffs = [0.0; NUM_MONOMIALS];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                // terms above the structural degree are zero, so a missing slot
                // can only pair with a zero coefficient
                if let Some(k) = PRODUCT_INDEX[i][j] {
                    coeffs[k] += a * b;
                }
            }
        }
        Poly3 { coeffs, degree }
    }
}
