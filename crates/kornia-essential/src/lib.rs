#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Essential
//!
//! Minimal relative-pose hypotheses from five point correspondences.
//!
//! ## Key Features
//!
//! - **Five-point solver**: Nistér's algorithm through a Groebner-basis action matrix
//! - **Explicit degeneracy reporting**: rank-deficient inputs fail instead of producing garbage
//! - **RANSAC friendly**: stateless, allocation-light, one call per minimal sample
//!
//! ## Example
//!
//! ```rust
//! use kornia_essential::{solve_five_point, EssentialMatrix, FivePointParams};
//!
//! // relative pose: small rotation about y and a sideways translation
//! let (s, c) = 0.1f64.sin_cos();
//! let rotation = [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]];
//! let translation = [1.0, 0.2, 0.1];
//!
//! let world = [
//!     [-1.0, -0.8, 5.0],
//!     [1.2, -0.5, 4.0],
//!     [0.4, 1.0, 6.0],
//!     [-0.9, 0.7, 4.5],
//!     [0.8, 0.2, 3.5],
//! ];
//!
//! let mut left = Vec::new();
//! let mut right = Vec::new();
//! for p in world.iter() {
//!     let q: Vec<f64> = (0..3)
//!         .map(|i| (0..3).map(|j| rotation[i][j] * p[j]).sum::<f64>() + translation[i])
//!         .collect();
//!     left.push([p[0] / p[2], p[1] / p[2]]);
//!     right.push([q[0] / q[2], q[1] / q[2]]);
//! }
//!
//! let candidates = solve_five_point(&right, &left, &FivePointParams::default())?;
//! let truth = EssentialMatrix::from_pose(&rotation, &translation);
//! assert!(candidates.iter().any(|e| e.is_equivalent(&truth, 1e-6)));
//! # Ok::<(), kornia_essential::FivePointError>(())
//! ```

/// Action matrix assembly.
pub mod action;

/// Cubic constraint polynomials on the essential matrix family.
pub mod constraints;

/// Elimination of the cubic monomials from the constraint system.
pub mod elimination;

/// Error types for the five-point solver.
pub mod error;

/// Essential matrix value type.
pub mod essential;

/// Null space extraction from the epipolar constraints.
pub mod nullspace;

/// Solver parameters and numeric tolerances.
pub mod params;

/// Polynomial arithmetic over a fixed cubic monomial basis.
pub mod polynomial;

/// Eigen-decomposition of the action matrix and back-substitution.
pub mod resolve;

/// Solver entry points.
pub mod solver;

pub use error::{DegeneracyKind, FivePointError};
pub use essential::EssentialMatrix;
pub use params::{FivePointParams, NumericTol};
pub use solver::{solve_five_point, EssentialSolver, FivePoint};
