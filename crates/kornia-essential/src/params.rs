use serde::{Deserialize, Serialize};

/// Numeric tolerances used throughout the five-point pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericTol {
    /// Largest `|Im(λ)|` for an action-matrix eigenvalue to count as real.
    pub tolerance: f64,
    /// Smallest admissible `σ5 / σ1` of the 5x9 constraint matrix.
    pub rank: f64,
    /// Smallest admissible pivot, relative to the largest entry of the elimination matrix.
    pub pivot: f64,
    /// Smallest admissible normalizing divisor, relative to the vector it scales.
    pub scale: f64,
}

impl Default for NumericTol {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            rank: 1e-4,
            pivot: 1e-10,
            scale: 1e-12,
        }
    }
}

/// Parameters controlling the five-point solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FivePointParams {
    /// Report failures through `log::warn!` in addition to the debug trace.
    pub verbose: bool,
    /// Shared numeric tolerances.
    pub tol: NumericTol,
}

impl FivePointParams {
    /// Create parameters with a single tolerance for both the rank cutoff and
    /// the real-eigenvalue test.
    pub fn new(verbose: bool, tolerance: f64) -> Self {
        Self {
            verbose,
            tol: NumericTol {
                tolerance,
                rank: tolerance,
                ..Default::default()
            },
        }
    }

    /// Parse parameters from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
