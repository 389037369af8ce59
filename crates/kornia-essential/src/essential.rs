//! Essential matrix value type and its algebraic checks.

/// A 3x3 essential matrix stored row-major.
///
/// Relates normalized image points of two calibrated views through
/// `rightᵗ · E · left = 0`, with points lifted to homogeneous coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EssentialMatrix([[f64; 3]; 3]);

impl EssentialMatrix {
    /// Wrap a row-major 3x3 matrix.
    pub fn new(m: [[f64; 3]; 3]) -> Self {
        Self(m)
    }

    /// Build from the nine entries in row-major order.
    pub fn from_vec9(v: &[f64; 9]) -> Self {
        Self([[v[0], v[1], v[2]], [v[3], v[4], v[5]], [v[6], v[7], v[8]]])
    }

    /// Essential matrix `[t]ₓ · R` of a relative pose mapping left-camera
    /// coordinates to right-camera coordinates, `X_r = R · X_l + t`.
    pub fn from_pose(rotation: &[[f64; 3]; 3], translation: &[f64; 3]) -> Self {
        let t = translation;
        let skew = [[0.0, -t[2], t[1]], [t[2], 0.0, -t[0]], [-t[1], t[0], 0.0]];
        Self(matmul(&skew, rotation))
    }

    /// Row-major entries.
    pub fn as_array(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Consume into the row-major entries.
    pub fn into_inner(self) -> [[f64; 3]; 3] {
        self.0
    }

    /// Transposed matrix.
    pub fn transpose(&self) -> Self {
        Self(transpose(&self.0))
    }

    /// Determinant; vanishes for a valid essential matrix.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Residual of the singular value constraint `E·Eᵗ·E − ½·trace(E·Eᵗ)·E`.
    ///
    /// All entries vanish iff the two non-zero singular values are equal (or E is rank 0).
    pub fn trace_constraint(&self) -> [[f64; 3]; 3] {
        let eet = matmul(&self.0, &transpose(&self.0));
        let half_trace = 0.5 * (eet[0][0] + eet[1][1] + eet[2][2]);
        let eete = matmul(&eet, &self.0);
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, val) in row.iter_mut().enumerate() {
                *val = eete[r][c] - half_trace * self.0[r][c];
            }
        }
        out
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> f64 {
        self.0.iter().flatten().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit Frobenius norm. The zero matrix is returned unchanged.
    pub fn normalized(&self) -> Self {
        let norm = self.frobenius_norm();
        if norm == 0.0 {
            return *self;
        }
        Self(self.0.map(|row| row.map(|v| v / norm)))
    }

    /// Algebraic epipolar error `rightᵗ · E · left` of one correspondence.
    pub fn epipolar_residual(&self, right: &[f64; 2], left: &[f64; 2]) -> f64 {
        let l = [left[0], left[1], 1.0];
        let r = [right[0], right[1], 1.0];
        (0..3)
            .map(|i| r[i] * (0..3).map(|j| self.0[i][j] * l[j]).sum::<f64>())
            .sum()
    }

    /// Whether both matrices agree up to a non-zero scale factor (sign included).
    ///
    /// The matrices are compared after normalization to unit Frobenius norm,
    /// entry-wise within `eps`.
    pub fn is_equivalent(&self, other: &EssentialMatrix, eps: f64) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        let close = |sign: f64| {
            a.0.iter()
                .flatten()
                .zip(b.0.iter().flatten())
                .all(|(x, y)| (x - sign * y).abs() <= eps)
        };
        close(1.0) || close(-1.0)
    }
}

impl From<EssentialMatrix> for [[f64; 3]; 3] {
    fn from(e: EssentialMatrix) -> Self {
        e.0
    }
}

fn matmul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}
