use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::consts::PROJECTION_W_EPSILON;
use crate::error::{CrosswalkError, Result};

/// A 3x3 projective transform with `m[(2, 2)] == 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    pub m: Matrix3<f64>,
}

impl Homography {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Solve the transform mapping each `src[i]` onto `dst[i]`.
    ///
    /// The four correspondences give an 8x8 linear system in the first eight
    /// entries of `H`, solved by LU decomposition.
    pub fn from_correspondences(src: &[[f64; 2]; 4], dst: &[[f64; 2]; 4]) -> Result<Self> {
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for i in 0..4 {
            let [x, y] = src[i];
            let [u, v] = dst[i];
            let (r0, r1) = (2 * i, 2 * i + 1);

            a[(r0, 0)] = x;
            a[(r0, 1)] = y;
            a[(r0, 2)] = 1.0;
            a[(r0, 6)] = -u * x;
            a[(r0, 7)] = -u * y;
            b[r0] = u;

            a[(r1, 3)] = x;
            a[(r1, 4)] = y;
            a[(r1, 5)] = 1.0;
            a[(r1, 6)] = -v * x;
            a[(r1, 7)] = -v * y;
            b[r1] = v;
        }

        let h = a
            .lu()
            .solve(&b)
            .filter(|h| h.iter().all(|v| v.is_finite()))
            .ok_or(CrosswalkError::SingularTransform)?;

        Ok(Self {
            m: Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0),
        })
    }

    /// Project a 2D point: H * [x, y, 1]^T -> [u, v].
    pub fn project(&self, x: f64, y: f64) -> [f64; 2] {
        let p = self.m * Vector3::new(x, y, 1.0);
        if p[2].abs() < PROJECTION_W_EPSILON {
            return [f64::NAN, f64::NAN];
        }
        [p[0] / p[2], p[1] / p[2]]
    }
}
