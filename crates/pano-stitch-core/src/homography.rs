use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{DegenerateTransform, EstimateError};

/// Planar projective transform `p' ~ H * [x, y, 1]^t`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    pub fn from_array(rows: [[f64; 3]; 3]) -> Self {
        Self::new(Matrix3::from_row_slice(&[
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ]))
    }

    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.h[(0, 0)], self.h[(0, 1)], self.h[(0, 2)]],
            [self.h[(1, 0)], self.h[(1, 1)], self.h[(1, 2)]],
            [self.h[(2, 0)], self.h[(2, 1)], self.h[(2, 2)]],
        ]
    }

    /// Apply to a point and dehomogenize by the third coordinate.
    ///
    /// A zero third coordinate means the transform sends `p` to the line at
    /// infinity; that is reported as [`DegenerateTransform`] rather than
    /// producing non-finite coordinates.
    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Result<Point2<f64>, DegenerateTransform> {
        let v = self.h * Vector3::new(p.x, p.y, 1.0);
        let w = v[2];
        if w == 0.0 {
            return Err(DegenerateTransform);
        }
        Ok(Point2::new(v[0] / w, v[1] / w))
    }

    /// `self · other`: applies `other` first, then `self`.
    pub fn compose(&self, other: &Homography) -> Homography {
        Homography::new(self.h * other.h)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

/// Exact-fit DLT from four point correspondences, `right ~ H * left`.
///
/// The standard cross-product rows are built with unit homogeneous weights
/// and the 9th unknown is pinned to `1.0`, leaving an 8x8 linear system
/// solved by LU. This is a known approximation: a homography whose
/// bottom-right entry is (near) zero has no solution in this
/// parameterization, and such samples surface as `SingularSystem` just like
/// coincident or collinear ones. RANSAC treats that as a skipped trial.
pub fn homography_from_4pt(
    left: &[Point2<f64>; 4],
    right: &[Point2<f64>; 4],
) -> Result<Homography, EstimateError> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for k in 0..4 {
        let x0 = left[k].x;
        let y0 = left[k].y;
        let x1 = right[k].x;
        let y1 = right[k].y;

        // [ 0 0 0  -x0 -y0 -1  x0*y1 y0*y1 ] h = -y1
        let r0 = 2 * k;
        a[(r0, 3)] = -x0;
        a[(r0, 4)] = -y0;
        a[(r0, 5)] = -1.0;
        a[(r0, 6)] = x0 * y1;
        a[(r0, 7)] = y0 * y1;
        b[r0] = -y1;

        // [ x0 y0 1  0 0 0  -x0*x1 -y0*x1 ] h = x1
        let r1 = 2 * k + 1;
        a[(r1, 0)] = x0;
        a[(r1, 1)] = y0;
        a[(r1, 2)] = 1.0;
        a[(r1, 6)] = -x0 * x1;
        a[(r1, 7)] = -y0 * x1;
        b[r1] = x1;
    }

    let h = a.lu().solve(&b).ok_or(EstimateError::SingularSystem)?;

    Ok(Homography::new(Matrix3::new(
        h[0], h[1], h[2], //
        h[3], h[4], h[5], //
        h[6], h[7], 1.0,
    )))
}
