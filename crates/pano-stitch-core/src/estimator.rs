//! Estimation seams: the consumed correspondence contract and the exposed
//! homography-estimation capability.

use nalgebra::Point2;

use crate::error::EstimateError;
use crate::homography::Homography;
use crate::image::RgbImageView;
use crate::ransac::{estimate_ransac, RansacParams};

/// Paired points, `left[i] <-> right[i]`.
#[derive(Clone, Debug, Default)]
pub struct Correspondences {
    pub left: Vec<Point2<f64>>,
    pub right: Vec<Point2<f64>>,
}

/// Upstream collaborator producing point correspondences for two images
/// (feature detection, descriptor matching and ratio-test filtering all
/// live behind this seam). Failures propagate; they are never retried here.
pub trait CorrespondenceProvider {
    fn match_points(
        &self,
        a: &RgbImageView<'_>,
        b: &RgbImageView<'_>,
    ) -> Result<Correspondences, Box<dyn std::error::Error + Send + Sync>>;
}

/// Capability of estimating `H` with `p_b ~ H * p_a` for two images.
///
/// The composer and stitcher depend only on this trait, so tests can inject
/// deterministic estimators returning pre-canned matrices.
pub trait HomographyEstimator {
    fn estimate_homography(
        &self,
        a: &RgbImageView<'_>,
        b: &RgbImageView<'_>,
    ) -> Result<Homography, EstimateError>;
}

/// The shipped estimator: correspondences from a provider, then seeded
/// RANSAC over the 4-point DLT.
pub struct RansacEstimator<P> {
    provider: P,
    params: RansacParams,
}

impl<P> RansacEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            params: RansacParams::default(),
        }
    }

    pub fn with_params(provider: P, params: RansacParams) -> Self {
        Self { provider, params }
    }
}

impl<P: CorrespondenceProvider> HomographyEstimator for RansacEstimator<P> {
    fn estimate_homography(
        &self,
        a: &RgbImageView<'_>,
        b: &RgbImageView<'_>,
    ) -> Result<Homography, EstimateError> {
        let matches = self
            .provider
            .match_points(a, b)
            .map_err(EstimateError::Matching)?;
        estimate_ransac(&matches.left, &matches.right, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbImage;

    struct CannedProvider {
        matches: Correspondences,
    }

    impl CorrespondenceProvider for CannedProvider {
        fn match_points(
            &self,
            _a: &RgbImageView<'_>,
            _b: &RgbImageView<'_>,
        ) -> Result<Correspondences, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.matches.clone())
        }
    }

    struct FailingProvider;

    impl CorrespondenceProvider for FailingProvider {
        fn match_points(
            &self,
            _a: &RgbImageView<'_>,
            _b: &RgbImageView<'_>,
        ) -> Result<Correspondences, Box<dyn std::error::Error + Send + Sync>> {
            Err("descriptor matching found nothing".into())
        }
    }

    #[test]
    fn estimates_through_the_provider_seam() {
        let truth = Homography::from_array([
            [1.0, 0.0, 25.0],
            [0.0, 1.0, -10.0],
            [0.0, 0.0, 1.0],
        ]);
        let left: Vec<_> = [
            (3.0, 4.0),
            (120.0, 15.0),
            (40.0, 90.0),
            (150.0, 140.0),
            (77.0, 52.0),
            (10.0, 130.0),
        ]
        .into_iter()
        .map(|(x, y)| Point2::new(x, y))
        .collect();
        let right: Vec<_> = left.iter().map(|&p| truth.apply(p).unwrap()).collect();

        let est = RansacEstimator::new(CannedProvider {
            matches: Correspondences { left, right },
        });

        let a = RgbImage::black(8, 8);
        let b = RgbImage::black(8, 8);
        let h = est
            .estimate_homography(&a.as_view(), &b.as_view())
            .expect("estimate");
        let p = h.apply(Point2::new(50.0, 60.0)).unwrap();
        assert!((p - Point2::new(75.0, 50.0)).norm() < 1e-6);
    }

    #[test]
    fn provider_failure_propagates_as_matching_error() {
        let est = RansacEstimator::new(FailingProvider);
        let a = RgbImage::black(8, 8);
        let b = RgbImage::black(8, 8);
        let err = est
            .estimate_homography(&a.as_view(), &b.as_view())
            .unwrap_err();
        assert!(matches!(err, EstimateError::Matching(_)));
    }
}
