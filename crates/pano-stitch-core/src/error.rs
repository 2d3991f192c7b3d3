/// Dehomogenization hit a zero third coordinate.
///
/// A candidate homography that sends a finite point to the line at infinity
/// is genuinely invalid for stitching, so this aborts the enclosing
/// estimation or warp instead of being skipped like a bad sample.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("homogeneous transform produced a zero third coordinate")]
pub struct DegenerateTransform;

/// Errors raised while estimating a pairwise homography.
///
/// `SampleExhausted` and `SingularSystem` are recoverable inside the RANSAC
/// loop (the trial is skipped); everything else aborts the estimation.
#[derive(thiserror::Error, Debug)]
pub enum EstimateError {
    #[error("correspondence sets differ in length ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },
    #[error("failed to draw {wanted} distinct sample indices from {available} correspondences")]
    SampleExhausted { wanted: usize, available: usize },
    #[error("DLT system is singular for the sampled correspondences")]
    SingularSystem,
    #[error(transparent)]
    DegenerateTransform(#[from] DegenerateTransform),
    #[error("no candidate homography gathered inlier support after {trials} trials")]
    NoConsensus { trials: usize },
    #[error("correspondence matching failed")]
    Matching(#[source] Box<dyn std::error::Error + Send + Sync>),
}
