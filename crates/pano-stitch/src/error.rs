use pano_stitch_core::{DegenerateTransform, EstimateError};

/// Errors aborting a panorama build. There is no partial success: a stitch
/// either returns a complete canvas or one of these.
#[derive(thiserror::Error, Debug)]
pub enum StitchError {
    #[error("no images to stitch")]
    NoImages,
    #[error("parent table length {parents} does not match image count {images}")]
    ParentCount { images: usize, parents: usize },
    #[error("homography estimation failed for images {child} -> {parent}")]
    EdgeEstimation {
        child: usize,
        parent: usize,
        #[source]
        source: EstimateError,
    },
    #[error("image tree references edge {child} -> {parent} with no estimated homography")]
    InvalidTree { child: usize, parent: usize },
    #[error("root-frame homography for image {image} is not invertible")]
    SingularHomography { image: usize },
    #[error(transparent)]
    DegenerateTransform(#[from] DegenerateTransform),
}
