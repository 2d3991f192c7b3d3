//! The panorama stitching facade.

use log::info;
use pano_stitch_core::{HomographyEstimator, RgbImage, RgbImageView};

use crate::compose::{compose_root_frames, estimate_edges};
use crate::error::StitchError;
use crate::warp::{canvas_bbox, warp_images};

/// Stitches a set of images into one canvas, given a pairwise homography
/// estimator. Production code plugs in `RansacEstimator`; tests can plug in
/// canned matrices through the same seam.
pub struct PanoramaStitcher<E> {
    estimator: E,
}

impl<E: HomographyEstimator> PanoramaStitcher<E> {
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }

    /// Stitch images forming a forest: `parents[i]` is the image that `i`
    /// is registered against, `None` for roots.
    ///
    /// Pipeline: per-edge pairwise estimation, parent-chain composition into
    /// the root frame, canvas bounding box, inverse warp. Any stage failure
    /// aborts the build; no partial panorama is returned.
    pub fn stitch(
        &self,
        images: &[RgbImageView<'_>],
        parents: &[Option<usize>],
    ) -> Result<RgbImage, StitchError> {
        if images.is_empty() {
            return Err(StitchError::NoImages);
        }
        if parents.len() != images.len() {
            return Err(StitchError::ParentCount {
                images: images.len(),
                parents: parents.len(),
            });
        }

        info!("stitching {} images", images.len());
        let edges = estimate_edges(&self.estimator, images, parents)?;
        let roots = compose_root_frames(&edges, parents)?;
        let bbox = canvas_bbox(images, &roots)?;
        let canvas = warp_images(images, &roots, &bbox)?;
        info!("panorama canvas {}x{}", canvas.width, canvas.height);
        Ok(canvas)
    }

    /// Convenience overload for a linear chain: image 0 is the root and
    /// every other image's parent is its predecessor.
    pub fn stitch_chain(&self, images: &[RgbImageView<'_>]) -> Result<RgbImage, StitchError> {
        let parents: Vec<Option<usize>> = (0..images.len())
            .map(|i| if i == 0 { None } else { Some(i - 1) })
            .collect();
        self.stitch(images, &parents)
    }
}
