//! Panorama stitching on top of `pano-stitch-core`.
//!
//! Given images related by a parent forest and a pairwise
//! [`HomographyEstimator`](pano_stitch_core::HomographyEstimator), this
//! crate composes every image's homography into its root's frame, sizes an
//! output canvas from the transformed corners and inverse-warps every source
//! pixel into it (nearest neighbor, first image wins, no blending).
//!
//! ```no_run
//! use pano_stitch::PanoramaStitcher;
//! use pano_stitch_core::{
//!     CorrespondenceProvider, Correspondences, RansacEstimator, RgbImageView,
//! };
//!
//! struct MyMatcher;
//!
//! impl CorrespondenceProvider for MyMatcher {
//!     fn match_points(
//!         &self,
//!         _a: &RgbImageView<'_>,
//!         _b: &RgbImageView<'_>,
//!     ) -> Result<Correspondences, Box<dyn std::error::Error + Send + Sync>> {
//!         // keypoint detection, matching and ratio-test filtering go here
//!         Ok(Correspondences::default())
//!     }
//! }
//!
//! let raw = vec![0u8; 300 * 200 * 3];
//! let img = RgbImageView { width: 300, height: 200, data: &raw };
//!
//! let stitcher = PanoramaStitcher::new(RansacEstimator::new(MyMatcher));
//! let _panorama = stitcher.stitch_chain(&[img]);
//! ```

mod compose;
mod error;
mod stitcher;
mod warp;

pub use compose::{compose_root_frames, estimate_edges, EdgeMap};
pub use error::StitchError;
pub use stitcher::PanoramaStitcher;
pub use warp::{canvas_bbox, warp_images};
