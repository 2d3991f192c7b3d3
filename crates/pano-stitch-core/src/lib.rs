//! Geometry primitives and robust homography estimation for panorama
//! stitching.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete feature detector, descriptor matcher or image
//! codec; correspondences arrive through the [`CorrespondenceProvider`]
//! seam and pixels through borrowed [`RgbImageView`] buffers.

mod bbox;
mod error;
mod estimator;
mod homography;
mod image;
mod logger;
mod ransac;

pub use bbox::Bbox;
pub use error::{DegenerateTransform, EstimateError};
pub use estimator::{CorrespondenceProvider, Correspondences, HomographyEstimator, RansacEstimator};
pub use homography::{homography_from_4pt, Homography};
pub use image::{RgbImage, RgbImageView};
pub use logger::init_with_level;
pub use ransac::{estimate_ransac, RansacParams, SAMPLE_SIZE};
