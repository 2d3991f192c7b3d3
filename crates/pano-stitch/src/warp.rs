//! Canvas accumulation and the parallel inverse warp.
//!
//! The warp is the dominant cost center (canvas area x image count in the
//! worst case). Output rows are independent: each reads only immutable
//! inputs and writes its own disjoint slice of the canvas, so the row loop
//! runs on rayon without any synchronization.

use log::debug;
use nalgebra::Point2;
use pano_stitch_core::{Bbox, DegenerateTransform, Homography, RgbImage, RgbImageView};
use rayon::prelude::*;

use crate::error::StitchError;

/// Grow one shared box with every image's corner pixels pushed through its
/// root-frame homography. Corner pixels (not exclusive extents) keep a
/// lone untransformed image's canvas exactly its own size.
pub fn canvas_bbox(
    images: &[RgbImageView<'_>],
    roots: &[Homography],
) -> Result<Bbox, DegenerateTransform> {
    let mut bbox = Bbox::new();
    for (img, h) in images.iter().zip(roots) {
        let w = img.width as f64 - 1.0;
        let hgt = img.height as f64 - 1.0;
        for corner in [
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, hgt),
            Point2::new(0.0, hgt),
        ] {
            bbox.grow(h.apply(corner)?);
        }
    }
    Ok(bbox)
}

/// Inverse-warp every source image into a canvas sized by `bbox`.
///
/// Every root-frame homography is inverted up front; a singular one aborts
/// the warp with no partial canvas. Then, per output pixel and per image in
/// ascending index order, the pixel is mapped back through the inverse,
/// rounded to the nearest source coordinate and copied on the first image
/// that contains it. Unclaimed pixels stay black.
pub fn warp_images(
    images: &[RgbImageView<'_>],
    roots: &[Homography],
    bbox: &Bbox,
) -> Result<RgbImage, StitchError> {
    let inverses: Vec<Homography> = roots
        .iter()
        .enumerate()
        .map(|(i, h)| h.inverse().ok_or(StitchError::SingularHomography { image: i }))
        .collect::<Result<_, _>>()?;

    let width = bbox.width().ceil() as usize + 1;
    let height = bbox.height().ceil() as usize + 1;
    let min = bbox.min();
    debug!("warping {} images into a {width}x{height} canvas", images.len());

    let mut canvas = RgbImage::black(width, height);

    canvas
        .data
        .par_chunks_mut(width * 3)
        .enumerate()
        .try_for_each(|(y, row)| -> Result<(), StitchError> {
            for x in 0..width {
                let dst = Point2::new(x as f64 + min.x, y as f64 + min.y);
                for (img, inv) in images.iter().zip(&inverses) {
                    let src = inv.apply(dst)?;
                    let xs = src.x.round() as i64;
                    let ys = src.y.round() as i64;
                    if img.contains(xs, ys) {
                        let px = img.pixel(xs as usize, ys as usize);
                        row[x * 3..x * 3 + 3].copy_from_slice(&px);
                        break;
                    }
                }
            }
            Ok(())
        })?;

    Ok(canvas)
}
