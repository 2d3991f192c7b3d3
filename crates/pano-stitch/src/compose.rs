//! Composing pairwise homographies over an image forest.

use std::collections::HashMap;

use log::debug;
use pano_stitch_core::{Homography, HomographyEstimator, RgbImageView};

use crate::error::StitchError;

/// Pairwise child -> parent homographies, keyed by the ordered index pair.
pub type EdgeMap = HashMap<(usize, usize), Homography>;

/// Estimate every parent-link homography once, memoized by `(child, parent)`.
///
/// A single failed pairwise estimation aborts the whole composition,
/// identifying the failing pair.
pub fn estimate_edges<E: HomographyEstimator>(
    estimator: &E,
    images: &[RgbImageView<'_>],
    parents: &[Option<usize>],
) -> Result<EdgeMap, StitchError> {
    let mut edges = EdgeMap::new();
    for (i, &parent) in parents.iter().enumerate() {
        if let Some(p) = parent {
            debug!("estimating edge homography {i} -> {p}");
            let h = estimator
                .estimate_homography(&images[i], &images[p])
                .map_err(|source| StitchError::EdgeEstimation {
                    child: i,
                    parent: p,
                    source,
                })?;
            edges.insert((i, p), h);
        }
    }
    Ok(edges)
}

/// Walk every parent chain, accumulating the homography that maps each image
/// into the coordinate frame of its ultimate root. Each edge maps a child
/// frame into its parent's, so ancestor edges are applied on the left: for a
/// chain `2 -> 1 -> 0` the result is `H(1->0) * H(2->1)`.
///
/// Cycles in `parents` are a caller precondition (the forest is not
/// validated beyond the memoized-edge lookup); a parent link with no edge in
/// the map is an [`StitchError::InvalidTree`].
pub fn compose_root_frames(
    edges: &EdgeMap,
    parents: &[Option<usize>],
) -> Result<Vec<Homography>, StitchError> {
    let mut roots = Vec::with_capacity(parents.len());
    for i in 0..parents.len() {
        let mut h = Homography::identity();
        let mut p = i;
        while let Some(q) = parents[p] {
            let edge = edges
                .get(&(p, q))
                .ok_or(StitchError::InvalidTree { child: p, parent: q })?;
            // The accumulated map lands in p's frame; the edge lifts it
            // into q's.
            h = edge.compose(&h);
            p = q;
        }
        roots.push(h);
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn h(rows: [[f64; 3]; 3]) -> Homography {
        Homography::from_array(rows)
    }

    #[test]
    fn chain_composition_matches_explicit_product() {
        // 2 -> 1 -> 0
        let h10 = h([[1.1, 0.01, 30.0], [0.02, 0.95, -5.0], [0.0001, 0.0, 1.0]]);
        let h21 = h([[0.9, -0.03, 55.0], [0.01, 1.05, 12.0], [0.0, 0.0002, 1.0]]);

        let mut edges = EdgeMap::new();
        edges.insert((1, 0), h10);
        edges.insert((2, 1), h21);

        let roots = compose_root_frames(&edges, &[None, Some(0), Some(1)]).expect("compose");

        let expected = h10.compose(&h21);
        let got = roots[2].to_array();
        let want = expected.to_array();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(got[i][j], want[i][j], epsilon = 1e-12);
            }
        }

        let id = roots[0].to_array();
        for (i, row) in id.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                assert_relative_eq!(*v, if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn missing_edge_is_an_invalid_tree() {
        let mut edges = EdgeMap::new();
        edges.insert((2, 1), Homography::identity());

        let err = compose_root_frames(&edges, &[None, Some(0), Some(1)]).unwrap_err();
        assert!(matches!(
            err,
            StitchError::InvalidTree { child: 1, parent: 0 }
        ));
    }
}
