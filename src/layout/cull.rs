//! Viewport culling for large trees.
//!
//! Below the threshold the culler is an identity pass: rectangle tests cost
//! more than just drawing a small tree. Above it, only geometry
//! intersecting the visible world rectangle (plus a screen-space margin
//! translated to world space) survives.

use super::{Geometry, LayoutMode, Viewport};

/// Node count above which culling kicks in.
pub const CULL_THRESHOLD: usize = 200;
/// Margin around the visible rectangle, in screen pixels.
pub const SCREEN_MARGIN: f64 = 40.0;

/// Filter `geometry` down to what is visible through `viewport` on a
/// `width` × `height` surface. An edge survives if either endpoint does.
pub fn cull(
    geometry: &Geometry,
    mode: LayoutMode,
    viewport: &Viewport,
    width: f64,
    height: f64,
) -> Geometry {
    if geometry.nodes.len() <= CULL_THRESHOLD {
        return geometry.clone();
    }

    let rect = viewport
        .world_rect(width, height)
        .widened(SCREEN_MARGIN / viewport.scale);
    let (ox, oy) = mode.center_offset(width, height);

    let nodes = geometry
        .nodes
        .iter()
        .filter(|n| rect.contains(n.x + ox, n.y + oy))
        .cloned()
        .collect();
    let edges = geometry
        .edges
        .iter()
        .filter(|e| {
            rect.contains(e.source.0 + ox, e.source.1 + oy)
                || rect.contains(e.target.0 + ox, e.target.1 + oy)
        })
        .copied()
        .collect();

    Geometry { nodes, edges }
}
