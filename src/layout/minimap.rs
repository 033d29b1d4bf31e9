//! Minimap projection: the whole tree scaled into a quarter-size viewport,
//! plus a rectangle marking the main surface's visible region. The minimap
//! never culls — it exists to keep global context on screen.

use super::{Geometry, LayoutEdge, LayoutMode, Viewport};

/// Minimap edge length relative to the main surface.
pub const MINIMAP_RATIO: f64 = 0.25;

/// Rectangle in minimap coordinates marking the visible main-surface area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Projected geometry in minimap pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    pub nodes: Vec<(f64, f64)>,
    pub edges: Vec<LayoutEdge>,
    pub view: ViewRect,
    pub width: f64,
    pub height: f64,
}

/// Project the full (unculled) geometry. Radial coordinates are shifted to
/// the minimap center first, mirroring the main surface's own transform.
pub fn project(
    geometry: &Geometry,
    mode: LayoutMode,
    viewport: &Viewport,
    width: f64,
    height: f64,
) -> Minimap {
    let sx = MINIMAP_RATIO;
    let sy = MINIMAP_RATIO;
    let (ox, oy) = mode.center_offset(width * sx, height * sy);

    let nodes = geometry
        .nodes
        .iter()
        .map(|n| (n.x * sx + ox, n.y * sy + oy))
        .collect();
    let edges = geometry
        .edges
        .iter()
        .map(|e| LayoutEdge {
            source: (e.source.0 * sx + ox, e.source.1 * sy + oy),
            target: (e.target.0 * sx + ox, e.target.1 * sy + oy),
        })
        .collect();

    let view = ViewRect {
        x: -viewport.translate_x / viewport.scale * sx,
        y: -viewport.translate_y / viewport.scale * sy,
        width: width / viewport.scale * sx,
        height: height / viewport.scale * sy,
    };

    Minimap {
        nodes,
        edges,
        view,
        width: width * sx,
        height: height * sy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutNode, TextAnchor};

    fn geometry() -> Geometry {
        let node = LayoutNode {
            key: "r".to_string(),
            x: 400.0,
            y: 200.0,
            label: "r".to_string(),
            has_children: false,
            anchor: TextAnchor::Start,
            rotated: false,
        };
        Geometry {
            nodes: vec![node],
            edges: vec![LayoutEdge {
                source: (0.0, 0.0),
                target: (400.0, 200.0),
            }],
        }
    }

    #[test]
    fn identity_transform_fills_the_whole_minimap() {
        let mini = project(
            &geometry(),
            LayoutMode::Hierarchical,
            &Viewport::default(),
            600.0,
            400.0,
        );
        assert_eq!(mini.width, 150.0);
        assert_eq!(mini.height, 100.0);
        assert_eq!(mini.view.x, 0.0);
        assert_eq!(mini.view.y, 0.0);
        assert_eq!(mini.view.width, 150.0);
        assert_eq!(mini.view.height, 100.0);
    }

    #[test]
    fn nodes_scale_by_a_quarter() {
        let mini = project(
            &geometry(),
            LayoutMode::Hierarchical,
            &Viewport::default(),
            600.0,
            400.0,
        );
        assert_eq!(mini.nodes[0], (100.0, 50.0));
        assert_eq!(mini.edges[0].target, (100.0, 50.0));
    }

    #[test]
    fn view_rect_tracks_pan_and_zoom() {
        let viewport = Viewport {
            translate_x: -200.0,
            translate_y: 100.0,
            scale: 2.0,
        };
        let mini = project(
            &geometry(),
            LayoutMode::Hierarchical,
            &viewport,
            600.0,
            400.0,
        );
        assert_eq!(mini.view.x, 25.0);
        assert_eq!(mini.view.y, -12.5);
        assert_eq!(mini.view.width, 75.0);
        assert_eq!(mini.view.height, 50.0);
    }

    #[test]
    fn radial_geometry_is_centered() {
        let mut g = geometry();
        g.nodes[0].x = 0.0;
        g.nodes[0].y = 0.0;
        let mini = project(&g, LayoutMode::Radial, &Viewport::default(), 600.0, 400.0);
        assert_eq!(mini.nodes[0], (75.0, 50.0));
    }
}
