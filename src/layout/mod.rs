//! Layout engine: turns a tree snapshot into flat 2-D geometry.
//!
//! The engine is a pure function over a detached JSON snapshot of the tree;
//! it never touches the mutable document. Two modes are supported: a tidy
//! hierarchical tree (depth on the x axis, root at the left margin) and a
//! radial cluster (leaf-proportional angles, radius by depth). Positions are
//! pinned across recomputation through a [`PositionCache`] keyed by each
//! node's label path, so a local edit does not reshuffle the whole picture.

pub mod cull;
pub mod minimap;
pub mod worker;

mod cluster;
mod stability;
mod tidy;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use stability::PositionCache;

use crate::document::Node;

/// Screen margin kept around the hierarchical layout and the radial disc.
const LAYOUT_MARGIN: f64 = 40.0;
/// Extra margin on the depth axis, so root labels fit left of their point.
const DEPTH_MARGIN: f64 = 80.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Hierarchical,
    Radial,
}

impl LayoutMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hierarchical => Self::Radial,
            Self::Radial => Self::Hierarchical,
        }
    }

    /// Radial coordinates are relative to the surface center; hierarchical
    /// ones start at the origin. Offset to add before any screen-space test.
    pub fn center_offset(self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Self::Hierarchical => (0.0, 0.0),
            Self::Radial => (width / 2.0, height / 2.0),
        }
    }
}

/// Side of its point a node label is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

/// One positioned node. Never mutated after the engine emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Structural key: ancestor labels from root to this node, '/'-joined.
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub has_children: bool,
    pub anchor: TextAnchor,
    /// Radial lower-half labels are flipped 180° so they stay readable.
    pub rotated: bool,
}

/// One parent-child connector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: (f64, f64),
    pub target: (f64, f64),
}

/// Full output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

/// Current pan/zoom transform, owned by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// World-space rectangle visible through this transform, from the
    /// inverse of `screen = world * scale + translate`.
    pub fn world_rect(&self, width: f64, height: f64) -> WorldRect {
        WorldRect {
            min_x: -self.translate_x / self.scale,
            min_y: -self.translate_y / self.scale,
            max_x: (width - self.translate_x) / self.scale,
            max_y: (height - self.translate_y) / self.scale,
        }
    }
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl WorldRect {
    pub fn widened(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Flattened, pre-order view of one tree snapshot, shared by both layouts.
pub(crate) struct Hierarchy {
    labels: Vec<String>,
    keys: Vec<String>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    depths: Vec<usize>,
}

impl Hierarchy {
    fn from_node(root: &Node) -> Self {
        let mut h = Self {
            labels: Vec::new(),
            keys: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            depths: Vec::new(),
        };
        h.push(root, None, 0);
        h
    }

    fn push(&mut self, node: &Node, parent: Option<usize>, depth: usize) -> usize {
        let idx = self.labels.len();
        let key = match parent {
            Some(p) => format!("{}/{}", self.keys[p], node.label),
            None => node.label.clone(),
        };
        self.labels.push(node.label.clone());
        self.keys.push(key);
        self.parents.push(parent);
        self.children.push(Vec::with_capacity(node.children.len()));
        self.depths.push(depth);
        for child in &node.children {
            let c = self.push(child, Some(idx), depth + 1);
            self.children[idx].push(c);
        }
        idx
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    /// Siblings separate by 1, cousins by 2 (d3's default separation).
    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.parents[a] == self.parents[b] {
            1.0
        } else {
            2.0
        }
    }
}

/// Compute geometry for a snapshot. Malformed input degrades to an empty
/// geometry set so a render surface never sees a crash or partial output.
pub fn compute(
    snapshot: &Value,
    mode: LayoutMode,
    width: f64,
    height: f64,
    cache: &mut PositionCache,
) -> Geometry {
    let tree = match Node::from_value(snapshot) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::warn!("layout request dropped: {e}");
            return Geometry::default();
        }
    };
    let hierarchy = Hierarchy::from_node(&tree);
    match mode {
        LayoutMode::Hierarchical => hierarchical(&hierarchy, width, height, cache),
        LayoutMode::Radial => radial(&hierarchy, width, height, cache),
    }
}

fn hierarchical(h: &Hierarchy, width: f64, height: f64, cache: &mut PositionCache) -> Geometry {
    let spread = tidy::layout(h, height - LAYOUT_MARGIN, width - DEPTH_MARGIN);
    // Depth runs along screen x, sibling spread along screen y.
    let fresh: Vec<(f64, f64)> = spread.iter().map(|&(x, y)| (y, x)).collect();
    assemble(h, &fresh, cache, |i| {
        if h.children[i].is_empty() {
            (TextAnchor::Start, false)
        } else {
            (TextAnchor::End, false)
        }
    })
}

fn radial(h: &Hierarchy, width: f64, height: f64, cache: &mut PositionCache) -> Geometry {
    let radius = width.min(height) / 2.0 - LAYOUT_MARGIN;
    let polar = cluster::layout(h, TAU, radius);
    let fresh: Vec<(f64, f64)> = polar
        .iter()
        .map(|&(angle, r)| cluster::radial_point(angle, r))
        .collect();
    assemble(h, &fresh, cache, |i| {
        let angle = polar[i].0;
        if angle < PI {
            (TextAnchor::Start, false)
        } else {
            (TextAnchor::End, true)
        }
    })
}

fn assemble(
    h: &Hierarchy,
    fresh: &[(f64, f64)],
    cache: &mut PositionCache,
    style: impl Fn(usize) -> (TextAnchor, bool),
) -> Geometry {
    let mut nodes = Vec::with_capacity(h.len());
    for i in 0..h.len() {
        let (x, y) = cache.advance(&h.keys[i], fresh[i]);
        let (anchor, rotated) = style(i);
        nodes.push(LayoutNode {
            key: h.keys[i].clone(),
            x,
            y,
            label: h.labels[i].clone(),
            has_children: !h.children[i].is_empty(),
            anchor,
            rotated,
        });
    }
    let mut edges = Vec::with_capacity(h.len().saturating_sub(1));
    for (child, parent) in h.parents.iter().enumerate() {
        if let Some(parent) = parent {
            edges.push(LayoutEdge {
                source: fresh[*parent],
                target: fresh[child],
            });
        }
    }
    Geometry { nodes, edges }
}
