//! Radial cluster layout (dendrogram), matching d3-hierarchy's `cluster()`:
//! leaves are spread by separation along the first axis, internal nodes sit
//! at the mean of their children, and the second axis grows toward the
//! leaves. With a `[2π, radius]` size this yields the angular subdivision
//! the radial mind map uses.
//!
//! Adding a leaf anywhere changes the leaf spread and therefore every
//! angle; that global reallocation is inherent to this layout and is the
//! reason radial mode leans harder on the position cache than the
//! hierarchical one.

use std::f64::consts::FRAC_PI_2;

use super::Hierarchy;

/// Lay out the hierarchy into `(first-axis, second-axis)` per node, with
/// the first axis spanning `[0, dx]` and the second `[0, dy]`.
pub(super) fn layout(h: &Hierarchy, dx: f64, dy: f64) -> Vec<(f64, f64)> {
    let n = h.len();
    let mut x = vec![0.0_f64; n];
    let mut y = vec![0.0_f64; n];

    let mut prev_leaf: Option<usize> = None;
    let mut spread = 0.0;
    for v in post_order(h) {
        let children = &h.children[v];
        if children.is_empty() {
            x[v] = prev_leaf.map_or(0.0, |p| {
                spread += h.separation(v, p);
                spread
            });
            y[v] = 0.0;
            prev_leaf = Some(v);
        } else {
            x[v] = children.iter().map(|&c| x[c]).sum::<f64>() / children.len() as f64;
            y[v] = 1.0 + children.iter().map(|&c| y[c]).fold(0.0, f64::max);
        }
    }

    let left = leftmost_leaf(h);
    let right = rightmost_leaf(h);
    let x0 = x[left] - h.separation(left, right) / 2.0;
    let x1 = x[right] + h.separation(right, left) / 2.0;
    let root_height = y[0];

    (0..n)
        .map(|v| {
            let nx = (x[v] - x0) / (x1 - x0) * dx;
            let ny = if root_height > 0.0 {
                (1.0 - y[v] / root_height) * dy
            } else {
                0.0
            };
            (nx, ny)
        })
        .collect()
}

/// Polar to Cartesian with angle 0 pointing up, growing clockwise.
pub(super) fn radial_point(angle: f64, radius: f64) -> (f64, f64) {
    (
        (angle - FRAC_PI_2).cos() * radius,
        (angle - FRAC_PI_2).sin() * radius,
    )
}

fn leftmost_leaf(h: &Hierarchy) -> usize {
    let mut v = 0;
    while let Some(&first) = h.children[v].first() {
        v = first;
    }
    v
}

fn rightmost_leaf(h: &Hierarchy) -> usize {
    let mut v = 0;
    while let Some(&last) = h.children[v].last() {
        v = last;
    }
    v
}

fn post_order(h: &Hierarchy) -> Vec<usize> {
    let mut order = Vec::with_capacity(h.len());
    let mut stack = vec![0];
    while let Some(v) = stack.pop() {
        order.push(v);
        stack.extend(h.children[v].iter().copied());
    }
    order.reverse();
    order
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use super::*;
    use crate::document::Node;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_leaves_face_opposite_directions() {
        let h = Hierarchy::from_node(&Node::with_children(
            "Dogs",
            vec![Node::new("Breeds"), Node::new("Care")],
        ));
        let polar = layout(&h, TAU, 160.0);
        // Root at the full-turn midpoint, radius 0.
        assert!(close(polar[0].0, PI));
        assert!(close(polar[0].1, 0.0));
        // Leaves at a quarter and three quarters of the turn, full radius.
        assert!(close(polar[1].0, PI / 2.0));
        assert!(close(polar[2].0, 3.0 * PI / 2.0));
        assert!(close(polar[1].1, 160.0));
        assert!(close(polar[2].1, 160.0));
    }

    #[test]
    fn radial_point_maps_quarter_turn_to_positive_x() {
        let (x, y) = radial_point(PI / 2.0, 160.0);
        assert!(close(x, 160.0));
        assert!(close(y, 0.0));
        let (x, y) = radial_point(3.0 * PI / 2.0, 160.0);
        assert!(close(x, -160.0));
        assert!(close(y, 0.0));
    }

    #[test]
    fn internal_nodes_sit_between_their_leaves() {
        let h = Hierarchy::from_node(&Node::with_children(
            "r",
            vec![
                Node::with_children("a", vec![Node::new("a1"), Node::new("a2")]),
                Node::new("b"),
            ],
        ));
        let polar = layout(&h, TAU, 100.0);
        let mid = (polar[2].0 + polar[3].0) / 2.0;
        assert!(close(polar[1].0, mid));
        // Depth grows outward: root 0, internal half, leaves full.
        assert!(close(polar[0].1, 0.0));
        assert!(close(polar[1].1, 50.0));
        assert!(close(polar[2].1, 100.0));
        assert!(close(polar[4].1, 100.0));
    }

    #[test]
    fn single_node_sits_at_the_center() {
        let h = Hierarchy::from_node(&Node::new("only"));
        let polar = layout(&h, TAU, 160.0);
        assert!(close(polar[0].1, 0.0));
    }
}
