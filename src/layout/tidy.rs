//! Tidy hierarchical tree layout (Reingold–Tilford, with Buchheim's
//! linear-time contour walks), matching d3-hierarchy's `tree()` including
//! its default separation and fit-to-size normalization.

use super::Hierarchy;

/// Working node for the two walks. Index 0 is a synthetic super-root whose
/// only child is the real root; hierarchy node `i` maps to index `i + 1`.
#[derive(Debug, Clone, Default)]
struct Walk {
    parent: usize,
    children: Vec<usize>,
    /// Index among siblings.
    rank: usize,
    /// Preliminary x.
    prelim: f64,
    /// Aggregated subtree offset ("mod").
    shift_mod: f64,
    change: f64,
    shift: f64,
    /// Contour thread to the next node on the same contour level.
    thread: Option<usize>,
    /// Resolved ancestor for conflict attribution.
    ancestor: usize,
    /// Per-parent default ancestor, updated as siblings are processed.
    default_ancestor: Option<usize>,
}

/// Lay out the hierarchy into `[0, dx]` on the sibling axis and `[0, dy]`
/// on the depth axis. Returns `(sibling, depth)` per hierarchy index.
pub(super) fn layout(h: &Hierarchy, dx: f64, dy: f64) -> Vec<(f64, f64)> {
    let n = h.len();
    let mut w = build_walks(h);

    for v in post_order(&w) {
        first_walk(&mut w, v);
    }
    w[0].shift_mod = -w[1].prelim;
    let mut x = vec![0.0; n];
    for v in pre_order(&w) {
        x[v - 1] = w[v].prelim + w[w[v].parent].shift_mod;
        let parent_mod = w[w[v].parent].shift_mod;
        w[v].shift_mod += parent_mod;
    }

    normalize(h, &x, dx, dy)
}

fn build_walks(h: &Hierarchy) -> Vec<Walk> {
    let n = h.len();
    let mut w = vec![Walk::default(); n + 1];
    w[0].children = vec![1];
    for v in 0..n {
        let idx = v + 1;
        w[idx].parent = h.parents[v].map_or(0, |p| p + 1);
        w[idx].children = h.children[v].iter().map(|&c| c + 1).collect();
        w[idx].ancestor = idx;
        for (rank, &c) in h.children[v].iter().enumerate() {
            w[c + 1].rank = rank;
        }
    }
    w
}

fn separation(w: &[Walk], a: usize, b: usize) -> f64 {
    if w[a].parent == w[b].parent {
        1.0
    } else {
        2.0
    }
}

fn first_walk(w: &mut Vec<Walk>, v: usize) {
    let parent = w[v].parent;
    let siblings = w[parent].children.clone();
    let prev = if w[v].rank > 0 {
        Some(siblings[w[v].rank - 1])
    } else {
        None
    };

    let children = w[v].children.clone();
    if children.is_empty() {
        if let Some(p) = prev {
            w[v].prelim = w[p].prelim + separation(w, v, p);
        }
    } else {
        execute_shifts(w, &children);
        let midpoint = (w[children[0]].prelim + w[children[children.len() - 1]].prelim) / 2.0;
        if let Some(p) = prev {
            w[v].prelim = w[p].prelim + separation(w, v, p);
            w[v].shift_mod = w[v].prelim - midpoint;
        } else {
            w[v].prelim = midpoint;
        }
    }

    let default_ancestor = w[parent].default_ancestor.unwrap_or(siblings[0]);
    let resolved = apportion(w, v, prev, default_ancestor);
    w[parent].default_ancestor = Some(resolved);
}

/// Resolve overlaps between the subtree rooted at `v` and its left
/// siblings by walking the inner contours in lock step.
fn apportion(w: &mut Vec<Walk>, v: usize, prev: Option<usize>, mut ancestor: usize) -> usize {
    let Some(left) = prev else {
        return ancestor;
    };

    let mut vip = v;
    let mut vop = v;
    let mut vim = left;
    let mut vom = w[w[vip].parent].children[0];
    let mut sip = w[vip].shift_mod;
    let mut sop = w[vop].shift_mod;
    let mut sim = w[vim].shift_mod;
    let mut som = w[vom].shift_mod;

    let (vim_next, vip_next) = loop {
        let next_in = next_right(w, vim);
        let next_ip = next_left(w, vip);
        let (Some(im), Some(ip)) = (next_in, next_ip) else {
            break (next_in, next_ip);
        };
        vim = im;
        vip = ip;
        // Outer contours are at least as long as the inner ones by
        // construction, so these always advance alongside vim/vip.
        let (Some(om), Some(op)) = (next_left(w, vom), next_right(w, vop)) else {
            break (next_in, next_ip);
        };
        vom = om;
        vop = op;
        w[vop].ancestor = v;
        let gap = w[vim].prelim + sim - (w[vip].prelim + sip) + separation(w, vim, vip);
        if gap > 0.0 {
            let moved = conflict_ancestor(w, vim, v, ancestor);
            move_subtree(w, moved, v, gap);
            sip += gap;
            sop += gap;
        }
        sim += w[vim].shift_mod;
        sip += w[vip].shift_mod;
        som += w[vom].shift_mod;
        sop += w[vop].shift_mod;
    };

    if vim_next.is_some() && next_right(w, vop).is_none() {
        w[vop].thread = vim_next;
        w[vop].shift_mod += sim - sop;
    }
    if vip_next.is_some() && next_left(w, vom).is_none() {
        w[vom].thread = vip_next;
        w[vom].shift_mod += sip - som;
        ancestor = v;
    }
    ancestor
}

fn next_left(w: &[Walk], v: usize) -> Option<usize> {
    w[v].children.first().copied().or(w[v].thread)
}

fn next_right(w: &[Walk], v: usize) -> Option<usize> {
    w[v].children.last().copied().or(w[v].thread)
}

fn conflict_ancestor(w: &[Walk], vim: usize, v: usize, fallback: usize) -> usize {
    let candidate = w[vim].ancestor;
    if w[candidate].parent == w[v].parent {
        candidate
    } else {
        fallback
    }
}

fn move_subtree(w: &mut Vec<Walk>, wm: usize, wp: usize, shift: f64) {
    let subtrees = (w[wp].rank - w[wm].rank) as f64;
    let change = shift / subtrees;
    w[wp].change -= change;
    w[wp].shift += shift;
    w[wm].change += change;
    w[wp].prelim += shift;
    w[wp].shift_mod += shift;
}

fn execute_shifts(w: &mut Vec<Walk>, children: &[usize]) {
    let mut shift = 0.0;
    let mut change = 0.0;
    for &c in children.iter().rev() {
        w[c].prelim += shift;
        w[c].shift_mod += shift;
        change += w[c].change;
        shift += w[c].shift + change;
    }
}

/// Shift and scale raw prelim positions so the drawing spans `[0, dx]` on
/// the sibling axis, with a half-separation border on each side, and maps
/// depth linearly onto `[0, dy]`.
fn normalize(h: &Hierarchy, x: &[f64], dx: f64, dy: f64) -> Vec<(f64, f64)> {
    let n = h.len();
    let mut left = 0;
    let mut right = 0;
    let mut bottom = 0;
    for v in 0..n {
        if x[v] < x[left] {
            left = v;
        }
        if x[v] > x[right] {
            right = v;
        }
        if h.depths[v] > h.depths[bottom] {
            bottom = v;
        }
    }
    let border = if left == right {
        1.0
    } else {
        h.separation(left, right) / 2.0
    };
    let tx = border - x[left];
    let kx = dx / (x[right] + border + tx);
    let max_depth = h.depths[bottom];
    let ky = dy / if max_depth == 0 { 1.0 } else { max_depth as f64 };

    (0..n)
        .map(|v| ((x[v] + tx) * kx, h.depths[v] as f64 * ky))
        .collect()
}

/// Post-order over the walk arena, real nodes only.
fn post_order(w: &[Walk]) -> Vec<usize> {
    let mut order = Vec::with_capacity(w.len() - 1);
    let mut stack = vec![1];
    while let Some(v) = stack.pop() {
        order.push(v);
        stack.extend(w[v].children.iter().copied());
    }
    order.reverse();
    order
}

/// Pre-order over the walk arena, real nodes only.
fn pre_order(w: &[Walk]) -> Vec<usize> {
    let mut order = Vec::with_capacity(w.len() - 1);
    let mut stack = vec![1];
    while let Some(v) = stack.pop() {
        order.push(v);
        stack.extend(w[v].children.iter().rev().copied());
    }
    order
}
