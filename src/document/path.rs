//! Index-path addressing into a tree snapshot.
//!
//! A path is a sequence of child indices; the empty path names the root.
//! Paths are only meaningful against the snapshot they were computed from:
//! any structural edit above or left of a node shifts them.

use super::Node;

/// Walk `children[i]` per step. `None` if any index is out of range.
pub fn resolve<'a>(tree: &'a Node, path: &[usize]) -> Option<&'a Node> {
    let mut node = tree;
    for &idx in path {
        node = node.children.get(idx)?;
    }
    Some(node)
}

/// Mutable variant of [`resolve`], for the mutation engine.
pub fn resolve_mut<'a>(tree: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = tree;
    for &idx in path {
        node = node.children.get_mut(idx)?;
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::with_children(
            "Dogs",
            vec![
                Node::with_children("Breeds", vec![Node::new("Retriever")]),
                Node::new("Care"),
            ],
        )
    }

    #[test]
    fn empty_path_is_root() {
        let tree = sample();
        assert_eq!(resolve(&tree, &[]).unwrap().label, "Dogs");
    }

    #[test]
    fn follows_child_indices() {
        let tree = sample();
        assert_eq!(resolve(&tree, &[0, 0]).unwrap().label, "Retriever");
        assert_eq!(resolve(&tree, &[1]).unwrap().label, "Care");
    }

    #[test]
    fn out_of_range_index_fails() {
        let tree = sample();
        assert!(resolve(&tree, &[2]).is_none());
        assert!(resolve(&tree, &[1, 0]).is_none());
    }

    #[test]
    fn resolve_is_pure() {
        let tree = sample();
        let first = resolve(&tree, &[0, 0]).unwrap().clone();
        let second = resolve(&tree, &[0, 0]).unwrap().clone();
        assert_eq!(first, second);
    }
}
