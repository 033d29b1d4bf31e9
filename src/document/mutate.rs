//! Structural mutations on a tree document.
//!
//! Every operation resolves its path first and only then touches the tree,
//! so a failed call leaves the document exactly as it was. None of these
//! perform I/O; persistence happens in the session layer after success.

use super::{resolve_mut, Node};
use crate::error::TreeError;

/// Append `child` to the children of the node at `path`.
///
/// Appending is always legal, including onto a leaf.
pub fn add_child(tree: &mut Node, path: &[usize], child: Node) -> Result<(), TreeError> {
    let parent = resolve_mut(tree, path).ok_or(TreeError::NotFound)?;
    parent.children.push(child);
    Ok(())
}

/// Remove the node at `path` from its parent's children.
///
/// The root cannot be removed. Sibling order of the remaining children is
/// preserved; callers re-derive paths from the updated tree.
pub fn remove_node(tree: &mut Node, path: &[usize]) -> Result<(), TreeError> {
    let (&last, parent_path) = path.split_last().ok_or(TreeError::InvalidPath)?;
    let parent = resolve_mut(tree, parent_path).ok_or(TreeError::InvalidPath)?;
    if last >= parent.children.len() {
        return Err(TreeError::InvalidPath);
    }
    parent.children.remove(last);
    Ok(())
}

/// Replace the children of the node at `path` wholesale, keeping its label.
///
/// Used when the generator produces a fresh expansion for one node.
pub fn replace_subtree(
    tree: &mut Node,
    path: &[usize],
    new_children: Vec<Node>,
) -> Result<(), TreeError> {
    let node = resolve_mut(tree, path).ok_or(TreeError::NotFound)?;
    node.children = new_children;
    Ok(())
}
