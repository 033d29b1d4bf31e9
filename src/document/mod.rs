//! The mind-map tree document: nodes, path addressing and mutations.
//!
//! A document is a single rooted, ordered tree. Every node owns its children
//! outright, so structural edits are plain ownership transfers and no cycle
//! can be formed after construction.

mod mutate;
mod node;
mod path;

pub use mutate::{add_child, remove_node, replace_subtree};
pub use node::Node;
pub use path::{resolve, resolve_mut};
