//! Content generation seam.
//!
//! The session only ever sees a [`ContentGenerator`]: something that turns
//! raw text into a tree and expands a single node into a fresh subtree.
//! Output is validated structurally, never semantically. The shipped
//! implementation parses indented outlines offline; an LLM-backed one can
//! live behind the same trait.

use crate::{
    document::Node,
    error::{Error, Result},
};

pub trait ContentGenerator {
    /// Build a whole tree from raw text.
    fn generate(&self, text: &str) -> Result<Node>;

    /// Produce a fresh subtree for the node labelled `label`, given the
    /// original source text the map was built from. The returned node's
    /// children replace the target node's descendants wholesale.
    fn expand(&self, source_text: &str, label: &str) -> Result<Node>;
}

/// Offline generator for indented `-` outlines:
///
/// ```text
/// Dogs
/// - Breeds
///   - Retriever
/// - Care
/// ```
///
/// The first non-blank line is the root; each further line nests under the
/// closest line above it with less indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineGenerator;

impl ContentGenerator for OutlineGenerator {
    fn generate(&self, text: &str) -> Result<Node> {
        let mut lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .peekable();
        let Some(first) = lines.next() else {
            return Err(Error::Generation("empty input text".to_string()));
        };

        let mut root = Node::new(strip_bullet(first));
        // Stack of (indent, path-to-node) for open ancestors.
        let mut open: Vec<(usize, Vec<usize>)> = Vec::new();
        for line in lines {
            let indent = line.len() - line.trim_start().len();
            while open.last().is_some_and(|&(i, _)| i >= indent) {
                open.pop();
            }
            let parent_path = open.last().map(|(_, p)| p.clone()).unwrap_or_default();
            let parent = crate::document::resolve_mut(&mut root, &parent_path)
                .ok_or_else(|| Error::Generation("outline nesting broke".to_string()))?;
            parent.children.push(Node::new(strip_bullet(line)));
            let mut path = parent_path;
            path.push(parent.children.len() - 1);
            open.push((indent, path));
        }
        Ok(root)
    }

    fn expand(&self, source_text: &str, label: &str) -> Result<Node> {
        let outline = self.generate(source_text)?;
        let found = find_label(&outline, label)
            .ok_or_else(|| Error::Generation(format!("no entry '{label}' in source text")))?;
        if found.children.is_empty() {
            return Err(Error::Generation(format!(
                "source text holds no further detail under '{label}'"
            )));
        }
        Ok(found.clone())
    }
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed)
        .trim()
}

fn find_label<'a>(node: &'a Node, label: &str) -> Option<&'a Node> {
    if node.label == label {
        return Some(node);
    }
    node.children.iter().find_map(|c| find_label(c, label))
}
