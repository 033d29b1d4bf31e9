//! One editing session: exclusive owner of a tree document.
//!
//! All client-visible mutation endpoints live here. Each operation mutates
//! the in-memory tree first and persists only on success, so a failed call
//! leaves both the displayed tree and the stored copy untouched. Every
//! operation hands back the full current tree — callers re-render and
//! re-derive paths from a consistent snapshot rather than patching diffs.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    document::{add_child, remove_node, replace_subtree, resolve, Node},
    error::{Result, TreeError},
    generate::ContentGenerator,
    store::{MapStore, StoredMap},
};

pub struct Session<G> {
    id: String,
    tree: Node,
    source_text: String,
    generator: G,
    store: Option<MapStore>,
}

impl<G: ContentGenerator> Session<G> {
    /// Generate a fresh map from raw text and persist it if a store is
    /// attached.
    pub fn from_text(text: &str, generator: G, store: Option<MapStore>) -> Result<Self> {
        let tree = generator.generate(text)?;
        let session = Self {
            id: new_id(&tree.label),
            tree,
            source_text: text.to_string(),
            generator,
            store,
        };
        session.persist()?;
        tracing::info!(id = %session.id, "created map");
        Ok(session)
    }

    /// Reopen a stored map.
    pub fn load(id: &str, generator: G, store: MapStore) -> Result<Self> {
        let map = store.load(id)?;
        Ok(Self {
            id: map.id,
            tree: map.tree,
            source_text: map.source_text,
            generator,
            store: Some(store),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Append a child labelled `label` under the node at `path`.
    pub fn add_child(&mut self, path: &[usize], label: &str) -> Result<&Node> {
        add_child(&mut self.tree, path, Node::new(label))?;
        self.persist()?;
        tracing::info!(id = %self.id, ?path, label, "added child");
        Ok(&self.tree)
    }

    /// Remove the node at `path` (never the root).
    pub fn remove_node(&mut self, path: &[usize]) -> Result<&Node> {
        remove_node(&mut self.tree, path)?;
        self.persist()?;
        tracing::info!(id = %self.id, ?path, "removed node");
        Ok(&self.tree)
    }

    /// Replace the descendants of the node at `path` with freshly generated
    /// content. The node's own label is preserved; a generation failure
    /// leaves the tree untouched.
    pub fn expand_node(&mut self, path: &[usize]) -> Result<&Node> {
        let label = resolve(&self.tree, path)
            .ok_or(TreeError::NotFound)?
            .label
            .clone();
        let generated = self.generator.expand(&self.source_text, &label)?;
        replace_subtree(&mut self.tree, path, generated.children)?;
        self.persist()?;
        tracing::info!(id = %self.id, ?path, %label, "expanded node");
        Ok(&self.tree)
    }

    fn persist(&self) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        store.save(&StoredMap {
            id: self.id.clone(),
            tree: self.tree.clone(),
            source_text: self.source_text.clone(),
        })
    }
}

/// Slug from the root label plus a timestamp, unique enough for one store.
fn new_id(label: &str) -> String {
    let slug: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .take(24)
        .collect();
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}-{millis:x}", slug.trim_matches('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, generate::OutlineGenerator};

    const TEXT: &str = "Dogs\n- Breeds\n  - Retriever\n- Care";

    fn session() -> Session<OutlineGenerator> {
        Session::from_text(TEXT, OutlineGenerator, None).unwrap()
    }

    #[test]
    fn from_text_generates_the_tree() {
        let s = session();
        assert_eq!(s.tree().label, "Dogs");
        assert_eq!(s.tree().node_count(), 4);
        assert!(s.id().starts_with("dogs-"));
    }

    #[test]
    fn add_child_returns_the_full_tree() {
        let mut s = session();
        let tree = s.add_child(&[1], "Food").unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.children[1].children[0].label, "Food");
    }

    #[test]
    fn failed_mutation_leaves_tree_unchanged() {
        let mut s = session();
        let before = s.tree().clone();
        assert!(s.add_child(&[7], "x").is_err());
        assert!(s.remove_node(&[]).is_err());
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn expand_node_replaces_descendants_from_source_text() {
        let mut s = session();
        // Flatten Breeds first, then expand it back from the source.
        s.remove_node(&[0, 0]).unwrap();
        assert!(s.tree().children[0].children.is_empty());
        let tree = s.expand_node(&[0]).unwrap();
        assert_eq!(tree.children[0].children[0].label, "Retriever");
    }

    #[test]
    fn expand_failure_keeps_the_tree() {
        let mut s = session();
        let before = s.tree().clone();
        // "Care" has no nested outline entries to re-derive.
        let err = s.expand_node(&[1]).unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn persists_after_each_successful_mutation() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("mindmap-tui-session-{nanos}"));
        let store = MapStore::new(&dir);

        let mut s = Session::from_text(TEXT, OutlineGenerator, Some(store.clone())).unwrap();
        let id = s.id().to_string();
        s.add_child(&[1], "Food").unwrap();

        let reopened = Session::load(&id, OutlineGenerator, store).unwrap();
        assert_eq!(reopened.tree(), s.tree());
        assert_eq!(reopened.source_text(), TEXT);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
