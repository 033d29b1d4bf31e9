//! Map persistence: one JSON file per mind map under a data directory.
//!
//! The stored shape is the minimal round-trip: the map id, the tree itself
//! and the source text it was generated from (kept so expansion can
//! re-consult the original input). Serialization is structural and
//! order-preserving; a tree has no cycles by construction.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{document::Node, error::Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMap {
    pub id: String,
    pub tree: Node,
    pub source_text: String,
}

#[derive(Debug, Clone)]
pub struct MapStore {
    dir: PathBuf,
}

impl MapStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default store location under the platform data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("mindmap-tui")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, map: &StoredMap) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(map)?;
        fs::write(self.map_path(&map.id), json)?;
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<StoredMap> {
        let json = fs::read_to_string(self.map_path(id))?;
        let map = serde_json::from_str(&json)?;
        Ok(map)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        fs::remove_file(self.map_path(id))?;
        Ok(())
    }

    /// Ids of every stored map, sorted for stable listings.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn map_path(&self, id: &str) -> PathBuf {
        // Ids are slugs produced by the session; anything else would
        // escape the store directory, so normalize defensively on read.
        let safe: String = id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::error::Error;

    fn scratch_store(tag: &str) -> MapStore {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        MapStore::new(std::env::temp_dir().join(format!("mindmap-tui-test-{tag}-{nanos}")))
    }

    fn sample(id: &str) -> StoredMap {
        StoredMap {
            id: id.to_string(),
            tree: Node::with_children("Dogs", vec![Node::new("Breeds"), Node::new("Care")]),
            source_text: "Dogs\n- Breeds\n- Care".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = scratch_store("roundtrip");
        let map = sample("dogs-1");
        store.save(&map).unwrap();
        let loaded = store.load("dogs-1").unwrap();
        assert_eq!(loaded, map);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn list_reports_sorted_ids() {
        let store = scratch_store("list");
        store.save(&sample("b-map")).unwrap();
        store.save(&sample("a-map")).unwrap();
        assert_eq!(store.list().unwrap(), ["a-map", "b-map"]);
        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn missing_map_is_an_io_error() {
        let store = scratch_store("missing");
        assert!(matches!(store.load("nope"), Err(Error::Io(_))));
    }

    #[test]
    fn delete_removes_the_file() {
        let store = scratch_store("delete");
        store.save(&sample("gone")).unwrap();
        store.delete("gone").unwrap();
        assert!(store.list().unwrap().is_empty());
        fs::remove_dir_all(store.dir()).unwrap();
    }
}
