//! Position stability across layout recomputations.
//!
//! Keyed by structural identity (the label path from root), not index
//! paths, so sibling insertions and removals do not disturb the keys of
//! unaffected nodes. Entries are never evicted within a session; the cache
//! is cleared only when an unrelated tree is loaded.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PositionCache {
    slots: HashMap<String, (f64, f64)>,
}

impl PositionCache {
    /// Return the position to emit for `key` and record `fresh` for the
    /// next pass: the first layout sees raw positions, each later layout
    /// re-emits the previous pass's result. Unaffected nodes therefore hold
    /// still after a local edit, while the cache keeps advancing so the
    /// emitted picture never drifts more than one pass behind.
    pub fn advance(&mut self, key: &str, fresh: (f64, f64)) -> (f64, f64) {
        let held = self.slots.insert(key.to_string(), fresh);
        held.unwrap_or(fresh)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_key_passes_fresh_position_through() {
        let mut cache = PositionCache::default();
        assert_eq!(cache.advance("Dogs/Care", (3.0, 4.0)), (3.0, 4.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn warm_key_emits_previous_pass_and_stores_current() {
        let mut cache = PositionCache::default();
        cache.advance("Dogs", (1.0, 1.0));
        // Second pass: the node moved, but the old position is emitted.
        assert_eq!(cache.advance("Dogs", (9.0, 9.0)), (1.0, 1.0));
        // Third pass: the cache advanced to the second pass's position.
        assert_eq!(cache.advance("Dogs", (9.0, 9.0)), (9.0, 9.0));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut cache = PositionCache::default();
        cache.advance("a", (1.0, 2.0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.advance("a", (5.0, 6.0)), (5.0, 6.0));
    }
}
