//! Keyed-map state addressed by exact key.
//!
//! The container is an [`IndexMap`], so entries keep their insertion order:
//! overwriting a key leaves it where it was, new keys append, and removals
//! shift the remaining entries without reordering them.
//!
//! Single-entry operations mutate the map they were handed and return it.
//! `All` instead consumes the map and rebuilds a fresh one, so bulk
//! transforms produce a new snapshot that callers can rely on to detect
//! that a batch change happened.

use std::hash::Hash;

use indexmap::IndexMap;
use tracing::trace;

use crate::change::{Change, fold_changes};
use crate::scalar::ScalarChange;

/// Change vocabulary for an insertion-ordered map.
///
/// `C` is the nested change type understood by the map's values; it defaults
/// to whole-value replacement. Broadcasting (`All`) replays each nested
/// change once per entry, which is why applying this vocabulary requires
/// `C: Clone`.
#[derive(Debug, Clone)]
pub enum MapChange<K, V, C = ScalarChange<V>> {
    /// Replace the whole map.
    To(IndexMap<K, V>),
    /// Insert or overwrite the entry at the key. Existing keys keep their
    /// position; new keys append.
    Set(K, V),
    /// Remove the entry at the key if present; absent keys are a no-op.
    Del(K),
    /// Fold nested changes over the value at the key, storing the result
    /// back at the same position. Absent keys are a no-op: `Chg` never
    /// materializes an entry.
    Chg(K, Vec<C>),
    /// Rebuild the map, folding the nested changes over every value while
    /// preserving keys and insertion order. The result is always a fresh
    /// map, even with zero changes.
    All(Vec<C>),
}

impl<K, V, C> Change<IndexMap<K, V>> for MapChange<K, V, C>
where
    K: Hash + Eq,
    C: Change<V> + Clone,
{
    fn apply(self, mut state: IndexMap<K, V>) -> IndexMap<K, V> {
        match self {
            Self::To(map) => map,
            Self::Set(key, value) => {
                state.insert(key, value);
                state
            }
            Self::Del(key) => {
                if state.shift_remove(&key).is_none() {
                    trace!("del: key not present, nothing to remove");
                }
                state
            }
            Self::Chg(key, changes) => {
                if let Some(index) = state.get_index_of(&key) {
                    // The fold needs the value by ownership, so the entry is
                    // lifted out and reinserted at its original index.
                    if let Some((key, value)) = state.shift_remove_index(index) {
                        let value = fold_changes(value, changes);
                        state.shift_insert(index, key, value);
                    }
                } else {
                    trace!("chg: key not present, leaving the map untouched");
                }
                state
            }
            Self::All(changes) => state
                .into_iter()
                .map(|(key, value)| {
                    let value = fold_changes(value, changes.iter().cloned());
                    (key, value)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::FnChange;
    use pretty_assertions::assert_eq;

    fn scores() -> IndexMap<&'static str, u32> {
        IndexMap::from([("a", 1), ("b", 2)])
    }

    #[test]
    fn test_to_replaces_the_whole_map() {
        let replacement = IndexMap::from([("z", 9)]);
        let change: MapChange<&str, u32> = MapChange::To(replacement.clone());
        assert_eq!(change.apply(scores()), replacement);
    }

    #[test]
    fn test_set_appends_new_keys_and_overwrites_in_place() {
        let set_new: MapChange<&str, u32> = MapChange::Set("c", 3);
        let state = set_new.apply(scores());
        assert_eq!(state, IndexMap::from([("a", 1), ("b", 2), ("c", 3)]));

        let overwrite: MapChange<&str, u32> = MapChange::Set("a", 10);
        let state = overwrite.apply(state);
        assert_eq!(
            state.keys().copied().collect::<Vec<_>>(),
            ["a", "b", "c"],
            "overwriting must not move the key"
        );
        assert_eq!(state["a"], 10);
    }

    #[test]
    fn test_del_removes_and_preserves_remaining_order() {
        let state = IndexMap::from([("a", 1), ("b", 2), ("c", 3)]);
        let del: MapChange<&str, u32> = MapChange::Del("b");
        let state = del.apply(state);
        assert_eq!(state, IndexMap::from([("a", 1), ("c", 3)]));
        assert_eq!(state.keys().copied().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn test_del_is_idempotent() {
        let once: MapChange<&str, u32> = MapChange::Del("a");
        let twice: MapChange<&str, u32> = MapChange::Del("a");

        let state = twice.apply(once.apply(scores()));
        assert_eq!(state, IndexMap::from([("b", 2)]));
    }

    #[test]
    fn test_chg_folds_the_addressed_value() {
        let change = MapChange::Chg("a", vec![FnChange(|v: u32| v + 1)]);
        let state = change.apply(scores());
        assert_eq!(state, IndexMap::from([("a", 2), ("b", 2)]));
    }

    #[test]
    fn test_chg_keeps_the_entry_at_its_position() {
        let state = IndexMap::from([("a", 1), ("b", 2), ("c", 3)]);
        let change = MapChange::Chg("b", vec![FnChange(|v: u32| v * 10)]);
        let state = change.apply(state);
        assert_eq!(state.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(state["b"], 20);
    }

    #[test]
    fn test_chg_on_absent_key_is_a_noop() {
        let change = MapChange::Chg("missing", vec![FnChange(|v: u32| v + 1)]);
        let state = change.apply(scores());
        assert_eq!(state, scores(), "no entry may be created");
    }

    #[test]
    fn test_all_with_zero_changes_rebuilds_fresh() {
        let mut state = IndexMap::with_capacity(64);
        state.insert("a", 1);
        state.insert("b", 2);
        let original_capacity = state.capacity();

        let change: MapChange<&str, u32> = MapChange::All(Vec::new());
        let state = change.apply(state);

        assert_eq!(state, scores());
        assert!(
            state.capacity() < original_capacity,
            "bulk transform must rebuild into a fresh map"
        );
    }

    #[test]
    fn test_all_folds_every_value_preserving_order() {
        let state = IndexMap::from([("a", 1), ("b", 2), ("c", 3)]);
        let change: MapChange<&str, u32, FnChange<fn(u32) -> u32>> =
            MapChange::All(vec![FnChange(|v| v + 1), FnChange(|v| v * 2)]);
        let state = change.apply(state);
        assert_eq!(state, IndexMap::from([("a", 4), ("b", 6), ("c", 8)]));
        assert_eq!(state.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_all_on_an_empty_map_stays_empty() {
        let change: MapChange<&str, u32> = MapChange::All(vec![ScalarChange::To(9)]);
        let state = change.apply(IndexMap::new());
        assert!(state.is_empty(), "All must not invent entries");
    }
}
