//! Entity-list state: a `Vec` of items addressed by an identity key.
//!
//! Items keep their list position across `Set` and `Chg`, so the vocabulary
//! suits ordered collections rendered in place, like rows in a view. All
//! addressing is by [`Entity::id`], never by index.

use std::fmt;

use tracing::trace;

use crate::change::{Change, fold_changes};
use crate::scalar::ScalarChange;

/// An item addressable by a stable identity.
///
/// The id must not change over an item's lifetime, and a well-formed list
/// holds at most one item per id. The vocabulary tolerates duplicates by
/// always acting on the first match, but never repairs them.
pub trait Entity {
    /// The identity key items are matched by.
    type Id: PartialEq + Clone + fmt::Debug;

    /// This item's identity.
    fn id(&self) -> Self::Id;
}

/// `(id, payload)` pairs are entities keyed by their first element.
impl<Id, T> Entity for (Id, T)
where
    Id: PartialEq + Clone + fmt::Debug,
{
    type Id = Id;

    fn id(&self) -> Id {
        self.0.clone()
    }
}

/// Change vocabulary for a list of identified items.
///
/// `C` is the nested change type understood by the items themselves; it
/// defaults to whole-item replacement. `All` replays each nested change once
/// per item, so applying requires `C: Clone`.
#[derive(Debug, Clone)]
pub enum ListChange<I: Entity, C = ScalarChange<I>> {
    /// Replace the whole list.
    To(Vec<I>),
    /// Overwrite the item with the same id in place, or append the item if
    /// no such id exists.
    Set(I),
    /// Remove the item with this id; an unknown id is a no-op.
    Del(I::Id),
    /// Fold nested changes over the item with this id, keeping its position.
    /// An unknown id is a no-op: `Chg` never inserts.
    Chg(I::Id, Vec<C>),
    /// Fold the nested changes over every item, preserving order.
    All(Vec<C>),
}

impl<I, C> Change<Vec<I>> for ListChange<I, C>
where
    I: Entity,
    C: Change<I> + Clone,
{
    fn apply(self, mut state: Vec<I>) -> Vec<I> {
        match self {
            Self::To(items) => items,
            Self::Set(item) => {
                match state.iter().position(|existing| existing.id() == item.id()) {
                    Some(index) => state[index] = item,
                    None => state.push(item),
                }
                state
            }
            Self::Del(id) => {
                match state.iter().position(|item| item.id() == id) {
                    Some(index) => {
                        state.remove(index);
                    }
                    None => trace!(id = ?id, "del: no item with this id"),
                }
                state
            }
            Self::Chg(id, changes) => {
                // The fold needs the item by ownership, so it is lifted out
                // and reinserted at its original position.
                match state.iter().position(|item| item.id() == id) {
                    Some(index) => {
                        let item = state.remove(index);
                        state.insert(index, fold_changes(item, changes));
                    }
                    None => trace!(id = ?id, "chg: no item with this id, leaving the list untouched"),
                }
                state
            }
            Self::All(changes) => state
                .into_iter()
                .map(|item| fold_changes(item, changes.iter().cloned()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::FnChange;
    use pretty_assertions::assert_eq;

    fn scores() -> Vec<(u32, &'static str)> {
        vec![(1, "alice"), (2, "bob"), (3, "carol")]
    }

    #[test]
    fn test_to_replaces_the_whole_list() {
        let change: ListChange<(u32, &str)> = ListChange::To(vec![(9, "dave")]);
        assert_eq!(change.apply(scores()), vec![(9, "dave")]);
    }

    #[test]
    fn test_set_overwrites_a_matching_id_in_place() {
        let change: ListChange<(u32, &str)> = ListChange::Set((2, "bobby"));
        let state = change.apply(scores());
        assert_eq!(state, vec![(1, "alice"), (2, "bobby"), (3, "carol")]);
    }

    #[test]
    fn test_set_appends_an_unknown_id() {
        let change: ListChange<(u32, &str)> = ListChange::Set((4, "dave"));
        let state = change.apply(scores());
        assert_eq!(
            state,
            vec![(1, "alice"), (2, "bob"), (3, "carol"), (4, "dave")]
        );
    }

    #[test]
    fn test_del_removes_the_matching_item() {
        let change: ListChange<(u32, &str)> = ListChange::Del(2);
        let state = change.apply(scores());
        assert_eq!(state, vec![(1, "alice"), (3, "carol")]);
    }

    #[test]
    fn test_del_with_an_unknown_id_is_a_noop() {
        let change: ListChange<(u32, &str)> = ListChange::Del(42);
        assert_eq!(change.apply(scores()), scores());
    }

    #[test]
    fn test_del_removes_only_the_first_of_duplicate_ids() {
        let change: ListChange<(u32, &str)> = ListChange::Del(1);
        let state = change.apply(vec![(1, "first"), (1, "second")]);
        assert_eq!(state, vec![(1, "second")]);
    }

    #[test]
    fn test_set_overwrites_only_the_first_of_duplicate_ids() {
        let change: ListChange<(u32, &str)> = ListChange::Set((1, "patched"));
        let state = change.apply(vec![(1, "first"), (1, "second")]);
        assert_eq!(state, vec![(1, "patched"), (1, "second")]);
    }

    #[test]
    fn test_chg_folds_the_matching_item_keeping_its_position() {
        let change = ListChange::Chg(
            2,
            vec![FnChange(|(id, _name): (u32, &str)| (id, "updated"))],
        );
        let state = change.apply(scores());
        assert_eq!(state, vec![(1, "alice"), (2, "updated"), (3, "carol")]);
    }

    #[test]
    fn test_chg_with_an_unknown_id_is_a_noop() {
        let change = ListChange::Chg(42, vec![FnChange(|item: (u32, &'static str)| item)]);
        assert_eq!(change.apply(scores()), scores());
    }

    #[test]
    fn test_all_folds_every_item_preserving_order() {
        let change: ListChange<(u32, u32), FnChange<fn((u32, u32)) -> (u32, u32)>> =
            ListChange::All(vec![FnChange(|(id, n)| (id, n + 1))]);
        let state = change.apply(vec![(1, 10), (2, 20)]);
        assert_eq!(state, vec![(1, 11), (2, 21)]);
    }

    #[test]
    fn test_all_on_an_empty_list_stays_empty() {
        let change: ListChange<(u32, u32), FnChange<fn((u32, u32)) -> (u32, u32)>> =
            ListChange::All(vec![FnChange(|(id, n)| (id, n + 1))]);
        assert_eq!(change.apply(Vec::new()), Vec::new());
    }
}
