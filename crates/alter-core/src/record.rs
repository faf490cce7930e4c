//! Record state: a closed set of named slots sharing one value type.
//!
//! Unlike the map vocabulary, the key space here is fixed by the record's
//! own type, so addressing an unknown key is unrepresentable. Slots may still
//! be vacant at runtime, and a vacant slot behaves exactly like an absent
//! map key: `Del` and `Chg` against it are no-ops.

use std::fmt;

use tracing::trace;

use crate::change::{Change, fold_changes};
use crate::scalar::ScalarChange;

/// A structured value whose properties form a closed key space.
///
/// Slots are `Option`-shaped: [`take`](Record::take) on a vacant slot
/// returns `None`, which is how the vocabulary treats "unset" properties.
/// [`keys`](Record::keys) reports the currently occupied slots in a stable
/// order and is the snapshot `All` iterates over.
///
/// The [`impl_record!`](crate::impl_record) macro implements this trait for
/// structs whose slots are `Option` fields sharing one value type.
pub trait Record {
    /// Names of the record's slots, compared by equality.
    type Key: PartialEq + Clone + fmt::Debug;
    /// The common type stored in every slot.
    type Value;

    /// Take the current value out of the slot, leaving it vacant.
    fn take(&mut self, key: &Self::Key) -> Option<Self::Value>;

    /// Store a value in the slot, occupying it if it was vacant.
    fn put(&mut self, key: Self::Key, value: Self::Value);

    /// The keys whose slots currently hold a value.
    fn keys(&self) -> Vec<Self::Key>;
}

/// Change vocabulary for a record's slots.
///
/// `C` is the nested change type understood by the slot values; it defaults
/// to whole-value replacement. As with the map vocabulary, `All` replays
/// each nested change once per occupied slot, so applying requires
/// `C: Clone`.
pub enum RecordChange<R: Record, C = ScalarChange<<R as Record>::Value>> {
    /// Replace the whole record.
    To(R),
    /// Store a value in the slot, whether or not it was occupied.
    Set(R::Key, R::Value),
    /// Vacate the slot; already-vacant slots are a no-op.
    Del(R::Key),
    /// Fold nested changes over the slot's value, storing the result back.
    /// Vacant slots are a no-op: `Chg` never occupies a slot.
    Chg(R::Key, Vec<C>),
    /// Fold the nested changes over every occupied slot, in place. Vacant
    /// slots stay vacant.
    All(Vec<C>),
}

impl<R, C> Change<R> for RecordChange<R, C>
where
    R: Record,
    C: Change<R::Value> + Clone,
{
    fn apply(self, mut state: R) -> R {
        match self {
            Self::To(record) => record,
            Self::Set(key, value) => {
                state.put(key, value);
                state
            }
            Self::Del(key) => {
                if state.take(&key).is_none() {
                    trace!(key = ?key, "del: slot already vacant");
                }
                state
            }
            Self::Chg(key, changes) => {
                if let Some(value) = state.take(&key) {
                    state.put(key, fold_changes(value, changes));
                } else {
                    trace!(key = ?key, "chg: slot vacant, leaving the record untouched");
                }
                state
            }
            Self::All(changes) => {
                // keys() is an owned snapshot, so the set of visited slots is
                // fixed before any folding starts.
                for key in state.keys() {
                    if let Some(value) = state.take(&key) {
                        let value = fold_changes(value, changes.iter().cloned());
                        state.put(key, value);
                    }
                }
                state
            }
        }
    }
}

impl<R, C> Clone for RecordChange<R, C>
where
    R: Record + Clone,
    R::Value: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::To(record) => Self::To(record.clone()),
            Self::Set(key, value) => Self::Set(key.clone(), value.clone()),
            Self::Del(key) => Self::Del(key.clone()),
            Self::Chg(key, changes) => Self::Chg(key.clone(), changes.clone()),
            Self::All(changes) => Self::All(changes.clone()),
        }
    }
}

impl<R, C> fmt::Debug for RecordChange<R, C>
where
    R: Record + fmt::Debug,
    R::Value: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::To(record) => f.debug_tuple("To").field(record).finish(),
            Self::Set(key, value) => f.debug_tuple("Set").field(key).field(value).finish(),
            Self::Del(key) => f.debug_tuple("Del").field(key).finish(),
            Self::Chg(key, changes) => f.debug_tuple("Chg").field(key).field(changes).finish(),
            Self::All(changes) => f.debug_tuple("All").field(changes).finish(),
        }
    }
}

/// Implements [`Record`] for a struct whose slots are `Option` fields
/// sharing one value type, declaring the key enum alongside.
///
/// ```
/// use alter_core::{Change, RecordChange, impl_record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Profile {
///     name: Option<String>,
///     city: Option<String>,
/// }
///
/// impl_record!(Profile, key ProfileKey, value String, {
///     Name => name,
///     City => city,
/// });
///
/// let profile = Profile { name: Some("Ada".into()), city: None };
/// let change: RecordChange<Profile> = RecordChange::Set(ProfileKey::City, "London".into());
/// let profile = change.apply(profile);
/// assert_eq!(profile.city.as_deref(), Some("London"));
/// ```
#[macro_export]
macro_rules! impl_record {
    ($record:ty, $vis:vis key $key:ident, value $value:ty, { $($variant:ident => $field:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $key {
            $( $variant, )+
        }

        impl $crate::Record for $record {
            type Key = $key;
            type Value = $value;

            fn take(&mut self, key: &Self::Key) -> Option<Self::Value> {
                match key {
                    $( $key::$variant => self.$field.take(), )+
                }
            }

            fn put(&mut self, key: Self::Key, value: Self::Value) {
                match key {
                    $( $key::$variant => self.$field = Some(value), )+
                }
            }

            fn keys(&self) -> Vec<Self::Key> {
                let mut keys = Vec::new();
                $(
                    if self.$field.is_some() {
                        keys.push($key::$variant);
                    }
                )+
                keys
            }
        }
    };
}
