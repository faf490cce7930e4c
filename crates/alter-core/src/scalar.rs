//! Whole-value replacement, the base case every other vocabulary builds on.

use crate::change::Change;

/// Change vocabulary for values with no finer-grained mutation.
///
/// The single `To` operation unconditionally discards the prior state and
/// substitutes the supplied value. It always succeeds and is the degenerate
/// reducer: every other vocabulary includes it as its full-replacement case,
/// and it is the default nested-change type for the container vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarChange<T> {
    /// Replace the whole value.
    To(T),
}

impl<T> Change<T> for ScalarChange<T> {
    fn apply(self, _state: T) -> T {
        match self {
            Self::To(value) => value,
        }
    }
}
