//! Boolean flags: replacement plus toggle.

use crate::change::Change;

/// Change vocabulary for a boolean flag.
///
/// A closed set of two operations; anything else is unrepresentable rather
/// than a runtime case to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolChange {
    /// Replace the flag with the given value.
    To(bool),
    /// Negate the current flag.
    Tgl,
}

impl Change<bool> for BoolChange {
    fn apply(self, state: bool) -> bool {
        match self {
            Self::To(value) => value,
            Self::Tgl => !state,
        }
    }
}
