//! The change trait and the fold primitive shared by every vocabulary.

/// A self-contained mutation that can be applied to a state value of type `S`.
///
/// Applying a change is pure: the next state is a function of the current
/// state and the change alone. A change is consumed by its application;
/// it is transient data, not a handle to the container it targets.
///
/// Containers are taken by value and returned; callers must treat the
/// returned value as the new state. This also makes the single-writer
/// constraint structural: a container being changed has exactly one owner.
pub trait Change<S> {
    /// Apply this change to `state`, returning the next state.
    #[must_use]
    fn apply(self, state: S) -> S;
}

/// Fold zero or more changes over a single value, left to right.
///
/// Each application's result feeds the next; an empty sequence returns
/// `state` untouched.
#[must_use]
pub fn fold_changes<S, C, I>(state: S, changes: I) -> S
where
    C: Change<S>,
    I: IntoIterator<Item = C>,
{
    changes
        .into_iter()
        .fold(state, |state, change| change.apply(state))
}

/// Adapter that lets a plain closure stand in where a change is expected.
///
/// Handy when a one-off recursion is clearer as a closure than as a
/// dedicated change type.
///
/// ```
/// use alter_core::{Change, FnChange};
///
/// let doubled = FnChange(|n: u32| n * 2).apply(21);
/// assert_eq!(doubled, 42);
/// ```
#[derive(Clone, Copy)]
pub struct FnChange<F>(pub F);

impl<S, F> Change<S> for FnChange<F>
where
    F: FnOnce(S) -> S,
{
    fn apply(self, state: S) -> S {
        (self.0)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_empty_is_identity() {
        let changes: Vec<FnChange<fn(u32) -> u32>> = Vec::new();
        let state = fold_changes(7, changes);
        assert_eq!(state, 7);
    }

    #[test]
    fn test_fold_applies_left_to_right() {
        let changes: Vec<FnChange<fn(String) -> String>> = vec![
            FnChange(|mut s| {
                s.push('a');
                s
            }),
            FnChange(|mut s| {
                s.push('b');
                s
            }),
        ];

        let state = fold_changes(String::new(), changes);
        assert_eq!(state, "ab");
    }

    #[test]
    fn test_fn_change_applies_closure() {
        let state = FnChange(|n: i64| n - 1).apply(0);
        assert_eq!(state, -1);
    }
}
