//! alter-core: Typed change operations and reducers for common state shapes.
//!
//! This crate provides:
//! - A change vocabulary per state shape: [`ScalarChange`], [`BoolChange`],
//!   [`MapChange`], [`RecordChange`], and [`ListChange`]
//! - The [`Change`] trait connecting a change type to the state it applies
//!   to, plus [`fold_changes`] for replaying a batch in order
//! - Composition seams for nesting changes under `chg`/`all` operations:
//!   [`FnChange`], the [`Record`] and [`Entity`] traits, and [`impl_record!`]
//! - [`require`]/[`require_with`] assertions turning an `Option` into a
//!   present value or a [`MissingValueError`]
//!
//! Changes are plain values that serialize as tagged arrays such as
//! `["set", "bob", 2]`. Applying one consumes the current state and returns
//! the next; nothing here touches storage or the network.

pub mod boolean;
pub mod change;
mod encoding;
pub mod error;
pub mod list;
pub mod map;
pub mod record;
pub mod scalar;

pub use boolean::BoolChange;
pub use change::{Change, FnChange, fold_changes};
pub use error::{MissingValueError, Result, require, require_with};
pub use list::{Entity, ListChange};
pub use map::MapChange;
pub use record::{Record, RecordChange};
pub use scalar::ScalarChange;
