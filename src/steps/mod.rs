//! Primitive, independently invocable actions.
//!
//! Each primitive has a `check` that never mutates and reports whether a fix is
//! needed (plus the action that would undo it), and a `fix` that mutates and
//! reports success or failure once. Conflicts are errors of kind
//! [`ErrorKind::Conflict`](crate::types::ErrorKind::Conflict).

pub mod ensure_link;
pub mod ensure_no_link;
pub mod trash;

use crate::types::Action;

/// Result of a primitive's non-mutating check phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Check {
    NeedsFix { undo: Action },
    NoFixNeeded,
}

impl Check {
    #[must_use]
    pub const fn needs_fix(&self) -> bool {
        matches!(self, Check::NeedsFix { .. })
    }
}
