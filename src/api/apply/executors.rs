//! Per-action dispatch onto the primitives in `crate::steps`.

use crate::adapters::Trash;
use crate::fs::ProbeResult;
use crate::steps::{ensure_link, ensure_no_link, trash, Check};
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::Action;

use crate::api::errors::{id_for, ErrorId};

/// Non-mutating check of `act` against the probed state of its path.
pub(crate) fn check(act: &Action, current: &ProbeResult) -> Result<Check> {
    match act {
        Action::EnsureLink {
            symlink_path,
            target_path,
        } => Ok(ensure_link::check_state(current, symlink_path, target_path)),
        Action::EnsureNoLink {
            path,
            expected_target,
        } => ensure_no_link::check_state(current, path, expected_target.as_deref()),
        Action::Trash { path } => Ok(trash::check_trash(current, path)),
        Action::Untrash { path, .. } => trash::check_untrash(current, path),
    }
}

/// Mutate, and return the action that undoes what actually happened.
///
/// `hint` is the undo reported by [`check`]; only `Trash` replaces it, since
/// the token exists only once the entry has moved.
pub(crate) fn fix(act: &Action, hint: Action, bin: Option<&dyn Trash>) -> Result<Action> {
    match act {
        Action::EnsureLink {
            symlink_path,
            target_path,
        } => {
            ensure_link::fix(symlink_path, target_path)?;
            Ok(hint)
        }
        Action::EnsureNoLink {
            path,
            expected_target,
        } => {
            ensure_no_link::fix(path, expected_target.as_deref())?;
            Ok(hint)
        }
        Action::Trash { path } => {
            let token = trash::fix_trash(backend(bin)?, path)?;
            Ok(Action::Untrash {
                token: Some(token),
                path: path.clone(),
            })
        }
        Action::Untrash { token, path } => {
            trash::fix_untrash(backend(bin)?, token.as_ref(), path)?;
            Ok(hint)
        }
    }
}

/// The state a dry run assumes for the path once `act` would have run.
pub(crate) fn predicted(act: &Action) -> ProbeResult {
    match act {
        Action::EnsureLink { target_path, .. } => ProbeResult {
            exists: true,
            is_symlink: true,
            is_directory: false,
            current_target: Some(target_path.clone()),
        },
        Action::EnsureNoLink { .. } | Action::Trash { .. } => ProbeResult::absent(),
        Action::Untrash { .. } => ProbeResult {
            exists: true,
            ..ProbeResult::default()
        },
    }
}

/// Error identifier for a failed step. Anything but a malformed untrash is
/// `E_UNTRASH` when the step was restoring from the holding area.
pub(crate) fn error_id(act: &Action, e: &Error) -> ErrorId {
    match act {
        Action::Untrash { .. } if e.kind != ErrorKind::InvalidInput => ErrorId::E_UNTRASH,
        _ => id_for(e),
    }
}

fn backend(bin: Option<&dyn Trash>) -> Result<&dyn Trash> {
    bin.ok_or_else(|| Error::new(ErrorKind::Io, "no trash backend configured"))
}
