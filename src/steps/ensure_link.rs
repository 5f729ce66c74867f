//! Make a path a symlink with an exact stored target.
use std::path::Path;

use super::Check;
use crate::fs::{inspect, symlink_swap, ProbeResult};
use crate::types::errors::{Error, Result};
use crate::types::{Action, LinkPath};

/// `NeedsFix` unless `symlink_path` is already a symlink whose text is `target_path`.
///
/// The undo hint is always removal of the link this primitive would create; the
/// planner knows whether a previous link has to be put back.
///
/// # Errors
///
/// Returns an `Io` error if the path cannot be inspected.
pub fn check(symlink_path: &LinkPath, target_path: &Path) -> Result<Check> {
    Ok(check_state(
        &inspect(symlink_path.as_path())?,
        symlink_path,
        target_path,
    ))
}

/// [`check`] against an already probed state.
#[must_use]
pub fn check_state(current: &ProbeResult, symlink_path: &LinkPath, target_path: &Path) -> Check {
    if current.points_at(target_path) {
        return Check::NoFixNeeded;
    }
    Check::NeedsFix {
        undo: Action::ensure_no_link(symlink_path, Some(target_path)),
    }
}

/// Create or repoint the symlink. Succeeds without touching anything when it is
/// already correct.
///
/// # Errors
///
/// - `Conflict` if a real file or directory occupies the path; displacing it is
///   the caller's job.
/// - `Io` if the link cannot be placed (e.g. the parent directory is missing).
pub fn fix(symlink_path: &LinkPath, target_path: &Path) -> Result<()> {
    let current = inspect(symlink_path.as_path())?;
    if current.points_at(target_path) {
        return Ok(());
    }
    if current.exists && !current.is_symlink {
        return Err(Error::conflict(format!(
            "cannot link {symlink_path}: occupied by a {}",
            current.kind()
        )));
    }
    symlink_swap(target_path, symlink_path).map_err(|e| {
        Error::io(
            format!("symlink {} -> {}", symlink_path, target_path.display()),
            &e,
        )
    })?;
    log::debug!("linked {} -> {}", symlink_path, target_path.display());
    Ok(())
}
