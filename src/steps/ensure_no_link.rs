//! Remove a symlink, never a real file or directory.
use std::path::Path;

use super::Check;
use crate::fs::{inspect, unlink_entry, ProbeResult};
use crate::types::errors::{Error, Result};
use crate::types::{Action, LinkPath};

/// `NoFixNeeded` when nothing is at `path`; `NeedsFix` with an undo that
/// re-creates the current link otherwise.
///
/// `expected_target` of `None` matches any symlink.
///
/// # Errors
///
/// - `Conflict` if the path holds a non-symlink, or a symlink pointing somewhere
///   other than `expected_target`.
/// - `Io` if the path cannot be inspected.
pub fn check(path: &LinkPath, expected_target: Option<&Path>) -> Result<Check> {
    check_state(&inspect(path.as_path())?, path, expected_target)
}

/// [`check`] against an already probed state.
///
/// # Errors
///
/// The same conflicts as [`check`].
pub fn check_state(
    current: &ProbeResult,
    path: &LinkPath,
    expected_target: Option<&Path>,
) -> Result<Check> {
    if !current.exists {
        return Ok(Check::NoFixNeeded);
    }
    if !current.is_symlink {
        return Err(Error::conflict(format!(
            "refusing to remove {path}: it is a {}, not a symlink",
            current.kind()
        )));
    }
    let Some(target) = current.current_target.as_deref() else {
        return Err(Error::conflict(format!("{path}: symlink target unreadable")));
    };
    if let Some(expected) = expected_target {
        if expected.as_os_str() != target.as_os_str() {
            return Err(Error::conflict(format!(
                "refusing to remove {path}: points to {}, expected {}",
                target.display(),
                expected.display()
            )));
        }
    }
    Ok(Check::NeedsFix {
        undo: Action::ensure_link(path, target),
    })
}

/// Re-validate with [`check`] and unlink exactly the symlink entry.
///
/// # Errors
///
/// Same conflicts as [`check`]; `Io` if `unlinkat` fails.
pub fn fix(path: &LinkPath, expected_target: Option<&Path>) -> Result<()> {
    if !check(path, expected_target)?.needs_fix() {
        return Ok(());
    }
    match unlink_entry(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(format!("unlink {path}"), &e)),
    }
    log::debug!("unlinked {path}");
    Ok(())
}
