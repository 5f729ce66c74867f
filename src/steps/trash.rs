//! Displace an entry into the holding area, and bring it back.
use super::Check;
use crate::adapters::Trash;
use crate::fs::ProbeResult;
use crate::types::errors::{Error, Result};
use crate::types::{Action, LinkPath, TrashToken};

/// `NeedsFix` when the probed state of `path` holds anything, even a dangling
/// link.
///
/// The undo hint carries no token yet; [`fix_trash`] produces it.
#[must_use]
pub fn check_trash(current: &ProbeResult, path: &LinkPath) -> Check {
    if !current.exists {
        return Check::NoFixNeeded;
    }
    Check::NeedsFix {
        undo: Action::Untrash {
            token: None,
            path: path.clone(),
        },
    }
}

/// Move the entry away and return the token that brings it back.
///
/// # Errors
///
/// Whatever `trash` reports; nothing is moved on error.
pub fn fix_trash(trash: &dyn Trash, path: &LinkPath) -> Result<TrashToken> {
    trash.trash(path.as_path())
}

/// `NeedsFix` while `path` is free; a conflict once something occupies it again.
///
/// # Errors
///
/// `Conflict` if the probed state of `path` is occupied.
pub fn check_untrash(current: &ProbeResult, path: &LinkPath) -> Result<Check> {
    if current.exists {
        return Err(Error::conflict(format!(
            "cannot untrash into {path}: occupied by a {}",
            current.kind()
        )));
    }
    Ok(Check::NeedsFix {
        undo: Action::Trash { path: path.clone() },
    })
}

/// Restore the entry named by `token` to `path`.
///
/// # Errors
///
/// `InvalidInput` without a token; otherwise whatever `untrash` reports.
pub fn fix_untrash(trash: &dyn Trash, token: Option<&TrashToken>, path: &LinkPath) -> Result<()> {
    let Some(token) = token else {
        return Err(Error::invalid_input(format!("untrash {path}: missing token")));
    };
    trash.untrash(token, path.as_path())
}
