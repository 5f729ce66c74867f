pub mod dir;

use std::path::Path;

use crate::types::errors::Result;
use crate::types::TrashToken;

/// Move-don't-delete displacement of filesystem entries.
pub trait Trash {
    /// Move the entry at `path` (file, directory or link, recursively) into the
    /// holding area and return the token that names it there.
    /// # Errors
    /// Returns an error if nothing is at `path` or the move fails.
    fn trash(&self, path: &Path) -> Result<TrashToken>;

    /// Move the entry named by `token` back to `path`.
    /// # Errors
    /// Returns a `Conflict` error if `path` is occupied; never overwrites.
    fn untrash(&self, token: &TrashToken, path: &Path) -> Result<()>;
}
