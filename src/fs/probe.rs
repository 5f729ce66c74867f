//! Link-aware, non-mutating inspection of a single path.
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::errors::{Error, Result};

/// Snapshot of what currently occupies a path, from one `lstat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub exists: bool,
    pub is_symlink: bool,
    /// True only for a real directory; a symlink to a directory is a symlink.
    pub is_directory: bool,
    /// Stored text of the symlink, if the entry is one.
    pub current_target: Option<PathBuf>,
}

impl ProbeResult {
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether the entry is a symlink whose stored text equals `target`.
    #[must_use]
    pub fn points_at(&self, target: &Path) -> bool {
        self.is_symlink
            && self.current_target.as_deref().map(Path::as_os_str) == Some(target.as_os_str())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        if !self.exists {
            "missing"
        } else if self.is_symlink {
            "symlink"
        } else if self.is_directory {
            "dir"
        } else {
            "file"
        }
    }
}

/// Classify `path` without following a final symlink.
///
/// A dangling symlink is reported as existing. Only `NotFound` maps to absent.
///
/// # Errors
///
/// Returns an `Io` error for any other failure, e.g. permission denied on a
/// parent directory or an unreadable link.
pub fn inspect(path: &Path) -> Result<ProbeResult> {
    let md = match std::fs::symlink_metadata(path) {
        Ok(md) => md,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ProbeResult::absent()),
        Err(e) => return Err(Error::io(format!("stat {}", path.display()), &e)),
    };
    let ft = md.file_type();
    if ft.is_symlink() {
        let target = std::fs::read_link(path)
            .map_err(|e| Error::io(format!("readlink {}", path.display()), &e))?;
        return Ok(ProbeResult {
            exists: true,
            is_symlink: true,
            is_directory: false,
            current_target: Some(target),
        });
    }
    Ok(ProbeResult {
        exists: true,
        is_symlink: false,
        is_directory: ft.is_dir(),
        current_target: None,
    })
}
