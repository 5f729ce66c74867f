use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{Error, Result};

/// An absolute, normalized location where a symlink is (or will be) managed.
///
/// Construction rejects relative paths and paths without a final component
/// (such as `/`), and folds `.` and `..` segments lexically, so every `LinkPath`
/// has a parent directory and a file name that the `*at` syscalls can address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf", into = "PathBuf")]
pub struct LinkPath {
    path: PathBuf,
}

impl LinkPath {
    /// Validate `candidate` and normalize it lexically: `.` segments are
    /// dropped and `..` removes the preceding segment (`/..` stays `/`).
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the path is empty, relative, or has
    /// no final component after normalization.
    pub fn new(candidate: impl AsRef<Path>) -> Result<Self> {
        let candidate = candidate.as_ref();
        if candidate.as_os_str().is_empty() {
            return Err(Error::invalid_input("symlink path is empty"));
        }
        if !candidate.is_absolute() {
            return Err(Error::invalid_input(format!(
                "symlink path must be absolute: {}",
                candidate.display()
            )));
        }
        let mut path = PathBuf::new();
        for seg in candidate.components() {
            match seg {
                Component::Prefix(_) | Component::RootDir => path.push(seg.as_os_str()),
                Component::CurDir => {}
                Component::Normal(p) => path.push(p),
                Component::ParentDir => {
                    path.pop();
                }
            }
        }
        if path.file_name().is_none() {
            return Err(Error::invalid_input(format!(
                "symlink path has no final component: {}",
                candidate.display()
            )));
        }
        Ok(Self { path })
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    #[must_use]
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }
}

impl AsRef<Path> for LinkPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<PathBuf> for LinkPath {
    type Error = Error;

    fn try_from(value: PathBuf) -> Result<Self> {
        Self::new(value)
    }
}

impl From<LinkPath> for PathBuf {
    fn from(value: LinkPath) -> Self {
        value.path
    }
}

impl fmt::Display for LinkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
