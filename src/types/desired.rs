use std::path::{Path, PathBuf};

use super::errors::{Error, Result};
use super::linkpath::LinkPath;
use crate::policy::LinkPolicy;

/// The declared end state for one path: a symlink at `symlink_path` whose stored
/// text is `target_path`, reached only in the ways `policy` permits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesiredState {
    pub symlink_path: LinkPath,
    /// Stored verbatim; it need not exist and is never resolved.
    pub target_path: PathBuf,
    pub policy: LinkPolicy,
}

impl DesiredState {
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when `symlink_path` is not a valid
    /// [`LinkPath`] or `target_path` is empty.
    pub fn new(
        symlink_path: impl AsRef<Path>,
        target_path: impl AsRef<Path>,
        policy: LinkPolicy,
    ) -> Result<Self> {
        let symlink_path = LinkPath::new(symlink_path)?;
        let target_path = target_path.as_ref();
        if target_path.as_os_str().is_empty() {
            return Err(Error::invalid_input("target path is empty"));
        }
        Ok(Self {
            symlink_path,
            target_path: target_path.to_path_buf(),
            policy,
        })
    }
}
