//! Engine configuration: where displaced entries are kept.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TOOL_NAME, TRASH_SUBDIR};
use crate::types::errors::{Error, ErrorKind, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Names the dotfile directory of the default holding area (`~/.<tool_name>/trash`).
    pub tool_name: String,
    /// Explicit holding area; overrides the home-relative default.
    pub trash_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            trash_dir: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_trash_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.trash_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Resolve the holding area, falling back to [`default_trash_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error when no explicit directory is configured and the home
    /// directory cannot be determined.
    pub fn resolve_trash_dir(&self) -> Result<PathBuf> {
        match &self.trash_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_trash_dir(&self.tool_name),
        }
    }
}

/// `~/.<tool_name>/trash`.
///
/// # Errors
///
/// Returns an `Io` error when the home directory is unknown.
pub fn default_trash_dir(tool_name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::new(ErrorKind::Io, "cannot determine home directory"))?;
    Ok(home.join(format!(".{tool_name}")).join(TRASH_SUBDIR))
}
