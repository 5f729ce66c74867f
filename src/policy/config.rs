use serde::{Deserialize, Serialize};

/// Policy governs which corrective changes the planner may schedule.
///
/// Defaults are permissive for symlink creation and repointing and forbid
/// displacing real files or directories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPolicy {
    /// May create the link when nothing exists at the path.
    pub create: bool,
    /// May repoint an existing symlink that targets something else.
    pub replace_symlink: bool,
    /// May trash a non-directory, non-symlink entry occupying the path.
    pub replace_file: bool,
    /// May trash a directory occupying the path.
    pub replace_dir: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            create: true,
            replace_symlink: true,
            replace_file: false,
            replace_dir: false,
        }
    }
}

impl LinkPolicy {
    /// Only ever create a missing link; never touch anything that exists.
    #[must_use]
    pub const fn conservative() -> Self {
        Self {
            create: true,
            replace_symlink: false,
            replace_file: false,
            replace_dir: false,
        }
    }

    /// Allow every change. Displaced entries still go to the trash.
    #[must_use]
    pub const fn force() -> Self {
        Self {
            create: true,
            replace_symlink: true,
            replace_file: true,
            replace_dir: true,
        }
    }

    #[must_use]
    pub const fn with_replace_file(mut self, yes: bool) -> Self {
        self.replace_file = yes;
        self
    }

    #[must_use]
    pub const fn with_replace_dir(mut self, yes: bool) -> Self {
        self.replace_dir = yes;
        self
    }

    /// Whether an existing non-symlink entry may be displaced.
    #[must_use]
    pub const fn may_displace(&self, is_directory: bool) -> bool {
        if is_directory {
            self.replace_dir
        } else {
            self.replace_file
        }
    }
}
