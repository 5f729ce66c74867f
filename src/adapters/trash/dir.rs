use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rustix::io::Errno;
use uuid::Uuid;

use crate::config::Config;
use crate::types::errors::{Error, Result};
use crate::types::TrashToken;

use super::Trash;

/// Holding area backed by a plain directory.
///
/// Entries are named `<unix-millis>-<uuid>-<basename>`; that name is the token.
/// The directory is created on first use. Moves are `rename` calls; when the
/// holding area sits on another filesystem (`EXDEV`) the entry is copied
/// over and the source removed afterwards. That path is not atomic.
#[derive(Clone, Debug)]
pub struct DirTrash {
    root: PathBuf,
    force_exdev: bool,
}

impl DirTrash {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            force_exdev: false,
        }
    }

    /// Treat every rename as crossing filesystems. Used by tests to exercise
    /// the copy fallback on a single filesystem.
    #[must_use]
    pub fn with_force_exdev(mut self, force: bool) -> Self {
        self.force_exdev = force;
        self
    }

    /// # Errors
    ///
    /// Returns an error when the default holding area cannot be resolved.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(cfg.resolve_trash_dir()?))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a token's entry inside the holding area.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for tokens that are empty or would escape the
    /// holding directory.
    pub fn path_of(&self, token: &TrashToken) -> Result<PathBuf> {
        let t = token.as_str();
        if t.is_empty() || t == "." || t == ".." || t.contains('/') || t.contains('\0') {
            return Err(Error::invalid_input(format!("invalid trash token: {t:?}")));
        }
        Ok(self.root.join(t))
    }

    /// Tokens currently held, sorted (oldest first, since names start with a timestamp).
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the holding directory exists but cannot be read.
    pub fn entries(&self) -> Result<Vec<TrashToken>> {
        let rd = match fs::read_dir(&self.root) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(format!("read {}", self.root.display()), &e)),
        };
        let mut out = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| Error::io(format!("read {}", self.root.display()), &e))?;
            out.push(TrashToken::new(entry.file_name().to_string_lossy()));
        }
        out.sort();
        Ok(out)
    }

    fn fresh_token(path: &Path) -> TrashToken {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "entry".to_string());
        TrashToken::new(format!("{ms}-{}-{base}", Uuid::new_v4().simple()))
    }

    fn move_entry(&self, src: &Path, dest: &Path) -> Result<()> {
        let ctx = || format!("move {} to {}", src.display(), dest.display());
        let renamed = if self.force_exdev {
            Err(std::io::Error::from_raw_os_error(Errno::XDEV.raw_os_error()))
        } else {
            fs::rename(src, dest)
        };
        match renamed {
            Ok(()) => Ok(()),
            Err(e) if e.raw_os_error() == Some(Errno::XDEV.raw_os_error()) => {
                if let Err(e) = copy_tree(src, dest) {
                    let _ = remove_tree(dest);
                    return Err(Error::io(ctx(), &e));
                }
                remove_tree(src).map_err(|e| Error::io(format!("remove {}", src.display()), &e))?;
                log::warn!("{}: copied across filesystems", ctx());
                Ok(())
            }
            Err(e) => Err(Error::io(ctx(), &e)),
        }
    }
}

/// Copies `src` to `dest` without following symlinks. Directory modes are
/// applied after their contents are written.
fn copy_tree(src: &Path, dest: &Path) -> std::io::Result<()> {
    let md = fs::symlink_metadata(src)?;
    let ft = md.file_type();
    if ft.is_symlink() {
        symlink(fs::read_link(src)?, dest)
    } else if ft.is_dir() {
        fs::create_dir(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
        }
        fs::set_permissions(dest, md.permissions())
    } else {
        fs::copy(src, dest).map(|_| ())
    }
}

fn remove_tree(path: &Path) -> std::io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

impl Trash for DirTrash {
    fn trash(&self, path: &Path) -> Result<TrashToken> {
        fs::symlink_metadata(path)
            .map_err(|e| Error::io(format!("cannot trash {}", path.display()), &e))?;
        fs::create_dir_all(&self.root)
            .map_err(|e| Error::io(format!("create {}", self.root.display()), &e))?;
        let token = Self::fresh_token(path);
        let dest = self.path_of(&token)?;
        if fs::symlink_metadata(&dest).is_ok() {
            return Err(Error::conflict(format!(
                "trash entry {} already exists",
                dest.display()
            )));
        }
        self.move_entry(path, &dest)?;
        log::info!("trashed {} as {token}", path.display());
        Ok(token)
    }

    fn untrash(&self, token: &TrashToken, path: &Path) -> Result<()> {
        let src = self.path_of(token)?;
        if let Err(e) = fs::symlink_metadata(&src) {
            return Err(Error::io(format!("trash entry {token}"), &e));
        }
        match fs::symlink_metadata(path) {
            Ok(_) => {
                return Err(Error::conflict(format!(
                    "cannot untrash {token}: {} is occupied",
                    path.display()
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(format!("stat {}", path.display()), &e)),
        }
        self.move_entry(&src, path)?;
        log::info!("restored {} from {token}", path.display());
        Ok(())
    }
}
