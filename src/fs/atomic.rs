//! Atomic symlink placement and single-entry removal.
//!
//! Mutations go through a directory handle on the link's parent:
//! `open_parent_dir(parent) -> symlinkat(tmp) -> renameat(tmp, final) -> fsync(dirfd)`
//! for placement and `unlinkat(dirfd, name)` for removal.
//!
//! The parent is resolved once when the handle is opened, so symlinked parent
//! directories (`/var/run`, a linked `$HOME`) work. Only the final component
//! gets lstat semantics, and every `*at` call is made on that name alone.
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rustix::fd::OwnedFd;
use rustix::fs::{openat, renameat, symlinkat, unlinkat, AtFlags, Mode, OFlags, CWD};
use rustix::io::Errno;

use crate::constants::TMP_SUFFIX;
use crate::types::LinkPath;

fn errno_to_io(e: Errno) -> std::io::Error {
    std::io::Error::from_raw_os_error(e.raw_os_error())
}

fn cstring(s: &OsStr) -> std::io::Result<CString> {
    CString::new(s.as_bytes())
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid cstring"))
}

// Unique temporary names within a process.
static NEXT_TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Open the directory that holds a link's final component with `O_DIRECTORY`.
///
/// Symlinks along `dir` are followed, matching how `symlink_metadata` resolves
/// the parent during a probe.
///
/// # Errors
///
/// Returns an IO error if the directory cannot be opened (`ENOTDIR` when `dir`
/// does not resolve to a directory).
pub fn open_parent_dir(dir: &Path) -> std::io::Result<OwnedFd> {
    let c = cstring(dir.as_os_str())?;
    openat(
        CWD,
        c.as_c_str(),
        OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
        Mode::empty(),
    )
    .map_err(errno_to_io)
}

/// Place a symlink at `link` whose stored text is exactly `target`.
///
/// Any symlink already at `link` is replaced in one `renameat`. The caller must
/// make sure no real file or directory occupies `link`; a directory there makes
/// the rename fail, a file would be silently replaced.
///
/// # Errors
///
/// Returns an IO error if the parent cannot be opened or a syscall fails.
pub fn symlink_swap(target: &Path, link: &LinkPath) -> std::io::Result<()> {
    let fname = link.file_name();
    let pid = std::process::id();
    let ctr = NEXT_TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{}.{pid}.{ctr}{TMP_SUFFIX}", fname.to_string_lossy());

    let dirfd = open_parent_dir(link.parent())?;
    let tmp_c = cstring(OsStr::new(&tmp_name))?;
    match unlinkat(&dirfd, tmp_c.as_c_str(), AtFlags::empty()) {
        Ok(()) => {}
        Err(e) if e == Errno::NOENT => {}
        Err(e) => return Err(errno_to_io(e)),
    }

    let target_c = cstring(target.as_os_str())?;
    symlinkat(target_c.as_c_str(), &dirfd, tmp_c.as_c_str()).map_err(errno_to_io)?;

    let final_c = cstring(fname)?;
    if let Err(e) = renameat(&dirfd, tmp_c.as_c_str(), &dirfd, final_c.as_c_str()) {
        let _ = unlinkat(&dirfd, tmp_c.as_c_str(), AtFlags::empty());
        return Err(errno_to_io(e));
    }
    let _ = rustix::fs::fsync(&dirfd);
    Ok(())
}

/// Remove the single directory entry at `link` (never recursive).
///
/// # Errors
///
/// Returns an IO error if the parent cannot be opened or `unlinkat` fails;
/// a missing entry surfaces as `NotFound`.
pub fn unlink_entry(link: &LinkPath) -> std::io::Result<()> {
    let dirfd = open_parent_dir(link.parent())?;
    let fname_c = cstring(link.file_name())?;
    unlinkat(&dirfd, fname_c.as_c_str(), AtFlags::empty()).map_err(errno_to_io)?;
    let _ = rustix::fs::fsync(&dirfd);
    Ok(())
}
