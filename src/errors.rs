//! Structured filesystem errors and the error-slot reporting mode.
//!
//! Every public operation returns `Result<T>`; a failure carries the operation
//! name, the one or two paths involved and the underlying errno. Each operation
//! also has an `_ec` twin that stores the error in a caller-supplied
//! `Option<FsError>` slot and returns a [`Sentinel`] value instead.

use filetime::FileTime;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::{FileStatus, SpaceInfo};
use crate::path::FsPath;

/// Result alias used by every filesystem operation.
pub type Result<T> = std::result::Result<T, FsError>;

/// Failure of a single filesystem operation.
#[derive(Debug, Error)]
pub struct FsError {
    op: &'static str,
    path1: Option<PathBuf>,
    path2: Option<PathBuf>,
    #[source]
    source: io::Error,
}

impl FsError {
    /// Error without any path (e.g. `current_path`).
    pub fn new(op: &'static str, source: io::Error) -> Self {
        Self { op, path1: None, path2: None, source }
    }

    pub fn with_path(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self {
            op,
            path1: Some(path.as_ref().to_path_buf()),
            path2: None,
            source,
        }
    }

    pub fn with_paths(
        op: &'static str,
        path1: impl AsRef<Path>,
        path2: impl AsRef<Path>,
        source: io::Error,
    ) -> Self {
        Self {
            op,
            path1: Some(path1.as_ref().to_path_buf()),
            path2: Some(path2.as_ref().to_path_buf()),
            source,
        }
    }

    /// Name of the failing operation.
    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn path1(&self) -> Option<&Path> {
        self.path1.as_deref()
    }

    pub fn path2(&self) -> Option<&Path> {
        self.path2.as_deref()
    }

    /// POSIX errno of the underlying failure (0 if none was recorded).
    pub fn errno(&self) -> i32 {
        self.source.raw_os_error().unwrap_or(0)
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }

    /// Same error re-labelled for the caller's operation name, keeping the paths.
    pub(crate) fn relabel(mut self, op: &'static str) -> Self {
        self.op = op;
        self
    }

    /// Same error reported against both paths of a two-path operation.
    pub(crate) fn for_pair(mut self, path1: &Path, path2: &Path) -> Self {
        self.path1 = Some(path1.to_path_buf());
        self.path2 = Some(path2.to_path_buf());
        self
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        match (&self.path1, &self.path2) {
            (Some(a), Some(b)) => write!(f, " '{}' -> '{}'", a.display(), b.display())?,
            (Some(a), None) => write!(f, " '{}'", a.display())?,
            _ => {}
        }
        write!(f, ": {}", self.source)?;
        if let Some(code) = self.source.raw_os_error() {
            if let Some(hint) = errno_hint(code) {
                write!(f, " — {hint}")?;
            }
            write!(f, " [os code: {code}]")?;
        }
        Ok(())
    }
}

/// `io::Error` carrying the given errno.
#[inline]
pub(crate) fn errno(code: i32) -> io::Error {
    io::Error::from_raw_os_error(code)
}

/// Actionable hint for common errno values.
fn errno_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and permissions.",
        libc::EXDEV => "cross-filesystem; operation cannot span devices.",
        libc::EBUSY => "resource busy; ensure no other process is using it.",
        libc::ENOENT => "path not found; verify it exists.",
        libc::EEXIST => "already exists; pick a unique name or remove the target.",
        libc::ENOSPC => "insufficient space on device.",
        libc::EROFS => "read-only filesystem; cannot write here.",
        libc::ELOOP => "too many symbolic link levels (ELOOP); possible symlink cycle.",
        libc::ENAMETOOLONG => "filename or path too long; shorten path segments.",
        libc::ENOTEMPTY => "directory not empty.",
        libc::ENOTSUP => "operation not supported for this combination of file types.",
        libc::EMFILE => "process file descriptor limit reached; close files or raise limits.",
        libc::ENFILE => "system-wide file table overflow; reduce open files.",
        _ => return None,
    };
    Some(hint)
}

/// Value returned by an `_ec` operation when its error slot was filled.
pub trait Sentinel {
    fn sentinel() -> Self;
}

impl Sentinel for () {
    fn sentinel() -> Self {}
}

impl Sentinel for bool {
    fn sentinel() -> Self {
        false
    }
}

impl Sentinel for u64 {
    fn sentinel() -> Self {
        u64::MAX
    }
}

impl Sentinel for PathBuf {
    fn sentinel() -> Self {
        PathBuf::new()
    }
}

impl Sentinel for FsPath {
    fn sentinel() -> Self {
        FsPath::default()
    }
}

impl Sentinel for FileTime {
    fn sentinel() -> Self {
        FileTime::from_unix_time(i64::MIN, 0)
    }
}

impl Sentinel for SpaceInfo {
    fn sentinel() -> Self {
        SpaceInfo {
            capacity: u64::MAX,
            free: u64::MAX,
            available: u64::MAX,
        }
    }
}

impl Sentinel for FileStatus {
    fn sentinel() -> Self {
        FileStatus::none()
    }
}

/// Settle a result into the error-slot convention: clear the slot and return
/// the value, or store the error and return the sentinel.
pub(crate) fn settle<T: Sentinel>(ec: &mut Option<FsError>, res: Result<T>) -> T {
    match res {
        Ok(v) => {
            *ec = None;
            v
        }
        Err(e) => {
            *ec = Some(e);
            T::sentinel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_paths_and_code() {
        let e = FsError::with_paths("copy", "/a", "/b", errno(libc::EEXIST));
        let msg = e.to_string();
        assert!(msg.starts_with("copy '/a' -> '/b'"), "msg was: {msg}");
        assert!(msg.contains("already exists"));
        assert!(msg.contains(&format!("[os code: {}]", libc::EEXIST)));
        assert_eq!(e.errno(), libc::EEXIST);
        assert_eq!(e.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn enospc_and_erofs_hints() {
        let m1 = FsError::with_path("resize_file", "/tmp", errno(libc::ENOSPC)).to_string();
        let m2 = FsError::with_path("rename", "/tmp", errno(libc::EROFS)).to_string();
        assert!(m1.contains("insufficient space"), "msg was: {m1}");
        assert!(m2.contains("read-only filesystem"), "msg was: {m2}");
    }

    #[test]
    fn pathless_error_has_no_quotes() {
        let e = FsError::new("current_path", errno(libc::ENOENT));
        assert!(e.path1().is_none());
        assert!(!e.to_string().contains('\''));
    }

    #[test]
    fn settle_clears_slot_on_success() {
        let mut ec = Some(FsError::new("x", errno(libc::EIO)));
        let v: u64 = settle(&mut ec, Ok(7));
        assert_eq!(v, 7);
        assert!(ec.is_none());
    }

    #[test]
    fn settle_fills_slot_and_returns_sentinel() {
        let mut ec = None;
        let v: u64 = settle(&mut ec, Err(FsError::new("file_size", errno(libc::EIO))));
        assert_eq!(v, u64::MAX);
        assert_eq!(ec.map(|e| e.errno()), Some(libc::EIO));
        let mut ec = None;
        let s: SpaceInfo = settle(&mut ec, Err(FsError::new("space", errno(libc::EIO))));
        assert_eq!(s.capacity, u64::MAX);
        assert_eq!(s.free, u64::MAX);
        assert_eq!(s.available, u64::MAX);
    }
}
