//! Read-only queries built on the status probe.

use filetime::FileTime;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use super::status::{probe, stat_meta, status, symlink_status};
use crate::errors::{errno, settle, FsError, Result};

pub fn exists(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.exists())
}

pub fn exists_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, exists(p))
}

pub fn is_regular_file(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_regular_file())
}

pub fn is_regular_file_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, is_regular_file(p))
}

pub fn is_directory(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_directory())
}

pub fn is_directory_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, is_directory(p))
}

/// Uses lstat, so a link to a directory is still a symlink.
pub fn is_symlink(p: impl AsRef<Path>) -> Result<bool> {
    symlink_status(p).map(|st| st.is_symlink())
}

pub fn is_symlink_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, is_symlink(p))
}

pub fn is_block_file(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_block_file())
}

pub fn is_character_file(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_character_file())
}

pub fn is_fifo(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_fifo())
}

pub fn is_socket(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_socket())
}

pub fn is_other(p: impl AsRef<Path>) -> Result<bool> {
    status(p).map(|st| st.is_other())
}

pub fn is_other_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, is_other(p))
}

/// True when both paths name the same file (device and inode).
///
/// Two paths that both fail to stat are simply not equivalent; if only one
/// fails, that failure is the result.
pub fn equivalent(p1: impl AsRef<Path>, p2: impl AsRef<Path>) -> Result<bool> {
    let (p1, p2) = (p1.as_ref(), p2.as_ref());
    match (fs::metadata(p1), fs::metadata(p2)) {
        (Err(_), Err(_)) => Ok(false),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(FsError::with_paths("equivalent", p1, p2, e)),
        (Ok(a), Ok(b)) => Ok(a.dev() == b.dev() && a.ino() == b.ino()),
    }
}

pub fn equivalent_ec(p1: impl AsRef<Path>, p2: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, equivalent(p1, p2))
}

/// Size in bytes of a regular file. A missing path fails with ENOENT,
/// any other file type with EPERM.
pub fn file_size(p: impl AsRef<Path>) -> Result<u64> {
    let p = p.as_ref();
    match probe("file_size", p, true)? {
        (st, Some(meta)) if st.is_regular_file() => Ok(meta.len()),
        (st, _) if !st.exists() => Err(FsError::with_path("file_size", p, errno(libc::ENOENT))),
        _ => Err(FsError::with_path("file_size", p, errno(libc::EPERM))),
    }
}

pub fn file_size_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> u64 {
    settle(ec, file_size(p))
}

pub fn hard_link_count(p: impl AsRef<Path>) -> Result<u64> {
    stat_meta("hard_link_count", p.as_ref()).map(|m| m.nlink())
}

pub fn hard_link_count_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> u64 {
    settle(ec, hard_link_count(p))
}

/// Modification time of `p` (following symlinks).
pub fn last_write_time(p: impl AsRef<Path>) -> Result<FileTime> {
    stat_meta("last_write_time", p.as_ref()).map(|m| FileTime::from_last_modification_time(&m))
}

pub fn last_write_time_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> FileTime {
    settle(ec, last_write_time(p))
}

/// Directories are empty when they have no entries, files when their size is zero.
pub fn is_empty(p: impl AsRef<Path>) -> Result<bool> {
    let p = p.as_ref();
    let st = probe("is_empty", p, true)?.0;
    if st.is_directory() {
        let mut it = fs::read_dir(p).map_err(|e| FsError::with_path("is_empty", p, e))?;
        Ok(it.next().is_none())
    } else {
        file_size(p).map(|n| n == 0).map_err(|e| e.relabel("is_empty"))
    }
}

pub fn is_empty_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, is_empty(p))
}

/// readlink(2).
pub fn read_symlink(p: impl AsRef<Path>) -> Result<PathBuf> {
    let p = p.as_ref();
    fs::read_link(p).map_err(|e| FsError::with_path("read_symlink", p, e))
}

pub fn read_symlink_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> PathBuf {
    settle(ec, read_symlink(p))
}
