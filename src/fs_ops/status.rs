//! Status probe: stat/lstat mapped onto `FileStatus`.
//!
//! A missing path (ENOENT/ENOTDIR) is not an error: it is reported as
//! `FileType::NotFound`. Any other failure is an error whose status is
//! unknown (`FileType::None` in error-slot mode).

use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::trace;

use super::types::{FileStatus, FileType, Perms};
use crate::errors::{settle, FsError, Result};

#[inline]
fn mode_is(mode: u32, kind: libc::mode_t) -> bool {
    mode & (libc::S_IFMT as u32) == kind as u32
}

/// Map raw mode bits to a file type. The order is fixed; `lstat` checks
/// for a symlink first.
pub(crate) fn classify(mode: u32, symlink_first: bool) -> FileType {
    if symlink_first && mode_is(mode, libc::S_IFLNK) {
        FileType::Symlink
    } else if mode_is(mode, libc::S_IFREG) {
        FileType::Regular
    } else if mode_is(mode, libc::S_IFDIR) {
        FileType::Directory
    } else if mode_is(mode, libc::S_IFBLK) {
        FileType::Block
    } else if mode_is(mode, libc::S_IFCHR) {
        FileType::Character
    } else if mode_is(mode, libc::S_IFIFO) {
        FileType::Fifo
    } else if mode_is(mode, libc::S_IFSOCK) {
        FileType::Socket
    } else {
        FileType::Unknown
    }
}

/// True for the errno values that mean "a path component does not exist".
pub(crate) fn is_not_found(e: &io::Error) -> bool {
    matches!(e.raw_os_error(), Some(libc::ENOENT) | Some(libc::ENOTDIR))
}

/// Probe `p`, keeping the metadata for callers that need more than the type.
/// `op` names the public operation for error reporting.
pub(crate) fn probe(
    op: &'static str,
    p: &Path,
    follow: bool,
) -> Result<(FileStatus, Option<Metadata>)> {
    let res = if follow { fs::metadata(p) } else { fs::symlink_metadata(p) };
    match res {
        Ok(meta) => {
            let mode = meta.mode();
            let st = FileStatus::new(classify(mode, !follow), Perms::from_mode(mode));
            trace!(path = %p.display(), file_type = %st.file_type(), "probe");
            Ok((st, Some(meta)))
        }
        Err(e) if is_not_found(&e) => {
            trace!(path = %p.display(), "probe: not found");
            Ok((FileStatus::not_found(), None))
        }
        Err(e) => Err(FsError::with_path(op, p, e)),
    }
}

/// Raw stat where a missing path is an error too.
pub(crate) fn stat_meta(op: &'static str, p: &Path) -> Result<Metadata> {
    fs::metadata(p).map_err(|e| FsError::with_path(op, p, e))
}

/// stat(2): status of `p`, following symlinks.
pub fn status(p: impl AsRef<Path>) -> Result<FileStatus> {
    probe("status", p.as_ref(), true).map(|(st, _)| st)
}

pub fn status_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> FileStatus {
    settle(ec, status(p))
}

/// lstat(2): status of `p` itself, not following a final symlink.
pub fn symlink_status(p: impl AsRef<Path>) -> Result<FileStatus> {
    probe("symlink_status", p.as_ref(), false).map(|(st, _)| st)
}

pub fn symlink_status_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> FileStatus {
    settle(ec, symlink_status(p))
}
