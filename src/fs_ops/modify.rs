//! In-place mutations: rename, resize, permission bits, modification time.

use filetime::FileTime;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::status::{probe, stat_meta};
use super::types::Perms;
use crate::errors::{errno, settle, FsError, Result};
use crate::platform;

/// rename(2).
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::rename(from, to).map_err(|e| FsError::with_paths("rename", from, to, e))
}

pub fn rename_ec(from: impl AsRef<Path>, to: impl AsRef<Path>, ec: &mut Option<FsError>) {
    settle(ec, rename(from, to))
}

/// truncate(2): shrink or zero-extend `p` to `size` bytes.
pub fn resize_file(p: impl AsRef<Path>, size: u64) -> Result<()> {
    let p = p.as_ref();
    platform::truncate(p, size).map_err(|e| FsError::with_path("resize_file", p, e))
}

pub fn resize_file_ec(p: impl AsRef<Path>, size: u64, ec: &mut Option<FsError>) {
    settle(ec, resize_file(p, size))
}

/// Replace, add to or remove from the permission bits of `p`.
///
/// # Panics
/// When both `ADD_PERMS` and `REMOVE_PERMS` are set.
pub fn permissions(p: impl AsRef<Path>, prms: Perms) -> Result<()> {
    const OP: &str = "permissions";
    let p = p.as_ref();
    let add = prms.contains(Perms::ADD_PERMS);
    let remove = prms.contains(Perms::REMOVE_PERMS);
    assert!(
        !(add && remove),
        "permissions: ADD_PERMS and REMOVE_PERMS are mutually exclusive"
    );
    let resolve = prms.contains(Perms::RESOLVE_SYMLINKS);

    // The bits are read from whatever chmod will end up changing.
    let st = probe(OP, p, resolve || platform::CHMOD_ALWAYS_FOLLOWS)?.0;
    if !st.exists() {
        return Err(FsError::with_path(OP, p, errno(libc::ENOENT)));
    }

    let bits = prms & Perms::MASK;
    let effective = if add {
        st.permissions() | bits
    } else if remove {
        st.permissions() & !bits
    } else {
        bits
    };
    let follow = resolve || !st.is_symlink();
    debug!(
        path = %p.display(),
        mode = format_args!("{:o}", effective.mode()),
        follow,
        "chmod"
    );
    platform::chmod(p, effective.mode(), follow).map_err(|e| FsError::with_path(OP, p, e))
}

pub fn permissions_ec(p: impl AsRef<Path>, prms: Perms, ec: &mut Option<FsError>) {
    settle(ec, permissions(p, prms))
}

/// Set the modification time of `p`, keeping its access time.
pub fn set_last_write_time(p: impl AsRef<Path>, mtime: FileTime) -> Result<()> {
    const OP: &str = "last_write_time";
    let p = p.as_ref();
    let meta = stat_meta(OP, p)?;
    let atime = FileTime::from_last_access_time(&meta);
    filetime::set_file_times(p, atime, mtime).map_err(|e| FsError::with_path(OP, p, e))
}

pub fn set_last_write_time_ec(p: impl AsRef<Path>, mtime: FileTime, ec: &mut Option<FsError>) {
    settle(ec, set_last_write_time(p, mtime))
}
