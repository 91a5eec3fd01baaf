//! Single and recursive removal.

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use super::status::probe;
use crate::errors::{errno, settle, FsError, Result};
use crate::platform;

/// remove(3): unlink a file or symlink, or rmdir an empty directory.
pub fn remove(p: impl AsRef<Path>) -> Result<bool> {
    let p = p.as_ref();
    platform::remove(p).map_err(|e| FsError::with_path("remove", p, e))?;
    Ok(true)
}

pub fn remove_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, remove(p))
}

/// Remove `p` and, when it is a directory, everything below it. Symlinks are
/// removed, never followed. Returns the number of entries removed, 0 when
/// `p` does not exist. The first failure aborts the walk.
pub fn remove_all(p: impl AsRef<Path>) -> Result<u64> {
    const OP: &str = "remove_all";
    let p = p.as_ref();
    let st = probe(OP, p, false)?.0;
    if !st.exists() {
        return Ok(0);
    }

    let mut count: u64 = 0;
    let walker = WalkDir::new(p)
        .follow_links(false)
        .follow_root_links(false)
        .contents_first(true);
    for entry in walker {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(p).to_path_buf();
            let io = e.into_io_error().unwrap_or_else(|| errno(libc::ELOOP));
            FsError::with_path(OP, at, io)
        })?;
        platform::remove(entry.path()).map_err(|e| FsError::with_path(OP, entry.path(), e))?;
        debug!(path = %entry.path().display(), depth = entry.depth(), "removed");
        count += 1;
    }
    Ok(count)
}

pub fn remove_all_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> u64 {
    settle(ec, remove_all(p))
}
