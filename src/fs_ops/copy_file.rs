//! Single regular-file copy with existing-destination policy.

use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::debug;

use super::io_copy::copy_bytes;
use super::query::last_write_time;
use super::status::probe;
use super::types::{CopyOptions, Perms};
use crate::errors::{errno, settle, FsError, Result};
use crate::platform;

/// Copy the regular file `from` to `to`. Returns whether bytes were copied.
///
/// An existing `to` fails with EEXIST unless `options` says what to do:
/// `SKIP_EXISTING` leaves it alone, `UPDATE_EXISTING` replaces it only when
/// `from` is strictly newer, `OVERWRITE_EXISTING` always replaces it.
///
/// Any I/O failure during the byte copy is reported as EPERM.
pub fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>, options: CopyOptions) -> Result<bool> {
    const OP: &str = "copy_file";
    let (from, to) = (from.as_ref(), to.as_ref());
    let fail = |code: i32| FsError::with_paths(OP, from, to, errno(code));

    let (from_st, from_meta) = probe(OP, from, true).map_err(|e| e.for_pair(from, to))?;
    let from_meta = match from_meta {
        Some(m) if from_st.is_regular_file() => m,
        _ => return Err(fail(libc::ENOENT)),
    };

    let (to_st, to_meta) = probe(OP, to, true).map_err(|e| e.for_pair(from, to))?;
    if to_st.exists() {
        if !to_st.is_regular_file() {
            return Err(fail(libc::ENOTSUP));
        }
        if let Some(m) = &to_meta {
            if m.dev() == from_meta.dev() && m.ino() == from_meta.ino() {
                return Err(fail(libc::ENOTSUP));
            }
        }
        if options.contains(CopyOptions::SKIP_EXISTING) {
            debug!(from = %from.display(), to = %to.display(), "skip existing");
            return Ok(false);
        }
        if options.contains(CopyOptions::UPDATE_EXISTING) {
            let from_time = last_write_time(from).map_err(|e| e.relabel(OP))?;
            let to_time = last_write_time(to).map_err(|e| e.relabel(OP))?;
            if from_time <= to_time {
                debug!(from = %from.display(), to = %to.display(), "destination not older; skip");
                return Ok(false);
            }
        } else if !options.contains(CopyOptions::OVERWRITE_EXISTING) {
            return Err(fail(libc::EEXIST));
        }
    }

    let bytes = copy_bytes(from, to).map_err(|e| {
        debug!(from = %from.display(), to = %to.display(), error = %e, "byte copy failed");
        fail(libc::EPERM)
    })?;
    // Special bits (setuid, setgid, sticky) are not carried over.
    let mode = (from_st.permissions() & Perms::ALL).mode();
    platform::chmod(to, mode, true)
        .map_err(|e| FsError::with_paths(OP, from, to, e))?;
    debug!(from = %from.display(), to = %to.display(), bytes, "copied file");
    Ok(true)
}

pub fn copy_file_ec(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    options: CopyOptions,
    ec: &mut Option<FsError>,
) -> bool {
    settle(ec, copy_file(from, to, options))
}
