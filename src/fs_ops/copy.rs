//! Recursive copy dispatcher and symlink copy.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::debug;

use super::copy_file::copy_file;
use super::create::{create_directory_with_attributes, create_hard_link, create_symlink};
use super::query::read_symlink;
use super::status::probe;
use super::types::CopyOptions;
use crate::errors::{errno, settle, FsError, Result};

/// Where a `copy` call sits in a directory walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyDepth {
    /// Called directly by the user.
    TopLevel,
    /// Called for an entry of a directory being copied.
    Nested,
}

/// Copy `from` to `to` according to its type and `options`.
///
/// * symlinks are recreated (or skipped with `SKIP_SYMLINKS`);
/// * regular files go through `copy_file`, or become links with
///   `CREATE_SYMLINKS` / `CREATE_HARD_LINKS`; a directory `to` receives
///   `to/<filename>`;
/// * directories are created with `from`'s mode and their entries copied.
///   Without `RECURSIVE` only the top-level directory's entries are copied
///   and nested directories are skipped.
///
/// The first failure anywhere in the walk stops it.
pub fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>, options: CopyOptions) -> Result<()> {
    copy_at(from.as_ref(), to.as_ref(), options, CopyDepth::TopLevel)
}

pub fn copy_ec(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    options: CopyOptions,
    ec: &mut Option<FsError>,
) {
    settle(ec, copy(from, to, options))
}

fn copy_at(from: &Path, to: &Path, options: CopyOptions, depth: CopyDepth) -> Result<()> {
    const OP: &str = "copy";
    let fail = |code: i32| FsError::with_paths(OP, from, to, errno(code));

    let lstat_to = options.intersects(CopyOptions::CREATE_SYMLINKS | CopyOptions::SKIP_SYMLINKS);
    let lstat_from = lstat_to || options.contains(CopyOptions::COPY_SYMLINKS);

    let (f, f_meta) = probe(OP, from, !lstat_from).map_err(|e| e.for_pair(from, to))?;
    let (t, t_meta) = probe(OP, to, !lstat_to).map_err(|e| e.for_pair(from, to))?;

    if !f.exists() {
        return Err(fail(libc::ENOENT));
    }
    let same_file = matches!(
        (&f_meta, &t_meta),
        (Some(a), Some(b)) if a.dev() == b.dev() && a.ino() == b.ino()
    );
    if f.is_other() || t.is_other() || (f.is_directory() && t.is_regular_file()) || same_file {
        return Err(fail(libc::ENOTSUP));
    }

    if f.is_symlink() {
        if options.contains(CopyOptions::SKIP_SYMLINKS) {
            debug!(from = %from.display(), "skip symlink");
            Ok(())
        } else if !t.exists() {
            copy_symlink(from, to)
        } else {
            Err(fail(libc::EEXIST))
        }
    } else if f.is_regular_file() {
        if options.contains(CopyOptions::DIRECTORIES_ONLY) {
            Ok(())
        } else if options.contains(CopyOptions::CREATE_SYMLINKS) {
            create_symlink(from, to)
        } else if options.contains(CopyOptions::CREATE_HARD_LINKS) {
            create_hard_link(from, to)
        } else if t.is_directory() {
            let name = from.file_name().ok_or_else(|| fail(libc::EINVAL))?;
            copy_file(from, to.join(name), options).map(drop)
        } else {
            copy_file(from, to, options).map(drop)
        }
    } else if f.is_directory() {
        copy_directory(from, to, options, depth, t.exists())
    } else {
        Ok(())
    }
}

fn copy_directory(
    from: &Path,
    to: &Path,
    options: CopyOptions,
    depth: CopyDepth,
    to_exists: bool,
) -> Result<()> {
    if depth == CopyDepth::Nested && !options.contains(CopyOptions::RECURSIVE) {
        debug!(from = %from.display(), "skip nested directory (not recursive)");
        return Ok(());
    }
    if !to_exists {
        create_directory_with_attributes(to, from)?;
    }
    debug!(from = %from.display(), to = %to.display(), ?depth, "copy directory");

    let entries = fs::read_dir(from).map_err(|e| FsError::with_paths("copy", from, to, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| FsError::with_paths("copy", from, to, e))?;
        copy_at(&entry.path(), &to.join(entry.file_name()), options, CopyDepth::Nested)?;
    }
    Ok(())
}

/// Recreate the symlink `from` at `to`, pointing at the same target.
pub fn copy_symlink(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    let target = read_symlink(from).map_err(|e| e.relabel("copy_symlink").for_pair(from, to))?;
    create_symlink(&target, to).map_err(|e| e.relabel("copy_symlink").for_pair(from, to))
}

pub fn copy_symlink_ec(from: impl AsRef<Path>, to: impl AsRef<Path>, ec: &mut Option<FsError>) {
    settle(ec, copy_symlink(from, to))
}
