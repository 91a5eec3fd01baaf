//! Path resolution against a base directory and through the filesystem.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::{settle, FsError, Result};
use crate::path::FsPath;

/// getcwd(3).
pub fn current_path() -> Result<PathBuf> {
    env::current_dir().map_err(|e| FsError::new("current_path", e))
}

pub fn current_path_ec(ec: &mut Option<FsError>) -> PathBuf {
    settle(ec, current_path())
}

/// chdir(2).
pub fn set_current_path(p: impl AsRef<Path>) -> Result<()> {
    let p = p.as_ref();
    env::set_current_dir(p).map_err(|e| FsError::with_path("current_path", p, e))
}

pub fn set_current_path_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) {
    settle(ec, set_current_path(p))
}

/// Complete `p` against `base` using root-name/root-directory rules.
///
/// Only touches the filesystem when `base` is itself relative, in which case
/// it is first completed against the current directory.
pub fn absolute(p: &FsPath, base: &FsPath) -> Result<FsPath> {
    if p.has_root_name() && p.has_root_directory() {
        return Ok(p.clone());
    }

    let abs_base = if base.is_absolute() {
        base.clone()
    } else {
        absolute(base, &FsPath::from(current_path()?))?
    };

    let out = match (p.has_root_name(), p.has_root_directory()) {
        (false, false) => &abs_base / p,
        (true, _) => {
            p.root_name() / abs_base.root_directory() / abs_base.relative_path() / p.relative_path()
        }
        (false, true) => {
            if abs_base.has_root_name() {
                abs_base.root_name() / p
            } else {
                p.clone()
            }
        }
    };
    debug_assert!(out.is_absolute(), "absolute() produced a relative path: {out}");
    trace!(path = %p, base = %abs_base, result = %out, "absolute");
    Ok(out)
}

pub fn absolute_ec(p: &FsPath, base: &FsPath, ec: &mut Option<FsError>) -> FsPath {
    settle(ec, absolute(p, base))
}

/// `absolute(p, current_path())`.
pub fn system_complete(p: &FsPath) -> Result<FsPath> {
    let cwd = FsPath::from(current_path().map_err(|e| e.relabel("system_complete"))?);
    absolute(p, &cwd)
}

/// Resolve `p` against `base`, then every symlink and `.`/`..` via realpath(3).
pub fn canonical(p: impl AsRef<Path>, base: impl AsRef<Path>) -> Result<PathBuf> {
    let orig = p.as_ref();
    let abs = absolute(&FsPath::from(orig), &FsPath::from(base.as_ref()))
        .map_err(|e| e.relabel("canonical"))?;
    fs::canonicalize(&abs).map_err(|e| FsError::with_path("canonical", orig, e))
}

pub fn canonical_ec(
    p: impl AsRef<Path>,
    base: impl AsRef<Path>,
    ec: &mut Option<FsError>,
) -> PathBuf {
    settle(ec, canonical(p, base))
}
