//! Directory, symlink and hard-link creation.

use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::{symlink, DirBuilderExt, MetadataExt};
use std::path::Path;
use tracing::debug;

use super::status::{probe, status};
use super::types::Perms;
use crate::errors::{errno, settle, FsError, Result};
use crate::path::FsPath;

fn mkdir(op: &'static str, p: &Path, mode: u32) -> Result<bool> {
    match DirBuilder::new().mode(mode).create(p) {
        Ok(()) => {
            debug!(path = %p.display(), mode = format_args!("{mode:o}"), "created directory");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if status(p).is_ok_and(|st| st.is_directory()) {
                Ok(false)
            } else {
                Err(FsError::with_path(op, p, e))
            }
        }
        Err(e) => Err(FsError::with_path(op, p, e)),
    }
}

/// mkdir(2) with mode 0777 (less umask). Returns false when `p` is already a
/// directory.
pub fn create_directory(p: impl AsRef<Path>) -> Result<bool> {
    mkdir("create_directory", p.as_ref(), Perms::ALL.mode())
}

pub fn create_directory_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, create_directory(p))
}

/// Like `create_directory`, with the permission bits of `attributes`.
pub fn create_directory_with_attributes(
    p: impl AsRef<Path>,
    attributes: impl AsRef<Path>,
) -> Result<bool> {
    let (p, attributes) = (p.as_ref(), attributes.as_ref());
    let meta = fs::metadata(attributes)
        .map_err(|e| FsError::with_paths("create_directory", p, attributes, e))?;
    mkdir("create_directory", p, Perms::from_mode(meta.mode()).mode())
}

pub fn create_directory_with_attributes_ec(
    p: impl AsRef<Path>,
    attributes: impl AsRef<Path>,
    ec: &mut Option<FsError>,
) -> bool {
    settle(ec, create_directory_with_attributes(p, attributes))
}

/// Create `p` and every missing ancestor. Returns false when `p` already
/// exists as a directory.
pub fn create_directories(p: impl AsRef<Path>) -> Result<bool> {
    create_directories_inner(&FsPath::from(p.as_ref()))
}

fn create_directories_inner(p: &FsPath) -> Result<bool> {
    const OP: &str = "create_directories";
    let st = probe(OP, p.as_path(), true)?.0;
    if st.is_directory() {
        return Ok(false);
    }
    if st.exists() {
        return Err(FsError::with_path(OP, p, errno(libc::EEXIST)));
    }

    let parent = p.parent_path();
    let mut made_parent = false;
    if !parent.is_empty() {
        let parent_st = probe(OP, parent.as_path(), true)?.0;
        if !parent_st.exists() {
            made_parent = create_directories_inner(&parent)?;
        }
    }
    let made = mkdir(OP, p.as_path(), Perms::ALL.mode())?;
    Ok(made || made_parent)
}

pub fn create_directories_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> bool {
    settle(ec, create_directories(p))
}

/// symlink(2): `link` will point at `target`.
pub fn create_symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let (target, link) = (target.as_ref(), link.as_ref());
    symlink(target, link).map_err(|e| FsError::with_paths("create_symlink", target, link, e))
}

pub fn create_symlink_ec(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
    ec: &mut Option<FsError>,
) {
    settle(ec, create_symlink(target, link))
}

/// POSIX symlinks are untyped; this is `create_symlink` under its own name.
pub fn create_directory_symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let (target, link) = (target.as_ref(), link.as_ref());
    symlink(target, link)
        .map_err(|e| FsError::with_paths("create_directory_symlink", target, link, e))
}

pub fn create_directory_symlink_ec(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
    ec: &mut Option<FsError>,
) {
    settle(ec, create_directory_symlink(target, link))
}

/// link(2).
pub fn create_hard_link(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let (target, link) = (target.as_ref(), link.as_ref());
    fs::hard_link(target, link).map_err(|e| FsError::with_paths("create_hard_link", target, link, e))
}

pub fn create_hard_link_ec(
    target: impl AsRef<Path>,
    link: impl AsRef<Path>,
    ec: &mut Option<FsError>,
) {
    settle(ec, create_hard_link(target, link))
}
