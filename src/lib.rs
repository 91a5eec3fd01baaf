//! Core library for `fsops`.
//!
//! A POSIX filesystem operations layer. Every operation exists in two
//! forms: `op(..) -> Result<T>` returns a structured [`FsError`] on failure,
//! and `op_ec(.., &mut Option<FsError>) -> T` stores the error in a slot and
//! returns a sentinel value instead. [`FsPath`] implements the generic path
//! grammar (root-name, root-directory, elements) the operations are built on.
//!
//! The command-line front end (`cli`, `config`, `output`) lives here too so
//! the binary stays a thin shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod path;
pub mod platform;

pub use errors::{FsError, Result, Sentinel};
pub use fs_ops::*;
pub use path::FsPath;

pub use config::{default_config_path, path_has_symlink_ancestor, Config, LogLevel};

/// Convenient re-exports for library consumers.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::errors::{FsError, Result, Sentinel};
    pub use crate::fs_ops::{
        copy, copy_file, create_directories, exists, remove_all, status, symlink_status,
        CopyOptions, FileStatus, FileType, Perms, SpaceInfo,
    };
    pub use crate::path::FsPath;
}
