//! Platform-specific helpers.
//! Thin wrappers over the POSIX calls the operations rely on that have no
//! direct `std` equivalent. Only Unix targets are supported.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::{
    chmod, open_log_file_append, remove, statvfs, truncate, FsStats, CHMOD_ALWAYS_FOLLOWS,
};

#[cfg(not(unix))]
compile_error!("fsops targets POSIX systems only");
