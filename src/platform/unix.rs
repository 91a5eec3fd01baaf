//! POSIX syscalls that `std` does not expose directly.
//! Each wrapper returns the raw errno through `io::Error::last_os_error`.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// Raw statvfs numbers, already multiplied out to bytes.
#[derive(Debug, Clone, Copy)]
pub struct FsStats {
    pub capacity: u64,
    pub free: u64,
    pub available: u64,
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))
}

/// statvfs(2) for the filesystem containing `path`.
pub fn statvfs(path: &Path) -> io::Result<FsStats> {
    let c = c_path(path)?;
    let stat = unsafe {
        let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();
        if libc::statvfs(c.as_ptr(), stat.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }
        stat.assume_init()
    };
    let frsize = stat.f_frsize as u64;
    Ok(FsStats {
        capacity: (stat.f_blocks as u64).saturating_mul(frsize),
        free: (stat.f_bfree as u64).saturating_mul(frsize),
        available: (stat.f_bavail as u64).saturating_mul(frsize),
    })
}

/// remove(3): unlinks a file or removes an empty directory.
pub fn remove(path: &Path) -> io::Result<()> {
    let c = c_path(path)?;
    if unsafe { libc::remove(c.as_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// truncate(2) to exactly `size` bytes.
pub fn truncate(path: &Path, size: u64) -> io::Result<()> {
    let c = c_path(path)?;
    let len = libc::off_t::try_from(size)
        .map_err(|_| io::Error::from_raw_os_error(libc::EFBIG))?;
    if unsafe { libc::truncate(c.as_ptr(), len) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// True where `chmod` cannot act on a symlink itself.
pub const CHMOD_ALWAYS_FOLLOWS: bool = cfg!(target_os = "linux");

/// chmod on `path`. When `follow` is false and the platform supports it,
/// the link itself is changed via fchmodat(AT_SYMLINK_NOFOLLOW); Linux
/// rejects that flag, so there the target is always changed.
pub fn chmod(path: &Path, mode: u32, follow: bool) -> io::Result<()> {
    let c = c_path(path)?;
    let mode = mode as libc::mode_t;
    #[cfg(not(target_os = "linux"))]
    let rc = {
        let flags = if follow { 0 } else { libc::AT_SYMLINK_NOFOLLOW };
        unsafe { libc::fchmodat(libc::AT_FDCWD, c.as_ptr(), mode, flags) }
    };
    #[cfg(target_os = "linux")]
    let rc = {
        let _ = follow;
        unsafe { libc::chmod(c.as_ptr(), mode) }
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Open a log file for appending, created 0600. A symlink in the final
/// component is refused (O_NOFOLLOW).
pub fn open_log_file_append(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)
}
