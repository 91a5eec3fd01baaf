//! Location of the directory for temporary files.

use std::env;
use std::path::PathBuf;
use tracing::trace;

use super::status::status;
use crate::errors::{errno, settle, FsError, Result};

/// Checked in order; the first one set wins.
const TEMP_ENV_VARS: [&str; 4] = ["TMPDIR", "TMP", "TEMP", "TEMPDIR"];
const DEFAULT_TEMP_DIR: &str = "/tmp";

/// First of `$TMPDIR`, `$TMP`, `$TEMP`, `$TEMPDIR` that is set, else `/tmp`.
/// Fails with ENOENT when the candidate is not a directory.
pub fn temp_directory_path() -> Result<PathBuf> {
    let candidate = TEMP_ENV_VARS
        .iter()
        .find_map(|var| env::var_os(var))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMP_DIR));
    trace!(path = %candidate.display(), "temp directory candidate");

    let st = status(&candidate).map_err(|e| e.relabel("temp_directory_path"))?;
    if !st.is_directory() {
        return Err(FsError::with_path("temp_directory_path", &candidate, errno(libc::ENOENT)));
    }
    Ok(candidate)
}

pub fn temp_directory_path_ec(ec: &mut Option<FsError>) -> PathBuf {
    settle(ec, temp_directory_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::ffi::OsString;
    use tempfile::tempdir;

    /// Restores the temp variables on drop.
    struct EnvGuard(Vec<(&'static str, Option<OsString>)>);

    impl EnvGuard {
        fn clear() -> Self {
            let saved = TEMP_ENV_VARS.iter().map(|v| (*v, env::var_os(v))).collect();
            for v in TEMP_ENV_VARS {
                unsafe { env::remove_var(v) };
            }
            EnvGuard(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.0 {
                match v {
                    Some(v) => unsafe { env::set_var(k, v) },
                    None => unsafe { env::remove_var(k) },
                }
            }
        }
    }

    #[test]
    #[serial]
    fn falls_back_to_tmp() {
        let _g = EnvGuard::clear();
        assert_eq!(temp_directory_path().unwrap(), PathBuf::from("/tmp"));
    }

    #[test]
    #[serial]
    fn earlier_variable_wins() {
        let _g = EnvGuard::clear();
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        unsafe {
            env::set_var("TEMP", b.path());
            env::set_var("TMP", a.path());
        }
        assert_eq!(temp_directory_path().unwrap(), a.path());
    }

    #[test]
    #[serial]
    fn non_directory_is_enoent() {
        let _g = EnvGuard::clear();
        let dir = tempdir().unwrap();
        let f = dir.path().join("file");
        std::fs::write(&f, b"x").unwrap();
        unsafe { env::set_var("TMPDIR", &f) };

        let mut ec = None;
        let got = temp_directory_path_ec(&mut ec);
        assert!(got.as_os_str().is_empty());
        let err = ec.unwrap();
        assert_eq!(err.errno(), libc::ENOENT);
        assert_eq!(err.op(), "temp_directory_path");
    }
}
