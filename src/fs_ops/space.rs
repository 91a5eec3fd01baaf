//! Filesystem capacity via statvfs(2).

use std::path::Path;

use super::types::SpaceInfo;
use crate::errors::{settle, FsError, Result};
use crate::platform;

/// Capacity, free and available bytes of the filesystem holding `p`.
pub fn space(p: impl AsRef<Path>) -> Result<SpaceInfo> {
    let p = p.as_ref();
    let st = platform::statvfs(p).map_err(|e| FsError::with_path("space", p, e))?;
    Ok(SpaceInfo {
        capacity: st.capacity,
        free: st.free,
        available: st.available,
    })
}

pub fn space_ec(p: impl AsRef<Path>, ec: &mut Option<FsError>) -> SpaceInfo {
    settle(ec, space(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn space_of_tempdir_is_consistent() {
        let dir = tempdir().unwrap();
        let s = space(dir.path()).unwrap();
        assert!(s.capacity > 0);
        assert!(s.free <= s.capacity);
        assert!(s.available <= s.free);
    }

    #[test]
    fn missing_path_fills_slot_with_all_ones() {
        let dir = tempdir().unwrap();
        let mut ec = None;
        let s = space_ec(dir.path().join("missing"), &mut ec);
        assert_eq!((s.capacity, s.free, s.available), (u64::MAX, u64::MAX, u64::MAX));
        let err = ec.unwrap();
        assert_eq!(err.op(), "space");
        assert_eq!(err.errno(), libc::ENOENT);
    }
}
