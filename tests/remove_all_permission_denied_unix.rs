#![cfg(unix)]

use fsops::{permissions, remove_all, remove_all_ec, Perms};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

/// A directory whose permissions were cleared cannot be listed, so removing
/// the tree above it must fail with the permission error rather than report
/// a partial count.
#[test]
fn unlistable_subdirectory_aborts_remove_all() {
    // Root bypasses permission checks.
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }

    let td = tempdir().expect("tempdir");
    let root = td.path().join("root");
    let locked = root.join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("inner.txt"), b"x").unwrap();

    permissions(&locked, Perms::empty()).unwrap();
    assert_eq!(fs::metadata(&locked).unwrap().permissions().mode() & 0o7777, 0);

    let err = remove_all(&root).expect_err("expected permission denied");
    assert_eq!(err.op(), "remove_all");
    assert_eq!(err.errno(), libc::EACCES);
    let msg = err.to_string();
    assert!(msg.contains("permission denied"), "unexpected error: {msg}");

    let mut ec = None;
    assert_eq!(remove_all_ec(&root, &mut ec), u64::MAX);
    assert!(ec.is_some());
    assert!(locked.exists(), "nothing above the failure may be removed");

    // Restore so tempdir cleanup succeeds.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(remove_all(&root).unwrap(), 3);
}
