//! The two reporting modes agree: whatever `op` returns as `Err`, `op_ec`
//! stores in the slot, returning its sentinel.

use filetime::FileTime;
use fsops::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn stale() -> Option<FsError> {
    Some(FsError::new("stale", std::io::Error::from_raw_os_error(libc::EIO)))
}

#[test]
fn sentinels_for_missing_paths() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing");

    let mut ec = None;
    assert_eq!(file_size_ec(&missing, &mut ec), u64::MAX);
    let err = ec.take().unwrap();
    assert_eq!(err.op(), "file_size");
    assert_eq!(err.errno(), libc::ENOENT);

    assert!(!is_empty_ec(&missing, &mut ec));
    assert_eq!(ec.take().unwrap().errno(), libc::ENOENT);

    assert_eq!(hard_link_count_ec(&missing, &mut ec), u64::MAX);
    assert_eq!(ec.take().unwrap().errno(), libc::ENOENT);

    assert_eq!(last_write_time_ec(&missing, &mut ec), FileTime::from_unix_time(i64::MIN, 0));
    assert!(ec.take().is_some());

    assert_eq!(read_symlink_ec(&missing, &mut ec), PathBuf::new());
    assert_eq!(ec.take().unwrap().op(), "read_symlink");

    assert!(!create_directory_ec(missing.join("a/b"), &mut ec));
    assert_eq!(ec.take().unwrap().errno(), libc::ENOENT);

    resize_file_ec(&missing, 10, &mut ec);
    assert_eq!(ec.take().unwrap().op(), "resize_file");

    set_last_write_time_ec(&missing, FileTime::now(), &mut ec);
    assert_eq!(ec.take().unwrap().op(), "last_write_time");
}

#[test]
fn success_clears_a_stale_slot() {
    let td = tempdir().unwrap();
    let f = td.path().join("f");
    fs::write(&f, b"abc").unwrap();

    let mut ec = stale();
    assert_eq!(file_size_ec(&f, &mut ec), 3);
    assert!(ec.is_none());

    let mut ec = stale();
    assert!(exists_ec(&f, &mut ec));
    assert!(ec.is_none());

    let mut ec = stale();
    let st = status_ec(&f, &mut ec);
    assert!(st.is_regular_file());
    assert!(ec.is_none());

    let mut ec = stale();
    rename_ec(&f, td.path().join("g"), &mut ec);
    assert!(ec.is_none());
}

#[test]
fn raise_and_slot_modes_report_the_same_error() {
    let td = tempdir().unwrap();
    let from = td.path().join("nope");
    let to = td.path().join("dst");

    let raised = rename(&from, &to).unwrap_err();
    let mut ec = None;
    rename_ec(&from, &to, &mut ec);
    let slotted = ec.unwrap();

    assert_eq!(raised.op(), slotted.op());
    assert_eq!(raised.errno(), slotted.errno());
    assert_eq!(raised.path1(), slotted.path1());
    assert_eq!(raised.path2(), slotted.path2());
    assert_eq!(raised.path2(), Some(to.as_path()));
}

#[test]
fn equivalent_of_two_missing_paths_is_false_without_error() {
    let td = tempdir().unwrap();
    let mut ec = stale();
    assert!(!equivalent_ec(td.path().join("x"), td.path().join("y"), &mut ec));
    assert!(ec.is_none());
}

#[test]
fn create_directories_twice_is_idempotent() {
    let td = tempdir().unwrap();
    let p = td.path().join("a/b/c/d");
    assert!(create_directories(&p).unwrap());
    let mut ec = stale();
    assert!(!create_directories_ec(&p, &mut ec));
    assert!(ec.is_none());
}

#[test]
fn space_sentinel_is_all_ones() {
    let td = tempdir().unwrap();
    let mut ec = None;
    let s = space_ec(td.path().join("missing"), &mut ec);
    assert_eq!(s.capacity & s.free & s.available, u64::MAX);
    assert!(ec.is_some());
}
