use fsops::{absolute, system_complete, FsPath};

#[test]
fn push_inserts_exactly_one_separator() {
    let mut p = FsPath::from("a");
    p.push("b");
    assert_eq!(p, "a/b");
    let mut p = FsPath::from("a/");
    p.push("b");
    assert_eq!(p, "a/b");
    let mut p = FsPath::from("");
    p.push("b");
    assert_eq!(p, "b");
    assert_eq!(FsPath::from("a") / "/abs", "a/abs");
}

#[test]
fn stem_and_extension() {
    let p = FsPath::from("dir/archive.tar.gz");
    assert_eq!(p.stem(), "archive.tar");
    assert_eq!(p.extension(), ".gz");
    assert_eq!(FsPath::from("..").extension(), "");
    assert_eq!(FsPath::from(".profile").stem(), ".profile");
}

#[test]
fn parent_and_filename_rebuild_the_path() {
    for raw in ["/usr/lib/x", "rel/dir/", "//host/share/f", "single"] {
        let p = FsPath::from(raw);
        if p.has_parent_path() && p.filename() != "." {
            let rebuilt = p.parent_path() / p.filename();
            assert_eq!(rebuilt, raw, "rebuild of {raw}");
        }
    }
}

#[test]
fn system_complete_is_absolute_against_cwd() {
    let cwd = FsPath::from(std::env::current_dir().unwrap());
    let p = FsPath::from("some/rel");
    assert_eq!(system_complete(&p).unwrap(), absolute(&p, &cwd).unwrap());
    assert!(system_complete(&p).unwrap().is_absolute());
}
