use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use fsops::config::{default_config_path, load_config, CONFIG_ENV};
use fsops::{CopyOptions, LogLevel};

struct EnvVar;

impl EnvVar {
    fn set(v: &std::path::Path) -> Self {
        unsafe { std::env::set_var(CONFIG_ENV, v) };
        EnvVar
    }
}

impl Drop for EnvVar {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

#[test]
#[serial]
fn env_override_names_the_config_file() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    fs::write(
        &cfg_path,
        r#"<config>
  <log_level>info</log_level>
  <json_logs>true</json_logs>
  <copy_options>recursive,overwrite_existing</copy_options>
</config>"#,
    )
    .unwrap();

    let _env = EnvVar::set(&cfg_path);
    assert_eq!(default_config_path(), Some(cfg_path.clone()));

    let cfg = load_config().expect("config loads");
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.json_logs);
    assert_eq!(cfg.copy_defaults, CopyOptions::RECURSIVE | CopyOptions::OVERWRITE_EXISTING);
    assert!(cfg.log_file.is_none());
}

#[test]
#[serial]
fn env_override_directory_means_config_xml_inside() {
    let td = tempdir().unwrap();
    let _env = EnvVar::set(td.path());
    assert_eq!(default_config_path(), Some(td.path().join("config.xml")));
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let td = tempdir().unwrap();
    let _env = EnvVar::set(&td.path().join("absent.xml"));
    let cfg = load_config().unwrap();
    assert_eq!(cfg, fsops::Config::default());
}

#[test]
#[serial]
fn malformed_file_is_an_error_naming_the_path() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("bad.xml");
    fs::write(&cfg_path, "<config><log_level>debug</log_level><extra>1</extra></config>").unwrap();
    let _env = EnvVar::set(&cfg_path);

    let err = load_config().unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("bad.xml"), "got: {msg}");
}
