use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn config_show_defaults() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fingerprint:    md5"))
        .stdout(predicate::str::contains("Active dir"));
}

#[test]
fn config_set_active_dir() {
    let env = TestEnv::new();
    let active = env.work_dir.path().join("out");

    env.cmd()
        .args(["config", "set", "active_dir"])
        .arg(&active)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set active_dir"));

    env.cmd()
        .args(["config", "get", "active_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out"));

    env.add_app_bundle("fw.zip", &[("boot.ioio", "boot")]);
    env.cmd().args(["app", "activate", "fw"]).assert().success();
    assert!(active.join("boot.fp").is_file());
}

#[test]
fn config_set_invalid_key() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "nonexistent_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn config_set_unavailable_fingerprint() {
    let env = TestEnv::new();

    env.cmd()
        .args(["config", "set", "fingerprint", "whirlpool"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid fingerprint value"));
}
