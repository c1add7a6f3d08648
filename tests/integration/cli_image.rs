use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn image_add_list_remove() {
    let env = TestEnv::new();
    let archive = env.create_archive("lib-1.0.zip", &[("lib.ioio", "lib"), ("docs/readme.txt", "r")]);

    env.cmd()
        .args(["image", "add"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed bundle 'lib-1.0' (1 images)"));

    env.cmd()
        .args(["image", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib-1.0 (1 images)"));

    env.cmd()
        .args(["image", "info", "lib-1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class:     image"))
        .stdout(predicate::str::contains("- lib"));

    env.cmd()
        .args(["image", "remove", "lib-1.0", "-f"])
        .assert()
        .success();

    env.cmd()
        .args(["image", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No image bundles installed"));
    assert!(!env.data_dir.path().join("image/lib-1.0").exists());
}

#[test]
fn image_bundles_are_not_app_bundles() {
    let env = TestEnv::new();
    let archive = env.create_archive("lib.zip", &[("lib.ioio", "lib")]);
    env.cmd().args(["image", "add"]).arg(&archive).assert().success();

    env.cmd()
        .args(["app", "activate", "lib"])
        .assert()
        .failure();
    assert!(env.active_files().is_empty());
}

#[test]
fn image_remove_missing_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["image", "remove", "ghost", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
