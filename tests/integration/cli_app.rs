use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn app_add_and_list() {
    let env = TestEnv::new();
    let archive = env.create_archive("fw-2.1.zip", &[("boot.ioio", "boot"), ("app.ioio", "app")]);

    env.cmd()
        .args(["app", "add"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed bundle 'fw-2.1' (2 images)"));

    env.cmd()
        .args(["app", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fw-2.1 (2 images)"))
        .stdout(predicate::str::contains("*active*").not());

    assert!(env.data_dir.path().join("app_layer/fw-2.1/boot.ioio").is_file());
}

#[test]
fn app_list_empty() {
    let env = TestEnv::new();

    env.cmd()
        .args(["app", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No app-layer bundles installed"));
}

#[test]
fn app_add_duplicate_fails() {
    let env = TestEnv::new();
    env.add_app_bundle("fw.zip", &[("boot.ioio", "v1")]);

    let clash = env.create_archive("fw.zip", &[("boot.ioio", "v2")]);
    env.cmd()
        .args(["app", "add"])
        .arg(clash)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let kept = std::fs::read(env.data_dir.path().join("app_layer/fw/boot.ioio")).unwrap();
    assert_eq!(kept, b"v1");
}

#[test]
fn app_add_malformed_archive_fails() {
    let env = TestEnv::new();
    let bogus = env.work_dir.path().join("bogus.zip");
    std::fs::write(&bogus, "not a zip").unwrap();

    env.cmd()
        .args(["app", "add"])
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to extract archive"));
}

#[test]
fn app_activate_publishes_images() {
    let env = TestEnv::new();
    env.add_app_bundle("fw-2.1.zip", &[("boot.ioio", "boot"), ("app.ioio", "app")]);

    env.cmd()
        .args(["app", "activate", "fw-2.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated 'fw-2.1'"));

    assert_eq!(
        env.active_files(),
        vec!["app.fp", "app.ioio", "boot.fp", "boot.ioio"]
    );
    let fp = std::fs::read(env.active_dir().join("boot.fp")).unwrap();
    assert_eq!(fp.len(), 16);

    env.cmd()
        .args(["app", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fw-2.1 (2 images) *active*"));
}

#[test]
fn app_activate_unknown_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["app", "activate", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn app_activate_rejects_path_names() {
    let env = TestEnv::new();

    env.cmd()
        .args(["app", "activate", "../image"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bundle name"));
}

#[test]
fn app_switching_active_bundle() {
    let env = TestEnv::new();
    env.add_app_bundle("one.zip", &[("boot.ioio", "one")]);
    env.add_app_bundle("two.zip", &[("boot.ioio", "two")]);

    env.cmd().args(["app", "activate", "one"]).assert().success();
    env.cmd().args(["app", "activate", "two"]).assert().success();

    let boot = std::fs::read(env.active_dir().join("boot.ioio")).unwrap();
    assert_eq!(boot, b"two");

    env.cmd()
        .args(["app", "info", "one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active:    no"));
    env.cmd()
        .args(["app", "info", "two"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active:    yes"))
        .stdout(predicate::str::contains("- boot"));
}

#[test]
fn app_remove_active_cascades() {
    let env = TestEnv::new();
    env.add_app_bundle("fw-2.1.zip", &[("boot.ioio", "boot"), ("app.ioio", "app")]);
    env.cmd().args(["app", "activate", "fw-2.1"]).assert().success();

    env.cmd()
        .args(["app", "remove", "fw-2.1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed app-layer bundle 'fw-2.1'"));

    assert!(env.active_files().is_empty());
    assert!(!env.data_dir.path().join("app_layer/fw-2.1").exists());

    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active bundle: (none)"));
}

#[test]
fn app_remove_prompt_can_cancel() {
    let env = TestEnv::new();
    env.add_app_bundle("fw.zip", &[("boot.ioio", "boot")]);

    env.cmd()
        .args(["app", "remove", "fw"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    assert!(env.data_dir.path().join("app_layer/fw").is_dir());
}

#[test]
fn app_list_shows_unnamed_bundle() {
    let env = TestEnv::new();
    std::fs::write(env.active_dir().join("manual.ioio"), "hand placed").unwrap();

    env.cmd()
        .args(["app", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": null"))
        .stdout(predicate::str::contains("\"active\": true"))
        .stdout(predicate::str::contains("manual"));
}

#[test]
fn app_list_json_marks_active() {
    let env = TestEnv::new();
    env.add_app_bundle("fw.zip", &[("boot.ioio", "boot")]);
    env.add_app_bundle("spare.zip", &[("boot.ioio", "spare")]);
    env.cmd().args(["app", "activate", "fw"]).assert().success();

    let output = env.cmd().args(["app", "list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let views: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 2);
    for v in views {
        let active = v["name"] == "fw";
        assert_eq!(v["active"], active);
        assert_eq!(v["class"], "app_layer");
    }
}
