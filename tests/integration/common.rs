use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub struct TestEnv {
    pub data_dir: TempDir,
    pub work_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().expect("failed to create data_dir"),
            work_dir: TempDir::new().expect("failed to create work_dir"),
        }
    }

    /// Build a fwbundle Command pre-configured with --data-dir and cwd = work_dir.
    /// Active images land in the data directory itself.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fwbundle"));
        cmd.arg("--data-dir")
            .arg(self.data_dir.path())
            .env_remove("FWBUNDLE_ACTIVE_DIR")
            .env_remove("RUST_LOG")
            .current_dir(self.work_dir.path());
        cmd
    }

    pub fn active_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Write `<file>` into work_dir as a zip holding the given entries.
    pub fn create_archive(&self, file: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.work_dir.path().join(file);
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        for (name, contents) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        path
    }

    /// Shorthand: install an app-layer bundle from a fresh archive.
    pub fn add_app_bundle(&self, file: &str, entries: &[(&str, &str)]) {
        let archive = self.create_archive(file, entries);
        self.cmd()
            .args(["app", "add"])
            .arg(archive)
            .assert()
            .success();
    }

    /// Names of `.ioio` and `.fp` files in the active directory, sorted.
    pub fn active_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.active_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with(".ioio") || n.ends_with(".fp"))
            .collect();
        names.sort();
        names
    }
}
