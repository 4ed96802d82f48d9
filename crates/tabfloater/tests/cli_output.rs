//! Integration tests for the installer CLI.

use std::path::Path;
use std::process::{Command, Output};

const ID: &str = "abcdefghijklmnopabcdefghijklmnop";

fn run_tabfloater(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tabfloater"))
        .args(args)
        .output()
        .expect("Failed to execute 'tabfloater'")
}

fn fake_host(dir: &Path) -> String {
    let name = format!("tabfloater-host{}", std::env::consts::EXE_SUFFIX);
    let path = dir.join(name);
    std::fs::write(&path, b"").unwrap();
    path.display().to_string()
}

#[test]
fn test_manifest_prints_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let host = dir.path().join("tabfloater-host");

    let output = run_tabfloater(&[
        "manifest",
        "--extension-id",
        &format!("chrome-extension://{}/", ID),
        "--host-path",
        &host.display().to_string(),
    ]);

    assert!(
        output.status.success(),
        "tabfloater manifest failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let manifest: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(manifest["name"], "tabfloater_companion");
    assert_eq!(manifest["description"], "TabFloater Companion Application");
    assert_eq!(manifest["type"], "stdio");
    assert_eq!(
        manifest["allowed_origins"],
        serde_json::json!([format!("chrome-extension://{}/", ID)])
    );
    let path = manifest["path"].as_str().unwrap();
    assert!(path.contains("run_companion"), "path: {}", path);
}

#[test]
fn test_manifest_rejects_invalid_extension_id() {
    let output = run_tabfloater(&["manifest", "--extension-id", "not-an-id"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid extension id"), "stderr: {}", stderr);
}

#[test]
fn test_install_and_uninstall_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let host = fake_host(dir.path());
    let manifest_dir = dir.path().join("hosts");
    let manifest_dir_arg = manifest_dir.display().to_string();

    let output = run_tabfloater(&[
        "install",
        "-e",
        ID,
        "--host-path",
        &host,
        "--manifest-dir",
        &manifest_dir_arg,
        "--no-register",
    ]);
    assert!(
        output.status.success(),
        "install failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let manifest_path = manifest_dir.join("tabfloater_companion.json");
    assert!(manifest_path.exists());
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    let launcher = manifest["path"].as_str().unwrap();
    assert!(Path::new(launcher).exists(), "launcher missing: {}", launcher);

    let output = run_tabfloater(&[
        "uninstall",
        "--host-path",
        &host,
        "--manifest-dir",
        &manifest_dir_arg,
        "--no-register",
    ]);
    assert!(
        output.status.success(),
        "uninstall failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!manifest_path.exists());
    assert!(!Path::new(launcher).exists());
}

#[test]
fn test_install_missing_host_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope").display().to_string();
    let manifest_dir = dir.path().join("hosts").display().to_string();

    let output = run_tabfloater(&[
        "install",
        "-e",
        ID,
        "--host-path",
        &missing,
        "--manifest-dir",
        &manifest_dir,
        "--no-register",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Host executable not found"), "stderr: {}", stderr);
}
