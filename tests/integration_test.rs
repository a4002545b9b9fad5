//! Integration tests for the gaia driver
//!
//! These tests run the compiled `gaia` binary inside temporary projects.
//! The "compiler" is a small shell script that writes whatever follows
//! `-o`, so no real toolchain is needed.

#![cfg(unix)]

use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const FAKE_CC: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
    case "$1" in
        -o) out="$2"; shift 2 ;;
        *) echo "$1" >> "$(dirname "$0")/cc.log"; shift ;;
    esac
done
echo built > "$out"
"#;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

fn touch_at(path: &Path, secs: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Project with `src/main.x`, `src/util.x`, a fake compiler and gaia.toml.
fn create_test_project(extra_toml: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create test directory");
    let root = dir.path().to_path_buf();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.x"), "main").unwrap();
    fs::write(root.join("src/util.x"), "util").unwrap();
    write_script(&root.join("fakecc"), FAKE_CC);

    let toml = format!(
        r#"compiler = "{cc}"
output_name = "app"
output_directory = "build"
input_directory = "src"
files = ["main.x", "util.x"]
flags = ["-W1"]
{extra_toml}"#,
        cc = root.join("fakecc").display()
    );
    fs::write(root.join("gaia.toml"), toml).unwrap();

    (dir, root)
}

fn gaia(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gaia"))
        .args(args)
        .current_dir(root)
        .env_remove("GAIA_BOOTSTRAPPED")
        .output()
        .expect("Failed to execute gaia")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_fresh_project_compiles() {
    let (_dir, root) = create_test_project("");

    let output = gaia(&root, &["--echo"]);
    assert!(
        output.status.success(),
        "Build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    assert!(out.contains("compiling build/app"), "stdout: {}", out);
    assert!(!out.contains("skipping"), "stdout: {}", out);
    assert!(
        out.contains(&format!(
            "{} -o build/app -W1 src/main.x src/util.x",
            root.join("fakecc").display()
        )),
        "echo missing: {}",
        out
    );
    assert_eq!(fs::read_to_string(root.join("build/app")).unwrap(), "built\n");
    assert!(root.join("build/compile_commands.json").exists());
}

#[test]
fn test_second_run_skips_but_runs_extras() {
    let (_dir, root) = create_test_project(
        "commands = [\"echo \\\"$GAIA_COMMAND\\\" > extra.log\"]\n",
    );

    assert!(gaia(&root, &[]).status.success());
    touch_at(&root.join("src/main.x"), 1_000);
    touch_at(&root.join("src/util.x"), 1_000);
    touch_at(&root.join("build/app"), 2_000);
    fs::remove_file(root.join("cc.log")).unwrap();
    fs::remove_file(root.join("extra.log")).unwrap();

    let output = gaia(&root, &[]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("skipping"), "stdout: {}", out);
    assert!(out.contains("running extra command"), "stdout: {}", out);
    assert!(!root.join("cc.log").exists(), "compiler ran on an up to date tree");

    let extra = fs::read_to_string(root.join("extra.log")).unwrap();
    assert!(extra.contains("-o build/app -W1 src/main.x src/util.x"));
}

#[test]
fn test_force_rebuilds_up_to_date_tree() {
    let (_dir, root) = create_test_project("");

    assert!(gaia(&root, &[]).status.success());
    touch_at(&root.join("build/app"), 4_000_000_000);

    let output = gaia(&root, &["ignored", "-f"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("compiling"));
}

#[test]
fn test_newer_input_rebuilds() {
    let (_dir, root) = create_test_project("");

    assert!(gaia(&root, &[]).status.success());
    touch_at(&root.join("build/app"), 1_000);
    touch_at(&root.join("src/main.x"), 900);
    touch_at(&root.join("src/util.x"), 1_001);

    let output = gaia(&root, &[]);
    assert!(stdout(&output).contains("compiling"));
}

#[test]
fn test_empty_file_list_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gaia.toml"), "compiler = \"cc\"\n").unwrap();

    let output = gaia(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[-]"), "stderr: {}", stderr);
    assert!(stderr.contains("no input files given"), "stderr: {}", stderr);
}

#[test]
fn test_missing_project_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = gaia(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("gaia.toml not found"));
}

#[test]
fn test_compiler_failure_exits_one() {
    let (_dir, root) = create_test_project("commands = [\"touch extra.log\"]\n");
    write_script(&root.join("fakecc"), "#!/bin/sh\necho 'undefined reference to `main'\"'\"'' >&2\nexit 1\n");

    let output = gaia(&root, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error during compilation"), "stderr: {}", stderr);
    assert!(!root.join("extra.log").exists());
}

#[test]
fn test_output_directory_blocked_by_file_fails() {
    let (_dir, root) = create_test_project("");
    fs::write(root.join("build"), "not a directory").unwrap();

    let output = gaia(&root, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not create output directory"),
        "stderr: {}",
        stderr
    );
    assert!(!root.join("cc.log").exists(), "compiler ran without an output directory");
}

#[test]
fn test_empty_output_name_builds_main() {
    let (_dir, root) = create_test_project("");
    let toml = fs::read_to_string(root.join("gaia.toml"))
        .unwrap()
        .replace("output_name = \"app\"", "output_name = \"\"");
    fs::write(root.join("gaia.toml"), toml).unwrap();

    let output = gaia(&root, &[]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(root.join("build/main")).unwrap(), "built\n");
    assert_eq!(fs::read_to_string(root.join("src/main.x")).unwrap(), "main");
}
