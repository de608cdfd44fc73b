//! CLI integration tests
//!
//! These tests run the built binary against temporary workspaces laid out like
//! the firmware repository:
//! - Default run with no arguments
//! - Subcommand output formats
//! - Error handling and exit codes

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ANCHOR: &str = r#"<entry flags="VALUE_WORKSPACE_PATH" kind="sourcePath" name="Src"/>"#;

/// Helper to get the path to the cproject-inject binary
fn inject_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_cproject-inject") {
        return PathBuf::from(path);
    }

    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("cproject-inject")
}

/// Helper to create a workspace with manual tests and a project file
fn create_workspace(dir: &TempDir) -> PathBuf {
    let root = dir.path().to_path_buf();

    let tests = root.join("Manual_Tests/common/stm32");
    fs::create_dir_all(&tests).expect("Failed to create Manual_Tests");
    fs::write(tests.join("gpio_test.c"), "void test(void) {}\n").expect("Failed to write test");
    fs::write(root.join("Manual_Tests/common/clock_test.c"), "").expect("Failed to write test");

    let project_dir = root.join("Projects/STM32H743ZITX");
    fs::create_dir_all(&project_dir).expect("Failed to create project dir");
    let cproject = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
         <cproject>\n\
         \t<sourceEntries>\n\
         \t\t{}\n\
         \t</sourceEntries>\n\
         </cproject>\n",
        ANCHOR
    );
    fs::write(project_dir.join(".cproject"), cproject).expect("Failed to write .cproject");

    root
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(inject_bin());
    command.current_dir(dir).args(args);
    for (key, _) in env::vars() {
        if key.starts_with("CPROJECT_INJECT_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
    command.output().expect("Failed to execute cproject-inject")
}

fn read_project(root: &Path) -> String {
    fs::read_to_string(root.join("Projects/STM32H743ZITX/.cproject"))
        .expect("Failed to read .cproject")
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cproject-inject"));
    assert!(stdout.contains("patch"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_cli_version() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cproject-inject"));
}

#[test]
fn test_no_arguments_patches_default_layout() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    let output = run_in(&root, &[]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = read_project(&root);
    let expected = format!(
        "\t\t{}\n\
         \t\t<entry flags=\"VALUE_WORKSPACE_PATH\" kind=\"sourcePath\" name=\"Manual_Tests/common/clock_test.c\"/>\n\
         \t\t<entry flags=\"VALUE_WORKSPACE_PATH\" kind=\"sourcePath\" name=\"Manual_Tests/common/stm32/gpio_test.c\"/>\n",
        ANCHOR
    );
    assert!(content.contains(&expected), "unexpected content:\n{}", content);
}

#[test]
fn test_patch_dry_run_json() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);
    let before = read_project(&root);

    let output = run_in(&root, &["patch", "--dry-run", "--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output is not JSON");
    assert_eq!(report["files_discovered"], 2);
    assert_eq!(report["lines_inserted"], 2);
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["written"], false);
    assert_eq!(read_project(&root), before);
}

#[test]
fn test_patch_with_explicit_paths() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);
    let project = root.join("Projects/STM32H743ZITX/.cproject");
    let search_root = root.join("Manual_Tests/common/stm32");

    let output = run_in(
        temp.path(),
        &[
            "patch",
            "--search-root",
            search_root.to_str().unwrap(),
            "--project",
            project.to_str().unwrap(),
            "--naming",
            "root",
        ],
    );
    assert!(output.status.success());

    let content = read_project(&root);
    assert!(content.contains("name=\"gpio_test.c\""));
    assert!(!content.contains("clock_test.c"));
}

#[test]
fn test_list_human() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    let output = run_in(&root, &["list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Manual_Tests/common/clock_test.c",
            "Manual_Tests/common/stm32/gpio_test.c"
        ]
    );
}

#[test]
fn test_check_after_double_patch_reports_duplicates() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    assert!(run_in(&root, &[]).status.success());
    let clean = run_in(&root, &["check"]);
    assert_eq!(clean.status.code(), Some(0));

    assert!(run_in(&root, &["patch"]).status.success());
    let doubled = run_in(&root, &["check", "--format", "json"]);
    assert_eq!(doubled.status.code(), Some(1));

    let summary: serde_json::Value =
        serde_json::from_slice(&doubled.stdout).expect("Output is not JSON");
    assert_eq!(summary["duplicates"]["Manual_Tests/common/clock_test.c"], 2);
}

#[test]
fn test_skip_existing_flag() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    assert!(run_in(&root, &["patch"]).status.success());
    let once = read_project(&root);
    assert!(run_in(&root, &["patch", "--skip-existing"]).status.success());

    assert_eq!(read_project(&root), once);
}

#[test]
fn test_missing_project_exit_code() {
    let temp = TempDir::new().unwrap();

    let output = run_in(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_invalid_template_exit_code() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    let output = run_in(&root, &["patch", "--template", "<entry/>"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_env_overrides_project() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);
    let project = root.join("board.cproject");
    fs::write(&project, format!("{}\n", ANCHOR)).unwrap();

    let output = Command::new(inject_bin())
        .current_dir(&root)
        .env("CPROJECT_INJECT_PROJECT", &project)
        .env("CPROJECT_INJECT_NAMING", "root")
        .output()
        .expect("Failed to execute cproject-inject");
    assert!(output.status.success());

    let content = fs::read_to_string(&project).unwrap();
    assert!(content.contains("name=\"clock_test.c\""));
}

#[test]
fn test_config_command_yaml() {
    let temp = TempDir::new().unwrap();

    let output = run_in(temp.path(), &["config", "--format", "yaml"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("search_root: Manual_Tests/common"));
    assert!(stdout.contains("project_file: Projects/STM32H743ZITX/.cproject"));
}

#[test]
fn test_bad_log_level_env_does_not_block_patch() {
    let temp = TempDir::new().unwrap();
    let root = create_workspace(&temp);

    let output = Command::new(inject_bin())
        .current_dir(&root)
        .env("CPROJECT_INJECT_LOG_LEVEL", "verbose")
        .args(["--log-level", "debug", "patch"])
        .output()
        .expect("Failed to execute cproject-inject");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(read_project(&root).contains("name=\"Manual_Tests/common/clock_test.c\""));
}
