use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_flag-registry");

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to run flag-registry")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_table(path: &Path, body: &str) {
    fs::write(path, body).expect("failed to write flag table");
}

// ---------------------------------------------------------------------------
// Built-in registry
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_builtin_registry() {
    let output = run(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("4 catalog(s), 6 command(s), 31 flag(s)"));
}

#[test]
fn catalogs_lists_groups_and_commands() {
    let output = run(&["catalogs"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("general"));
    assert!(text.contains("base"));
    assert!(text.contains("project package"));
    assert!(text.contains("general.SKIP_PUBLISH_CHECK"));
}

#[test]
fn show_renders_usage_forms() {
    let output = run(&["show", "--catalog", "base"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("-w, --working-dir"));
    assert!(text.contains("--no-cache"));
    assert!(text.contains("WORKING_DIR"));
}

#[test]
fn show_command_as_json() {
    let output = run(&["show", "--command", "test", "--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["name"], "test");
    let flags = json["flags"].as_array().unwrap();
    assert_eq!(flags.len(), 19 + 3 + 2);
    let junit = flags.iter().find(|f| f["key"] == "JUNIT_REPORTS").unwrap();
    assert_eq!(junit["group"], "test");
    assert_eq!(junit["long"], "--junit-reports");
}

#[test]
fn show_requires_a_target() {
    let output = run(&["show"]);
    assert!(!output.status.success());
}

#[test]
fn show_unknown_command_fails() {
    let output = run(&["show", "--command", "server"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown command: server"));
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_classifies_tokens() {
    let output = run(&[
        "resolve",
        "--command",
        "eval",
        "--",
        "-w",
        "/work",
        "--format=yaml",
        "module.pkl",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("WORKING_DIR (base)"));
    assert!(text.contains("FORMAT (base) = yaml"));
    assert!(text.contains("positional"));
}

#[test]
fn resolve_reports_unknown_options() {
    let output = run(&[
        "resolve",
        "--command",
        "download-package",
        "--format",
        "json",
        "--",
        "--no-transitive",
        "--output-path",
    ]);
    assert!(!output.status.success());

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reports[0]["kind"], "flag");
    assert_eq!(reports[0]["key"], "NO_TRANSITIVE");
    assert_eq!(reports[1]["kind"], "unknown_option");
    assert!(stderr(&output).contains("1 unknown option(s) for 'download-package': --output-path"));
}

#[test]
fn resolve_tokens_after_separator_may_shadow_own_options() {
    let output = run(&[
        "resolve", "--command", "eval", "--format", "json", "--", "--format", "-v", "--table",
    ]);
    assert!(!output.status.success());

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reports[0]["key"], "FORMAT");
    assert_eq!(reports[1]["kind"], "unknown_option");
    assert_eq!(reports[2]["kind"], "unknown_option");
    assert!(stderr(&output).contains("2 unknown option(s) for 'eval': -v, --table"));
}

// ---------------------------------------------------------------------------
// Flag tables
// ---------------------------------------------------------------------------

#[test]
fn export_then_check_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("flags.yaml");
    let path_str = path.to_str().unwrap();

    let output = run(&["export", "--output", path_str]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(path.exists());

    let output = run(&["--table", path_str, "check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("6 command(s)"));
}

#[test]
fn custom_table_drives_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.yaml");
    write_table(
        &path,
        r#"
version: "1.0"
catalogs:
  - name: general
    flags:
      - { key: OUTPUT_PATH, long: --output-path, short: -o }
      - { key: OMIT_PROJECT_SETTINGS, long: --omit-project-settings }
commands:
  - name: render
    catalogs: [general]
"#,
    );

    let output = run(&[
        "resolve",
        "--table",
        path.to_str().unwrap(),
        "--command",
        "render",
        "--",
        "-o",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("OUTPUT_PATH (general)"));
}

#[test]
fn check_rejects_duplicate_spelling() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.yaml");
    write_table(
        &path,
        r#"
version: "1.0"
catalogs:
  - name: base
    flags:
      - { key: FORMAT, long: --format, short: -f }
  - name: output
    flags:
      - { key: OUTPUT_FORMAT, long: --output-format, short: -f }
commands:
  - name: eval
    catalogs: [base, output]
"#,
    );

    let output = run(&["--table", path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("duplicate flag spelling -f"), "stderr: {err}");
    assert!(err.contains("FORMAT, OUTPUT_FORMAT"), "stderr: {err}");
}

#[test]
fn check_names_key_of_malformed_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.yaml");
    write_table(
        &path,
        r#"
version: "1.0"
catalogs:
  - name: base
    flags:
      - { key: WORKING_DIR, long: --working-dir, short: -w }
      - { key: CACHE_DIR, long: cache-dir }
"#,
    );

    let output = run(&["--table", path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("CACHE_DIR in catalog base"), "stderr: {err}");
}

#[test]
fn check_rejects_missing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let output = run(&["--table", path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load flag table"));
}
