//! Integration tests: CLI smoke tests and end-to-end scan scenarios over
//! tempdir fixture homes.

mod common;

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

/// Fixture home directory plus a catalog file living outside it.
struct Fixture {
    home: TempDir,
    _aux: TempDir,
    catalog: std::path::PathBuf,
}

impl Fixture {
    fn new(catalog_json: &str) -> Self {
        let home = TempDir::new().expect("create fixture home");
        let aux = TempDir::new().expect("create fixture aux dir");
        let catalog = aux.path().join("known.json");
        fs::write(&catalog, catalog_json).expect("write catalog");
        Self {
            home,
            _aux: aux,
            catalog,
        }
    }

    fn home(&self) -> &Path {
        self.home.path()
    }

    /// Run dotspy against this fixture with color disabled and HOME isolated.
    fn run(&self, case: &str, extra_args: &[&str]) -> common::CmdResult {
        let home = self.home().to_str().unwrap().to_string();
        let catalog = self.catalog.to_str().unwrap().to_string();
        let mut args: Vec<&str> = vec![
            "--no-color",
            "--root",
            home.as_str(),
            "--catalog",
            catalog.as_str(),
        ];
        args.extend_from_slice(extra_args);
        common::run_cli_case_env(case, &args, &[("HOME", home.as_str())])
    }
}

const SCENARIO_CATALOG: &str =
    r#"{".bashrc": ["bash"], ".config": [{".git": ["git", "config"]}]}"#;

#[test]
fn help_prints_usage() {
    let result = common::run_cli_case("help_prints_usage", &["--help"]);
    assert!(
        result.status.success(),
        "expected success; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("Usage: dotspy"),
        "missing help banner; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.contains("cache, config, history"),
        "missing type epilog; log: {}",
        result.log_path.display()
    );
}

#[test]
fn version_prints_name() {
    let result = common::run_cli_case("version_prints_name", &["--version"]);
    assert!(result.status.success());
    assert!(
        result.stdout.contains("dotspy"),
        "missing version output; log: {}",
        result.log_path.display()
    );
}

#[test]
fn completions_generate_for_bash() {
    let result = common::run_cli_case("completions_generate_for_bash", &["--completions", "bash"]);
    assert!(result.status.success());
    assert!(
        result.stdout.contains("dotspy"),
        "completion script should mention the binary; log: {}",
        result.log_path.display()
    );
}

#[test]
fn tree_view_matches_catalog_scenario() {
    let fx = Fixture::new(SCENARIO_CATALOG);
    fs::write(fx.home().join(".bashrc"), "export X=1").unwrap();
    fs::create_dir(fx.home().join(".config")).unwrap();
    fs::write(fx.home().join(".config/.git"), "").unwrap();

    let result = fx.run("tree_view_matches_catalog_scenario", &[]);
    assert!(
        result.status.success(),
        "scan failed; log: {}",
        result.log_path.display()
    );
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![".bashrc: bash", ".config", "   .git: git config"],
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn kind_mismatch_omits_entry_and_backup() {
    let fx = Fixture::new(r#"{".bashrc": ["bash"]}"#);
    fs::create_dir(fx.home().join(".bashrc")).unwrap();
    fs::write(fx.home().join(".bashrc.bak"), "").unwrap();

    let result = fx.run("kind_mismatch_omits_entry_and_backup", &["--old"]);
    assert!(result.status.success());
    assert_eq!(
        result.stdout.trim(),
        "",
        "mismatched entry must disappear entirely; log: {}",
        result.log_path.display()
    );
}

#[test]
fn backup_detection_reports_stale_sibling() {
    let fx = Fixture::new(r#"{".bashrc": ["bash"]}"#);
    fs::write(fx.home().join(".bashrc"), "").unwrap();
    fs::write(fx.home().join(".bashrc.bak"), "").unwrap();

    let result = fx.run("backup_detection_reports_stale_sibling", &["--old"]);
    assert!(result.status.success());
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![".bashrc: bash", ".bashrc.bak (old?): bash"],
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn include_all_lists_missing_entries() {
    let fx = Fixture::new(SCENARIO_CATALOG);
    // Home stays empty.

    let result = fx.run("include_all_lists_missing_entries", &["--all"]);
    assert!(result.status.success());
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines, vec![".bashrc: bash", ".config", "   .git: git config"]);
}

#[test]
fn program_view_groups_and_filters() {
    let fx = Fixture::new(SCENARIO_CATALOG);
    fs::write(fx.home().join(".bashrc"), "").unwrap();
    fs::create_dir(fx.home().join(".config")).unwrap();
    fs::write(fx.home().join(".config/.git"), "").unwrap();

    let result = fx.run("program_view_groups", &["-p"]);
    assert!(result.status.success());
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["bash", "   .bashrc", "git", "   .config/.git config"],
        "log: {}",
        result.log_path.display()
    );

    let result = fx.run("program_view_filters", &["-p", "git"]);
    assert!(result.status.success());
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines, vec!["git", "   .config/.git config"]);
}

#[cfg(unix)]
#[test]
fn secure_check_badges_history_and_key_files() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new(
        r#"{"id_rsa": ["ssh", "key"], ".bash_history": ["bash", "history"]}"#,
    );
    for (name, mode) in [("id_rsa", 0o600), (".bash_history", 0o644)] {
        let path = fx.home().join(name);
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    let result = fx.run("secure_check_badges", &["--secure"]);
    assert!(result.status.success());
    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            ".bash_history: bash history [insecure]",
            "id_rsa: ssh key [secure]",
        ],
        "log: {}",
        result.log_path.display()
    );
}

#[test]
fn json_output_carries_paths_and_metadata() {
    let fx = Fixture::new(SCENARIO_CATALOG);
    fs::write(fx.home().join(".bashrc"), "").unwrap();
    fs::create_dir(fx.home().join(".config")).unwrap();
    fs::write(fx.home().join(".config/.git"), "").unwrap();

    let result = fx.run("json_output_carries_paths", &["--json"]);
    assert!(result.status.success());
    let payload: Value =
        serde_json::from_str(result.stdout.trim()).expect("stdout must be one JSON object");
    assert_eq!(payload["command"], "scan");

    let entries = payload["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["path"], serde_json::json!([".bashrc"]));
    assert_eq!(entries[0]["programs"], serde_json::json!(["bash"]));
    assert_eq!(entries[2]["path"], serde_json::json!([".config", ".git"]));
    assert_eq!(entries[2]["type"], "config");
    assert_eq!(entries[2]["secure"], "unknown");
    assert_eq!(entries[2]["is_directory"], false);
    assert_eq!(entries[1]["path"], serde_json::json!([".config"]));
    assert_eq!(entries[1]["is_directory"], true);
}

#[test]
fn missing_catalog_fails_with_runtime_exit_code() {
    let home = TempDir::new().unwrap();
    let home_str = home.path().to_str().unwrap();
    let result = common::run_cli_case_env(
        "missing_catalog_fails",
        &["--root", home_str, "--catalog", "/nonexistent/known.json"],
        &[("HOME", home_str)],
    );
    assert_eq!(result.status.code(), Some(2));
    assert!(
        result.stderr.contains("DSP-2001"),
        "stderr should carry the error code; log: {}",
        result.log_path.display()
    );
    assert!(
        result.stdout.is_empty(),
        "no partial results on a fatal load error; log: {}",
        result.log_path.display()
    );
}

#[test]
fn malformed_catalog_fails_before_any_walk() {
    let fx = Fixture::new(r#"{".bashrc": "not-a-valid-entry"}"#);
    fs::write(fx.home().join(".bashrc"), "").unwrap();

    let result = fx.run("malformed_catalog_fails", &[]);
    assert_eq!(result.status.code(), Some(2));
    assert!(result.stderr.contains("DSP-2003"));
    assert!(result.stdout.is_empty());
}

#[test]
fn missing_explicit_config_is_a_user_error() {
    let aux = TempDir::new().unwrap();
    let catalog = aux.path().join("known.json");
    fs::write(&catalog, r#"{".bashrc": ["bash"]}"#).unwrap();

    let result = common::run_cli_case_env(
        "missing_explicit_config",
        &[
            "--root",
            aux.path().to_str().unwrap(),
            "--catalog",
            catalog.to_str().unwrap(),
            "--config",
            "/nonexistent/dotspy.toml",
        ],
        &[("HOME", aux.path().to_str().unwrap())],
    );
    assert_eq!(
        result.status.code(),
        Some(1),
        "a bad user-typed path is a usage error; log: {}",
        result.log_path.display()
    );
    assert!(result.stderr.contains("DSP-1002"));
    assert!(result.stdout.is_empty());
}

#[test]
fn non_directory_root_is_a_user_error() {
    let aux = TempDir::new().unwrap();
    let catalog = aux.path().join("known.json");
    fs::write(&catalog, r#"{".bashrc": ["bash"]}"#).unwrap();
    let not_a_dir = aux.path().join("plain-file");
    fs::write(&not_a_dir, "").unwrap();

    let result = common::run_cli_case_env(
        "non_directory_root",
        &[
            "--root",
            not_a_dir.to_str().unwrap(),
            "--catalog",
            catalog.to_str().unwrap(),
        ],
        &[("HOME", aux.path().to_str().unwrap())],
    );
    assert_eq!(result.status.code(), Some(1));
    assert!(
        result.stderr.contains("not a directory"),
        "log: {}",
        result.log_path.display()
    );
}
