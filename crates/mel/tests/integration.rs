//! End-to-end CLI integration tests for the `mel` binary.
//!
//! Each test creates its own temporary git repository and an empty home
//! directory, and exercises the `mel` binary as a subprocess via `assert_cmd`.

use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A scratch repository plus an isolated home directory.
struct Sandbox {
    repo: TempDir,
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            repo: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        };
        sandbox.git(&["init", "-q"]);
        sandbox.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        sandbox.git(&["config", "user.name", "Test User"]);
        sandbox.git(&["config", "user.email", "test@example.com"]);
        sandbox.git(&["config", "commit.gpgsign", "false"]);
        sandbox
    }

    fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Build a `Command` targeting the cargo-built `mel` binary, run inside
    /// the repository with the sandboxed home.
    fn mel(&self) -> Command {
        let mut cmd = Command::cargo_bin("mel").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.home.path())
            .env("USERPROFILE", self.home.path())
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run git in the repository and return trimmed stdout.
    fn git(&self, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(self.path())
            .env("HOME", self.home.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn write_config(&self, json: &str) {
        fs::create_dir_all(self.path().join(".mel")).unwrap();
        fs::write(self.path().join(".mel/config.json"), json).unwrap();
    }

    /// Commit a `.gitignore` that already ignores `.mel/`.
    fn initial_commit(&self) {
        self.commit_gitignore(".mel/\n");
    }

    fn commit_gitignore(&self, contents: &str) {
        fs::write(self.path().join(".gitignore"), contents).unwrap();
        self.git(&["add", ".gitignore"]);
        self.git(&["commit", "-q", "-m", "initial"]);
    }

    fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// Basics
// ---------------------------------------------------------------------------

#[test]
fn version_prints_name() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("mel {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn version_json_fields() {
    let sandbox = Sandbox::new();
    let output = sandbox.mel().args(["version", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["name"], "mel");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["target"].as_str().unwrap().contains(std::env::consts::OS));
}

#[test]
fn help_lists_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("test"));
}

#[test]
fn outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("mel")
        .unwrap()
        .arg("test")
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn errors_as_json() {
    let dir = TempDir::new().unwrap();
    let output = Command::cargo_bin("mel")
        .unwrap()
        .args(["config", "--json"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("not a git repository"));
}

#[test]
fn completion_generates_script() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mel"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn resolve_adds_gitignore_entry() {
    let sandbox = Sandbox::new();
    sandbox.mel().arg("init").assert().success();

    let gitignore = fs::read_to_string(sandbox.path().join(".gitignore")).unwrap();
    assert_eq!(gitignore, ".mel/\n");

    // Second run leaves it untouched.
    sandbox.mel().arg("init").assert().success();
    let gitignore = fs::read_to_string(sandbox.path().join(".gitignore")).unwrap();
    assert_eq!(gitignore, ".mel/\n");
}

#[test]
fn init_records_main_and_keeps_unknown_keys() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"custom":1,"test_commands":["true"]}"#);

    let output = sandbox
        .mel()
        .args(["init", "--main", "develop", "--json"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["main"], "develop");

    let written = fs::read_to_string(sandbox.path().join(".mel/config.json")).unwrap();
    let written: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(written["main"], "develop");
    assert_eq!(written["custom"], 1);
    assert_eq!(written["test_commands"][0], "true");
}

#[test]
fn init_rejects_blank_main() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .args(["init", "--main", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--main needs a branch name"));
}

#[test]
fn defaults_without_any_config() {
    let sandbox = Sandbox::new();
    let output = sandbox.mel().args(["config", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["source"], "default");
    assert_eq!(json["main"], "main");
    assert!(!sandbox.path().join(".mel/config.json").exists());
}

#[test]
fn user_template_is_materialized() {
    let sandbox = Sandbox::new();
    let template = "{\n  \"main\": \"develop\",\n  \"test_commands\": [\"true\"]\n}\n";
    fs::create_dir_all(sandbox.home.path().join(".mel")).unwrap();
    fs::write(
        sandbox.home.path().join(".mel/config_template.json"),
        template,
    )
    .unwrap();

    let output = sandbox.mel().args(["init", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["source"], "user-template");
    assert_eq!(json["materialized"], true);

    let written = fs::read_to_string(sandbox.path().join(".mel/config.json")).unwrap();
    assert_eq!(written, template);

    // The project file now wins.
    let output = sandbox.mel().args(["config", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["source"], "project");
    assert_eq!(json["main"], "develop");
}

#[test]
fn project_template_beats_user_template() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.home.path().join(".mel")).unwrap();
    fs::write(
        sandbox.home.path().join(".mel/config_template.json"),
        r#"{"main":"from-user"}"#,
    )
    .unwrap();
    fs::create_dir_all(sandbox.path().join(".mel")).unwrap();
    fs::write(
        sandbox.path().join(".mel/config_template.json"),
        r#"{"main":"from-project"}"#,
    )
    .unwrap();

    let output = sandbox.mel().args(["config", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["main"], "from-project");
}

#[test]
fn malformed_config_names_path() {
    let sandbox = Sandbox::new();
    sandbox.write_config("{ not json");
    sandbox
        .mel()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.json"));
}

#[test]
fn config_path_prints_project_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"main":"main"}"#);
    sandbox
        .mel()
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".mel"))
        .stdout(predicate::str::contains("config.json"));
}

// ---------------------------------------------------------------------------
// Test runner
// ---------------------------------------------------------------------------

#[test]
fn test_runs_commands_in_order() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"test_commands":["echo first","echo second"]}"#);
    sandbox
        .mel()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("first\nsecond"));
}

#[test]
fn test_propagates_exit_code_and_stops() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"test_commands":["true","exit 3","echo never-runs"]}"#);
    sandbox
        .mel()
        .arg("test")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("never-runs").not());
}

#[test]
fn test_prefers_scripts_test() {
    let sandbox = Sandbox::new();
    sandbox.write_config(
        r#"{"test_commands":["echo legacy"],"scripts":{"test":"echo modern"}}"#,
    );
    sandbox
        .mel()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("modern"))
        .stdout(predicate::str::contains("legacy").not());
}

#[test]
fn test_without_commands_succeeds() {
    let sandbox = Sandbox::new();
    sandbox.mel().arg("test").assert().success();
}

#[test]
fn test_runs_in_repo_root_with_env() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"test_commands":["test -d .git && echo \"root=$MEL_REPO_ROOT\""]}"#);
    fs::create_dir_all(sandbox.path().join("nested")).unwrap();
    sandbox
        .mel()
        .arg("test")
        .current_dir(sandbox.path().join("nested"))
        .assert()
        .success()
        .stdout(predicate::str::contains("root="));
}

#[test]
fn test_json_reports_results() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"test_commands":["echo ok"]}"#);
    let output = sandbox.mel().args(["test", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["results"][0]["command"], "echo ok");
    assert_eq!(json["results"][0]["output"], "ok\n");
}

#[cfg(unix)]
#[test]
fn test_interrupted_exits_130() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"test_commands":["sleep 5","echo after"]}"#);

    let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("mel"))
        .arg("test")
        .current_dir(sandbox.path())
        .env("HOME", sandbox.home.path())
        .env("NO_COLOR", "1")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(800));

    let kill = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(130));
}

#[test]
fn run_named_script() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"scripts":{"hello":"echo hi there","boom":"exit 4"}}"#);
    sandbox
        .mel()
        .args(["run", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hi there"));
    sandbox.mel().args(["run", "boom"]).assert().code(4);
    sandbox
        .mel()
        .args(["run", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no script named `missing`"));
}

// ---------------------------------------------------------------------------
// Package manager
// ---------------------------------------------------------------------------

#[test]
fn pm_detects_lockfile() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .arg("pm")
        .assert()
        .success()
        .stdout(predicate::str::diff("npm\n"));

    fs::write(sandbox.path().join("yarn.lock"), "").unwrap();
    let output = sandbox.mel().args(["pm", "--json"]).output().unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["package_manager"], "yarn");
    assert_eq!(json["lockfile"], "yarn.lock");

    fs::write(sandbox.path().join("pnpm-lock.yaml"), "").unwrap();
    sandbox
        .mel()
        .arg("pm")
        .assert()
        .success()
        .stdout(predicate::str::diff("pnpm\n"));
}

// ---------------------------------------------------------------------------
// Branch workflow
// ---------------------------------------------------------------------------

#[test]
fn new_sanitizes_and_switches() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();

    sandbox
        .mel()
        .args(["new", "Fix", "Login", "Bug!"])
        .assert()
        .success();
    assert_eq!(sandbox.current_branch(), "fix-login-bug");
}

#[test]
fn new_json_reports_branch() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();

    let output = sandbox
        .mel()
        .args(["new", "feature/Add API", "--json"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["branch"], "feature/add-api");
    assert_eq!(sandbox.current_branch(), "feature/add-api");
}

#[test]
fn new_rejects_names_git_refuses() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();

    sandbox
        .mel()
        .args(["new", "a..b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid branch name"));
    assert_eq!(sandbox.current_branch(), "main");
}

#[test]
fn merge_uses_configured_message() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();
    sandbox.write_config(
        r#"{"test_commands":["true"],"merge_message":"{branch} -> {main} by {author}"}"#,
    );

    sandbox.mel().args(["new", "feature x"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "work"]);

    sandbox.mel().arg("merge").assert().success();
    assert_eq!(sandbox.current_branch(), "main");
    assert_eq!(
        sandbox.git(&["log", "-1", "--format=%s"]),
        "feature-x -> main by Test User"
    );
}

#[test]
fn merge_default_message() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();

    sandbox.mel().args(["new", "topic"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "work"]);

    sandbox.mel().args(["merge", "--no-test"]).assert().success();
    assert_eq!(
        sandbox.git(&["log", "-1", "--format=%s"]),
        "Merge topic into main"
    );
}

#[test]
fn merge_aborts_when_tests_fail() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();
    sandbox.write_config(r#"{"test_commands":["exit 2"]}"#);

    sandbox.mel().args(["new", "broken"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "work"]);

    sandbox.mel().arg("merge").assert().code(2);
    assert_eq!(sandbox.current_branch(), "broken");
    assert_eq!(sandbox.git(&["log", "main", "-1", "--format=%s"]), "initial");
}

#[test]
fn merge_when_gitignore_lacks_mel_dir() {
    let sandbox = Sandbox::new();
    sandbox.commit_gitignore("target/\n");

    sandbox.mel().args(["new", "topic"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "work"]);

    sandbox.mel().args(["merge", "--no-test"]).assert().success();
    assert_eq!(sandbox.current_branch(), "main");
    assert_eq!(
        fs::read_to_string(sandbox.path().join(".gitignore")).unwrap(),
        "target/\n.mel/\n"
    );
}

#[test]
fn merge_refuses_dirty_tree() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path().join("lib.rs"), "").unwrap();
    sandbox.git(&["add", "lib.rs"]);
    sandbox.initial_commit();

    sandbox.mel().args(["new", "topic"]).assert().success();
    fs::write(sandbox.path().join("lib.rs"), "fn main() {}").unwrap();

    sandbox
        .mel()
        .args(["merge", "--no-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("uncommitted changes"));
    assert_eq!(sandbox.current_branch(), "topic");
}

#[test]
fn merge_pull_failure_returns_to_branch() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();

    sandbox.mel().args(["new", "topic"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "work"]);

    sandbox
        .mel()
        .args(["merge", "--no-test", "--pull"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to pull main"));
    assert_eq!(sandbox.current_branch(), "topic");
    assert_eq!(sandbox.git(&["log", "main", "-1", "--format=%s"]), "initial");
}

#[test]
fn merge_on_trunk_fails() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();
    sandbox
        .mel()
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already on main"));
}

#[test]
fn update_merges_trunk_into_branch() {
    let sandbox = Sandbox::new();
    sandbox.initial_commit();
    sandbox.write_config(r#"{"merge_message":"sync {main} into {branch}"}"#);

    sandbox.mel().args(["new", "topic"]).assert().success();
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "topic work"]);
    sandbox.git(&["checkout", "-q", "main"]);
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "main work"]);
    sandbox.git(&["checkout", "-q", "topic"]);

    sandbox.mel().arg("update").assert().success();
    assert_eq!(sandbox.current_branch(), "topic");
    assert_eq!(
        sandbox.git(&["log", "-1", "--format=%s"]),
        "sync main into topic"
    );
}

#[test]
fn update_when_gitignore_lacks_mel_dir() {
    let sandbox = Sandbox::new();
    sandbox.commit_gitignore("target/\n");

    sandbox.mel().args(["new", "topic"]).assert().success();
    sandbox.git(&["checkout", "-q", "main"]);
    sandbox.git(&["commit", "-q", "--allow-empty", "-m", "main work"]);
    sandbox.git(&["checkout", "-q", "topic"]);

    sandbox.mel().arg("update").assert().success();
    assert_eq!(sandbox.current_branch(), "topic");
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

#[test]
fn open_prints_web_url() {
    let sandbox = Sandbox::new();
    sandbox.git(&["remote", "add", "origin", "git@github.com:owner/repo.git"]);
    sandbox
        .mel()
        .args(["open", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::diff("https://github.com/owner/repo\n"));
}

#[test]
fn open_without_origin_is_notice() {
    let sandbox = Sandbox::new();
    sandbox
        .mel()
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No origin remote"));
}
