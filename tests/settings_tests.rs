use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let config_dir = temp_dir.path().join(".focusflow");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("rc"), format!("data.location={}\n", db_path.display())).unwrap();
    (temp_dir, guard)
}

fn get_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusflow").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_settings_show_defaults() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"focus":25,"short":5,"long":15}"#));

    get_cmd(&temp_dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus:       25 min"));
}

#[test]
fn test_settings_set_persists() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "set", "--focus", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved settings."));

    get_cmd(&temp_dir)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"focus":50,"short":5,"long":15}"#));
}

#[test]
fn test_settings_invalid_values_fall_back() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "set", "--focus", "40", "--short", "10", "--long", "30"])
        .assert()
        .success();
    get_cmd(&temp_dir)
        .args(["settings", "set", "--focus", "abc", "--short", "-3", "--long", "45min"])
        .assert()
        .success();

    get_cmd(&temp_dir)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"focus":25,"short":5,"long":45}"#));
}

#[test]
fn test_settings_omitted_fields_keep_values() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "set", "--short", "7"])
        .assert()
        .success();
    get_cmd(&temp_dir)
        .args(["settings", "set", "--long", "20"])
        .assert()
        .success();

    get_cmd(&temp_dir)
        .args(["settings", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"focus":25,"short":7,"long":20}"#));
}

#[test]
fn test_timer_rejects_unknown_mode() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["timer", "--mode", "nap"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid mode"));
}

#[test]
fn test_timer_uses_saved_duration() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "set", "--short", "7"])
        .assert()
        .success();

    get_cmd(&temp_dir)
        .args(["timer", "--mode", "short", "--paused"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Short Break] 07:00 paused"));
}

#[test]
fn test_timer_no_input_runs_without_stdin() {
    let (temp_dir, _guard) = setup_test_env();

    get_cmd(&temp_dir)
        .args(["settings", "set", "--long", "3"])
        .assert()
        .success();

    // Paused with input ignored: draws once and exits without reading stdin
    get_cmd(&temp_dir)
        .args(["timer", "--mode", "long", "--paused", "--no-input"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Long Break] 03:00 paused"));
}
