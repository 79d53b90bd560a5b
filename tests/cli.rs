#![allow(deprecated)]
//! End-to-end contract of the `inictl` binary: exit codes, stdout/stderr split, file effects.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn inictl() -> Command {
    let mut cmd = Command::cargo_bin("inictl").unwrap();
    cmd.env_remove("INICTL_FILE").env_remove("RUST_LOG");
    cmd
}

#[test]
fn write_then_read_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--write", "db.host=localhost"])
        .assert()
        .success()
        .stdout("Updated [db] host=localhost\n");

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["[db]", "host=localhost"]);

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db.host"])
        .assert()
        .success()
        .stdout("host=localhost\n");
}

#[test]
fn read_whole_section_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "; settings\n[db]\nhost = localhost\nport = 5432\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db", "--show-section"])
        .assert()
        .success()
        .stdout("[db]\nhost=localhost\nport=5432\n");
}

#[cfg(not(windows))]
#[test]
fn export_mode_quotes_and_hides_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[app]\ngreeting = \"hello world\"\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "app", "--show-section", "--show-export"])
        .assert()
        .success()
        .stdout("export greeting=\"hello world\"\n");
}

#[cfg(windows)]
#[test]
fn export_mode_uses_setx() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[app]\ngreeting = \"hello world\"\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "app.greeting", "--show-export"])
        .assert()
        .success()
        .stdout("setx greeting \"hello world\"\n");
}

#[test]
fn missing_file_flag_prints_usage() {
    inictl()
        .args(["--read", "db"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:").and(predicate::str::contains("--file")));
}

#[test]
fn read_and_write_together_fails_before_touching_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db.host", "--write", "db.host=x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot use --read and --write together."));

    assert!(!path.exists());
}

#[test]
fn malformed_write_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--write", "host=localhost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid format. Use <section>.<key>=<value>"));

    assert!(!path.exists());
}

#[test]
fn blank_key_is_refused_and_file_stays_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[db]\nhost=x\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--write", "s. =v"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Invalid format. Use <section>.<key>=<value>"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "[db]\nhost=x\n");

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db.host"])
        .assert()
        .success()
        .stdout("host=x\n");
}

#[test]
fn names_with_edge_whitespace_are_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");

    for arg in ["s. k=v", " t.k=v"] {
        inictl()
            .arg("--file")
            .arg(&path)
            .args(["--write", arg])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("cannot start or end with whitespace"));
    }

    assert!(!path.exists());
}

#[test]
fn default_section_alias() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "top=1\n[db]\nhost=x\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "DEFAULT.top"])
        .assert()
        .success()
        .stdout("top=1\n");
}

#[test]
fn indented_comment_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[db]\n  ; the host\nhost=x\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db.host"])
        .assert()
        .success()
        .stdout("host=x\n");
}

#[test]
fn missing_section_and_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[db]\nhost=localhost\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "cache"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error: Section [cache] not found"));

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db.port"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Key 'port' not found in section [db]"));
}

#[test]
fn malformed_file_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[db]\nhost\n").unwrap();

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read INI file"));
}

#[test]
fn last_write_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");

    for value in ["one", "two"] {
        inictl()
            .arg("--file")
            .arg(&path)
            .arg("--write")
            .arg(format!("db.host={value}"))
            .assert()
            .success();
    }

    inictl()
        .arg("--file")
        .arg(&path)
        .args(["--read", "db"])
        .assert()
        .success()
        .stdout("host=two\n");
}

#[test]
fn file_from_environment() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.ini");
    fs::write(&path, "[db]\nhost=localhost\n").unwrap();

    inictl()
        .env("INICTL_FILE", &path)
        .args(["--read", "db.host"])
        .assert()
        .success()
        .stdout("host=localhost\n");
}

#[test]
fn help_exits_zero() {
    inictl().arg("--help").assert().success().stdout(predicate::str::contains("--show-export"));
}
