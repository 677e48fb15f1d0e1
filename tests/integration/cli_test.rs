//! Integration tests for the CLI surface: help, parse-color, palette, config

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{run_tintrace, tintrace};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_tintrace(&["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["colorize", "report", "palette", "parse-color", "config", "completions"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
    assert!(stdout.contains("--colors='failure=red,pass=rgb(00ff00),error=45'"));
}

#[test]
fn no_subcommand_is_an_error() {
    let (_stdout, stderr, exit_code) = run_tintrace(&[]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("Usage"));
}

// ============================================================================
// parse-color
// ============================================================================

#[test]
fn parse_color_shows_resolved_colors() {
    let (stdout, _stderr, exit_code) =
        run_tintrace(&["parse-color", "red", "brightblue", "45", "rgb(ff0000)", "normal"]);

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r#"
    red: ansi16 1 "\u{1b}[31m" sample
    brightblue: ansi16 4 bright "\u{1b}[1;34m" sample
    45: xterm256 45 "\u{1b}[38;5;45m" sample
    rgb(ff0000): xterm256 196 "\u{1b}[38;5;196m" sample
    normal: ansi16 default "\u{1b}[0m" sample
    "#);
}

#[test]
fn parse_color_rejects_bad_descriptors() {
    let (stdout, stderr, exit_code) = run_tintrace(&["parse-color", "dark", "256", "rgb(zz)", "green"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Bad colour \"dark\": unknown colour name"));
    assert!(stderr.contains("Bad colour \"256\": xterm colour out of range"));
    assert!(stderr.contains("Bad colour \"rgb(zz)\": bad RGB colour"));
    assert!(stdout.contains("green: ansi16 2"));
}

// ============================================================================
// palette
// ============================================================================

#[test]
fn palette_lists_every_index() {
    let (stdout, _stderr, exit_code) = run_tintrace(&["palette"]);

    assert_eq!(exit_code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 240);
    assert!(lines[0].starts_with(" 16  #000000"));
    assert!(lines.iter().any(|line| line.starts_with("196  #ff0000")));
    assert!(lines[239].starts_with("255  #eeeeee"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let (stdout, _stderr, exit_code) = run_tintrace(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("verbosity = 1\n"));
    assert!(stdout.contains("descriptions = true\n"));
    assert!(stdout.contains("color = \"auto\""));
}

#[test]
fn config_file_and_flags_are_merged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "verbosity = 0\ncolors = \"pass=red\"\n").unwrap();

    let (mut cmd, _home) = tintrace();
    cmd.args(["--config", path.to_str().unwrap(), "--elide-foreign", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verbosity = 0\n"))
        .stdout(predicate::str::contains("colors = \"pass=red\"\n"))
        .stdout(predicate::str::contains("elide_foreign_paths = true\n"));
}

#[test]
fn environment_colors_do_not_override_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "colors = \"pass=red\"\n").unwrap();

    let (mut cmd, _home) = tintrace();
    cmd.env("TINTRACE_COLORS", "pass=blue")
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colors = \"pass=red\"\n"));
}

#[test]
fn malformed_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "verbosity = \"loud\"\n").unwrap();

    let (mut cmd, _home) = tintrace();
    cmd.args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn config_path_is_under_config_dir() {
    let (mut cmd, home) = tintrace();
    let output = cmd.args(["config", "path"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.trim_end().ends_with("config.toml"));
    if cfg!(target_os = "linux") {
        assert!(stdout.starts_with(home.path().to_str().unwrap()));
    }
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_are_generated() {
    let (stdout, _stderr, exit_code) = run_tintrace(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("tintrace"));
    assert!(stdout.contains("parse-color"));
}
