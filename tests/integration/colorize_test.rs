//! Integration tests for the colorize command

use predicates::prelude::*;

use tintrace::{ColorScheme, ReportColorizer, ReportShape};

use crate::helpers::{
    contains_lines_in_order, fixture_path, load_fixture, run_tintrace, strip_escapes, tintrace,
};

const NORMAL: &str = "\x1b[0m";

// ============================================================================
// Tracebacks
// ============================================================================

#[test]
fn colorless_traceback_is_unchanged() {
    let input = load_fixture("traceback.txt");
    let path = fixture_path("traceback.txt");
    let (stdout, stderr, exit_code) = run_tintrace(&["colorize", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(stdout, input);
}

#[test]
fn colorless_output_keeps_control_bytes_in_text() {
    let input = "Traceback (most recent call last):\n  File \"t.py\", line 3, in test_esc\n    \
                 self.assertEqual(a, b)\nAssertionError: 'a\x1bbc' != 'a\x0cb'\n";
    let (mut cmd, _home) = tintrace();
    let output = cmd
        .args(["--color", "never", "colorize"])
        .write_stdin(input)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, input.as_bytes());
}

#[test]
fn plain_scheme_leaves_structured_text_unchanged() {
    let input = load_fixture("traceback.txt").replace("2 != 3", "'\x1b[0m' != '\x0c'");
    let scheme = ColorScheme::plain();
    let colorizer = ReportColorizer::new(&scheme);

    assert_eq!(colorizer.colorize(ReportShape::Traceback, &input), input);

    let report = load_fixture("doctest_failure.txt");
    let plain = colorizer.colorize(ReportShape::Structured, &report);
    assert!(!plain.contains('\x1b'));
    assert!(contains_lines_in_order(&plain, &report));
}

#[test]
fn traceback_from_stdin_gets_frame_colors() {
    let (mut cmd, _home) = tintrace();
    cmd.args(["--color", "always", "colorize"])
        .write_stdin(load_fixture("traceback.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{NORMAL}  File \"\x1b[1;34m/work/project/tests/test_math.py{NORMAL}\", \
             line \x1b[1;31m12{NORMAL}, in \x1b[1;36mtest_add{NORMAL}\n"
        )))
        .stdout(predicate::str::contains(format!(
            "\x1b[36m    self.assertEqual(add(1, 1), 3){NORMAL}\n"
        )))
        .stdout(predicate::str::contains(format!(
            "\x1b[31mAssertionError: 2 != 3{NORMAL}\n"
        )));
}

#[test]
fn every_frame_is_colored() {
    let scheme = ColorScheme::default();
    let colored = ReportColorizer::new(&scheme)
        .colorize(ReportShape::Traceback, &load_fixture("traceback.txt"));

    let filename = "\x1b[1;34m";
    assert_eq!(colored.matches(filename).count(), 2);
    assert!(colored.contains(&format!("{filename}/usr/lib/python3/unittest/case.py{NORMAL}")));
}

#[test]
fn frame_with_unbalanced_quote_passes_through() {
    let input = "Traceback (most recent call last):\n  File \"broken.py, line 3\nValueError\n";
    let scheme = ColorScheme::default();
    let colored = ReportColorizer::new(&scheme).colorize(ReportShape::Traceback, input);

    assert!(colored.contains("  File \"broken.py, line 3\n"));
    assert!(!colored.contains("\x1b[1;34m"));
    assert_eq!(strip_escapes(&colored), input);
}

#[test]
fn custom_colors_apply_to_frames() {
    let (mut cmd, _home) = tintrace();
    cmd.args(["--color", "always", "--colors", "filename=45,lineno=rgb(ffff00)", "colorize"])
        .write_stdin(load_fixture("traceback.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[38;5;45m/work/project/tests/test_math.py"))
        .stdout(predicate::str::contains("\x1b[38;5;226m12"));
}

#[test]
fn colors_come_from_environment() {
    let (mut cmd, _home) = tintrace();
    cmd.env("TINTRACE_COLORS", "exception=brightyellow")
        .args(["--color", "always", "colorize"])
        .write_stdin(load_fixture("traceback.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[1;33mAssertionError: 2 != 3"));
}

#[test]
fn bad_scheme_entries_are_ignored() {
    let (mut cmd, _home) = tintrace();
    cmd.args([
        "--color",
        "always",
        "--colors",
        "filename=nosuchcolor,bogus=red,exception=green",
        "colorize",
    ])
    .write_stdin(load_fixture("traceback.txt"))
    .assert()
    .success()
    .stdout(predicate::str::contains("\x1b[1;34m/work/project"))
    .stdout(predicate::str::contains("\x1b[32mAssertionError"));
}

#[test]
fn foreign_frames_are_elided() {
    let (stdout, _stderr, exit_code) = run_tintrace(&[
        "--elide-foreign",
        "--base-dir",
        "/work/project",
        "colorize",
        fixture_path("traceback.txt").to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("  File \"tests/test_math.py\", line 12, in test_add\n"));
    assert!(stdout.contains("  File \".../case.py\", line ..., in assertEqual\n"));
}

// ============================================================================
// Structured reports
// ============================================================================

#[test]
fn structured_report_is_detected() {
    let (mut cmd, _home) = tintrace();
    cmd.args(["--color", "always", "colorize"])
        .write_stdin(load_fixture("doctest_failure.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{NORMAL}File \"\x1b[1;34m/work/project/src/calc.py{NORMAL}\", \
             line \x1b[1;31m7{NORMAL}, in \x1b[1;36mcalc.average{NORMAL}\n"
        )));
}

#[test]
fn ndiff_lines_get_diff_colors() {
    let scheme = ColorScheme::default();
    let colored = ReportColorizer::new(&scheme)
        .colorize(ReportShape::Structured, &load_fixture("doctest_failure.txt"));

    assert!(colored.contains(&format!("\x1b[32m    - 2.5{NORMAL}\n")));
    assert!(colored.contains(&format!("\x1b[31m    + 2.0{NORMAL}\n")));
    assert_eq!(colored.matches(&format!("\x1b[35m    ?   ^{NORMAL}\n")).count(), 2);
    assert!(colored.contains(&format!("\x1b[36m    average([1, 2, 3]){NORMAL}\n")));
}

#[test]
fn exception_block_is_colored_as_traceback() {
    let scheme = ColorScheme::default();
    let colored = ReportColorizer::new(&scheme)
        .colorize(ReportShape::Structured, &load_fixture("doctest_failure.txt"));

    assert!(colored.contains(&format!(
        "    {NORMAL}  File \"\x1b[1;34m<doctest calc.average[1]>{NORMAL}\", \
         line \x1b[1;31m1{NORMAL}, in \x1b[1;36m<module>{NORMAL}\n"
    )));
    assert!(colored.contains(&format!(
        "\x1b[31m    ZeroDivisionError: division by zero{NORMAL}\n"
    )));
}

#[test]
fn structured_text_survives_colorizing() {
    let input = load_fixture("doctest_failure.txt");
    let scheme = ColorScheme::default();
    let plain = strip_escapes(
        &ReportColorizer::new(&scheme).colorize(ReportShape::Structured, &input),
    );

    assert!(contains_lines_in_order(&plain, &input));
    assert!(plain.ends_with("\n\n"));
}

#[test]
fn missing_input_file_is_an_error() {
    let (mut cmd, _home) = tintrace();
    cmd.args(["colorize", "/nonexistent/trace.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read /nonexistent/trace.txt"));
}
