//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;
use vte::{Parser, Perform};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

/// A tintrace command isolated from the user's config and environment.
///
/// The returned directory holds the config location and must outlive the
/// command.
pub fn tintrace() -> (Command, TempDir) {
    let home = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tintrace"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("TINTRACE_COLORS")
        .env_remove("RUST_LOG");
    (cmd, home)
}

/// Run tintrace and capture stdout, stderr and the exit code.
pub fn run_tintrace(args: &[&str]) -> (String, String, i32) {
    let (mut cmd, _home) = tintrace();
    let output = cmd.args(args).output().expect("Failed to execute tintrace");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// True when `needles` occur in `haystack` in order, line by line.
pub fn contains_lines_in_order(haystack: &str, needles: &str) -> bool {
    let mut lines = haystack.lines();
    needles
        .lines()
        .all(|needle| lines.by_ref().any(|line| line == needle))
}

/// Collects printable text and the whitespace control characters.
#[derive(Default)]
struct PlainText(Vec<u8>);

impl Perform for PlainText {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.0.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.0.push(byte);
        }
    }
}

/// Colorized text with its escape sequences removed.
pub fn strip_escapes(text: &str) -> String {
    let mut parser = Parser::new();
    let mut plain = PlainText::default();
    parser.advance(&mut plain, text.as_bytes());
    String::from_utf8(plain.0).expect("stripped text is UTF-8")
}
