//! Frame header lines: `File "<path>", line <n>, in <name>`.

use std::sync::LazyLock;

use regex::Regex;

// Both patterns are literals; compiling them cannot fail.
#[allow(clippy::expect_used)]
static TRACE_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^  File "(.*)", line (\d*)(?:, in (.*))?$"#).expect("trace frame pattern")
});

#[allow(clippy::expect_used)]
static REPORT_FRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^File "(.*)", line (\d*), in (.*)$"#).expect("report frame pattern")
});

/// Parts of a frame header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader<'a> {
    pub path: &'a str,
    pub line: &'a str,
    /// Function or test name; tracebacks may leave it out.
    pub name: Option<&'a str>,
}

impl<'a> FrameHeader<'a> {
    /// Parse a traceback frame, indented by two spaces, with optional `, in <name>`.
    pub fn parse_trace(text: &'a str) -> Option<Self> {
        Self::parse_with(&TRACE_FRAME, text)
    }

    /// Parse an unindented report frame; the `, in <name>` part is required.
    pub fn parse_report(text: &'a str) -> Option<Self> {
        Self::parse_with(&REPORT_FRAME, text)
    }

    fn parse_with(pattern: &Regex, text: &'a str) -> Option<Self> {
        let caps = pattern.captures(text)?;
        Some(Self {
            path: caps.get(1)?.as_str(),
            line: caps.get(2)?.as_str(),
            name: caps.get(3).map(|m| m.as_str()),
        })
    }
}
