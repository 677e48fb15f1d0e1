//! Line classification for tracebacks and structured failure reports.
//!
//! Report bodies carry their structure implicitly: unindented header lines
//! switch the meaning of the four-space-indented lines that follow them.
//! [`BodyState`] tracks that as a small state machine driven by
//! [`TRANSITIONS`].

use crate::scheme::ColorRole;

/// Fixed indentation of report body lines.
pub const BODY_INDENT: &str = "    ";

/// Separator between the leading traceback and the report groups.
pub const SEPARATOR: &str =
    "----------------------------------------------------------------------";

/// How indented body lines are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Painted in the current body colour.
    Normal,
    /// Painted by their leading diff character.
    Diff,
    /// Collected and colorized as a nested traceback when the block ends.
    ExceptionBuffering,
}

/// Unindented header lines of a structured report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    FailedExample,
    Expected,
    Got,
    ExceptionRaised,
    Differences,
    Other,
}

impl Header {
    pub fn classify(line: &str) -> Header {
        if line.starts_with("Failed example") {
            Header::FailedExample
        } else if line.starts_with("Expected:") {
            Header::Expected
        } else if line.starts_with("Got:") {
            Header::Got
        } else if line.starts_with("Exception raised:") {
            Header::ExceptionRaised
        } else if line.starts_with("Differences ") {
            Header::Differences
        } else {
            Header::Other
        }
    }
}

/// Mode and body colour entered after each header.
pub const TRANSITIONS: [(Header, Mode, ColorRole); 6] = [
    (Header::FailedExample, Mode::Normal, ColorRole::FailedExample),
    (Header::Expected, Mode::Normal, ColorRole::ExpectedOutput),
    (Header::Got, Mode::Normal, ColorRole::ActualOutput),
    (Header::ExceptionRaised, Mode::ExceptionBuffering, ColorRole::Exception),
    (Header::Differences, Mode::Diff, ColorRole::Normal),
    (Header::Other, Mode::Normal, ColorRole::Normal),
];

/// Colour of a diff line by its leading character.
///
/// Covers ndiff and unified diff output; context diffs only partially.
pub fn diff_role(marker: char) -> Option<ColorRole> {
    match marker {
        '-' => Some(ColorRole::ExpectedOutput),
        '+' => Some(ColorRole::ActualOutput),
        '?' => Some(ColorRole::CharacterDiffs),
        '@' | '*' => Some(ColorRole::DiffChunk),
        '!' => Some(ColorRole::ActualOutput),
        _ => None,
    }
}

/// One line of a structured report body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    /// Starts with `File `.
    Frame(&'a str),
    /// Starts with [`BODY_INDENT`].
    Body(&'a str),
    Header(Header),
}

impl<'a> ReportLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with("File ") {
            ReportLine::Frame(line)
        } else if line.starts_with(BODY_INDENT) {
            ReportLine::Body(line)
        } else {
            ReportLine::Header(Header::classify(line))
        }
    }
}

/// What to do with an indented body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAction<'a> {
    Paint(ColorRole),
    /// Hold back the line with its indentation removed.
    Buffer(&'a str),
}

/// Current mode and body colour while walking a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyState {
    pub mode: Mode,
    pub role: ColorRole,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            role: ColorRole::Normal,
        }
    }
}

impl BodyState {
    /// State after a header line.
    pub fn after(header: Header) -> Self {
        TRANSITIONS
            .iter()
            .find(|(h, _, _)| *h == header)
            .map(|&(_, mode, role)| Self { mode, role })
            .unwrap_or_default()
    }

    /// Action for an indented body line in this state.
    pub fn body_action<'a>(&self, line: &'a str) -> BodyAction<'a> {
        let body = line.strip_prefix(BODY_INDENT).unwrap_or(line);
        match self.mode {
            Mode::Diff => {
                let marker = body.chars().next();
                BodyAction::Paint(marker.and_then(diff_role).unwrap_or(self.role))
            }
            Mode::ExceptionBuffering => BodyAction::Buffer(body),
            Mode::Normal => BodyAction::Paint(self.role),
        }
    }
}

/// One line of a plain traceback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLine {
    /// Starts with `  File`.
    Frame,
    /// Source context under a frame.
    Source,
    /// The `Traceback (most recent call last):` banner.
    Banner,
    /// Anything else, normally the exception message.
    Message,
}

impl TraceLine {
    pub fn classify(line: &str) -> Self {
        if line.starts_with("  File") {
            TraceLine::Frame
        } else if line.starts_with(BODY_INDENT) {
            TraceLine::Source
        } else if line.starts_with("Traceback (most recent call last)") {
            TraceLine::Banner
        } else {
            TraceLine::Message
        }
    }
}
