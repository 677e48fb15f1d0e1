//! Colorizing of rendered test diagnostics.
//!
//! Two input shapes are understood:
//!
//! - **Tracebacks**: `  File "...", line N, in name` frame headers, source
//!   context, and a final exception message.
//! - **Structured reports** (doctest failures): a leading traceback, a dashed
//!   [`SEPARATOR`] line, then groups introduced by unindented headers such as
//!   `Failed example:`, `Expected:`, `Got:`, `Exception raised:` or
//!   `Differences (...)`, each followed by four-space-indented body lines.
//!
//! The text itself is never changed, only wrapped in colour escape codes.
//! Anything unrecognized is written through uncoloured.
//!
//! # Module Structure
//!
//! - [`classify`] - line classification and the body state machine
//! - [`frame`] - frame header parsing

pub mod classify;
pub mod frame;

use std::io::{self, Write};

use crate::paths::PathElider;
use crate::scheme::{ColorRole, ColorScheme};

pub use classify::{BodyAction, BodyState, Header, Mode, ReportLine, TraceLine, SEPARATOR};
pub use frame::FrameHeader;

use classify::BODY_INDENT;

/// Trailing legend of the diff headers below.
const DIFF_LEGEND: &str = "-expected +actual):";

/// Diff headers that get their `-expected`/`+actual` legend coloured.
const DIFF_LEGEND_HEADERS: [&str; 2] = [
    "Differences (ndiff with -expected +actual):",
    "Differences (unified diff with -expected +actual):",
];

/// Shape of a diagnostic text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportShape {
    Traceback,
    Structured,
}

impl ReportShape {
    /// Structured when the text contains a separator line.
    pub fn detect(text: &str) -> Self {
        if text.lines().any(|line| line == SEPARATOR) {
            ReportShape::Structured
        } else {
            ReportShape::Traceback
        }
    }
}

/// Writes diagnostic text with colour escape codes inserted.
///
/// Holds only read-only configuration; the per-report state lives on the
/// stack of each call, so one colorizer can serve any number of reports.
#[derive(Debug, Clone, Copy)]
pub struct ReportColorizer<'a> {
    scheme: &'a ColorScheme,
    elider: Option<&'a PathElider>,
}

impl<'a> ReportColorizer<'a> {
    pub fn new(scheme: &'a ColorScheme) -> Self {
        Self {
            scheme,
            elider: None,
        }
    }

    /// Shorten frame paths outside the elider's base directory.
    pub fn with_elider(mut self, elider: Option<&'a PathElider>) -> Self {
        self.elider = elider;
        self
    }

    /// Colorize a block of the given shape.
    pub fn write<W: Write + ?Sized>(
        &self,
        shape: ReportShape,
        text: &str,
        out: &mut W,
    ) -> io::Result<()> {
        match shape {
            ReportShape::Traceback => self.write_traceback(text, out),
            ReportShape::Structured => self.write_structured(text, out),
        }
    }

    /// Colorize into a new string.
    pub fn colorize(&self, shape: ReportShape, text: &str) -> String {
        let mut buf = Vec::with_capacity(text.len() * 2);
        // Writing into a Vec cannot fail.
        let _ = self.write(shape, text, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Colorize a plain traceback.
    pub fn write_traceback<W: Write + ?Sized>(&self, text: &str, out: &mut W) -> io::Result<()> {
        self.write_trace_lines(text.lines(), "", out)
    }

    /// Colorize a structured failure report.
    ///
    /// Input without a separator line is treated as a plain traceback.
    pub fn write_structured<W: Write + ?Sized>(&self, text: &str, out: &mut W) -> io::Result<()> {
        if ReportShape::detect(text) == ReportShape::Traceback {
            return self.write_traceback(text, out);
        }

        let mut lines = text.lines();
        let leading = lines.by_ref().take_while(|line| *line != SEPARATOR);
        self.write_trace_lines(leading, "", out)?;
        writeln!(out)?;
        writeln!(out, "{}", SEPARATOR)?;

        let mut state = BodyState::default();
        let mut exception_lines: Vec<&str> = Vec::new();

        for line in lines {
            match ReportLine::classify(line) {
                ReportLine::Frame(text) => {
                    self.flush_exception(&mut exception_lines, out)?;
                    self.write_report_frame(text, out)?;
                }
                ReportLine::Body(text) => match state.body_action(text) {
                    BodyAction::Paint(role) => {
                        writeln!(out, "{}", self.scheme.paint(role, text))?;
                    }
                    BodyAction::Buffer(body) => exception_lines.push(body),
                },
                ReportLine::Header(header) => {
                    self.flush_exception(&mut exception_lines, out)?;
                    state = BodyState::after(header);
                    tracing::trace!(?header, mode = ?state.mode, "report header");
                    self.write_header(header, line, out)?;
                }
            }
        }

        self.flush_exception(&mut exception_lines, out)?;
        writeln!(out)
    }

    fn write_header<W: Write + ?Sized>(
        &self,
        header: Header,
        line: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if header == Header::Differences && DIFF_LEGEND_HEADERS.contains(&line) {
            let kind = line.strip_suffix(DIFF_LEGEND).unwrap_or(line);
            return writeln!(
                out,
                "{}{}-expected {}+actual{}):",
                kind,
                self.scheme.code(ColorRole::ExpectedOutput),
                self.scheme.code(ColorRole::ActualOutput),
                self.scheme.code(ColorRole::Normal),
            );
        }
        writeln!(out, "{}", line)
    }

    /// Colorize buffered `Exception raised:` lines as a nested traceback.
    fn flush_exception<W: Write + ?Sized>(
        &self,
        lines: &mut Vec<&str>,
        out: &mut W,
    ) -> io::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }
        self.write_trace_lines(lines.drain(..), BODY_INDENT, out)
    }

    fn write_trace_lines<'t, W: Write + ?Sized>(
        &self,
        lines: impl Iterator<Item = &'t str>,
        indent: &str,
        out: &mut W,
    ) -> io::Result<()> {
        for line in lines {
            match TraceLine::classify(line) {
                TraceLine::Frame => match FrameHeader::parse_trace(line) {
                    Some(frame) => {
                        out.write_all(indent.as_bytes())?;
                        self.write_frame("  File \"", frame, out)?;
                    }
                    None => writeln!(out, "{}{}", indent, line)?,
                },
                TraceLine::Source => {
                    let text = format!("{}{}", indent, line);
                    writeln!(out, "{}", self.scheme.paint(ColorRole::FailedExample, &text))?;
                }
                TraceLine::Banner => writeln!(out, "{}{}", indent, line)?,
                TraceLine::Message => {
                    let text = format!("{}{}", indent, line);
                    writeln!(out, "{}", self.scheme.paint(ColorRole::Exception, &text))?;
                }
            }
        }
        Ok(())
    }

    fn write_report_frame<W: Write + ?Sized>(&self, line: &str, out: &mut W) -> io::Result<()> {
        match FrameHeader::parse_report(line) {
            Some(frame) => self.write_frame("File \"", frame, out),
            None => writeln!(out, "{}", line),
        }
    }

    fn write_frame<W: Write + ?Sized>(
        &self,
        lead: &str,
        frame: FrameHeader<'_>,
        out: &mut W,
    ) -> io::Result<()> {
        let (path, line) = match self.elider {
            Some(elider) => elider.elide(frame.path, frame.line),
            None => (frame.path.to_string(), frame.line.to_string()),
        };
        let normal = self.scheme.code(ColorRole::Normal);

        write!(
            out,
            "{normal}{lead}{}{path}{normal}\", line {}{line}",
            self.scheme.code(ColorRole::Filename),
            self.scheme.code(ColorRole::Lineno),
        )?;
        if let Some(name) = frame.name {
            write!(
                out,
                "{normal}, in {}{name}",
                self.scheme.code(ColorRole::Testname)
            )?;
        }
        writeln!(out, "{normal}")
    }
}
