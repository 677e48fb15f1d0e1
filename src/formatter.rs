//! Progress, error listing, and summary output for a test run.

use std::io::{self, Write};
use std::time::Duration;

use crate::outcome::ErrorEntry;
use crate::paths::PathElider;
use crate::report::{ReportColorizer, ReportShape, SEPARATOR};
use crate::scheme::{ColorRole, ColorScheme};

/// Heavy separator above each listed problem.
pub const SEPARATOR_HEAVY: &str =
    "======================================================================";

/// How much progress output to write per test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only the error listing and the summary.
    Quiet,
    /// One character per test.
    Dots,
    /// One line per test with its description and result.
    Descriptive,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Dots,
            _ => Verbosity::Descriptive,
        }
    }
}

/// Writes colorized test run output.
pub struct OutputFormatter<'a, W: Write> {
    out: W,
    verbosity: Verbosity,
    descriptions: bool,
    scheme: &'a ColorScheme,
    elider: Option<&'a PathElider>,
}

impl<'a, W: Write> OutputFormatter<'a, W> {
    pub fn new(out: W, scheme: &'a ColorScheme, verbosity: Verbosity) -> Self {
        Self {
            out,
            verbosity,
            descriptions: true,
            scheme,
            elider: None,
        }
    }

    /// Show test descriptions instead of identifiers when available.
    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_elider(mut self, elider: Option<&'a PathElider>) -> Self {
        self.elider = elider;
        self
    }

    pub fn descriptions(&self) -> bool {
        self.descriptions
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, role: ColorRole, text: &str) -> String {
        self.scheme.paint(role, text)
    }

    pub fn start_test(&mut self, description: &str) -> io::Result<()> {
        if self.verbosity == Verbosity::Descriptive {
            let line = format!(
                "{}{}",
                self.paint(ColorRole::Normal, description),
                self.paint(ColorRole::Normal, " ... ")
            );
            self.out.write_all(line.as_bytes())?;
        }
        self.out.flush()
    }

    pub fn test_success(&mut self) -> io::Result<()> {
        self.progress(ColorRole::Pass, "ok", ".")
    }

    pub fn test_failure(&mut self) -> io::Result<()> {
        self.progress(ColorRole::Failure, "FAIL", "F")
    }

    pub fn test_error(&mut self, label: &str) -> io::Result<()> {
        self.progress(ColorRole::Error, label, first_char(label))
    }

    pub fn test_skip(&mut self, label: &str) -> io::Result<()> {
        self.progress(ColorRole::Skip, label, first_char(label))
    }

    fn progress(&mut self, role: ColorRole, word: &str, dot: &str) -> io::Result<()> {
        match self.verbosity {
            Verbosity::Descriptive => writeln!(self.out, "{}", self.paint(role, word)),
            Verbosity::Dots => write!(self.out, "{}", self.paint(role, dot)),
            Verbosity::Quiet => Ok(()),
        }
    }

    pub fn stop_test(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// End the progress line after the last test.
    pub fn stop_tests(&mut self) -> io::Result<()> {
        if self.verbosity == Verbosity::Dots {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    /// Blank line between progress output and the error listing.
    pub fn print_errors_preamble(&mut self) -> io::Result<()> {
        if self.verbosity > Verbosity::Quiet {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// List problems of one kind with their colorized diagnostics.
    pub fn print_error_list(&mut self, flavour: &str, entries: &[ErrorEntry]) -> io::Result<()> {
        let problem_role = match flavour {
            "FAIL" => ColorRole::Failure,
            "SKIP" => ColorRole::Skip,
            _ => ColorRole::Error,
        };
        let is_skip = flavour == "SKIP";

        for entry in entries {
            let skip_msg = match &entry.reason {
                Some(reason) if is_skip && !reason.is_empty() => {
                    format!(" ({})", self.paint(ColorRole::Skip, reason))
                }
                _ => String::new(),
            };
            writeln!(self.out, "{}", SEPARATOR_HEAVY)?;
            writeln!(
                self.out,
                "{}: {}{}",
                self.paint(problem_role, flavour),
                self.paint(ColorRole::Testname, &entry.name),
                skip_msg
            )?;
            if !is_skip {
                writeln!(self.out, "{}", SEPARATOR)?;
                self.print_diagnostic(entry)?;
            }
        }
        Ok(())
    }

    fn print_diagnostic(&mut self, entry: &ErrorEntry) -> io::Result<()> {
        let colorizer = ReportColorizer::new(self.scheme).with_elider(self.elider);
        colorizer.write(entry.shape, &entry.detail, &mut self.out)?;
        if entry.shape == ReportShape::Traceback {
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Final `Ran N tests in ...` line and the OK/FAILED verdict.
    pub fn print_summary(
        &mut self,
        success: bool,
        tallies: &[(&str, usize)],
        tests_run: usize,
        taken: Duration,
    ) -> io::Result<()> {
        let plural = if tests_run == 1 { "" } else { "s" };
        let count_role = if success {
            ColorRole::OkNumber
        } else {
            ColorRole::ErrorNumber
        };

        writeln!(self.out, "{}", SEPARATOR)?;
        writeln!(
            self.out,
            "Ran {}test{} in {}",
            self.paint(count_role, &format!("{} ", tests_run)),
            plural,
            self.format_seconds(taken)
        )?;
        writeln!(self.out)?;

        if success {
            return writeln!(self.out, "{}", self.paint(ColorRole::Pass, "OK"));
        }

        let counts: Vec<String> = tallies
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| {
                let role = if *label == "failures" {
                    ColorRole::Failure
                } else {
                    ColorRole::Error
                };
                format!("{}={}", label, self.paint(role, &count.to_string()))
            })
            .collect();
        writeln!(
            self.out,
            "{} ({})",
            self.paint(ColorRole::Failure, "FAILED"),
            counts.join(", ")
        )
    }

    /// Elapsed time, e.g. `1.250 seconds` or `2 minutes 3.000 seconds`.
    pub fn format_seconds(&self, taken: Duration) -> String {
        let secs = taken.as_secs_f64();
        if secs >= 60.0 {
            let minutes = (secs / 60.0).floor();
            format!(
                "{} minutes {} seconds",
                self.paint(ColorRole::Number, &format!("{}", minutes as u64)),
                self.paint(ColorRole::Number, &format!("{:.3}", secs - minutes * 60.0))
            )
        } else {
            format!(
                "{} seconds",
                self.paint(ColorRole::Number, &format!("{:.3}", secs))
            )
        }
    }
}

fn first_char(label: &str) -> &str {
    label
        .char_indices()
        .nth(1)
        .map_or(label, |(end, _)| &label[..end])
}
