//! Test outcome events and the run tally built from them.
//!
//! The host test runner reports one [`TestOutcome`] per finished test. Each
//! outcome is echoed as progress output immediately and collected in a
//! [`RunTally`] for the error listing and summary at the end of the run.

use std::io::{self, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::formatter::OutputFormatter;
use crate::report::ReportShape;

/// Result of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Success,
    Failure,
    Error,
    Skip,
}

/// How a failure's diagnostic text is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticShape {
    #[default]
    Traceback,
    Doctest,
}

impl From<DiagnosticShape> for ReportShape {
    fn from(shape: DiagnosticShape) -> Self {
        match shape {
            DiagnosticShape::Traceback => ReportShape::Traceback,
            DiagnosticShape::Doctest => ReportShape::Structured,
        }
    }
}

/// One finished test, as reported by the host runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test identifier.
    pub test: String,
    /// Human-readable description, shown instead of the identifier when
    /// descriptions are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub outcome: OutcomeKind,
    /// Rendered diagnostic text for failures and errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default)]
    pub shape: DiagnosticShape,
    /// Error classification label, `ERROR` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Skip reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Mismatched doctest example, used when no rendered `detail` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<DoctestFailure>,
    /// Run time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TestOutcome {
    pub fn new(test: impl Into<String>, outcome: OutcomeKind) -> Self {
        Self {
            test: test.into(),
            description: None,
            outcome,
            detail: None,
            shape: DiagnosticShape::default(),
            label: None,
            reason: None,
            example: None,
            duration: None,
        }
    }

    pub fn with_detail(mut self, shape: DiagnosticShape, detail: impl Into<String>) -> Self {
        self.shape = shape;
        self.detail = Some(detail.into());
        self
    }

    /// Name to show for this test.
    pub fn display_name(&self, descriptions: bool) -> &str {
        match &self.description {
            Some(description) if descriptions && !description.is_empty() => description,
            _ => &self.test,
        }
    }

    /// Diagnostic text and its shape.
    pub fn diagnostic(&self) -> (ReportShape, String) {
        match (&self.detail, &self.example) {
            (Some(detail), _) => (self.shape.into(), detail.clone()),
            (None, Some(example)) => (ReportShape::Traceback, example.render()),
            (None, None) => (self.shape.into(), String::new()),
        }
    }

    /// Label for error outcomes.
    pub fn error_label(&self) -> &str {
        self.label.as_deref().unwrap_or("ERROR")
    }
}

/// A failed, errored, or skipped test kept for the final listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub name: String,
    pub detail: String,
    pub shape: ReportShape,
    pub reason: Option<String>,
}

/// Counts and collected problems of one run.
#[derive(Debug, Clone, Default)]
pub struct RunTally {
    pub tests_run: usize,
    pub errors: Vec<ErrorEntry>,
    pub failures: Vec<ErrorEntry>,
    pub skips: Vec<ErrorEntry>,
    pub reported_time: Duration,
}

impl RunTally {
    /// Record an outcome and echo it as progress output.
    pub fn record<W: Write>(
        &mut self,
        outcome: &TestOutcome,
        formatter: &mut OutputFormatter<'_, W>,
    ) -> io::Result<()> {
        let name = outcome.display_name(formatter.descriptions()).to_string();
        self.tests_run += 1;
        if let Some(taken) = outcome
            .duration
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        {
            self.reported_time += taken;
        }

        formatter.start_test(&name)?;
        let (shape, detail) = outcome.diagnostic();
        let entry = ErrorEntry {
            name,
            detail,
            shape,
            reason: outcome.reason.clone(),
        };
        match outcome.outcome {
            OutcomeKind::Success => formatter.test_success()?,
            OutcomeKind::Failure => {
                formatter.test_failure()?;
                self.failures.push(entry);
            }
            OutcomeKind::Error => {
                formatter.test_error(outcome.error_label())?;
                self.errors.push(entry);
            }
            OutcomeKind::Skip => {
                formatter.test_skip("SKIP")?;
                self.skips.push(entry);
            }
        }
        formatter.stop_test()
    }

    pub fn was_successful(&self) -> bool {
        self.failures.is_empty() && self.errors.is_empty()
    }

    /// Problem counts for the summary line; skips don't count as problems.
    pub fn tallies(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("failures", self.failures.len()),
            ("errors", self.errors.len()),
        ]
    }

    /// Print the error listing and the summary.
    ///
    /// `elapsed` is used unless the outcomes carried their own durations.
    pub fn report<W: Write>(
        &self,
        formatter: &mut OutputFormatter<'_, W>,
        elapsed: Duration,
    ) -> io::Result<()> {
        formatter.stop_tests()?;
        formatter.print_errors_preamble()?;
        formatter.print_error_list("ERROR", &self.errors)?;
        formatter.print_error_list("FAIL", &self.failures)?;
        formatter.print_error_list("SKIP", &self.skips)?;

        let taken = if self.reported_time.is_zero() {
            elapsed
        } else {
            self.reported_time
        };
        formatter.print_summary(self.was_successful(), &self.tallies(), self.tests_run, taken)
    }
}

/// A doctest example whose output didn't match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctestFailure {
    pub filename: String,
    /// Line of the example in the file, 1-based.
    pub lineno: usize,
    pub name: String,
    pub source: String,
    pub want: String,
    pub got: String,
}

impl DoctestFailure {
    /// Render as a traceback-style block: a frame header followed by the
    /// example, the wanted and the actual output.
    pub fn render(&self) -> String {
        format!(
            "\n  File \"{}\", line {}, in {}\n\n{}\nWant:\n{}\nGot:\n{}\n",
            self.filename, self.lineno, self.name, self.source, self.want, self.got
        )
    }
}
