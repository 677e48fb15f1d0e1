//! Terminal colouring for test failure output.
//!
//! `tintrace` takes diagnostic text that a test runner has already rendered
//! (Python-style tracebacks and doctest failure reports) and writes it back
//! with colour escape codes, leaving the text itself untouched.
//!
//! ```
//! use tintrace::{ColorScheme, ReportColorizer, ReportShape};
//!
//! let scheme = ColorScheme::default();
//! let trace = "Traceback (most recent call last):\n  File \"t.py\", line 3, in test\nAssertionError\n";
//! let colored = ReportColorizer::new(&scheme).colorize(ReportShape::Traceback, trace);
//! assert!(colored.contains("\x1b[1;34mt.py"));
//! ```
//!
//! # Module Structure
//!
//! - [`color`] - colour values, the xterm palette, descriptor parsing
//! - [`scheme`] - roles and the colour scheme
//! - [`paths`] - path normalization and foreign-path elision
//! - [`report`] - the traceback and failure report colorizer
//! - [`formatter`] / [`outcome`] - progress, error listing, run summary
//! - [`config`] - configuration file and environment

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod formatter;
pub mod outcome;
pub mod paths;
pub mod report;
pub mod scheme;

pub use color::{parse_color, Color, ColorPalette};
pub use config::{ColorMode, Config};
pub use error::ColorError;
pub use formatter::{OutputFormatter, Verbosity};
pub use outcome::{OutcomeKind, RunTally, TestOutcome};
pub use paths::PathElider;
pub use report::{ReportColorizer, ReportShape};
pub use scheme::{parse_colorscheme, ColorRole, ColorScheme};
