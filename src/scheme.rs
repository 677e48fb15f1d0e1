//! Colour scheme: which colour each part of the output is drawn in.
//!
//! The scheme maps a fixed set of [`ColorRole`]s to [`Color`]s. A default
//! scheme is built from a declarative table; user overrides are given as a
//! `role=colour,role=colour` descriptor and merged onto it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::color::{parse_color, Color};
use crate::error::ColorError;

/// A named part of the output that gets its own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorRole {
    Normal,
    Pass,
    Failure,
    Error,
    Number,
    OkNumber,
    ErrorNumber,
    Filename,
    Lineno,
    Testname,
    FailedExample,
    ExpectedOutput,
    ActualOutput,
    CharacterDiffs,
    DiffChunk,
    Exception,
    Skip,
}

impl ColorRole {
    pub const ALL: [ColorRole; 17] = [
        ColorRole::Normal,
        ColorRole::Pass,
        ColorRole::Failure,
        ColorRole::Error,
        ColorRole::Number,
        ColorRole::OkNumber,
        ColorRole::ErrorNumber,
        ColorRole::Filename,
        ColorRole::Lineno,
        ColorRole::Testname,
        ColorRole::FailedExample,
        ColorRole::ExpectedOutput,
        ColorRole::ActualOutput,
        ColorRole::CharacterDiffs,
        ColorRole::DiffChunk,
        ColorRole::Exception,
        ColorRole::Skip,
    ];

    /// Name used in colorscheme descriptors.
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorRole::Normal => "normal",
            ColorRole::Pass => "pass",
            ColorRole::Failure => "failure",
            ColorRole::Error => "error",
            ColorRole::Number => "number",
            ColorRole::OkNumber => "ok-number",
            ColorRole::ErrorNumber => "error-number",
            ColorRole::Filename => "filename",
            ColorRole::Lineno => "lineno",
            ColorRole::Testname => "testname",
            ColorRole::FailedExample => "failed-example",
            ColorRole::ExpectedOutput => "expected-output",
            ColorRole::ActualOutput => "actual-output",
            ColorRole::CharacterDiffs => "character-diffs",
            ColorRole::DiffChunk => "diff-chunk",
            ColorRole::Exception => "exception",
            ColorRole::Skip => "skip",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ColorError::UnknownColorRole {
                role: s.to_string(),
            })
    }
}

/// Default colours, chosen to keep enough contrast on both dark and light
/// terminal backgrounds.
const DEFAULT_COLORS: [(ColorRole, &str); 17] = [
    (ColorRole::Normal, "normal"),
    (ColorRole::Pass, "green"),
    (ColorRole::Failure, "magenta"),
    (ColorRole::Error, "brightred"),
    (ColorRole::Number, "green"),
    (ColorRole::OkNumber, "green"),
    (ColorRole::ErrorNumber, "brightred"),
    (ColorRole::Filename, "lightblue"),
    (ColorRole::Lineno, "lightred"),
    (ColorRole::Testname, "lightcyan"),
    (ColorRole::FailedExample, "cyan"),
    (ColorRole::ExpectedOutput, "green"),
    (ColorRole::ActualOutput, "red"),
    (ColorRole::CharacterDiffs, "magenta"),
    (ColorRole::DiffChunk, "magenta"),
    (ColorRole::Exception, "red"),
    (ColorRole::Skip, "yellow"),
];

static DEFAULT_SCHEME: LazyLock<ColorScheme> = LazyLock::new(|| {
    let mut colors = [Color::NORMAL; 17];
    for (role, text) in DEFAULT_COLORS {
        // The table only holds literal names the parser accepts.
        colors[role.slot()] = parse_color(text).unwrap_or(Color::NORMAL);
    }
    ColorScheme {
        colors,
        enabled: true,
    }
});

/// Colour for every [`ColorRole`]. Read-only once built.
///
/// A disabled scheme keeps its colours but renders every escape code as an
/// empty string, so text painted with it passes through byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    colors: [Color; 17],
    enabled: bool,
}

impl Default for ColorScheme {
    fn default() -> Self {
        DEFAULT_SCHEME.clone()
    }
}

impl ColorScheme {
    /// Colour assigned to a role.
    pub fn color(&self, role: ColorRole) -> Color {
        self.colors[role.slot()]
    }

    /// The default scheme with colour output switched off.
    pub fn plain() -> Self {
        Self::default().with_enabled(false)
    }

    /// Switch escape code output on or off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Escape code for a role; empty when the scheme is disabled.
    pub fn code(&self, role: ColorRole) -> String {
        if self.enabled {
            self.color(role).terminal_code()
        } else {
            String::new()
        }
    }

    /// Wrap text in a role's colour, switching back to `normal` after it.
    pub fn paint(&self, role: ColorRole, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!(
            "{}{}{}",
            self.color(role),
            text,
            self.color(ColorRole::Normal)
        )
    }

    /// Replace the colour of one role.
    pub fn with_color(mut self, role: ColorRole, color: Color) -> Self {
        self.colors[role.slot()] = color;
        self
    }

    /// Merge a colorscheme descriptor onto this scheme.
    ///
    /// Each `role=colour` entry is applied on its own. Entries that fail to
    /// parse or name an unknown role are skipped, leaving that role's colour
    /// as it was, and are returned as warnings.
    pub fn with_overrides(mut self, descriptor: &str) -> (Self, Vec<ColorError>) {
        let mut warnings = Vec::new();

        for entry in entries(descriptor) {
            let applied = parse_entry(entry)
                .and_then(|(name, color)| name.parse::<ColorRole>().map(|role| (role, color)));
            match applied {
                Ok((role, color)) => {
                    tracing::debug!(role = %role, color = ?color, "colorscheme override");
                    self.colors[role.slot()] = color;
                }
                Err(err) => {
                    tracing::warn!("ignoring colorscheme entry: {}", err);
                    warnings.push(err);
                }
            }
        }

        (self, warnings)
    }

    /// All roles and their colours, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Color)> + '_ {
        ColorRole::ALL.into_iter().map(|role| (role, self.color(role)))
    }
}

fn entries(descriptor: &str) -> impl Iterator<Item = &str> {
    descriptor.split(',').filter(move |_| !descriptor.is_empty())
}

fn parse_entry(entry: &str) -> Result<(&str, Color), ColorError> {
    let (name, color_text) = entry
        .split_once('=')
        .ok_or_else(|| ColorError::invalid_scheme(entry, "missing '=' (role=colour)"))?;
    if name.is_empty() {
        return Err(ColorError::invalid_scheme(entry, "missing role (role=colour)"));
    }
    if color_text.is_empty() {
        return Err(ColorError::invalid_scheme(entry, "missing colour (role=colour)"));
    }
    Ok((name, parse_color(color_text)?))
}

/// Parse a `role=colour,role=colour` descriptor.
///
/// Purely syntactic: role names are not checked against [`ColorRole`]. An
/// empty descriptor yields an empty mapping. Each entry is split on its first
/// `=`.
pub fn parse_colorscheme(descriptor: &str) -> Result<BTreeMap<String, Color>, ColorError> {
    entries(descriptor)
        .map(|entry| parse_entry(entry).map(|(name, color)| (name.to_string(), color)))
        .collect()
}
