//! Terminal colours: the two colour variants, their escape codes, and the
//! descriptor parser.
//!
//! Descriptors look like `rgb(ff8700)`, `208`, or `brightred`; see
//! [`parse_color`] for the full grammar.

mod palette;
mod parse;

use std::fmt;
use std::str::FromStr;

pub use palette::{
    cube_coordinates, rgb_from_xterm, xterm_from_rgb, xterm_from_rgb_string, ColorPalette,
    CUBE_SIZE, CUBE_START, GRAY_START,
};
pub use parse::parse_color;

use crate::error::ColorError;

/// A foreground colour a terminal can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 8 basic colours, with an optional dim/bright modifier.
    ///
    /// `fg: None` resets to the terminal's default foreground.
    Ansi16 { fg: Option<u8>, bright: Option<bool> },
    /// An index into the xterm 256-colour palette.
    Xterm256 { code: u8 },
}

impl Color {
    /// The terminal's default foreground with no modifier.
    pub const NORMAL: Color = Color::Ansi16 {
        fg: None,
        bright: None,
    };

    pub const fn ansi16(fg: Option<u8>, bright: Option<bool>) -> Self {
        Color::Ansi16 { fg, bright }
    }

    pub const fn xterm256(code: u8) -> Self {
        Color::Xterm256 { code }
    }

    /// Escape sequence selecting this colour as the foreground.
    pub fn terminal_code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Xterm256 { code } => write!(f, "\x1b[38;5;{}m", code),
            Color::Ansi16 { fg, bright } => {
                let prefix = match bright {
                    None => "",
                    Some(true) => "1;",
                    Some(false) => "0;",
                };
                let fg_code = fg.map_or(0, |fg| 30 + u16::from(fg));
                write!(f, "\x1b[{}{}m", prefix, fg_code)
            }
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}
