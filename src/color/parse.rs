//! Colour descriptor parser.

use super::palette::xterm_from_rgb_string;
use super::Color;
use crate::error::ColorError;

/// Brightness prefixes, tried in order. Matching is case-sensitive.
const PREFIXES: &[(&str, bool)] = &[
    ("dark", false),
    ("light", true),
    ("bright", true),
    ("bold", true),
];

/// Parse a colour descriptor.
///
/// Accepted forms, tried in this order:
/// 1. `rgb(RRGGBB)`, quantized to the nearest xterm palette entry
/// 2. an integer in `0..256`, used as an xterm palette index
/// 3. an optional `dark`/`light`/`bright`/`bold` prefix followed by one of
///    `default`, `normal`, `black`, `red`, `green`, `brown`, `yellow`,
///    `blue`, `magenta`, `cyan`, `grey`, `gray`, `white`
pub fn parse_color(text: &str) -> Result<Color, ColorError> {
    if text.is_empty() {
        return Err(ColorError::invalid_color(text, "empty colour"));
    }

    if let Some(hex) = text
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return xterm_from_rgb_string(hex)
            .map(Color::xterm256)
            .map_err(|_| ColorError::invalid_color(text, "bad RGB colour"));
    }

    if is_integer(text) {
        return text
            .parse::<i64>()
            .ok()
            .and_then(|number| u8::try_from(number).ok())
            .map(Color::xterm256)
            .ok_or_else(|| ColorError::invalid_color(text, "xterm colour out of range"));
    }

    let (bright, name) = PREFIXES
        .iter()
        .find_map(|&(prefix, bright)| text.strip_prefix(prefix).map(|rest| (Some(bright), rest)))
        .unwrap_or((None, text));

    named_foreground(name)
        .map(|fg| Color::ansi16(fg, bright))
        .ok_or_else(|| ColorError::invalid_color(text, "unknown colour name"))
}

/// An optionally signed run of ASCII digits, whatever its magnitude.
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Foreground index of a basic colour name; `Some(None)` is the default colour.
fn named_foreground(name: &str) -> Option<Option<u8>> {
    let fg = match name {
        "default" | "normal" => None,
        "black" => Some(0),
        "red" => Some(1),
        "green" => Some(2),
        "brown" | "yellow" => Some(3),
        "blue" => Some(4),
        "magenta" => Some(5),
        "cyan" => Some(6),
        "grey" | "gray" | "white" => Some(7),
        _ => return None,
    };
    Some(fg)
}
