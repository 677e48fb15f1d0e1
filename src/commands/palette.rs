//! Palette subcommand handler

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use tintrace::{Color, ColorPalette};

use super::Context;

/// Print every palette entry with its RGB value and a swatch.
pub fn handle(ctx: &Context) -> Result<ExitCode> {
    let mut out = ctx.output();

    for (index, rgb) in ColorPalette::global().iter() {
        let (on, off) = if ctx.color {
            (Color::xterm256(index).to_string(), Color::NORMAL.to_string())
        } else {
            (String::new(), String::new())
        };
        writeln!(
            out,
            "{:>3}  #{:02x}{:02x}{:02x}  {}\u{2588}\u{2588}\u{2588}\u{2588}{}",
            index, rgb.r, rgb.g, rgb.b, on, off
        )
        .context("Failed to write output")?;
    }
    out.flush().context("Failed to write output")?;

    Ok(ExitCode::SUCCESS)
}
