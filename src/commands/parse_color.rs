//! Parse-color subcommand handler

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use tintrace::{parse_color, Color};

use super::Context;

fn describe(color: &Color) -> String {
    match *color {
        Color::Xterm256 { code } => format!("xterm256 {}", code),
        Color::Ansi16 { fg, bright } => {
            let fg = fg.map_or_else(|| "default".to_string(), |fg| fg.to_string());
            let modifier = match bright {
                None => "",
                Some(true) => " bright",
                Some(false) => " dark",
            };
            format!("ansi16 {}{}", fg, modifier)
        }
    }
}

/// Show how each descriptor resolves; fails if any is invalid.
pub fn handle(ctx: &Context, descriptors: &[String]) -> Result<ExitCode> {
    let mut out = ctx.output();
    let mut all_valid = true;

    for descriptor in descriptors {
        match parse_color(descriptor) {
            Ok(color) => {
                let code = color.terminal_code();
                let (on, off) = if ctx.color {
                    (code.clone(), Color::NORMAL.to_string())
                } else {
                    (String::new(), String::new())
                };
                writeln!(
                    out,
                    "{}: {} {:?} {}sample{}",
                    descriptor,
                    describe(&color),
                    code,
                    on,
                    off
                )
                .context("Failed to write output")?;
            }
            Err(err) => {
                all_valid = false;
                eprintln!("{}", err);
            }
        }
    }
    out.flush().context("Failed to write output")?;

    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
