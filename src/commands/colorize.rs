//! Colorize subcommand handler

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use tintrace::cli::ShapeArg;
use tintrace::ReportColorizer;

use super::{read_input, Context};

/// Colorize one diagnostic block and write it to stdout.
pub fn handle(ctx: &Context, file: Option<&Path>, shape: ShapeArg) -> Result<ExitCode> {
    let text = read_input(file)?;
    let shape = shape.resolve(&text);
    tracing::debug!(?shape, bytes = text.len(), "colorizing");

    let mut out = ctx.output();
    ReportColorizer::new(&ctx.scheme)
        .with_elider(ctx.elider.as_ref())
        .write(shape, &text, &mut out)
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;

    Ok(ExitCode::SUCCESS)
}
