//! Report subcommand handler

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context as _, Result};

use tintrace::{OutputFormatter, RunTally, TestOutcome};

use super::{read_input, Context};

/// Replay a JSON-lines stream of test outcomes as a test run.
pub fn handle(ctx: &Context, file: Option<&Path>) -> Result<ExitCode> {
    let started = Instant::now();
    let input = read_input(file)?;

    let mut formatter = OutputFormatter::new(ctx.output(), &ctx.scheme, ctx.config.verbosity())
        .with_descriptions(ctx.config.descriptions)
        .with_elider(ctx.elider.as_ref());
    let mut tally = RunTally::default();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let outcome: TestOutcome = serde_json::from_str(line)
            .with_context(|| format!("Invalid outcome on line {}", index + 1))?;
        tally
            .record(&outcome, &mut formatter)
            .context("Failed to write output")?;
    }

    tally
        .report(&mut formatter, started.elapsed())
        .context("Failed to write output")?;
    formatter
        .into_inner()
        .flush()
        .context("Failed to write output")?;

    Ok(if tally.was_successful() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
