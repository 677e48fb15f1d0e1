//! Config subcommands handler

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use tintrace::{ColorRole, Config};

use super::Context;

/// Show the effective configuration as TOML.
///
/// Flags and the environment are already folded in, so this is what the
/// other subcommands would run with.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(ctx: &Context) -> Result<ExitCode> {
    let toml_str = ctx.config.to_toml()?;
    let mut out = ctx.output();
    writeln!(out, "{}", ctx.scheme.paint(ColorRole::Normal, toml_str.trim_end()))
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;
    Ok(ExitCode::SUCCESS)
}

/// Show the configuration file location.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<ExitCode> {
    let config_path = Config::config_path()?;
    println!("{}", config_path.display());
    Ok(ExitCode::SUCCESS)
}
