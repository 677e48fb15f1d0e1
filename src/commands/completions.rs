//! Completions subcommand handler

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use tintrace::cli::Cli;

/// Print a completion script for the given shell.
pub fn handle(shell: Shell) -> Result<ExitCode> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "tintrace", &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
