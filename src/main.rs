//! tintrace command-line entry point

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tintrace::cli::{Cli, Commands, ConfigCommands};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let ctx = commands::Context::from_args(&cli.global)?;

    match cli.command {
        Commands::Colorize { file, shape } => commands::colorize::handle(&ctx, file.as_deref(), shape),
        Commands::Report { file } => commands::report::handle(&ctx, file.as_deref()),
        Commands::Palette => commands::palette::handle(&ctx),
        Commands::ParseColor { descriptors } => commands::parse_color::handle(&ctx, &descriptors),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(&ctx),
            ConfigCommands::Path => commands::config::handle_path(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
