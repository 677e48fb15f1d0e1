//! Subcommand handlers

pub mod colorize;
pub mod completions;
pub mod config;
pub mod palette;
pub mod parse_color;
pub mod report;

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context as _, Result};

use tintrace::cli::GlobalArgs;
use tintrace::{ColorScheme, Config, PathElider};

/// Settings resolved once at startup and shared by the handlers.
pub struct Context {
    pub config: Config,
    pub scheme: ColorScheme,
    pub elider: Option<PathElider>,
    pub color: bool,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        args.apply(&mut config);
        config.apply_env();

        // Bad entries are logged by the scheme; the run goes on with defaults.
        let (scheme, warnings) = config.color_scheme();
        if !warnings.is_empty() {
            tracing::debug!(count = warnings.len(), "colorscheme entries ignored");
        }
        let color = config.color.enabled();

        Ok(Self {
            elider: config.path_elider(),
            scheme: scheme.with_enabled(color),
            color,
            config,
        })
    }

    /// Locked stdout. With colour off the scheme emits no escape codes, so
    /// diagnostic text reaches it byte for byte.
    pub fn output(&self) -> impl Write {
        io::stdout().lock()
    }
}

/// Read a whole file, or stdin when no path is given.
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
