//! Command-line interface definitions.
//!
//! Lives in the library so the man page generator in `xtask` can use it.

use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::{ColorMode, Config};
use crate::report::ReportShape;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");
    let date = env!("TINTRACE_BUILD_DATE");
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" => {
            format!("{} ({} {})", version, &sha[..sha.len().min(7)], date)
        }
        _ => format!("{} ({})", version, date),
    }
});

/// Colorize test failure tracebacks and doctest reports.
#[derive(Debug, Parser)]
#[command(
    name = "tintrace",
    version,
    long_version = LONG_VERSION.as_str(),
    about = "Colorize test failure tracebacks and doctest reports",
    after_help = "Colours are given as xterm 256 colour codes (e.g. '45'), RGB colours \
                  (e.g. 'rgb(00ff00)'), ANSI colour names (e.g. 'red' or 'brightred'), \
                  or 'normal'.\nExample: --colors='failure=red,pass=rgb(00ff00),error=45'"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Colour scheme: role1=colour1,role2=colour2 [env: TINTRACE_COLORS]
    #[arg(long, global = true, value_name = "SCHEME")]
    pub colors: Option<String>,

    /// When to use colour
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorMode>,

    /// Shorten frames from files outside the base directory
    #[arg(long, global = true)]
    pub elide_foreign: bool,

    /// Project root for --elide-foreign (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// One line per test instead of dots
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// No per-test progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: ~/.config/tintrace/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

impl GlobalArgs {
    /// Let command-line flags override configured values.
    pub fn apply(&self, config: &mut Config) {
        if let Some(colors) = &self.colors {
            config.colors = colors.clone();
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if self.elide_foreign {
            config.elide_foreign_paths = true;
        }
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = Some(base_dir.clone());
        }
        if self.quiet {
            config.verbosity = 0;
        } else if self.verbose > 0 {
            config.verbosity = self.verbose.saturating_add(1);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Colorize a traceback or doctest failure report
    #[command(long_about = "Colorize a traceback or doctest failure report.\n\n\
        Reads the diagnostic text from FILE, or stdin when no file is given, \
        and writes it with colour escape codes.")]
    Colorize {
        /// Input file (default: stdin)
        file: Option<PathBuf>,

        /// Layout of the input
        #[arg(long, value_enum, default_value_t = ShapeArg::Auto)]
        shape: ShapeArg,
    },

    /// Print progress, problems, and a summary for a stream of test outcomes
    #[command(long_about = "Print progress, problems, and a summary for a stream of test outcomes.\n\n\
        Input is JSON lines, one object per finished test, e.g.\n\
        {\"test\": \"t.test_a\", \"outcome\": \"failure\", \"detail\": \"Traceback ...\"}\n\n\
        Exits with status 1 when any test failed or errored.")]
    Report {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Show the xterm 256-colour palette
    Palette,

    /// Check colour descriptors and show their escape codes
    ParseColor {
        /// Descriptors such as 'red', 'brightblue', '45', 'rgb(ff8700)'
        #[arg(required = true)]
        descriptors: Vec<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

/// Input layout selection for `colorize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// Structured when the input has a dashed separator line
    Auto,
    Traceback,
    Structured,
}

impl ShapeArg {
    pub fn resolve(self, text: &str) -> ReportShape {
        match self {
            ShapeArg::Auto => ReportShape::detect(text),
            ShapeArg::Traceback => ReportShape::Traceback,
            ShapeArg::Structured => ReportShape::Structured,
        }
    }
}
