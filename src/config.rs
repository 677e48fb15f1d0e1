//! Configuration: verbosity, colours, and path elision.
//!
//! Values come from, in increasing priority: built-in defaults, the TOML
//! config file, the `TINTRACE_COLORS` environment variable (colours only,
//! and only when nothing else set them), and command-line flags.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::formatter::Verbosity;
use crate::paths::PathElider;
use crate::scheme::ColorScheme;

/// Environment variable holding a colorscheme descriptor.
pub const COLORS_ENV: &str = "TINTRACE_COLORS";

/// When to emit colour escape codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                atty::is(atty::Stream::Stdout) && env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 0 = quiet, 1 = dots, 2 = one line per test.
    pub verbosity: u8,
    /// Show test descriptions instead of identifiers.
    pub descriptions: bool,
    /// Colorscheme descriptor, e.g. `fail=red,pass=rgb(00ff00)`.
    pub colors: String,
    /// Shorten frames from files outside `base_dir`.
    pub elide_foreign_paths: bool,
    /// Project root for path elision; the working directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: 1,
            descriptions: true,
            colors: String::new(),
            elide_foreign_paths: false,
            base_dir: None,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("tintrace").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Take colours from the environment if none are configured.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| env::var(name).ok());
    }

    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.colors.is_empty() {
            if let Some(colors) = lookup(COLORS_ENV) {
                self.colors = colors;
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from(self.verbosity)
    }

    /// Default scheme with the configured overrides merged on.
    ///
    /// Entries that could not be applied are returned as warnings; the
    /// affected roles keep their default colours.
    pub fn color_scheme(&self) -> (ColorScheme, Vec<ColorError>) {
        ColorScheme::default().with_overrides(&self.colors)
    }

    /// Path elider when elision is enabled.
    pub fn path_elider(&self) -> Option<PathElider> {
        if !self.elide_foreign_paths {
            return None;
        }
        let base = self
            .base_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Some(PathElider::new(base))
    }
}
