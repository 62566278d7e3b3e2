//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DotspyError, Result};
use crate::core::paths;

/// Full dotspy configuration model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Catalog source location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file path; `None` falls back to `~/.config/dotspy/known.json`.
    pub file: Option<PathBuf>,
}

/// Scan root override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory to scan; `None` falls back to the home directory.
    pub root: Option<PathBuf>,
}

/// Output decoration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
}

/// When to emit ANSI color codes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Decide by output-stream interactivity.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = DotspyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(DotspyError::InvalidConfig {
                details: format!("unknown color mode: {other} (expected auto|always|never)"),
            }),
        }
    }
}

impl Config {
    /// Default configuration path, when a home directory can be resolved.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        paths::default_config_file()
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from the default
    /// path; defaults are used. An explicit path that does not exist is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(DotspyError::MissingConfig {
                        path: explicit.to_path_buf(),
                    });
                }
                Self::from_file(explicit)?
            }
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        cfg.apply_env_overrides_from(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| DotspyError::io(path, source))?;
        let parsed: Self = toml::from_str(&raw)?;
        Ok(parsed)
    }

    /// Apply overrides from an env-style lookup. Factored over the lookup so
    /// tests can drive it without mutating the process environment.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DOTSPY_CATALOG_FILE") {
            self.catalog.file = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("DOTSPY_SCAN_ROOT") {
            self.scan.root = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup("DOTSPY_COLOR") {
            self.output.color = value.parse()?;
        }
        Ok(())
    }

    /// Effective catalog file path (config value or the default location).
    #[must_use]
    pub fn catalog_file(&self) -> Option<PathBuf> {
        self.catalog
            .file
            .clone()
            .or_else(paths::default_catalog_file)
    }

    /// Effective scan root (config value or the home directory).
    #[must_use]
    pub fn scan_root(&self) -> Option<PathBuf> {
        self.scan.root.clone().or_else(paths::home_dir)
    }
}
