//! Default filesystem locations for configuration and catalog data.

use std::env;
use std::path::PathBuf;

/// Home directory from `$HOME`, when set and non-empty.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Per-user dotspy configuration directory (`~/.config/dotspy`).
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".config").join("dotspy"))
}

/// Default configuration file path (`~/.config/dotspy/config.toml`).
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Default catalog file path (`~/.config/dotspy/known.json`).
#[must_use]
pub fn default_catalog_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("known.json"))
}
