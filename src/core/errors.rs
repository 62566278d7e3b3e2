//! DSP-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DotspyError>;

/// Top-level error type for dotspy.
#[derive(Debug, Error)]
pub enum DotspyError {
    #[error("[DSP-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DSP-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[DSP-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DSP-2001] missing catalog file: {path}")]
    MissingCatalog { path: PathBuf },

    #[error("[DSP-2002] catalog parse failure in {context}: {details}")]
    CatalogParse {
        context: &'static str,
        details: String,
    },

    #[error("[DSP-2003] invalid catalog entry at {entry}: {details}")]
    InvalidCatalog { entry: String, details: String },

    #[error("[DSP-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DotspyError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "DSP-1001",
            Self::MissingConfig { .. } => "DSP-1002",
            Self::ConfigParse { .. } => "DSP-1003",
            Self::MissingCatalog { .. } => "DSP-2001",
            Self::CatalogParse { .. } => "DSP-2002",
            Self::InvalidCatalog { .. } => "DSP-2003",
            Self::Io { .. } => "DSP-3001",
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for catalog shape defects.
    #[must_use]
    pub fn invalid_catalog(entry: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            entry: entry.into(),
            details: details.into(),
        }
    }
}

impl From<serde_json::Error> for DotspyError {
    fn from(value: serde_json::Error) -> Self {
        Self::CatalogParse {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DotspyError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
