//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use dotspy::prelude::*;
//! ```

// Core
pub use crate::core::config::{ColorMode, Config};
pub use crate::core::errors::{DotspyError, Result};

// Catalog
pub use crate::catalog::loader::load_catalog;
pub use crate::catalog::model::{Catalog, CatalogNode, FileType, NodeKind};

// Scanner
pub use crate::scanner::backups::BACKUP_SUFFIXES;
pub use crate::scanner::security::mode_is_secure;
pub use crate::scanner::walker::{
    ClassifiedEntry, PathKey, ResultTree, SecureState, WalkOptions, walk,
};

// Report
pub use crate::report::programs::render_programs;
pub use crate::report::tree::render_tree;
