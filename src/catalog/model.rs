//! Catalog model: file type tags and the normalized specification tree.

#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification tag carried by a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Cache,
    Config,
    History,
    Install,
    Key,
    Log,
    Session,
}

impl FileType {
    /// Lowercase tag name as written in catalogs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Config => "config",
            Self::History => "history",
            Self::Install => "install",
            Self::Key => "key",
            Self::Log => "log",
            Self::Session => "session",
        }
    }

    /// Whether entries of this type are subject to the permission check.
    #[must_use]
    pub const fn is_security_relevant(self) -> bool {
        matches!(self, Self::History | Self::Key)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "cache" => Ok(Self::Cache),
            "config" => Ok(Self::Config),
            "history" => Ok(Self::History),
            "install" => Ok(Self::Install),
            "key" => Ok(Self::Key),
            "log" => Ok(Self::Log),
            "session" => Ok(Self::Session),
            _ => Err(()),
        }
    }
}

/// Leaf-vs-directory discriminant for a catalog node.
///
/// Resolved once at load time; a `Directory` always carries a non-empty
/// children map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory(BTreeMap<String, CatalogNode>),
}

/// One entry of the known-file specification tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNode {
    /// Owning program names; empty when nothing claims the file.
    pub programs: Vec<String>,
    /// Optional classification tag.
    pub file_type: Option<FileType>,
    /// File or directory-with-children.
    pub kind: NodeKind,
}

impl CatalogNode {
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    /// Children map for directory nodes.
    #[must_use]
    pub const fn children(&self) -> Option<&BTreeMap<String, CatalogNode>> {
        match &self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File => None,
        }
    }
}

/// The full known-file catalog: top-level name → node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogNode>,
}

impl Catalog {
    #[must_use]
    pub const fn new(entries: BTreeMap<String, CatalogNode>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, CatalogNode> {
        &self.entries
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
