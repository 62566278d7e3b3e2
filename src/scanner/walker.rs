//! Catalog-driven tree walker and classification engine.
//!
//! The walker recursively matches a catalog level against the real
//! filesystem under a base directory and publishes a [`ResultTree`]: an
//! ordered map from [`PathKey`] to [`ClassifiedEntry`]. Traversal is
//! single-threaded and synchronous; the result is built once per run and
//! consumed read-only by the report projections.

#![allow(missing_docs)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::catalog::model::{Catalog, CatalogNode, FileType, NodeKind};
use crate::core::errors::{DotspyError, Result};
use crate::scanner::backups::backup_names;
use crate::scanner::security;

/// Walk behavior toggles, each mapping to one CLI flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Accept every catalog entry without consulting the filesystem.
    pub include_all: bool,
    /// Probe the fixed backup suffixes for stale sibling variants.
    pub check_backups: bool,
    /// Check permission bits on history/key files.
    pub check_security: bool,
}

/// Outcome of the permission check for one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecureState {
    Secure,
    Insecure,
    /// Not checked: check not requested, type not security-relevant, or the
    /// file does not exist.
    #[default]
    Unknown,
}

/// Ordered sequence of path segments from the scan root to an entry.
///
/// Identity (equality, hashing) is exact. Ordering is the display order:
/// segments compare case-insensitively with leading `.` characters stripped,
/// with an exact tie-break so `Ord` stays consistent with `Eq`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathKey(Vec<String>);

fn sort_key(segment: &str) -> String {
    segment.trim_start_matches('.').to_lowercase()
}

impl PathKey {
    /// The scan root (empty key).
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Key extended with one more segment.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final path segment, when the key is not the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Segments of the containing directory (all but the last).
    #[must_use]
    pub fn parent_segments(&self) -> &[String] {
        match self.0.len() {
            0 => &[],
            n => &self.0[..n - 1],
        }
    }

    /// Number of segments; entries directly under the root have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl Ord for PathKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .map(|s| sort_key(s))
            .cmp(other.0.iter().map(|s| sort_key(s)))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for PathKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A catalog node resolved against the real filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry {
    /// Final path segment.
    pub name: String,
    /// Mirrors the matched catalog node's kind.
    pub is_directory: bool,
    /// Owning program names copied from the catalog node.
    pub programs: Vec<String>,
    /// Classification tag copied from the catalog node.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    /// Permission-check outcome.
    pub secure: SecureState,
    /// True for inferred backup/old variants rather than direct matches.
    pub stale_candidate: bool,
}

/// The classified-entry collection, ordered by display sort key.
///
/// Built once per walk; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTree {
    entries: BTreeMap<PathKey, ClassifiedEntry>,
}

impl ResultTree {
    pub fn insert(&mut self, key: PathKey, entry: ClassifiedEntry) {
        self.entries.insert(key, entry);
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &ClassifiedEntry)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, key: &PathKey) -> Option<&ClassifiedEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Match the catalog against the filesystem rooted at `root`.
///
/// Acceptance gate per entry: with `include_all` every entry is accepted;
/// otherwise the candidate path must exist and its real kind must match the
/// declared kind. A kind mismatch is a silent skip that also suppresses the
/// backup probe for that name; a merely missing path still gets one.
/// Directory recursion happens only for accepted entries.
pub fn walk(root: &Path, catalog: &Catalog, options: WalkOptions) -> Result<ResultTree> {
    let mut found = ResultTree::default();
    walk_level(root, &PathKey::root(), catalog.entries(), options, &mut found)?;
    Ok(found)
}

fn walk_level(
    dir: &Path,
    prefix: &PathKey,
    nodes: &BTreeMap<String, CatalogNode>,
    options: WalkOptions,
    found: &mut ResultTree,
) -> Result<()> {
    for (name, node) in nodes {
        let path = dir.join(name);
        let actual = probe(&path)?;
        let mismatch = actual
            .as_ref()
            .is_some_and(|meta| meta.is_dir() != node.is_dir());
        let accepted = options.include_all || (actual.is_some() && !mismatch);

        if accepted {
            let key = prefix.child(name);
            found.insert(
                key.clone(),
                ClassifiedEntry {
                    name: name.clone(),
                    is_directory: node.is_dir(),
                    programs: node.programs.clone(),
                    file_type: node.file_type,
                    secure: secure_state(node, actual.as_ref(), options),
                    stale_candidate: false,
                },
            );
            if let NodeKind::Directory(children) = &node.kind {
                walk_level(&path, &key, children, options, found)?;
            }
        }

        if options.check_backups && (options.include_all || !mismatch) {
            for backup in backup_names(name) {
                if probe(&dir.join(&backup))?.is_some() {
                    found.insert(
                        prefix.child(&backup),
                        ClassifiedEntry {
                            name: backup,
                            is_directory: node.is_dir(),
                            programs: node.programs.clone(),
                            file_type: node.file_type,
                            secure: SecureState::Unknown,
                            stale_candidate: true,
                        },
                    );
                }
            }
        }
    }
    Ok(())
}

/// Metadata when the path exists, `None` when it does not. Any other I/O
/// failure is fatal for the run, never a negative match.
fn probe(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        // NotADirectory: a parent segment is a regular file, so the
        // candidate itself does not exist.
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Ok(None)
        }
        Err(err) => Err(DotspyError::io(path, err)),
    }
}

/// Reads the mode from the metadata the acceptance probe already fetched;
/// the candidate is never statted a second time.
fn secure_state(
    node: &CatalogNode,
    meta: Option<&fs::Metadata>,
    options: WalkOptions,
) -> SecureState {
    if !options.check_security || !node.file_type.is_some_and(FileType::is_security_relevant) {
        return SecureState::Unknown;
    }
    match meta.and_then(security::mode_bits) {
        Some(mode) if security::mode_is_secure(mode) => SecureState::Secure,
        Some(_) => SecureState::Insecure,
        None => SecureState::Unknown,
    }
}
