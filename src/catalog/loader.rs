//! Catalog loading: normalizes both JSON wire encodings into [`CatalogNode`]s.
//!
//! Two encodings are accepted per entry and resolved once at load time:
//! - list form: `["prog", "tag", ...]`, optionally ending in a nested object
//!   of children (which makes the entry a directory)
//! - object form: `{"program": ..., "programs": [...], "type": ...,
//!   "files": {...}}` where the presence of `files` makes it a directory

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::catalog::model::{Catalog, CatalogNode, FileType, NodeKind};
use crate::core::errors::{DotspyError, Result};

/// Load and normalize a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(DotspyError::MissingCatalog {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(DotspyError::io(path, err)),
    };
    let doc: Value = serde_json::from_str(&raw)?;
    catalog_from_value(&doc)
}

/// Normalize an already-parsed JSON document into a catalog.
pub fn catalog_from_value(doc: &Value) -> Result<Catalog> {
    let Some(map) = doc.as_object() else {
        return Err(DotspyError::invalid_catalog(
            "<root>",
            "catalog root must be a JSON object",
        ));
    };
    Ok(Catalog::new(parse_children("", map)?))
}

fn parse_children(prefix: &str, map: &Map<String, Value>) -> Result<BTreeMap<String, CatalogNode>> {
    let mut out = BTreeMap::new();
    for (name, value) in map {
        let entry = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        out.insert(name.clone(), parse_node(&entry, value)?);
    }
    Ok(out)
}

fn parse_node(entry: &str, value: &Value) -> Result<CatalogNode> {
    match value {
        Value::Array(items) => parse_list_form(entry, items),
        Value::Object(map) => parse_object_form(entry, map),
        _ => Err(DotspyError::invalid_catalog(
            entry,
            "entry must be an array or an object",
        )),
    }
}

/// List form: leading strings are `[program, tag...]`; a trailing object
/// holds directory children.
fn parse_list_form(entry: &str, items: &[Value]) -> Result<CatalogNode> {
    let (meta, children) = match items.split_last() {
        Some((Value::Object(map), head)) => (head, Some(map)),
        _ => (items, None),
    };

    let mut strings = Vec::with_capacity(meta.len());
    for item in meta {
        let Some(s) = item.as_str() else {
            return Err(DotspyError::invalid_catalog(
                entry,
                "list metadata must be strings",
            ));
        };
        strings.push(s);
    }

    let mut programs = Vec::new();
    let mut file_type = None;
    if let Some((first, tags)) = strings.split_first() {
        programs.push((*first).to_string());
        for tag in tags {
            let parsed: FileType = tag.parse().map_err(|()| {
                DotspyError::invalid_catalog(entry, format!("unknown type tag: {tag}"))
            })?;
            if file_type.is_none() {
                file_type = Some(parsed);
            }
        }
    }

    Ok(CatalogNode {
        programs,
        file_type,
        kind: parse_kind(entry, children)?,
    })
}

/// Object form: `program`/`programs`/`type`/`files` keys; unknown keys are
/// ignored, matching the wire format's tolerance.
fn parse_object_form(entry: &str, map: &Map<String, Value>) -> Result<CatalogNode> {
    let programs = if let Some(value) = map.get("programs") {
        let Some(items) = value.as_array() else {
            return Err(DotspyError::invalid_catalog(
                entry,
                "`programs` must be an array of strings",
            ));
        };
        let mut programs = Vec::with_capacity(items.len());
        for item in items {
            let Some(s) = item.as_str() else {
                return Err(DotspyError::invalid_catalog(
                    entry,
                    "`programs` must be an array of strings",
                ));
            };
            programs.push(s.to_string());
        }
        programs
    } else if let Some(value) = map.get("program") {
        let Some(s) = value.as_str() else {
            return Err(DotspyError::invalid_catalog(
                entry,
                "`program` must be a string",
            ));
        };
        vec![s.to_string()]
    } else {
        Vec::new()
    };

    let file_type = match map.get("type") {
        Some(value) => {
            let Some(s) = value.as_str() else {
                return Err(DotspyError::invalid_catalog(
                    entry,
                    "`type` must be a string",
                ));
            };
            let parsed: FileType = s.parse().map_err(|()| {
                DotspyError::invalid_catalog(entry, format!("unknown type tag: {s}"))
            })?;
            Some(parsed)
        }
        None => None,
    };

    let kind = match map.get("files") {
        Some(Value::Object(files)) => parse_kind(entry, Some(files))?,
        Some(_) => {
            return Err(DotspyError::invalid_catalog(
                entry,
                "`files` must be an object",
            ));
        }
        None => NodeKind::File,
    };

    Ok(CatalogNode {
        programs,
        file_type,
        kind,
    })
}

fn parse_kind(entry: &str, children: Option<&Map<String, Value>>) -> Result<NodeKind> {
    match children {
        Some(map) if map.is_empty() => Err(DotspyError::invalid_catalog(
            entry,
            "directory entry with no children",
        )),
        Some(map) => Ok(NodeKind::Directory(parse_children(entry, map)?)),
        None => Ok(NodeKind::File),
    }
}
