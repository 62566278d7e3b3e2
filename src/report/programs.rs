//! Program-grouped projection with optional program-name filtering.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::report::entry_label;
use crate::scanner::walker::{ClassifiedEntry, PathKey, ResultTree};

/// Render entries grouped under their owning programs.
///
/// Groups are built in result-tree order, so each program's entries keep the
/// display sort; an entry owned by several programs appears once per owner.
/// Headings print in case-sensitive ascending program-name order. A filter
/// restricts which programs print; `None` or an empty list prints all.
#[must_use]
pub fn render_programs(found: &ResultTree, filter: Option<&[String]>) -> Vec<String> {
    let filter = filter.filter(|names| !names.is_empty());

    let mut by_program: BTreeMap<&str, Vec<(&PathKey, &ClassifiedEntry)>> = BTreeMap::new();
    for (key, entry) in found.iter() {
        for program in &entry.programs {
            by_program.entry(program.as_str()).or_default().push((key, entry));
        }
    }

    let mut lines = Vec::new();
    for (program, entries) in &by_program {
        if filter.is_some_and(|names| !names.iter().any(|n| n == program)) {
            continue;
        }
        lines.push(program.cyan().to_string());
        for (key, entry) in entries {
            let parent = key.parent_segments();
            let prefix = if parent.is_empty() {
                String::new()
            } else {
                format!("{}/", parent.join("/"))
            };
            lines.push(format!("   {prefix}{}", entry_label(entry, false)));
        }
    }
    lines
}
