//! Depth-indented tree projection.

use crate::report::entry_label;
use crate::scanner::walker::ResultTree;

/// Render the result tree as depth-indented lines, three spaces per level
/// beyond the root.
#[must_use]
pub fn render_tree(found: &ResultTree) -> Vec<String> {
    found
        .iter()
        .map(|(key, entry)| {
            let indent = "   ".repeat(key.depth().saturating_sub(1));
            format!("{indent}{}", entry_label(entry, true))
        })
        .collect()
}
