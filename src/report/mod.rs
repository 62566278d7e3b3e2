//! Report projections over the classified-entry collection.
//!
//! Both views share one label renderer: name colored by kind/staleness,
//! an ` (old?)` marker for stale candidates, the owning programs in cyan,
//! the type tag, and a security badge when the permission check ran.

pub mod programs;
pub mod tree;

use colored::Colorize;

use crate::scanner::walker::{ClassifiedEntry, SecureState};

/// Render one entry's decorated label.
///
/// The program view passes `show_programs = false` since the program name is
/// already the group heading; the type tag still prints there. In the tree
/// view the tag prints only alongside the programs, as the wire reports
/// always have.
#[must_use]
pub fn entry_label(entry: &ClassifiedEntry, show_programs: bool) -> String {
    let name = if entry.stale_candidate {
        entry.name.red()
    } else if entry.is_directory {
        entry.name.yellow()
    } else {
        entry.name.blue()
    };

    let mut label = name.to_string();
    if entry.stale_candidate {
        label.push_str(" (old?)");
    }
    if show_programs && !entry.programs.is_empty() {
        label.push_str(": ");
        label.push_str(&entry.programs.join(", ").cyan().to_string());
    }
    if let Some(file_type) = entry.file_type {
        if !show_programs || !entry.programs.is_empty() {
            label.push(' ');
            label.push_str(file_type.as_str());
        }
    }
    match entry.secure {
        SecureState::Secure => label.push_str(&format!(" {}", "[secure]".green())),
        SecureState::Insecure => label.push_str(&format!(" {}", "[insecure]".red())),
        SecureState::Unknown => {}
    }
    label
}
