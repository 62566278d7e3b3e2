//! Backup-file inference: the fixed set of sibling suffixes probed for
//! stale variants of a cataloged name.

/// Suffixes appended to a catalog name to form candidate backup siblings.
///
/// Each is probed independently; a name can have several backups at once.
pub const BACKUP_SUFFIXES: [&str; 4] = ["~", ".bak", ".old", ".swp"];

/// Candidate backup names for a catalog entry, in probe order.
pub fn backup_names(name: &str) -> impl Iterator<Item = String> + '_ {
    BACKUP_SUFFIXES
        .iter()
        .map(move |suffix| format!("{name}{suffix}"))
}
